use tokio::sync::mpsc;

use dockscope_logs::CompiledFilter;
use dockscope_types::TargetIdentity;

use super::{Action, ScrollAnchor};

/// Filter editing and matching state for the log viewer
pub struct FilterState {
    /// Input line currently being edited
    pub input: String,

    /// Is the input line open?
    pub editing: bool,

    /// Compiled filter currently applied (None = show all)
    pub active: Option<CompiledFilter>,

    /// Compile error from the last apply attempt
    pub error: Option<String>,

    /// Case insensitive matching?
    pub case_insensitive: bool,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            input: String::new(),
            editing: false,
            active: None,
            error: None,
            case_insensitive: true,
        }
    }
}

impl FilterState {
    /// Open the input line for editing
    pub fn begin(&mut self) {
        self.editing = true;
        self.input.clear();
        self.error = None;
    }

    /// Abandon editing and drop any applied filter
    pub fn cancel(&mut self) {
        self.editing = false;
        self.clear();
    }

    pub fn push(&mut self, c: char) {
        self.input.push(c);
    }

    pub fn pop(&mut self) {
        self.input.pop();
    }

    /// Compile the current input; on a bad pattern the input stays open
    /// with the error shown
    pub fn apply(&mut self) {
        self.editing = false;
        self.error = None;

        if self.input.is_empty() {
            self.active = None;
            return;
        }

        match CompiledFilter::compile(&self.input, self.case_insensitive) {
            Ok(filter) => self.active = Some(filter),
            Err(e) => {
                self.error = Some(format!("Invalid regex: {}", e));
                self.editing = true;
            }
        }
    }

    /// Drop the applied filter and any error
    pub fn clear(&mut self) {
        self.active = None;
        self.input.clear();
        self.error = None;
    }

    /// Flip case sensitivity, recompiling the applied filter if any
    pub fn toggle_case(&mut self) {
        self.case_insensitive = !self.case_insensitive;
        if let Some(filter) = &self.active {
            self.input = filter.pattern().to_string();
            self.apply();
        }
    }

    /// Whether the filter bar needs screen space
    pub fn is_visible(&self) -> bool {
        self.editing || self.active.is_some() || self.error.is_some()
    }
}

/// UI-specific transient state
pub struct UiState {
    /// Scroll position in the log viewer
    pub scroll: usize,

    /// Follow mode: stick to the newest entries
    pub follow: bool,

    /// Show timestamp tags?
    pub show_timestamps: bool,

    /// Is help overlay visible?
    pub help_visible: bool,

    /// Error message to display (if any)
    pub error_message: Option<String>,

    /// Filter bar state
    pub filter: FilterState,

    /// Jump direction derived from the viewport scroll position
    pub scroll_anchor: ScrollAnchor,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            scroll: 0,
            follow: true,
            show_timestamps: true,
            help_visible: false,
            error_message: None,
            filter: FilterState::default(),
            scroll_anchor: ScrollAnchor::default(),
        }
    }
}

/// Global application state
pub struct AppState {
    /// Server whose containers are being followed
    pub server_id: String,

    /// Container ids available for cycling
    pub containers: Vec<String>,

    /// Index of the container currently followed
    pub selected: usize,

    /// UI state
    pub ui_state: UiState,

    /// Whether app should quit
    pub should_quit: bool,

    /// Channel sender for async actions
    pub action_tx: mpsc::UnboundedSender<Action>,
}

impl AppState {
    pub fn new(
        server_id: String,
        containers: Vec<String>,
        action_tx: mpsc::UnboundedSender<Action>,
    ) -> Self {
        Self {
            server_id,
            containers,
            selected: 0,
            ui_state: UiState::default(),
            should_quit: false,
            action_tx,
        }
    }

    /// Identity of the stream currently selected for following
    pub fn current_target(&self) -> Option<TargetIdentity> {
        let container = self.containers.get(self.selected)?;
        Some(TargetIdentity::new(
            self.server_id.clone(),
            container.clone(),
        ))
    }

    /// Select the next container, wrapping around; true if it changed
    pub fn select_next_container(&mut self) -> bool {
        if self.containers.len() < 2 {
            return false;
        }
        self.selected = (self.selected + 1) % self.containers.len();
        true
    }

    /// Select the previous container, wrapping around; true if it changed
    pub fn select_prev_container(&mut self) -> bool {
        if self.containers.len() < 2 {
            return false;
        }
        self.selected = self
            .selected
            .checked_sub(1)
            .unwrap_or(self.containers.len() - 1);
        true
    }

    /// Show an error message
    pub fn show_error(&mut self, msg: String) {
        self.ui_state.error_message = Some(msg);
    }

    /// Dismiss the error message
    pub fn dismiss_error(&mut self) {
        self.ui_state.error_message = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(containers: &[&str]) -> AppState {
        let (tx, _rx) = mpsc::unbounded_channel();
        AppState::new(
            "server-1".into(),
            containers.iter().map(|c| c.to_string()).collect(),
            tx,
        )
    }

    #[test]
    fn test_container_cycling_wraps() {
        let mut state = state(&["a", "b", "c"]);
        assert!(state.select_next_container());
        assert_eq!(state.selected, 1);
        assert!(state.select_next_container());
        assert!(state.select_next_container());
        assert_eq!(state.selected, 0);

        assert!(state.select_prev_container());
        assert_eq!(state.selected, 2);
    }

    #[test]
    fn test_single_container_does_not_cycle() {
        let mut state = state(&["only"]);
        assert!(!state.select_next_container());
        assert!(!state.select_prev_container());
        assert_eq!(state.selected, 0);
    }

    #[test]
    fn test_current_target_tracks_selection() {
        let mut state = state(&["a", "b"]);
        assert_eq!(
            state.current_target(),
            Some(TargetIdentity::new("server-1", "a"))
        );
        state.select_next_container();
        assert_eq!(
            state.current_target(),
            Some(TargetIdentity::new("server-1", "b"))
        );
    }

    #[test]
    fn test_invalid_filter_keeps_input_open() {
        let mut filter = FilterState::default();
        filter.begin();
        filter.input = "(unclosed".into();
        filter.apply();
        assert!(filter.editing);
        assert!(filter.error.is_some());
        assert!(filter.active.is_none());
    }

    #[test]
    fn test_apply_and_clear_filter() {
        let mut filter = FilterState::default();
        filter.begin();
        for c in "error".chars() {
            filter.push(c);
        }
        filter.apply();
        assert!(filter.active.is_some());
        assert!(!filter.editing);
        assert!(filter.is_visible());

        filter.clear();
        assert!(filter.active.is_none());
        assert!(filter.input.is_empty());
        assert!(!filter.is_visible());
    }

    #[test]
    fn test_toggle_case_recompiles_active_filter() {
        let mut filter = FilterState::default();
        filter.begin();
        filter.input = "ERROR".into();
        filter.apply();
        assert!(filter.case_insensitive);

        filter.toggle_case();
        assert!(!filter.case_insensitive);
        let active = filter.active.as_ref().unwrap();
        assert_eq!(active.pattern(), "ERROR");
        assert!(!active.is_case_insensitive());
    }
}
