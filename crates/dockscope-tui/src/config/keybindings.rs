use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

use crate::app::Action;

/// A key combination
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct KeyBinding {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBinding {
    pub fn plain(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: KeyModifiers::NONE,
        }
    }

    pub fn ctrl(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: KeyModifiers::CONTROL,
        }
    }

    pub fn shift(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: KeyModifiers::SHIFT,
        }
    }

    pub fn from_event(event: &KeyEvent) -> Self {
        Self {
            code: event.code,
            modifiers: event.modifiers,
        }
    }
}

/// Context for keybindings
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyContext {
    Global,
    LogViewer,
}

/// Keybinding configuration
pub struct KeyBindings {
    bindings: HashMap<KeyContext, HashMap<KeyBinding, Action>>,
}

impl KeyBindings {
    pub fn new() -> Self {
        use KeyCode::{BackTab, Char, End, Esc, Home, Tab};

        let global = [
            (KeyBinding::plain(Char('q')), Action::Quit),
            (KeyBinding::ctrl(Char('c')), Action::Quit),
            (KeyBinding::plain(Char('?')), Action::ToggleHelp),
            (KeyBinding::plain(Esc), Action::GoBack),
        ];

        let log_viewer = [
            // Line and page navigation, less-style
            (KeyBinding::plain(Char('j')), Action::ScrollDown(1)),
            (KeyBinding::plain(KeyCode::Down), Action::ScrollDown(1)),
            (KeyBinding::plain(Char('k')), Action::ScrollUp(1)),
            (KeyBinding::plain(KeyCode::Up), Action::ScrollUp(1)),
            (KeyBinding::ctrl(Char('d')), Action::PageDown),
            (KeyBinding::ctrl(Char('u')), Action::PageUp),
            (KeyBinding::plain(KeyCode::PageDown), Action::PageDown),
            (KeyBinding::plain(KeyCode::PageUp), Action::PageUp),
            (KeyBinding::plain(Char('g')), Action::ScrollToTop),
            (KeyBinding::shift(Char('G')), Action::ScrollToBottom),
            (KeyBinding::plain(Home), Action::ScrollToTop),
            (KeyBinding::plain(End), Action::ScrollToBottom),
            // The jump control
            (KeyBinding::plain(Char(' ')), Action::JumpToAnchor),
            // Stream control
            (KeyBinding::plain(Tab), Action::NextContainer),
            (KeyBinding::shift(BackTab), Action::PrevContainer),
            (KeyBinding::plain(Char(']')), Action::NextContainer),
            (KeyBinding::plain(Char('[')), Action::PrevContainer),
            (KeyBinding::plain(Char('r')), Action::Reconnect),
            (KeyBinding::plain(Char('c')), Action::ClearLogs),
            // Display
            (KeyBinding::plain(Char('f')), Action::ToggleAutoScroll),
            (KeyBinding::plain(Char('t')), Action::ToggleTimestamps),
            (KeyBinding::plain(Char('/')), Action::OpenSearch),
            (KeyBinding::plain(Char('n')), Action::ClearFilter),
            (KeyBinding::plain(Char('i')), Action::ToggleCaseSensitive),
        ];

        let mut bindings = HashMap::new();
        bindings.insert(KeyContext::Global, global.into_iter().collect());
        bindings.insert(KeyContext::LogViewer, log_viewer.into_iter().collect());

        Self { bindings }
    }

    /// Look up the action for a key, falling back to global bindings
    pub fn get_action(&self, context: KeyContext, event: &KeyEvent) -> Option<Action> {
        let key = KeyBinding::from_event(event);
        [context, KeyContext::Global]
            .iter()
            .find_map(|ctx| self.bindings.get(ctx)?.get(&key))
            .cloned()
    }

    /// Filter input consumes printable characters directly
    pub fn get_filter_input_action(&self, event: &KeyEvent) -> Option<Action> {
        match event.code {
            KeyCode::Esc => Some(Action::CloseSearch),
            KeyCode::Enter => Some(Action::ApplyFilter),
            KeyCode::Backspace => Some(Action::SearchBackspace),
            KeyCode::Char(c) => Some(Action::SearchInput(c)),
            _ => None,
        }
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_context_lookup_with_global_fallback() {
        let bindings = KeyBindings::new();

        let action = bindings.get_action(KeyContext::LogViewer, &key(KeyCode::Char('j')));
        assert!(matches!(action, Some(Action::ScrollDown(1))));

        // 'q' is only bound globally
        let action = bindings.get_action(KeyContext::LogViewer, &key(KeyCode::Char('q')));
        assert!(matches!(action, Some(Action::Quit)));

        let action = bindings.get_action(KeyContext::LogViewer, &key(KeyCode::Char('z')));
        assert!(action.is_none());
    }

    #[test]
    fn test_modifiers_distinguish_bindings() {
        let bindings = KeyBindings::new();
        let plain_d = bindings.get_action(KeyContext::LogViewer, &key(KeyCode::Char('d')));
        assert!(plain_d.is_none());

        let ctrl_d = KeyEvent::new(KeyCode::Char('d'), KeyModifiers::CONTROL);
        let action = bindings.get_action(KeyContext::LogViewer, &ctrl_d);
        assert!(matches!(action, Some(Action::PageDown)));
    }

    #[test]
    fn test_jump_control_binding() {
        let bindings = KeyBindings::new();
        let action = bindings.get_action(KeyContext::LogViewer, &key(KeyCode::Char(' ')));
        assert!(matches!(action, Some(Action::JumpToAnchor)));
    }

    #[test]
    fn test_filter_input_consumes_characters() {
        let bindings = KeyBindings::new();
        assert!(matches!(
            bindings.get_filter_input_action(&key(KeyCode::Char('x'))),
            Some(Action::SearchInput('x'))
        ));
        assert!(matches!(
            bindings.get_filter_input_action(&key(KeyCode::Enter)),
            Some(Action::ApplyFilter)
        ));
        assert!(matches!(
            bindings.get_filter_input_action(&key(KeyCode::Esc)),
            Some(Action::CloseSearch)
        ));
    }
}
