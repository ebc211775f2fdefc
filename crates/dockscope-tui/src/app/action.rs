/// All possible actions in the application (command pattern)
#[derive(Clone, Debug)]
pub enum Action {
    Quit,
    GoBack,

    // Log viewer scrolling
    ScrollUp(usize),
    ScrollDown(usize),
    PageUp,
    PageDown,
    ScrollToTop,
    ScrollToBottom,
    ToggleAutoScroll,
    JumpToAnchor,

    // Display toggles
    ToggleTimestamps,
    ToggleHelp,

    // Stream control
    NextContainer,
    PrevContainer,
    Reconnect,
    ClearLogs,

    // Filter in log viewer
    OpenSearch,
    CloseSearch,
    SearchInput(char),
    SearchBackspace,
    ApplyFilter,
    ClearFilter,
    ToggleCaseSensitive,

    // Error handling
    ShowError(String),
    DismissError,

    // Render request
    Render,
}
