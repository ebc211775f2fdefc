//! TUI components for dockscope
//!
//! This crate provides the terminal user interface: state management,
//! keybindings, event handling, and the log viewer screen.

pub mod app;
pub mod config;
pub mod tui;
pub mod ui;

pub use app::{Action, AppState, FilterState, JumpDirection, ScrollAnchor, UiState};
pub use config::{KeyBinding, KeyBindings, KeyContext};
pub use tui::{Event, EventHandler, Tui};
pub use ui::Theme;
pub use ui::components::{HelpOverlay, StatusBar};
pub use ui::screens::LogViewerScreen;
