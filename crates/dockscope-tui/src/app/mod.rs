//! Application state and actions

mod action;
mod scroll;
mod state;

pub use action::Action;
pub use scroll::{JumpDirection, ScrollAnchor};
pub use state::{AppState, FilterState, UiState};
