use ratatui::style::{Color, Modifier, Style};

use dockscope_types::ConnectionStatus;

/// Color theme for the application
///
/// The accent follows the teal branding of the web console this tool
/// pairs with; LightCyan is the closest the base palette gets.
pub struct Theme;

impl Theme {
    pub const ACCENT: Color = Color::LightCyan;
    pub const DIM: Color = Color::DarkGray;
    pub const TEXT: Color = Color::White;
    pub const ALERT: Color = Color::Red;

    /// Color for a connection status badge
    pub fn status_color(status: ConnectionStatus) -> Color {
        match status {
            ConnectionStatus::Uninitialized => Self::DIM,
            ConnectionStatus::Connecting => Color::Yellow,
            ConnectionStatus::Open => Color::Green,
            ConnectionStatus::Closed => Self::ALERT,
        }
    }

    pub fn status_badge(status: ConnectionStatus) -> Style {
        Style::default()
            .fg(Self::status_color(status))
            .add_modifier(Modifier::BOLD)
    }

    pub fn border() -> Style {
        Style::default().fg(Self::DIM)
    }

    pub fn title() -> Style {
        Style::default()
            .fg(Self::ACCENT)
            .add_modifier(Modifier::BOLD)
    }

    pub fn text() -> Style {
        Style::default().fg(Self::TEXT)
    }

    pub fn text_dim() -> Style {
        Style::default().fg(Self::DIM)
    }

    pub fn text_highlight() -> Style {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    }

    /// Timestamp tag in front of a log line
    pub fn timestamp() -> Style {
        Style::default().fg(Self::ACCENT)
    }

    /// Filter match inside a log line
    pub fn match_highlight() -> Style {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    }

    // Bottom bar
    pub fn bar() -> Style {
        Style::default().fg(Color::Gray).bg(Color::DarkGray)
    }

    pub fn bar_key() -> Style {
        Style::default()
            .fg(Color::Yellow)
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD)
    }

    pub fn error() -> Style {
        Style::default()
            .fg(Self::ALERT)
            .add_modifier(Modifier::BOLD)
    }
}
