use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::ui::Theme;

/// Keybinding sections shown in the help popup
const SECTIONS: &[(&str, &[(&str, &str)])] = &[
    (
        "Navigation",
        &[
            ("j/↓", "Scroll down"),
            ("k/↑", "Scroll up"),
            ("Ctrl+d", "Page down"),
            ("Ctrl+u", "Page up"),
            ("g", "Go to top"),
            ("G", "Go to bottom"),
            ("Space", "Jump to nearest end"),
        ],
    ),
    (
        "Stream",
        &[
            ("Tab/]", "Next container"),
            ("[", "Previous container"),
            ("r", "Reconnect"),
            ("c", "Clear logs"),
        ],
    ),
    (
        "Display",
        &[
            ("f", "Toggle follow mode"),
            ("t", "Toggle timestamps"),
            ("/", "Filter logs"),
            ("n", "Clear filter"),
            ("?", "Toggle this help"),
            ("q", "Quit"),
        ],
    ),
];

/// Help overlay showing keybindings
pub struct HelpOverlay;

impl HelpOverlay {
    pub fn render(frame: &mut Frame) {
        let area = frame.area();

        let line_count: usize =
            SECTIONS.iter().map(|(_, keys)| keys.len() + 1).sum::<usize>() + SECTIONS.len() - 1;
        let width = 46.min(area.width.saturating_sub(4));
        let height = (line_count as u16 + 2).min(area.height.saturating_sub(2));

        let popup = Rect::new(
            area.x + area.width.saturating_sub(width) / 2,
            area.y + area.height.saturating_sub(height) / 2,
            width,
            height,
        );

        frame.render_widget(Clear, popup);

        let mut lines = Vec::with_capacity(line_count);
        for (i, (section, keys)) in SECTIONS.iter().enumerate() {
            if i > 0 {
                lines.push(Line::from(""));
            }
            lines.push(Line::from(Span::styled(
                *section,
                Style::default().fg(Color::Yellow),
            )));
            for (key, desc) in keys.iter() {
                lines.push(Line::from(vec![
                    Span::styled(format!("  {:>7}", key), Style::default().fg(Color::Green)),
                    Span::styled(format!("  {}", desc), Theme::text()),
                ]));
            }
        }

        let widget = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Theme::title())
                .title(Span::styled(" Help ", Theme::title())),
        );

        frame.render_widget(widget, popup);
    }
}
