use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
};
use unicode_width::UnicodeWidthStr;

use crate::ui::Theme;

/// One-line bar of keyboard hints with a right-aligned summary
pub struct StatusBar<'a> {
    hints: Vec<(&'a str, &'a str)>,
    summary: String,
}

impl<'a> StatusBar<'a> {
    pub fn new(hints: Vec<(&'a str, &'a str)>) -> Self {
        Self {
            hints,
            summary: String::new(),
        }
    }

    /// Set the right-aligned summary text
    pub fn summary(mut self, text: impl Into<String>) -> Self {
        self.summary = text.into();
        self
    }

    pub fn render(self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![Span::styled(" ", Theme::bar())];
        for (i, (key, desc)) in self.hints.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(" · ", Theme::bar()));
            }
            spans.push(Span::styled(key.to_string(), Theme::bar_key()));
            spans.push(Span::styled(format!(" {}", desc), Theme::bar()));
        }

        // Pad the middle so the summary lands on the right edge
        let left_width: usize = spans.iter().map(|s| s.content.width()).sum();
        let gap = (area.width as usize).saturating_sub(left_width + self.summary.width() + 1);
        spans.push(Span::styled(" ".repeat(gap), Theme::bar()));
        spans.push(Span::styled(self.summary, Theme::bar()));

        let bar = Paragraph::new(Line::from(spans)).style(Theme::bar());
        frame.render_widget(bar, area);
    }
}
