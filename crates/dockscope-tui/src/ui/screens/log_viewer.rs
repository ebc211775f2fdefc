use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Margin, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use dockscope_logs::LogBuffer;
use dockscope_types::{ConnectionStatus, LogEntry};

use crate::app::AppState;
use crate::ui::Theme;
use crate::ui::components::StatusBar;

/// Log viewer screen
pub struct LogViewerScreen;

impl LogViewerScreen {
    pub fn render(
        frame: &mut Frame,
        state: &mut AppState,
        buffer: &LogBuffer,
        status: ConnectionStatus,
    ) {
        let area = frame.area();

        let show_filter_bar = state.ui_state.filter.is_visible();
        let show_error_bar = state.ui_state.error_message.is_some();

        // Build constraints based on what's visible
        let mut constraints = vec![Constraint::Length(3)]; // Header always
        if show_filter_bar {
            constraints.push(Constraint::Length(3)); // Filter bar
        }
        constraints.push(Constraint::Min(1)); // Logs
        if show_error_bar {
            constraints.push(Constraint::Length(1)); // Error line
        }
        constraints.push(Constraint::Length(1)); // Status bar

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(area);

        let mut idx = 0;

        Self::render_header(frame, chunks[idx], state, status);
        idx += 1;

        if show_filter_bar {
            Self::render_filter_bar(frame, chunks[idx], state);
            idx += 1;
        }

        Self::render_logs(frame, chunks[idx], state, buffer, status);
        idx += 1;

        if show_error_bar {
            Self::render_error_bar(frame, chunks[idx], state);
            idx += 1;
        }

        Self::render_status_bar(frame, chunks[idx], state, buffer, status);
    }

    fn render_header(frame: &mut Frame, area: Rect, state: &AppState, status: ConnectionStatus) {
        let container = state
            .containers
            .get(state.selected)
            .map(String::as_str)
            .unwrap_or("?");

        let mut spans = vec![
            Span::styled("dockscope", Theme::title()),
            Span::styled(" │ ", Theme::text_dim()),
            Span::styled(state.server_id.as_str(), Theme::text()),
            Span::styled(" │ ", Theme::text_dim()),
            Span::styled(container, Theme::text_highlight()),
        ];

        if state.containers.len() > 1 {
            spans.push(Span::styled(
                format!(" ({}/{})", state.selected + 1, state.containers.len()),
                Theme::text_dim(),
            ));
        }

        spans.push(Span::styled(" │ ", Theme::text_dim()));
        spans.push(Span::styled(
            format!("● {}", status.as_str()),
            Theme::status_badge(status),
        ));

        let header = Paragraph::new(Line::from(spans)).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Theme::border()),
        );

        frame.render_widget(header, area);
    }

    fn render_filter_bar(frame: &mut Frame, area: Rect, state: &AppState) {
        let filter = &state.ui_state.filter;
        let mut spans = vec![];

        // Prompt and pattern
        if filter.editing {
            spans.push(Span::styled(" /", Theme::text_highlight()));
            spans.push(Span::styled(filter.input.clone(), Theme::text_highlight()));
            spans.push(Span::styled(
                "█",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::SLOW_BLINK),
            ));
        } else if let Some(active) = &filter.active {
            spans.push(Span::styled(" Filter: ", Theme::text_dim()));
            spans.push(Span::styled(
                active.pattern().to_string(),
                Theme::text_highlight(),
            ));
        }

        if let Some(err) = &filter.error {
            spans.push(Span::styled(format!(" ⚠ {}", err), Theme::error()));
        }

        // Case sensitivity indicator
        let case_text = if filter.case_insensitive {
            "  [i] case-insensitive"
        } else {
            "  [I] case-sensitive"
        };
        spans.push(Span::styled(case_text, Theme::text_dim()));

        // Hints
        if filter.editing {
            spans.push(Span::styled(
                "  [Enter] Apply  [Esc] Cancel",
                Theme::text_dim(),
            ));
        } else if filter.active.is_some() {
            spans.push(Span::styled("  [n] Clear  [/] Edit", Theme::text_dim()));
        }

        let border_style = if filter.editing {
            Theme::text_highlight()
        } else if filter.error.is_some() {
            Theme::error()
        } else {
            Theme::border()
        };

        let filter_bar = Paragraph::new(Line::from(spans)).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .title(Span::styled(" Filter ", Theme::title())),
        );

        frame.render_widget(filter_bar, area);
    }

    fn render_logs(
        frame: &mut Frame,
        area: Rect,
        state: &mut AppState,
        buffer: &LogBuffer,
        status: ConnectionStatus,
    ) {
        let entries = buffer.snapshot();
        let had_entries = !entries.is_empty();

        let visible: Vec<LogEntry> = match &state.ui_state.filter.active {
            Some(filter) => entries.into_iter().filter(|e| filter.matches(e)).collect(),
            None => entries,
        };

        let total = visible.len();
        let inner_height = area.height.saturating_sub(2) as usize;

        // Follow mode: stick to the newest entries
        if state.ui_state.follow && total > 0 {
            state.ui_state.scroll = total.saturating_sub(inner_height);
        }

        // Clamp to the actual bottom
        let max_scroll = total.saturating_sub(inner_height);
        state.ui_state.scroll = state.ui_state.scroll.min(max_scroll);

        // Report the viewport position so the jump control knows which
        // end of the buffer is nearer
        state
            .ui_state
            .scroll_anchor
            .observe(state.ui_state.scroll, max_scroll);

        let inner_width = area.width.saturating_sub(4) as usize;

        let title = if state.ui_state.filter.active.is_some() {
            format!(" Logs ({} matching) ", total)
        } else {
            format!(" Logs ({}) ", total)
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Theme::border())
            .title(Span::styled(title, Theme::title()));

        if total == 0 {
            let message = if had_entries {
                "No matching logs"
            } else {
                // Empty states mirror the connection lifecycle
                match status {
                    ConnectionStatus::Connecting => "Connecting...",
                    ConnectionStatus::Closed => "Connection closed",
                    _ => "No logs",
                }
            };
            let empty = Paragraph::new(Line::from(Span::styled(message, Theme::text_dim())))
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(empty, area);
            return;
        }

        let lines: Vec<Line> = visible
            .iter()
            .skip(state.ui_state.scroll)
            .take(inner_height)
            .map(|entry| Self::format_log_line(entry, state, inner_width))
            .collect();

        frame.render_widget(Paragraph::new(lines).block(block), area);

        if total > inner_height {
            let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
                .begin_symbol(Some("▲"))
                .end_symbol(Some("▼"));

            let mut scrollbar_state = ScrollbarState::default()
                .content_length(max_scroll)
                .position(state.ui_state.scroll);

            frame.render_stateful_widget(
                scrollbar,
                area.inner(Margin {
                    vertical: 1,
                    horizontal: 0,
                }),
                &mut scrollbar_state,
            );
        }
    }

    /// Format a log entry into one display line
    fn format_log_line(
        entry: &LogEntry,
        state: &AppState,
        available_width: usize,
    ) -> Line<'static> {
        let mut spans = Vec::new();
        let mut prefix_width = 0;

        if state.ui_state.show_timestamps {
            let label = if entry.has_timestamp() {
                format!("{:>8}", entry.timestamp)
            } else {
                " ".repeat(8)
            };
            prefix_width += label.width() + 3;
            spans.push(Span::styled(label, Theme::timestamp()));
            spans.push(Span::styled(" │ ", Theme::text_dim()));
        }

        let message_width = available_width.saturating_sub(prefix_width);
        let display_msg = fit_width(&entry.content, message_width);

        // Highlight filter matches inside the line
        if let Some(filter) = &state.ui_state.filter.active {
            let matches = filter.find_matches(&display_msg);
            if !matches.is_empty() {
                let mut last_end = 0;
                for (start, end) in matches {
                    if start > last_end {
                        spans.push(Span::styled(
                            display_msg[last_end..start].to_string(),
                            Theme::text(),
                        ));
                    }
                    spans.push(Span::styled(
                        display_msg[start..end].to_string(),
                        Theme::match_highlight(),
                    ));
                    last_end = end;
                }
                if last_end < display_msg.len() {
                    spans.push(Span::styled(
                        display_msg[last_end..].to_string(),
                        Theme::text(),
                    ));
                }
                return Line::from(spans);
            }
        }

        spans.push(Span::styled(display_msg, Theme::text()));
        Line::from(spans)
    }

    fn render_error_bar(frame: &mut Frame, area: Rect, state: &AppState) {
        let message = state.ui_state.error_message.as_deref().unwrap_or("");
        let line = Line::from(vec![
            Span::styled(format!(" ⚠ {}", message), Theme::error()),
            Span::styled("  [Esc] Dismiss", Theme::text_dim()),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }

    fn render_status_bar(
        frame: &mut Frame,
        area: Rect,
        state: &AppState,
        buffer: &LogBuffer,
        status: ConnectionStatus,
    ) {
        let jump_hint = format!("Jump {}", state.ui_state.scroll_anchor.direction().glyph());

        let mut hints: Vec<(&str, &str)> = vec![("Space", jump_hint.as_str()), ("/", "Filter")];
        if state.containers.len() > 1 {
            hints.push(("Tab", "Next"));
        }
        hints.push(("r", "Reconnect"));
        hints.push(("?", "Help"));
        hints.push(("q", "Quit"));

        let summary = format!(
            "{} │ {} logs{}",
            status.as_str(),
            buffer.len(),
            if state.ui_state.follow { " ▼" } else { "" }
        );

        StatusBar::new(hints).summary(summary).render(frame, area);
    }
}

/// Truncate to the given display width, appending an ellipsis when cut
fn fit_width(s: &str, max: usize) -> String {
    if s.width() <= max {
        return s.to_string();
    }
    let budget = max.saturating_sub(1);
    let mut width = 0;
    let mut out = String::with_capacity(s.len().min(max * 4));
    for ch in s.chars() {
        let w = ch.width().unwrap_or(0);
        if width + w > budget {
            break;
        }
        width += w;
        out.push(ch);
    }
    out.push('…');
    out
}
