pub mod analytics;
pub mod screen;

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::app::{App, Status};

const HORIZONTAL_MARGIN: u16 = 2;
const VERTICAL_MARGIN: u16 = 1;

/// Key legend shown under the timer
const TIMER_KEYS: &[(&str, &str)] = &[
    ("s", "start"),
    ("x", "stop"),
    ("r", "reset"),
    ("w", "save session"),
    ("a", "analytics"),
    ("t", "theme"),
    ("q", "quit"),
];

pub fn key_legend(keys: &[(&str, &str)], key_style: Style, text_style: Style) -> Line<'static> {
    let mut spans = Vec::with_capacity(keys.len() * 2);
    for (idx, (key, label)) in keys.iter().enumerate() {
        if idx > 0 {
            spans.push(Span::styled("   ", text_style));
        }
        spans.push(Span::styled(key.to_string(), key_style));
        spans.push(Span::styled(format!(" {label}"), text_style));
    }
    Line::from(spans)
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let theme = &self.theme;
        let bold_style = Style::default().add_modifier(Modifier::BOLD);
        let bg_style = Style::default().bg(theme.bg);

        buf.set_style(area, bg_style);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .vertical_margin(VERTICAL_MARGIN)
            .constraints([
                Constraint::Length(1), // title
                Constraint::Length(2), // subtitle
                Constraint::Min(7),    // card
                Constraint::Length(1), // status
                Constraint::Length(1), // legend
            ])
            .split(area);

        Paragraph::new(Span::styled(
            "FocusGuard",
            bold_style.fg(theme.primary),
        ))
        .alignment(Alignment::Center)
        .render(chunks[0], buf);

        Paragraph::new(Span::styled(
            "Build focus. Measure progress.",
            Style::default().fg(theme.subtext),
        ))
        .alignment(Alignment::Center)
        .render(chunks[1], buf);

        let card = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.subtext))
            .style(Style::default().bg(theme.card));
        let inner = card.inner(chunks[2]);
        card.render(chunks[2], buf);

        let card_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(0),
                Constraint::Length(1), // timer
                Constraint::Length(1), // padding
                Constraint::Length(1), // focus label
                Constraint::Length(1), // running state
                Constraint::Min(0),
            ])
            .split(inner);

        Paragraph::new(Span::styled(
            self.clock.timer_text(),
            bold_style.fg(theme.primary),
        ))
        .alignment(Alignment::Center)
        .render(card_chunks[1], buf);

        Paragraph::new(Span::styled(
            self.focus_label.clone(),
            Style::default().fg(theme.subtext),
        ))
        .alignment(Alignment::Center)
        .render(card_chunks[3], buf);

        let (state_text, state_color) = if self.clock.is_running() {
            ("running", theme.accent)
        } else {
            ("stopped", theme.secondary)
        };
        Paragraph::new(Span::styled(
            state_text,
            Style::default()
                .fg(state_color)
                .add_modifier(Modifier::ITALIC),
        ))
        .alignment(Alignment::Center)
        .render(card_chunks[4], buf);

        if let Some(status) = &self.status {
            let (text, color) = match status {
                Status::Info(msg) => (msg.as_str(), theme.info),
                Status::Error(msg) => (msg.as_str(), theme.danger),
            };
            Paragraph::new(Span::styled(text.to_string(), Style::default().fg(color)))
                .alignment(Alignment::Center)
                .render(chunks[3], buf);
        }

        Paragraph::new(key_legend(
            TIMER_KEYS,
            bold_style.fg(theme.primary),
            Style::default().fg(theme.subtext),
        ))
        .alignment(Alignment::Center)
        .render(chunks[4], buf);
    }
}
