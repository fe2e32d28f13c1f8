use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::{
    app::App,
    session_log::{Analytics, NO_BEST_DAY},
    ui::key_legend,
    util::{format_hours_minutes, format_percent},
};

const ANALYTICS_KEYS: &[(&str, &str)] = &[("b", "back"), ("q", "quit")];

/// Pure presenter for the three summary lines
pub fn summary_lines(analytics: &Analytics) -> [String; 3] {
    [
        format!(
            "Total Study Time: {}",
            format_hours_minutes(analytics.total_focused_seconds)
        ),
        format!(
            "Average Focus Score: {}%",
            format_percent((analytics.valid_rows > 0).then_some(analytics.average_focus_score))
        ),
        format!(
            "Best Day: {} ({}%)",
            analytics.best_day,
            format_percent((analytics.best_day != NO_BEST_DAY).then_some(analytics.best_score))
        ),
    ]
}

pub fn render_analytics(app: &App, f: &mut Frame) {
    let theme = &app.theme;
    let area = f.area();
    let analytics = app.analytics.clone().unwrap_or_default();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(2)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(0),    // Summary
            Constraint::Length(1), // Skipped rows note
            Constraint::Length(1), // Instructions
        ])
        .split(area);

    let title = Paragraph::new("Analytics Overview")
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.subtext)),
        )
        .style(
            Style::default()
                .fg(theme.primary)
                .bg(theme.bg)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center);
    f.render_widget(title, chunks[0]);

    let text_style = Style::default().fg(theme.text);
    let mut lines = vec![Line::from("")];
    for stat in summary_lines(&analytics) {
        lines.push(Line::from(Span::styled(stat, text_style)));
        lines.push(Line::from(""));
    }
    let summary = Paragraph::new(lines)
        .style(Style::default().bg(theme.card))
        .alignment(Alignment::Center);
    f.render_widget(summary, chunks[1]);

    if analytics.skipped_rows > 0 {
        let note = Paragraph::new(Span::styled(
            format!("{} unreadable rows ignored", analytics.skipped_rows),
            Style::default()
                .fg(theme.subtext)
                .add_modifier(Modifier::ITALIC),
        ))
        .alignment(Alignment::Center);
        f.render_widget(note, chunks[2]);
    }

    let legend = Paragraph::new(key_legend(
        ANALYTICS_KEYS,
        Style::default()
            .fg(theme.primary)
            .add_modifier(Modifier::BOLD),
        Style::default().fg(theme.subtext),
    ))
    .alignment(Alignment::Center);
    f.render_widget(legend, chunks[3]);
}
