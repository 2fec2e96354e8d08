use ratatui::{
    layout::Alignment,
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, BorderType, Borders, Gauge, Paragraph, Wrap},
    Frame,
};

use crate::review::ReviewSession;
use crate::ui::layout::calculate_review_chunks;
use crate::ui::menu::help_line;
use crate::ui::theme::Theme;

pub fn draw_review(f: &mut Frame, theme: &Theme, session: &ReviewSession, status: Option<&str>) {
    let layout = calculate_review_chunks(f.area());

    let mut header = vec![Span::styled(session.deck_name.clone(), theme.title())];
    if let Some(status) = status {
        header.push(Span::styled(
            format!("  {}", status),
            Style::default().fg(theme.muted),
        ));
    }
    let header = Paragraph::new(Line::from(header))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).border_style(theme.border()));
    f.render_widget(header, layout.header_area);

    let card = session.current();
    let (label, body, card_style) = if session.is_flipped() {
        (
            "Answer",
            card.answer.as_str(),
            Style::default().fg(theme.text).bg(theme.card_flipped),
        )
    } else {
        (
            "Question",
            card.question.as_str(),
            Style::default().fg(theme.text).bg(theme.card),
        )
    };

    let mut text = Text::default();
    text.push_line(Line::from(""));
    text.push_line(Line::from(Span::styled(
        label,
        Style::default()
            .fg(theme.accent)
            .add_modifier(Modifier::BOLD),
    )));
    text.push_line(Line::from(""));
    text.push_line(Line::from(body));

    let card_widget = Paragraph::new(text)
        .style(card_style)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(theme.accent)),
        );
    f.render_widget(card_widget, layout.card_area);

    let (current, total) = session.progress();
    let ratio = if total == 0 {
        0.0
    } else {
        current as f64 / total as f64
    };
    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).border_style(theme.border()))
        .gauge_style(Style::default().fg(theme.accent).bg(theme.background))
        .ratio(ratio.clamp(0.0, 1.0))
        .label(session.counter_text());
    f.render_widget(gauge, layout.progress_area);

    let help = Paragraph::new(help_line(
        theme,
        &[
            ("←/→", "Prev/Next"),
            ("Space", "Flip"),
            ("s", "Shuffle"),
            ("z", "Quiz"),
            ("e", "Export CSV"),
            ("d", "Dark Mode"),
            ("Esc", "Menu"),
        ],
    ))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL).border_style(theme.border()));
    f.render_widget(help, layout.help_area);
}
