use ratatui::{
    layout::Alignment,
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::ui::layout::centered_rect;
use crate::ui::theme::Theme;

/// Blocking message box; the app swallows the next key to dismiss it.
pub fn draw_alert(f: &mut Frame, theme: &Theme, message: &str) {
    let popup = centered_rect(60, 7, f.area());
    f.render_widget(Clear, popup);

    let paragraph = Paragraph::new(vec![
        Line::from(message.to_string()),
        Line::from(""),
        Line::styled(
            "Press any key to continue",
            Style::default().fg(theme.muted).add_modifier(Modifier::ITALIC),
        ),
    ])
    .style(theme.base())
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true })
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.poor))
            .title("Alert"),
    );
    f.render_widget(paragraph, popup);
}
