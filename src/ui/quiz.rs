use ratatui::{
    layout::Alignment,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::quiz::{Feedback, QuizPhase, QuizSession};
use crate::ui::layout::{calculate_quiz_modal_chunks, centered_rect};
use crate::ui::menu::help_line;
use crate::ui::theme::Theme;
use crate::utils::cursor_column;

/// Modal drawn over the review screen while a quiz is open.
pub fn draw_quiz_modal(f: &mut Frame, theme: &Theme, session: &QuizSession) {
    if !session.is_open() {
        return;
    }

    let popup = centered_rect(70, 14, f.area());
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.accent))
        .title("Quiz")
        .style(theme.base());
    let inner = block.inner(popup);
    f.render_widget(block, popup);

    let layout = calculate_quiz_modal_chunks(inner);

    if session.phase() == QuizPhase::Complete {
        let summary = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(session.summary_text(), theme.title())),
        ])
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
        f.render_widget(summary, layout.question_area);

        let help = Paragraph::new(help_line(theme, &[("Enter/Esc", "Close")]))
            .alignment(Alignment::Center);
        f.render_widget(help, layout.help_area);
        return;
    }

    let progress = Paragraph::new(session.progress_text())
        .style(Style::default().fg(theme.muted))
        .alignment(Alignment::Center);
    f.render_widget(progress, layout.progress_area);

    let question = Paragraph::new(session.current_question().unwrap_or(""))
        .style(Style::default().fg(theme.text).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(question, layout.question_area);

    // Answer controls disappear while the feedback is showing.
    if session.accepts_input() {
        let input_text = if session.input_buffer.is_empty() {
            Span::styled(
                "[Type your answer...]",
                Style::default().fg(theme.muted).add_modifier(Modifier::ITALIC),
            )
        } else {
            Span::from(session.input_buffer.clone())
        };
        let input = Paragraph::new(Line::from(input_text)).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.border())
                .title("Your Answer"),
        );
        f.render_widget(input, layout.input_area);

        let text_width = layout.input_area.width.saturating_sub(2);
        let col = cursor_column(&session.input_buffer, session.cursor_position) as u16;
        let cursor_x = layout.input_area.x + 1 + col.min(text_width.saturating_sub(1));
        f.set_cursor_position((cursor_x, layout.input_area.y + 1));
    }

    if let Some(feedback) = session.feedback() {
        let color = match feedback {
            Feedback::Correct => theme.good,
            Feedback::Incorrect { .. } => theme.poor,
        };
        let message = Paragraph::new(feedback.message())
            .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        f.render_widget(message, layout.feedback_area);
    }

    let help = Paragraph::new(help_line(theme, &[("Enter", "Submit"), ("Esc", "Close")]))
        .alignment(Alignment::Center);
    f.render_widget(help, layout.help_area);
}
