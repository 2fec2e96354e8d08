use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
    Frame,
};
use std::path::{Path, PathBuf};

use crate::ui::layout::{calculate_menu_chunks, centered_rect};
use crate::ui::theme::Theme;
use crate::upload::UploadForm;
use crate::utils::truncate_string;

fn deck_label(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

pub fn help_line(theme: &Theme, keys: &[(&str, &str)]) -> Line<'static> {
    let mut spans = Vec::new();
    for (key, label) in keys {
        spans.push(Span::styled(key.to_string(), theme.key()));
        spans.push(Span::from(format!(" {}  ", label)));
    }
    Line::from(spans)
}

pub fn draw_menu(
    f: &mut Frame,
    theme: &Theme,
    decks: &[PathBuf],
    selected_index: usize,
    status: Option<&str>,
) {
    let layout = calculate_menu_chunks(f.area());

    let title = Paragraph::new("FlashMind")
        .style(theme.title())
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).border_style(theme.border()));
    f.render_widget(title, layout.header_area);

    let max_width = layout.decks_area.width.saturating_sub(4) as usize;
    let items: Vec<ListItem> = if decks.is_empty() {
        vec![ListItem::new("No decks found").style(
            Style::default()
                .fg(theme.muted)
                .add_modifier(Modifier::ITALIC),
        )]
    } else {
        decks
            .iter()
            .enumerate()
            .map(|(i, path)| {
                let style = if i == selected_index {
                    Style::default()
                        .fg(theme.selected)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(theme.text)
                };
                ListItem::new(truncate_string(&deck_label(path), max_width)).style(style)
            })
            .collect()
    };

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(theme.border())
            .title("Decks"),
    );
    f.render_widget(list, layout.decks_area);

    draw_status(f, theme, status, layout.status_area);

    let help = Paragraph::new(help_line(
        theme,
        &[
            ("↑/↓", "Navigate"),
            ("Enter", "Review"),
            ("u", "Upload Notes"),
            ("p", "Progress"),
            ("d", "Dark Mode"),
            ("q", "Quit"),
        ],
    ))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL).border_style(theme.border()));
    f.render_widget(help, layout.help_area);
}

pub fn draw_status(f: &mut Frame, theme: &Theme, status: Option<&str>, area: Rect) {
    let text = status.unwrap_or("");
    let paragraph = Paragraph::new(text)
        .style(Style::default().fg(theme.muted))
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.border())
                .title("Status"),
        );
    f.render_widget(paragraph, area);
}

/// Popup over the menu where the notes file path is typed.
pub fn draw_upload_prompt(f: &mut Frame, theme: &Theme, form: &UploadForm) {
    let popup = centered_rect(70, 8, f.area());
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.accent))
        .title("Upload Notes (.txt, .docx, .pdf)")
        .style(theme.base());
    let inner = block.inner(popup);
    f.render_widget(block, popup);

    let mut lines = vec![
        Line::from(Span::styled("File path:", theme.title())),
        Line::from(if form.path_buffer.is_empty() {
            Span::styled(
                "[Type a path...]",
                Style::default().fg(theme.muted).add_modifier(Modifier::ITALIC),
            )
        } else {
            Span::from(form.path_buffer.clone())
        }),
        Line::from(""),
    ];
    if let Some(status) = form.status_text() {
        lines.push(Line::from(Span::styled(status, Style::default().fg(theme.muted))));
    }
    lines.push(help_line(theme, &[("Enter", "Upload"), ("Esc", "Back")]));

    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);

    if !form.is_processing() && inner.height > 1 {
        let col = crate::utils::cursor_column(&form.path_buffer, form.path_buffer.chars().count());
        let x = inner.x + (col as u16).min(inner.width.saturating_sub(1));
        f.set_cursor_position((x, inner.y + 1));
    }
}
