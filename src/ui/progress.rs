use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Modifier, Style},
    text::Line,
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph},
    Frame,
};

use crate::api::{AccuracyBand, ProgressReport};
use crate::ui::menu::help_line;
use crate::ui::theme::Theme;
use crate::utils::truncate_string;

const BAR_WIDTH: u16 = 9;

pub fn draw_progress(f: &mut Frame, theme: &Theme, report: Option<&ProgressReport>, loading: bool) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(3),
        ])
        .split(f.area());

    let title = Paragraph::new("Quiz Accuracy by Set")
        .style(theme.title())
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).border_style(theme.border()));
    f.render_widget(title, chunks[0]);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border())
        .title("Accuracy (%)");

    match report {
        Some(report) if !report.is_empty() => {
            let bars: Vec<Bar> = report
                .entries()
                .map(|(name, pct)| {
                    let color = theme.band(AccuracyBand::from_accuracy(pct));
                    Bar::default()
                        .value(pct.round() as u64)
                        .text_value(format!("{:.0}%", pct))
                        .label(Line::from(truncate_string(name, BAR_WIDTH as usize)))
                        .style(Style::default().fg(color))
                        .value_style(Style::default().fg(theme.background).bg(color))
                })
                .collect();

            let chart = BarChart::default()
                .block(block)
                .data(BarGroup::default().bars(&bars))
                .bar_width(BAR_WIDTH)
                .bar_gap(2)
                .max(100);
            f.render_widget(chart, chunks[1]);
        }
        _ => {
            let message = if loading {
                "Loading progress..."
            } else {
                "No quiz results yet. Finish a quiz to see your accuracy here."
            };
            let empty = Paragraph::new(message)
                .style(Style::default().fg(theme.muted).add_modifier(Modifier::ITALIC))
                .alignment(Alignment::Center)
                .block(block);
            f.render_widget(empty, chunks[1]);
        }
    }

    let help = Paragraph::new(help_line(theme, &[("r", "Refresh"), ("Esc", "Menu")]))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).border_style(theme.border()));
    f.render_widget(help, chunks[2]);
}
