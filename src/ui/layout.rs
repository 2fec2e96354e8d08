use ratatui::layout::{Constraint, Direction, Layout, Rect};

pub struct ReviewLayout {
    pub header_area: Rect,
    pub card_area: Rect,
    pub progress_area: Rect,
    pub help_area: Rect,
}

pub struct MenuLayout {
    pub header_area: Rect,
    pub decks_area: Rect,
    pub status_area: Rect,
    pub help_area: Rect,
}

pub struct QuizModalLayout {
    pub progress_area: Rect,
    pub question_area: Rect,
    pub input_area: Rect,
    pub feedback_area: Rect,
    pub help_area: Rect,
}

pub fn calculate_review_chunks(area: Rect) -> ReviewLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(3),
            Constraint::Length(3),
        ])
        .split(area);

    ReviewLayout {
        header_area: chunks[0],
        card_area: chunks[1],
        progress_area: chunks[2],
        help_area: chunks[3],
    }
}

pub fn calculate_menu_chunks(area: Rect) -> MenuLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(3),
            Constraint::Length(3),
        ])
        .split(area);

    MenuLayout {
        header_area: chunks[0],
        decks_area: chunks[1],
        status_area: chunks[2],
        help_area: chunks[3],
    }
}

/// Splits the inside of the quiz modal (borders already removed).
pub fn calculate_quiz_modal_chunks(inner: Rect) -> QuizModalLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(2),
            Constraint::Length(3),
            Constraint::Length(2),
            Constraint::Length(1),
        ])
        .split(inner);

    QuizModalLayout {
        progress_area: chunks[0],
        question_area: chunks[1],
        input_area: chunks[2],
        feedback_area: chunks[3],
        help_area: chunks[4],
    }
}

/// A box `percent_x` wide and `height` rows tall, centered in `area` and clipped to it.
pub fn centered_rect(percent_x: u16, height: u16, area: Rect) -> Rect {
    let width = (area.width as u32 * percent_x.min(100) as u32 / 100) as u16;
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

pub fn contains(area: Rect, column: u16, row: u16) -> bool {
    column >= area.x
        && column < area.x.saturating_add(area.width)
        && row >= area.y
        && row < area.y.saturating_add(area.height)
}
