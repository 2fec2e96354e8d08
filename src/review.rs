use crate::error::FlashmindError;
use crate::models::{AppState, Flashcard};
use crossterm::event::{KeyCode, KeyEvent};
use rand::seq::SliceRandom;
use rand::Rng;

/// Passive review of one deck: an ordered card list, a cursor and a flip flag.
#[derive(Debug, Clone)]
pub struct ReviewSession {
    cards: Vec<Flashcard>,
    current_index: usize,
    flipped: bool,
    pub deck_name: String,
    pub set_id: String,
}

impl ReviewSession {
    pub fn new(
        deck_name: impl Into<String>,
        set_id: impl Into<String>,
        cards: Vec<Flashcard>,
    ) -> Result<Self, FlashmindError> {
        if cards.is_empty() {
            return Err(FlashmindError::EmptyDeck);
        }
        Ok(Self {
            cards,
            current_index: 0,
            flipped: false,
            deck_name: deck_name.into(),
            set_id: set_id.into(),
        })
    }

    pub fn cards(&self) -> &[Flashcard] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current(&self) -> &Flashcard {
        &self.cards[self.current_index]
    }

    pub fn is_flipped(&self) -> bool {
        self.flipped
    }

    /// Moves to `index` and shows its question side. Out-of-range indices are ignored.
    pub fn show(&mut self, index: usize) -> bool {
        if index >= self.cards.len() {
            return false;
        }
        self.current_index = index;
        self.flipped = false;
        true
    }

    pub fn next(&mut self) -> bool {
        if self.current_index < self.cards.len().saturating_sub(1) {
            self.show(self.current_index + 1)
        } else {
            false
        }
    }

    pub fn prev(&mut self) -> bool {
        if self.current_index > 0 {
            self.show(self.current_index - 1)
        } else {
            false
        }
    }

    pub fn flip(&mut self) {
        self.flipped = !self.flipped;
    }

    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
        self.show(0);
    }

    /// `(value, max)` for the progress gauge.
    pub fn progress(&self) -> (usize, usize) {
        (self.current_index + 1, self.cards.len())
    }

    pub fn counter_text(&self) -> String {
        format!("{} / {}", self.current_index + 1, self.cards.len())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Swipe {
    Prev,
    Next,
    Tap,
}

/// A drag to the right goes back, a drag to the left goes forward, anything shorter is a tap.
pub fn classify_swipe(start_x: i32, end_x: i32, threshold: i32) -> Swipe {
    if end_x - start_x > threshold {
        Swipe::Prev
    } else if start_x - end_x > threshold {
        Swipe::Next
    } else {
        Swipe::Tap
    }
}

/// Remembers where a press on the card began until the matching release.
#[derive(Debug, Default)]
pub struct SwipeTracker {
    start_x: Option<i32>,
}

impl SwipeTracker {
    pub fn press(&mut self, x: i32) {
        self.start_x = Some(x);
    }

    pub fn release(&mut self, x: i32, threshold: i32) -> Option<Swipe> {
        self.start_x
            .take()
            .map(|start| classify_swipe(start, x, threshold))
    }

    pub fn cancel(&mut self) {
        self.start_x = None;
    }
}

pub fn apply_swipe(session: &mut ReviewSession, swipe: Swipe) {
    match swipe {
        Swipe::Prev => {
            session.prev();
        }
        Swipe::Next => {
            session.next();
        }
        Swipe::Tap => session.flip(),
    }
}

/// Things a review key asks of the surrounding application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewAction {
    None,
    ExportCsv,
    StartQuiz,
    ToggleDarkMode,
}

pub fn handle_review_input(
    session: &mut ReviewSession,
    key: KeyEvent,
    app_state: &mut AppState,
) -> ReviewAction {
    match key.code {
        KeyCode::Right => {
            session.next();
            ReviewAction::None
        }
        KeyCode::Left => {
            session.prev();
            ReviewAction::None
        }
        KeyCode::Char(' ') => {
            session.flip();
            ReviewAction::None
        }
        KeyCode::Char('s') => {
            session.shuffle(&mut rand::thread_rng());
            ReviewAction::None
        }
        KeyCode::Char('e') => ReviewAction::ExportCsv,
        KeyCode::Char('z') => ReviewAction::StartQuiz,
        KeyCode::Char('d') => ReviewAction::ToggleDarkMode,
        KeyCode::Esc | KeyCode::Char('m') => {
            *app_state = AppState::Menu;
            ReviewAction::None
        }
        _ => ReviewAction::None,
    }
}
