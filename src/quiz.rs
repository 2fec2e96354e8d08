use crate::error::FlashmindError;
use crate::models::Flashcard;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::time::{Duration, Instant};

/// Pause between answering and the next question.
pub const ADVANCE_DELAY: Duration = Duration::from_millis(1500);

/// Trimmed, case-insensitive exact comparison. No fuzzy matching.
pub fn answers_match(expected: &str, submitted: &str) -> bool {
    expected.trim().to_lowercase() == submitted.trim().to_lowercase()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizPhase {
    Idle,
    InProgress,
    Complete,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Feedback {
    Correct,
    Incorrect { expected: String },
}

impl Feedback {
    pub fn message(&self) -> String {
        match self {
            Feedback::Correct => "✅ Correct!".to_string(),
            Feedback::Incorrect { expected } => format!("❌ Correct answer: {}", expected),
        }
    }
}

/// Side effects requested by a state transition; the caller performs them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizEffect {
    Celebrate,
    SaveResult { score: usize, total: usize },
}

#[derive(Debug)]
pub struct QuizSession {
    phase: QuizPhase,
    questions: Vec<Flashcard>,
    index: usize,
    score: usize,
    feedback: Option<Feedback>,
    advance_at: Option<Instant>,
    result_emitted: bool,
    pub input_buffer: String,
    pub cursor_position: usize,
}

impl Default for QuizSession {
    fn default() -> Self {
        Self::new()
    }
}

impl QuizSession {
    pub fn new() -> Self {
        Self {
            phase: QuizPhase::Idle,
            questions: Vec::new(),
            index: 0,
            score: 0,
            feedback: None,
            advance_at: None,
            result_emitted: false,
            input_buffer: String::new(),
            cursor_position: 0,
        }
    }

    pub fn phase(&self) -> QuizPhase {
        self.phase
    }

    pub fn is_open(&self) -> bool {
        self.phase != QuizPhase::Idle
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn total(&self) -> usize {
        self.questions.len()
    }

    pub fn feedback(&self) -> Option<&Feedback> {
        self.feedback.as_ref()
    }

    pub fn is_waiting(&self) -> bool {
        self.advance_at.is_some()
    }

    pub fn current_question(&self) -> Option<&str> {
        match self.phase {
            QuizPhase::InProgress => self.questions.get(self.index).map(|c| c.question.as_str()),
            _ => None,
        }
    }

    /// Opens the quiz on the first of `cards`, in their current order.
    pub fn start(&mut self, cards: &[Flashcard]) -> Result<(), FlashmindError> {
        if cards.is_empty() {
            return Err(FlashmindError::EmptyDeck);
        }
        *self = Self {
            phase: QuizPhase::InProgress,
            questions: cards.to_vec(),
            ..Self::new()
        };
        tracing::info!("Quiz started with {} questions", self.questions.len());
        Ok(())
    }

    /// Scores `answer` against the current card. Returns `None` when no answer is expected.
    pub fn submit_answer(&mut self, answer: &str, now: Instant) -> Option<Feedback> {
        if self.phase != QuizPhase::InProgress || self.advance_at.is_some() {
            return None;
        }
        let card = self.questions.get(self.index)?;

        let feedback = if answers_match(&card.answer, answer) {
            self.score += 1;
            Feedback::Correct
        } else {
            Feedback::Incorrect {
                expected: card.answer.clone(),
            }
        };
        tracing::debug!(
            "Question {} answered, correct: {}",
            self.index + 1,
            feedback == Feedback::Correct
        );

        self.feedback = Some(feedback.clone());
        self.advance_at = Some(now + ADVANCE_DELAY);
        Some(feedback)
    }

    /// Fires the pending advance once its deadline has passed.
    pub fn tick(&mut self, now: Instant) -> Vec<QuizEffect> {
        match self.advance_at {
            Some(deadline) if now >= deadline => self.advance(),
            _ => Vec::new(),
        }
    }

    fn advance(&mut self) -> Vec<QuizEffect> {
        self.advance_at = None;
        self.index += 1;
        self.input_buffer.clear();
        self.cursor_position = 0;

        if self.index < self.questions.len() {
            self.feedback = None;
            return Vec::new();
        }

        self.phase = QuizPhase::Complete;
        self.feedback = None;
        if self.result_emitted {
            return Vec::new();
        }
        self.result_emitted = true;
        tracing::info!("Quiz complete: {}/{}", self.score, self.total());
        vec![
            QuizEffect::Celebrate,
            QuizEffect::SaveResult {
                score: self.score,
                total: self.total(),
            },
        ]
    }

    pub fn close(&mut self) {
        *self = Self::new();
    }

    pub fn progress_text(&self) -> String {
        let shown = (self.index + 1).min(self.total());
        format!("Question {} of {}", shown, self.total())
    }

    pub fn summary_text(&self) -> String {
        format!("🎉 Quiz complete! Score: {}/{}", self.score, self.total())
    }

    /// Answer controls stay hidden once the quiz is over.
    pub fn accepts_input(&self) -> bool {
        self.phase == QuizPhase::InProgress && self.advance_at.is_none()
    }
}

pub fn handle_quiz_input(session: &mut QuizSession, key: KeyEvent, now: Instant) {
    match key.code {
        KeyCode::Esc => session.close(),
        KeyCode::Enter => {
            if session.phase() == QuizPhase::Complete {
                session.close();
            } else if session.accepts_input() {
                let answer = session.input_buffer.clone();
                session.submit_answer(&answer, now);
            }
        }
        _ if !session.accepts_input() => {}
        KeyCode::Left => {
            session.cursor_position = session.cursor_position.saturating_sub(1);
        }
        KeyCode::Right => {
            if session.cursor_position < session.input_buffer.chars().count() {
                session.cursor_position += 1;
            }
        }
        KeyCode::Backspace => {
            if session.cursor_position > 0 {
                let at = byte_offset(&session.input_buffer, session.cursor_position - 1);
                session.input_buffer.remove(at);
                session.cursor_position -= 1;
            }
        }
        // Chords are shortcuts, not text
        KeyCode::Char(_) if key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => {}
        KeyCode::Char(c) => {
            let at = byte_offset(&session.input_buffer, session.cursor_position);
            session.input_buffer.insert(at, c);
            session.cursor_position += 1;
        }
        _ => {}
    }
}

fn byte_offset(s: &str, char_index: usize) -> usize {
    s.char_indices()
        .nth(char_index)
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}
