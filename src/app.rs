use crossbeam_channel::Sender;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{layout::Rect, widgets::Block, Frame};
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::api::{ProgressReport, QuizResult, SaveAck};
use crate::config::Config;
use crate::confetti::Confetti;
use crate::csv::{get_deck_files, load_deck, write_csv_export};
use crate::db::preferences::{load_dark_mode, toggle_dark_mode};
use crate::error::{ApiError, FlashmindError};
use crate::models::{ApiRequest, ApiResponse, AppState, Flashcard};
use crate::quiz::{handle_quiz_input, QuizEffect, QuizSession};
use crate::review::{apply_swipe, handle_review_input, ReviewAction, ReviewSession, SwipeTracker};
use crate::ui::{self, Theme};
use crate::upload::{
    handle_upload_input, UploadEvent, UploadForm, UploadStatus, CONNECTIVITY_ALERT,
};

const DEFAULT_UPLOAD_SET_ID: &str = "notes";

pub struct App {
    pub state: AppState,
    pub config: Config,
    pub decks: Vec<PathBuf>,
    pub selected_deck: usize,
    pub review: Option<ReviewSession>,
    pub quiz: QuizSession,
    pub upload: UploadForm,
    pub progress: Option<ProgressReport>,
    pub progress_loading: bool,
    pub confetti: Option<Confetti>,
    pub alert: Option<String>,
    pub status: Option<String>,
    pub last_redirect: Option<String>,
    pub dark_mode: bool,
    pub should_quit: bool,
    upload_set_id: Option<String>,
    swipe: SwipeTracker,
    viewport: Rect,
    conn: Connection,
    requests: Sender<ApiRequest>,
}

impl App {
    pub fn new(
        config: Config,
        conn: Connection,
        requests: Sender<ApiRequest>,
    ) -> Result<Self, FlashmindError> {
        let dark_mode = load_dark_mode(&conn)?;
        let decks = get_deck_files(&config.decks_dir);
        tracing::info!(
            "Found {} decks in {:?}, dark mode {}",
            decks.len(),
            config.decks_dir,
            dark_mode
        );

        let initial_deck = config.deck.clone();
        let mut app = Self {
            state: AppState::Menu,
            config,
            decks,
            selected_deck: 0,
            review: None,
            quiz: QuizSession::new(),
            upload: UploadForm::new(),
            progress: None,
            progress_loading: false,
            confetti: None,
            alert: None,
            status: None,
            last_redirect: None,
            dark_mode,
            should_quit: false,
            upload_set_id: None,
            swipe: SwipeTracker::default(),
            viewport: Rect::new(0, 0, 80, 24),
            conn,
            requests,
        };

        if let Some(path) = initial_deck {
            app.open_deck(&path);
        }
        Ok(app)
    }

    pub fn theme(&self) -> Theme {
        Theme::for_mode(self.dark_mode)
    }

    pub fn viewport(&self) -> Rect {
        self.viewport
    }

    pub fn set_viewport(&mut self, area: Rect) {
        self.viewport = area;
    }

    pub fn open_deck(&mut self, path: &Path) {
        let deck_name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "Deck".to_string());
        let set_id = self
            .config
            .set_id
            .clone()
            .unwrap_or_else(|| deck_name.clone());

        match load_deck(path) {
            Ok(cards) => self.open_cards(deck_name, set_id, cards),
            Err(e) => {
                tracing::error!("Failed to load deck {:?}: {}", path, e);
                self.alert = Some(e.to_string());
            }
        }
    }

    pub fn open_cards(&mut self, deck_name: String, set_id: String, cards: Vec<Flashcard>) {
        match ReviewSession::new(deck_name, set_id, cards) {
            Ok(session) => {
                tracing::info!(
                    "Reviewing {} ({} cards)",
                    session.deck_name,
                    session.len()
                );
                self.quiz.close();
                self.swipe.cancel();
                self.review = Some(session);
                self.state = AppState::Review;
            }
            Err(e) => {
                tracing::warn!("Refusing to open deck: {}", e);
                self.alert = Some(e.to_string());
            }
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        if self.alert.is_some() {
            self.alert = None;
            return;
        }

        match self.state {
            AppState::Menu => self.handle_menu_key(key),
            AppState::UploadPrompt => {
                if key.code == KeyCode::Esc {
                    self.state = AppState::Menu;
                } else if handle_upload_input(&mut self.upload, key) {
                    self.start_upload();
                }
            }
            AppState::Review => {
                let Some(session) = self.review.as_mut() else {
                    self.state = AppState::Menu;
                    return;
                };
                match handle_review_input(session, key, &mut self.state) {
                    ReviewAction::None => {}
                    ReviewAction::ExportCsv => self.export_review(),
                    ReviewAction::StartQuiz => self.start_quiz(),
                    ReviewAction::ToggleDarkMode => self.toggle_dark_mode(),
                }
            }
            AppState::Quiz => {
                handle_quiz_input(&mut self.quiz, key, now);
                if !self.quiz.is_open() {
                    self.state = AppState::Review;
                }
            }
            AppState::Progress => match key.code {
                KeyCode::Esc | KeyCode::Char('m') => self.state = AppState::Menu,
                KeyCode::Char('r') => self.request_progress(),
                _ => {}
            },
        }
    }

    fn handle_menu_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up => {
                self.selected_deck = self.selected_deck.saturating_sub(1);
            }
            KeyCode::Down => {
                if self.selected_deck < self.decks.len().saturating_sub(1) {
                    self.selected_deck += 1;
                }
            }
            KeyCode::Enter => {
                if let Some(path) = self.decks.get(self.selected_deck).cloned() {
                    self.open_deck(&path);
                }
            }
            KeyCode::Char('u') => self.state = AppState::UploadPrompt,
            KeyCode::Char('p') => {
                self.state = AppState::Progress;
                self.request_progress();
            }
            KeyCode::Char('d') => self.toggle_dark_mode(),
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            _ => {}
        }
    }

    /// Mouse drags on the card stand in for touch swipes; a click without a drag flips.
    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        if self.state != AppState::Review || self.alert.is_some() {
            self.swipe.cancel();
            return;
        }
        let Some(session) = self.review.as_mut() else {
            return;
        };
        let card_area = ui::calculate_review_chunks(self.viewport).card_area;

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if ui::layout::contains(card_area, mouse.column, mouse.row) {
                    self.swipe.press(mouse.column as i32);
                }
            }
            MouseEventKind::Up(MouseButton::Left) => {
                if let Some(swipe) = self
                    .swipe
                    .release(mouse.column as i32, self.config.swipe_threshold)
                {
                    apply_swipe(session, swipe);
                }
            }
            _ => {}
        }
    }

    fn start_quiz(&mut self) {
        let Some(session) = self.review.as_ref() else {
            return;
        };
        match self.quiz.start(session.cards()) {
            Ok(()) => self.state = AppState::Quiz,
            Err(e) => self.alert = Some(e.to_string()),
        }
    }

    fn export_review(&mut self) {
        let Some(session) = self.review.as_ref() else {
            return;
        };
        match write_csv_export(&self.config.export_dir, session.cards()) {
            Ok(path) => {
                self.status = Some(format!(
                    "Exported {} cards to {}",
                    session.len(),
                    path.display()
                ));
            }
            Err(e) => {
                tracing::error!("CSV export failed: {}", e);
                self.alert = Some(format!("Export failed: {}", e));
            }
        }
    }

    fn toggle_dark_mode(&mut self) {
        match toggle_dark_mode(&self.conn) {
            Ok(enabled) => {
                tracing::debug!("Dark mode set to {}", enabled);
                self.dark_mode = enabled;
            }
            Err(e) => {
                tracing::error!("Failed to store dark mode preference: {}", e);
                self.dark_mode = !self.dark_mode;
                self.status = Some("Dark mode could not be saved".to_string());
            }
        }
    }

    fn upload_set_id(&self) -> String {
        if let Some(session) = &self.review {
            return session.set_id.clone();
        }
        self.config
            .set_id
            .clone()
            .unwrap_or_else(|| DEFAULT_UPLOAD_SET_ID.to_string())
    }

    fn start_upload(&mut self) {
        match self.upload.begin() {
            Ok(Some(path)) => {
                let set_id = self.upload_set_id();
                self.upload_set_id = Some(set_id.clone());
                if !self.send(ApiRequest::Upload { path, set_id }) {
                    self.upload.status = UploadStatus::Failed;
                    self.alert = Some(CONNECTIVITY_ALERT.to_string());
                }
            }
            Ok(None) => {}
            Err(UploadEvent::Alert(message)) => self.alert = Some(message),
            Err(other) => tracing::warn!("Unexpected upload event {:?}", other),
        }
    }

    fn request_progress(&mut self) {
        if self.progress_loading {
            return;
        }
        self.progress_loading = true;
        if !self.send(ApiRequest::FetchProgress) {
            self.progress_loading = false;
            self.alert = Some(CONNECTIVITY_ALERT.to_string());
        }
    }

    /// Queues a request for the worker. Returns `false` when the worker is gone.
    fn send(&self, request: ApiRequest) -> bool {
        match self.requests.send(request) {
            Ok(()) => true,
            Err(e) => {
                tracing::error!("API worker is gone: {}", e);
                false
            }
        }
    }

    pub fn handle_api_response(&mut self, response: ApiResponse) {
        match response {
            ApiResponse::Upload { path, result } => {
                let set_id = self
                    .upload_set_id
                    .take()
                    .unwrap_or_else(|| DEFAULT_UPLOAD_SET_ID.to_string());
                match self.upload.finish(&path, result) {
                    UploadEvent::Navigate(url) => {
                        tracing::info!("Upload accepted, server redirects to {}", url);
                        self.status = Some(format!("Notes uploaded. Continue at {}", url));
                        self.last_redirect = Some(url);
                        if self.state == AppState::UploadPrompt {
                            self.state = AppState::Menu;
                        }
                    }
                    UploadEvent::OpenGenerated { deck_name, cards } => {
                        self.status = Some(format!("Generated {} flashcards", cards.len()));
                        self.open_cards(deck_name, set_id, cards);
                    }
                    UploadEvent::Alert(message) => self.alert = Some(message),
                }
            }
            ApiResponse::QuizSaved { result, outcome } => self.quiz_saved(result, outcome),
            ApiResponse::Progress(result) => {
                self.progress_loading = false;
                match result {
                    Ok(report) => {
                        tracing::info!("Loaded progress for {} sets", report.sets.len());
                        self.progress = Some(report);
                    }
                    Err(e) => {
                        tracing::error!("Failed to load progress: {}", e);
                        self.alert = Some(if e.is_transport() {
                            CONNECTIVITY_ALERT.to_string()
                        } else {
                            format!("Could not load progress: {}", e)
                        });
                    }
                }
            }
        }
    }

    fn quiz_saved(&mut self, result: QuizResult, outcome: Result<SaveAck, ApiError>) {
        match outcome {
            Ok(ack) if ack.accepted() => {
                let at = chrono::Local::now().format("%H:%M");
                tracing::info!(
                    "Saved quiz result {}/{} for set {}",
                    result.score,
                    result.total,
                    result.set_id
                );
                self.status = Some(format!(
                    "Quiz result {}/{} saved at {}",
                    result.score, result.total, at
                ));
            }
            Ok(ack) => {
                let reason = ack
                    .error
                    .or(ack.message)
                    .unwrap_or_else(|| "rejected by server".to_string());
                tracing::warn!("Quiz result for set {} not saved: {}", result.set_id, reason);
                self.status = Some(format!("Quiz result not saved: {}", reason));
            }
            Err(e) => {
                tracing::error!("Quiz result for set {} not saved: {}", result.set_id, e);
                self.status = Some(format!("Quiz result not saved: {}", e));
            }
        }
    }

    /// Drives time-based state: the quiz's pending advance and the confetti animation.
    pub fn tick(&mut self, now: Instant) {
        for effect in self.quiz.tick(now) {
            match effect {
                QuizEffect::Celebrate => {
                    let area = self.viewport;
                    self.confetti = Some(Confetti::launch(
                        area.width as f64,
                        area.height as f64,
                        now,
                        &mut rand::thread_rng(),
                    ));
                }
                QuizEffect::SaveResult { score, total } => {
                    let set_id = self
                        .review
                        .as_ref()
                        .map(|s| s.set_id.clone())
                        .unwrap_or_default();
                    let queued = self.send(ApiRequest::SaveQuizResult(QuizResult {
                        set_id,
                        score,
                        total,
                    }));
                    self.status = Some(if queued {
                        "Saving quiz result...".to_string()
                    } else {
                        "Quiz result not saved: server unavailable".to_string()
                    });
                }
            }
        }

        if let Some(confetti) = self.confetti.as_mut()
            && !confetti.tick(now)
        {
            self.confetti = None;
        }
    }

    pub fn draw(&mut self, f: &mut Frame) {
        self.viewport = f.area();
        let theme = self.theme();
        let area = f.area();
        f.render_widget(Block::default().style(theme.base()), area);

        match self.state {
            AppState::Menu | AppState::UploadPrompt => {
                ui::draw_menu(f, &theme, &self.decks, self.selected_deck, self.status.as_deref());
                if self.state == AppState::UploadPrompt {
                    ui::draw_upload_prompt(f, &theme, &self.upload);
                }
            }
            AppState::Review | AppState::Quiz => {
                if let Some(session) = &self.review {
                    ui::draw_review(f, &theme, session, self.status.as_deref());
                }
                if self.state == AppState::Quiz {
                    ui::draw_quiz_modal(f, &theme, &self.quiz);
                }
            }
            AppState::Progress => {
                ui::draw_progress(f, &theme, self.progress.as_ref(), self.progress_loading);
            }
        }

        if let Some(confetti) = &self.confetti {
            ui::draw_confetti(f, confetti);
        }
        if let Some(message) = &self.alert {
            ui::draw_alert(f, &theme, message);
        }
    }
}
