pub mod api;
pub mod api_worker;
pub mod app;
pub mod confetti;
pub mod config;
pub mod csv;
pub mod db;
pub mod error;
pub mod logger;
pub mod models;
pub mod quiz;
pub mod review;
pub mod ui;
pub mod upload;
pub mod utils;


// Re-exports for convenience
pub use api::{Backend, Endpoints, HttpBackend, ProgressReport, QuizResult, UploadOutcome};
pub use app::App;
pub use csv::{export_csv, get_deck_files, load_deck, parse_csv_line};
pub use error::{ApiError, FlashmindError};
pub use models::{ApiRequest, ApiResponse, AppState, Flashcard};
pub use quiz::{answers_match, handle_quiz_input, QuizEffect, QuizPhase, QuizSession};
pub use review::{classify_swipe, handle_review_input, ReviewSession, Swipe};
pub use upload::{UploadEvent, UploadForm};
