pub mod client;
pub mod types;

pub use client::{Backend, Endpoints, HttpBackend, DEFAULT_SERVER_URL};
pub use types::{
    parse_upload_response, AccuracyBand, ProgressReport, QuizResult, SaveAck, UploadOutcome,
};
