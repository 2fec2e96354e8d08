use crate::api::{ProgressReport, QuizResult, SaveAck, UploadOutcome};
use crate::error::ApiError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flashcard {
    pub question: String,
    pub answer: String,
}

impl Flashcard {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }
}

#[derive(Debug)]
pub enum ApiRequest {
    Upload { path: PathBuf, set_id: String },
    SaveQuizResult(QuizResult),
    FetchProgress,
}

#[derive(Debug)]
pub enum ApiResponse {
    Upload {
        path: PathBuf,
        result: Result<UploadOutcome, ApiError>,
    },
    QuizSaved {
        result: QuizResult,
        outcome: Result<SaveAck, ApiError>,
    },
    Progress(Result<ProgressReport, ApiError>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Menu,
    UploadPrompt,
    Review,
    Quiz,
    Progress,
}
