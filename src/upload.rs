use crate::api::UploadOutcome;
use crate::error::ApiError;
use crate::models::Flashcard;
use crossterm::event::{KeyCode, KeyEvent};
use std::path::{Path, PathBuf};

pub const ALLOWED_EXTENSIONS: [&str; 3] = ["txt", "docx", "pdf"];
pub const UPLOAD_FAILED_STATUS: &str = "Upload failed. Try again.";
pub const CONNECTIVITY_ALERT: &str =
    "The server is not responding. Check your connection and the server URL.";

pub fn allowed_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|ext| {
            ALLOWED_EXTENSIONS
                .iter()
                .any(|allowed| ext.eq_ignore_ascii_case(allowed))
        })
        .unwrap_or(false)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadStatus {
    Idle,
    Processing { file_name: String },
    Failed,
    Done,
}

/// What the UI should do once an upload settles.
#[derive(Debug, Clone, PartialEq)]
pub enum UploadEvent {
    Navigate(String),
    OpenGenerated {
        deck_name: String,
        cards: Vec<Flashcard>,
    },
    Alert(String),
}

/// The notes-upload form: a path being typed and the status line under it.
#[derive(Debug)]
pub struct UploadForm {
    pub path_buffer: String,
    pub status: UploadStatus,
}

impl Default for UploadForm {
    fn default() -> Self {
        Self::new()
    }
}

impl UploadForm {
    pub fn new() -> Self {
        Self {
            path_buffer: String::new(),
            status: UploadStatus::Idle,
        }
    }

    pub fn is_processing(&self) -> bool {
        matches!(self.status, UploadStatus::Processing { .. })
    }

    /// Starts an upload of the typed path. Blank input is ignored without a message.
    pub fn begin(&mut self) -> Result<Option<PathBuf>, UploadEvent> {
        let trimmed = self.path_buffer.trim();
        if trimmed.is_empty() || self.is_processing() {
            return Ok(None);
        }
        let path = PathBuf::from(trimmed);
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| trimmed.to_string());

        if !allowed_file(&path) {
            self.status = UploadStatus::Failed;
            return Err(UploadEvent::Alert(format!(
                "AI Alert: {} is not a supported file (use .txt, .docx or .pdf)",
                file_name
            )));
        }

        tracing::info!("Upload requested for {:?}", path);
        self.status = UploadStatus::Processing { file_name };
        Ok(Some(path))
    }

    pub fn finish(&mut self, path: &Path, result: Result<UploadOutcome, ApiError>) -> UploadEvent {
        match result {
            Ok(UploadOutcome::Redirect(url)) => {
                self.status = UploadStatus::Done;
                self.path_buffer.clear();
                UploadEvent::Navigate(url)
            }
            Ok(UploadOutcome::Generated(cards)) => {
                self.status = UploadStatus::Done;
                self.path_buffer.clear();
                let deck_name = path
                    .file_stem()
                    .map(|s| s.to_string_lossy().into_owned())
                    .unwrap_or_else(|| "Generated".to_string());
                UploadEvent::OpenGenerated { deck_name, cards }
            }
            Ok(UploadOutcome::Rejected(error)) => {
                tracing::warn!("Upload of {:?} rejected: {}", path, error);
                self.status = UploadStatus::Failed;
                UploadEvent::Alert(format!("AI Alert: {}", error))
            }
            Err(e) if e.is_transport() => {
                tracing::error!("Upload of {:?} failed: {}", path, e);
                self.status = UploadStatus::Failed;
                UploadEvent::Alert(CONNECTIVITY_ALERT.to_string())
            }
            Err(e) => {
                tracing::error!("Upload of {:?} failed: {}", path, e);
                self.status = UploadStatus::Failed;
                UploadEvent::Alert(e.to_string())
            }
        }
    }

    pub fn status_text(&self) -> Option<String> {
        match &self.status {
            UploadStatus::Idle => None,
            UploadStatus::Processing { file_name } => Some(format!("Processing: {}", file_name)),
            UploadStatus::Failed => Some(UPLOAD_FAILED_STATUS.to_string()),
            UploadStatus::Done => Some("Upload complete.".to_string()),
        }
    }
}

/// Edits the path field. Returns `true` when Enter asks for the upload to start.
pub fn handle_upload_input(form: &mut UploadForm, key: KeyEvent) -> bool {
    if form.is_processing() {
        return false;
    }
    match key.code {
        KeyCode::Enter => true,
        KeyCode::Backspace => {
            form.path_buffer.pop();
            false
        }
        KeyCode::Char(c) => {
            form.path_buffer.push(c);
            false
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn form_with(path: &str) -> UploadForm {
        UploadForm {
            path_buffer: path.to_string(),
            status: UploadStatus::Idle,
        }
    }

    #[test]
    fn test_allowed_file_extensions() {
        assert!(allowed_file(Path::new("notes.txt")));
        assert!(allowed_file(Path::new("Lecture.PDF")));
        assert!(allowed_file(Path::new("dir/essay.docx")));
        assert!(!allowed_file(Path::new("image.png")));
        assert!(!allowed_file(Path::new("README")));
    }

    #[test]
    fn test_blank_path_is_silently_ignored() {
        let mut form = form_with("   ");
        assert_eq!(form.begin(), Ok(None));
        assert_eq!(form.status, UploadStatus::Idle);
        assert!(form.status_text().is_none());
    }

    #[test]
    fn test_begin_shows_processing_file_name() {
        let mut form = form_with(" /home/me/notes/biology.pdf ");
        let path = form.begin().unwrap().unwrap();
        assert_eq!(path, PathBuf::from("/home/me/notes/biology.pdf"));
        assert_eq!(form.status_text().as_deref(), Some("Processing: biology.pdf"));

        assert_eq!(form.begin(), Ok(None));
    }

    #[test]
    fn test_begin_rejects_unsupported_type() {
        let mut form = form_with("photo.png");
        let event = form.begin().unwrap_err();
        assert!(matches!(event, UploadEvent::Alert(msg) if msg.contains("photo.png")));
        assert_eq!(form.status, UploadStatus::Failed);
    }

    #[test]
    fn test_redirect_navigates() {
        let mut form = form_with("notes.txt");
        let path = form.begin().unwrap().unwrap();
        let event = form.finish(
            &path,
            Ok(UploadOutcome::Redirect("/preview-generated/notes.txt".to_string())),
        );
        assert_eq!(
            event,
            UploadEvent::Navigate("/preview-generated/notes.txt".to_string())
        );
        assert!(form.path_buffer.is_empty());
    }

    #[test]
    fn test_generated_cards_open_as_deck() {
        let mut form = form_with("chemistry.txt");
        let path = form.begin().unwrap().unwrap();
        let cards = vec![Flashcard::new("H2O?", "Water")];
        let event = form.finish(&path, Ok(UploadOutcome::Generated(cards.clone())));
        assert_eq!(
            event,
            UploadEvent::OpenGenerated {
                deck_name: "chemistry".to_string(),
                cards
            }
        );
    }

    #[test]
    fn test_rejection_alerts_and_reverts_status() {
        let mut form = form_with("empty.pdf");
        let path = form.begin().unwrap().unwrap();
        let event = form.finish(&path, Ok(UploadOutcome::Rejected("No text found".to_string())));
        assert_eq!(event, UploadEvent::Alert("AI Alert: No text found".to_string()));
        assert_eq!(form.status_text().as_deref(), Some(UPLOAD_FAILED_STATUS));
        assert_eq!(form.path_buffer, "empty.pdf");
    }

    #[test]
    fn test_transport_failure_uses_generic_alert() {
        let mut form = form_with("notes.txt");
        let path = form.begin().unwrap().unwrap();
        let event = form.finish(&path, Err(ApiError::Status(503)));
        assert_eq!(event, UploadEvent::Alert(CONNECTIVITY_ALERT.to_string()));
        assert!(!form.is_processing());
    }

    #[test]
    fn test_typing_path_and_enter() {
        let mut form = UploadForm::new();
        for c in "a.txx".chars() {
            handle_upload_input(&mut form, KeyEvent::new(KeyCode::Char(c), KeyModifiers::empty()));
        }
        handle_upload_input(&mut form, KeyEvent::new(KeyCode::Backspace, KeyModifiers::empty()));
        handle_upload_input(&mut form, KeyEvent::new(KeyCode::Char('t'), KeyModifiers::empty()));
        assert_eq!(form.path_buffer, "a.txt");
        assert!(handle_upload_input(
            &mut form,
            KeyEvent::new(KeyCode::Enter, KeyModifiers::empty())
        ));
    }
}
