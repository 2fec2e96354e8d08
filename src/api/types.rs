use crate::error::ApiError;
use crate::models::Flashcard;
use serde::{Deserialize, Serialize};

/// Body posted to the quiz-result endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizResult {
    pub set_id: String,
    pub score: usize,
    pub total: usize,
}

/// Acknowledgment of a saved quiz. Older server builds answer with `ok`,
/// newer ones with `success`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SaveAck {
    #[serde(default)]
    pub ok: Option<bool>,
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl SaveAck {
    pub fn accepted(&self) -> bool {
        self.ok.or(self.success).unwrap_or(false)
    }
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct UploadResponseRaw {
    #[serde(default)]
    ok: Option<bool>,
    #[serde(default)]
    redirect: Option<String>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    flashcards: Option<Vec<Flashcard>>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum UploadOutcome {
    /// The server wants the client to continue at this URL.
    Redirect(String),
    /// The server answered with freshly generated cards.
    Generated(Vec<Flashcard>),
    /// Application-level rejection, e.g. no text could be extracted.
    Rejected(String),
}

impl UploadOutcome {
    pub(crate) fn from_raw(raw: UploadResponseRaw) -> Result<Self, ApiError> {
        if let Some(cards) = raw.flashcards {
            let cards = cards
                .into_iter()
                .filter(|c| !c.question.trim().is_empty() && !c.answer.trim().is_empty())
                .collect();
            return Ok(UploadOutcome::Generated(cards));
        }

        if raw.ok == Some(true) {
            return raw
                .redirect
                .map(UploadOutcome::Redirect)
                .ok_or_else(|| ApiError::Decode("upload succeeded without a redirect".to_string()));
        }

        Ok(UploadOutcome::Rejected(
            raw.error.unwrap_or_else(|| "Unknown error".to_string()),
        ))
    }
}

pub fn parse_upload_response(body: &str) -> Result<UploadOutcome, ApiError> {
    let raw: UploadResponseRaw =
        serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()))?;
    UploadOutcome::from_raw(raw)
}

/// Per-set quiz accuracy as served by the progress endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProgressReport {
    #[serde(default)]
    pub sets: Vec<String>,
    #[serde(default)]
    pub accuracy: Vec<f64>,
}

impl ProgressReport {
    /// Anonymous sessions get a bare `[]` instead of an object.
    pub fn from_value(value: serde_json::Value) -> Result<Self, ApiError> {
        match value {
            serde_json::Value::Array(items) if items.is_empty() => Ok(Self::default()),
            other => serde_json::from_value(other).map_err(|e| ApiError::Decode(e.to_string())),
        }
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, f64)> {
        self.sets
            .iter()
            .zip(self.accuracy.iter())
            .map(|(name, pct)| (name.as_str(), pct.clamp(0.0, 100.0)))
    }

    pub fn is_empty(&self) -> bool {
        self.entries().next().is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccuracyBand {
    Good,
    Fair,
    Poor,
}

impl AccuracyBand {
    pub fn from_accuracy(pct: f64) -> Self {
        if pct >= 70.0 {
            AccuracyBand::Good
        } else if pct >= 40.0 {
            AccuracyBand::Fair
        } else {
            AccuracyBand::Poor
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_redirect() {
        let outcome = parse_upload_response(r#"{"ok": true, "redirect": "/preview-generated/notes.txt"}"#)
            .unwrap();
        assert_eq!(
            outcome,
            UploadOutcome::Redirect("/preview-generated/notes.txt".to_string())
        );
    }

    #[test]
    fn test_upload_rejected_with_error() {
        let outcome = parse_upload_response(r#"{"ok": false, "error": "No text found"}"#).unwrap();
        assert_eq!(outcome, UploadOutcome::Rejected("No text found".to_string()));
    }

    #[test]
    fn test_upload_rejected_without_message() {
        let outcome = parse_upload_response(r#"{"ok": false}"#).unwrap();
        assert_eq!(outcome, UploadOutcome::Rejected("Unknown error".to_string()));
    }

    #[test]
    fn test_upload_generated_cards_ignore_extra_fields() {
        let body = r#"{"flashcards": [
            {"question": "What is Rust?", "answer": "A language", "score": 0.9},
            {"question": "", "answer": "orphan", "score": 0.1}
        ]}"#;
        let outcome = parse_upload_response(body).unwrap();
        assert_eq!(
            outcome,
            UploadOutcome::Generated(vec![Flashcard::new("What is Rust?", "A language")])
        );
    }

    #[test]
    fn test_upload_ok_without_redirect_is_decode_error() {
        let result = parse_upload_response(r#"{"ok": true}"#);
        assert!(matches!(result, Err(ApiError::Decode(_))));
    }

    #[test]
    fn test_upload_garbage_is_decode_error() {
        assert!(matches!(
            parse_upload_response("<html>"),
            Err(ApiError::Decode(_))
        ));
    }

    #[test]
    fn test_save_ack_accepts_ok_or_success() {
        let ack: SaveAck = serde_json::from_str(r#"{"success": true, "message": "Quiz result saved!"}"#)
            .unwrap();
        assert!(ack.accepted());

        let ack: SaveAck = serde_json::from_str(r#"{"ok": true}"#).unwrap();
        assert!(ack.accepted());

        let ack: SaveAck =
            serde_json::from_str(r#"{"success": false, "error": "Not logged in"}"#).unwrap();
        assert!(!ack.accepted());
        assert_eq!(ack.error.as_deref(), Some("Not logged in"));
    }

    #[test]
    fn test_quiz_result_serializes_expected_fields() {
        let result = QuizResult {
            set_id: "abc".to_string(),
            score: 2,
            total: 3,
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json, serde_json::json!({"set_id": "abc", "score": 2, "total": 3}));
    }

    #[test]
    fn test_progress_from_object_and_empty_array() {
        let report = ProgressReport::from_value(serde_json::json!({
            "sets": ["Biology", "History"],
            "accuracy": [82.5, 35.0]
        }))
        .unwrap();
        let entries: Vec<_> = report.entries().collect();
        assert_eq!(entries, vec![("Biology", 82.5), ("History", 35.0)]);

        let empty = ProgressReport::from_value(serde_json::json!([])).unwrap();
        assert!(empty.is_empty());
    }

    #[test]
    fn test_progress_entries_clamp_accuracy() {
        let report = ProgressReport {
            sets: vec!["Odd".to_string()],
            accuracy: vec![130.0],
        };
        assert_eq!(report.entries().next(), Some(("Odd", 100.0)));
    }

    #[test]
    fn test_accuracy_bands() {
        assert_eq!(AccuracyBand::from_accuracy(70.0), AccuracyBand::Good);
        assert_eq!(AccuracyBand::from_accuracy(69.99), AccuracyBand::Fair);
        assert_eq!(AccuracyBand::from_accuracy(40.0), AccuracyBand::Fair);
        assert_eq!(AccuracyBand::from_accuracy(12.0), AccuracyBand::Poor);
    }
}
