use crate::api::client::{
    DEFAULT_PROGRESS_PATH, DEFAULT_QUIZ_RESULT_PATH, DEFAULT_UPLOAD_PATH,
};
use crate::api::{Endpoints, DEFAULT_SERVER_URL};
use clap::Parser;
use std::path::PathBuf;

/// Terminal swipes are measured in columns, so the default is far below the 50px of a touch screen.
pub const DEFAULT_SWIPE_THRESHOLD: i32 = 6;

#[derive(Debug, Clone, Parser)]
#[command(name = "flashmind", version, about = "Review and quiz FlashMind flashcard sets")]
pub struct Cli {
    /// FlashMind server base URL
    #[arg(long, env = "FLASHMIND_SERVER_URL", default_value = DEFAULT_SERVER_URL)]
    pub server: String,

    /// Open this deck (CSV or JSON) directly
    #[arg(long, env = "FLASHMIND_DECK")]
    pub deck: Option<PathBuf>,

    /// Server id of the set being reviewed; defaults to the deck file name
    #[arg(long, env = "FLASHMIND_SET_ID")]
    pub set_id: Option<String>,

    #[arg(long, env = "FLASHMIND_DECKS_DIR", default_value = "flashcards")]
    pub decks_dir: PathBuf,

    #[arg(long, env = "FLASHMIND_EXPORT_DIR", default_value = ".")]
    pub export_dir: PathBuf,

    /// Where preferences and the log file live
    #[arg(long, env = "FLASHMIND_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Upload path; `{set_id}` is replaced with the current set id
    #[arg(long, env = "FLASHMIND_UPLOAD_PATH", default_value = DEFAULT_UPLOAD_PATH)]
    pub upload_path: String,

    #[arg(long, env = "FLASHMIND_QUIZ_RESULT_PATH", default_value = DEFAULT_QUIZ_RESULT_PATH)]
    pub quiz_result_path: String,

    #[arg(long, env = "FLASHMIND_PROGRESS_PATH", default_value = DEFAULT_PROGRESS_PATH)]
    pub progress_path: String,

    /// Columns a mouse drag must cover to count as a swipe
    #[arg(long, env = "FLASHMIND_SWIPE_THRESHOLD", default_value_t = DEFAULT_SWIPE_THRESHOLD)]
    pub swipe_threshold: i32,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub endpoints: Endpoints,
    pub deck: Option<PathBuf>,
    pub set_id: Option<String>,
    pub decks_dir: PathBuf,
    pub export_dir: PathBuf,
    pub data_dir: PathBuf,
    pub swipe_threshold: i32,
}

impl Config {
    pub fn from_cli(cli: Cli) -> Self {
        let endpoints = Endpoints {
            base_url: cli.server,
            upload_path: cli.upload_path,
            quiz_result_path: cli.quiz_result_path,
            progress_path: cli.progress_path,
        };
        Self {
            endpoints,
            deck: cli.deck,
            set_id: cli.set_id,
            decks_dir: cli.decks_dir,
            export_dir: cli.export_dir,
            data_dir: cli.data_dir.unwrap_or_else(default_data_dir),
            swipe_threshold: cli.swipe_threshold,
        }
    }

    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join("flashmind.db")
    }

    pub fn log_path(&self) -> PathBuf {
        self.data_dir.join("flashmind.log")
    }
}

pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("flashmind")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["flashmind", "--data-dir", "/tmp/fm"]);
        let config = Config::from_cli(cli);

        assert_eq!(config.endpoints.base_url, DEFAULT_SERVER_URL);
        assert_eq!(config.endpoints.upload_path, DEFAULT_UPLOAD_PATH);
        assert_eq!(config.decks_dir, PathBuf::from("flashcards"));
        assert_eq!(config.swipe_threshold, DEFAULT_SWIPE_THRESHOLD);
        assert_eq!(config.db_path(), PathBuf::from("/tmp/fm/flashmind.db"));
        assert_eq!(config.log_path(), PathBuf::from("/tmp/fm/flashmind.log"));
        assert!(config.deck.is_none());
    }

    #[test]
    fn test_overrides() {
        let cli = Cli::parse_from([
            "flashmind",
            "--server",
            "https://flashmind.example",
            "--deck",
            "decks/bio.csv",
            "--set-id",
            "65f0c",
            "--upload-path",
            "/upload",
            "--swipe-threshold",
            "10",
        ]);
        let config = Config::from_cli(cli);

        assert_eq!(config.endpoints.upload_url("65f0c"), "https://flashmind.example/upload");
        assert_eq!(config.deck, Some(PathBuf::from("decks/bio.csv")));
        assert_eq!(config.set_id.as_deref(), Some("65f0c"));
        assert_eq!(config.swipe_threshold, 10);
    }

    #[test]
    fn test_default_data_dir_is_app_specific() {
        assert!(default_data_dir().ends_with("flashmind"));
    }
}
