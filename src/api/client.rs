use crate::api::types::{parse_upload_response, ProgressReport, QuizResult, SaveAck, UploadOutcome};
use crate::error::ApiError;
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:5000";
pub const DEFAULT_UPLOAD_PATH: &str = "/upload_notes_ajax/{set_id}";
pub const DEFAULT_QUIZ_RESULT_PATH: &str = "/save_quiz_result";
pub const DEFAULT_PROGRESS_PATH: &str = "/get_progress";
pub const UPLOAD_FIELD: &str = "notes_file";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// The three server operations the client relies on.
#[async_trait]
pub trait Backend: Send + Sync {
    async fn upload_notes(&self, path: &Path, set_id: &str) -> Result<UploadOutcome, ApiError>;

    async fn save_quiz_result(&self, result: &QuizResult) -> Result<SaveAck, ApiError>;

    async fn fetch_progress(&self) -> Result<ProgressReport, ApiError>;
}

#[derive(Debug, Clone)]
pub struct Endpoints {
    pub base_url: String,
    pub upload_path: String,
    pub quiz_result_path: String,
    pub progress_path: String,
}

impl Endpoints {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            upload_path: DEFAULT_UPLOAD_PATH.to_string(),
            quiz_result_path: DEFAULT_QUIZ_RESULT_PATH.to_string(),
            progress_path: DEFAULT_PROGRESS_PATH.to_string(),
        }
    }

    pub fn upload_url(&self, set_id: &str) -> String {
        self.join(&self.upload_path.replace("{set_id}", set_id))
    }

    pub fn quiz_result_url(&self) -> String {
        self.join(&self.quiz_result_path)
    }

    pub fn progress_url(&self) -> String {
        self.join(&self.progress_path)
    }

    fn join(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

#[derive(Debug)]
pub struct HttpBackend {
    client: Client,
    endpoints: Endpoints,
}

impl HttpBackend {
    pub fn new(endpoints: Endpoints) -> Result<Self, ApiError> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self { client, endpoints })
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }
}

fn ensure_success(response: &Response) -> Result<(), ApiError> {
    if !response.status().is_success() {
        tracing::warn!("HTTP {} from {}", response.status(), response.url());
        return Err(ApiError::Status(response.status().as_u16()));
    }
    Ok(())
}

#[async_trait]
impl Backend for HttpBackend {
    async fn upload_notes(&self, path: &Path, set_id: &str) -> Result<UploadOutcome, ApiError> {
        let bytes = tokio::fs::read(path).await.map_err(|source| ApiError::File {
            path: path.to_path_buf(),
            source,
        })?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "notes".to_string());

        let url = self.endpoints.upload_url(set_id);
        tracing::info!("Uploading {} ({} bytes) to {}", file_name, bytes.len(), url);

        let form = Form::new().part(UPLOAD_FIELD, Part::bytes(bytes).file_name(file_name));
        let response = self.client.post(&url).multipart(form).send().await?;
        ensure_success(&response)?;

        let body = response.text().await?;
        parse_upload_response(&body)
    }

    async fn save_quiz_result(&self, result: &QuizResult) -> Result<SaveAck, ApiError> {
        let response = self
            .client
            .post(self.endpoints.quiz_result_url())
            .json(result)
            .send()
            .await?;
        ensure_success(&response)?;
        Ok(response.json::<SaveAck>().await?)
    }

    async fn fetch_progress(&self) -> Result<ProgressReport, ApiError> {
        let response = self.client.get(self.endpoints.progress_url()).send().await?;
        ensure_success(&response)?;
        let value = response.json::<serde_json::Value>().await?;
        ProgressReport::from_value(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::{TcpListener, TcpStream};

    fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
        haystack.windows(needle.len()).position(|w| w == needle)
    }

    async fn read_request(socket: &mut TcpStream) -> String {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 4096];
        loop {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);

            if let Some(header_end) = find(&buf, b"\r\n\r\n") {
                let headers = String::from_utf8_lossy(&buf[..header_end]).to_lowercase();
                if headers.contains("transfer-encoding: chunked") {
                    if buf.ends_with(b"0\r\n\r\n") {
                        break;
                    }
                    continue;
                }
                let content_length = headers
                    .lines()
                    .find_map(|l| l.strip_prefix("content-length:"))
                    .and_then(|v| v.trim().parse::<usize>().ok())
                    .unwrap_or(0);
                if buf.len() >= header_end + 4 + content_length {
                    break;
                }
            }
        }
        String::from_utf8_lossy(&buf).into_owned()
    }

    /// Answers exactly one request with a canned response and hands back the raw request.
    async fn serve_once(
        status_line: &'static str,
        body: &'static str,
    ) -> (String, tokio::task::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let request = read_request(&mut socket).await;
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
            request
        });
        (format!("http://{}", addr), handle)
    }

    #[test]
    fn test_endpoint_urls() {
        let endpoints = Endpoints::new("http://localhost:5000/");
        assert_eq!(
            endpoints.upload_url("65f0c"),
            "http://localhost:5000/upload_notes_ajax/65f0c"
        );
        assert_eq!(
            endpoints.quiz_result_url(),
            "http://localhost:5000/save_quiz_result"
        );
        assert_eq!(endpoints.progress_url(), "http://localhost:5000/get_progress");
    }

    #[tokio::test]
    async fn test_upload_sends_multipart_notes_file() {
        let (base_url, server) =
            serve_once("200 OK", r#"{"ok": true, "redirect": "/preview-generated/notes.txt"}"#)
                .await;
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, "Mitochondria is the powerhouse of the cell.").unwrap();

        let backend = HttpBackend::new(Endpoints::new(base_url)).unwrap();
        let outcome = backend.upload_notes(&path, "set42").await.unwrap();

        assert_eq!(
            outcome,
            UploadOutcome::Redirect("/preview-generated/notes.txt".to_string())
        );
        let request = server.await.unwrap();
        assert!(request.starts_with("POST /upload_notes_ajax/set42 "));
        assert!(request.contains("name=\"notes_file\""));
        assert!(request.contains("filename=\"notes.txt\""));
        assert!(request.contains("powerhouse of the cell"));
    }

    #[tokio::test]
    async fn test_upload_non_success_status_is_transport_failure() {
        let (base_url, server) = serve_once("500 Internal Server Error", "{}").await;
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, "text").unwrap();

        let backend = HttpBackend::new(Endpoints::new(base_url)).unwrap();
        let err = backend.upload_notes(&path, "set42").await.unwrap_err();

        assert!(matches!(err, ApiError::Status(500)));
        assert!(err.is_transport());
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_upload_missing_file_is_not_sent() {
        let backend = HttpBackend::new(Endpoints::new("http://127.0.0.1:9")).unwrap();
        let err = backend
            .upload_notes(Path::new("/definitely/not/here.txt"), "set42")
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::File { .. }));
    }

    #[tokio::test]
    async fn test_unreachable_server_is_transport_failure() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let backend = HttpBackend::new(Endpoints::new(format!("http://{}", addr))).unwrap();
        let err = backend.fetch_progress().await.unwrap_err();
        assert!(matches!(err, ApiError::Transport(_)));
    }

    #[tokio::test]
    async fn test_save_quiz_result_posts_json() {
        let (base_url, server) =
            serve_once("200 OK", r#"{"success": true, "message": "Quiz result saved!"}"#).await;
        let backend = HttpBackend::new(Endpoints::new(base_url)).unwrap();

        let ack = backend
            .save_quiz_result(&QuizResult {
                set_id: "set42".to_string(),
                score: 2,
                total: 3,
            })
            .await
            .unwrap();

        assert!(ack.accepted());
        let request = server.await.unwrap();
        assert!(request.starts_with("POST /save_quiz_result "));
        assert!(request.contains(r#""set_id":"set42""#));
        assert!(request.contains(r#""score":2"#));
        assert!(request.contains(r#""total":3"#));
    }

    #[tokio::test]
    async fn test_fetch_progress() {
        let (base_url, server) =
            serve_once("200 OK", r#"{"sets": ["Biology"], "accuracy": [66.67]}"#).await;
        let backend = HttpBackend::new(Endpoints::new(base_url)).unwrap();

        let report = backend.fetch_progress().await.unwrap();

        assert_eq!(report.sets, vec!["Biology".to_string()]);
        assert_eq!(report.accuracy, vec![66.67]);
        let request = server.await.unwrap();
        assert!(request.starts_with("GET /get_progress "));
    }
}
