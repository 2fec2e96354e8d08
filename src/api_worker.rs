use crate::api::Backend;
use crate::models::{ApiRequest, ApiResponse};
use crossbeam_channel::Receiver;
use std::io;
use std::thread;

/// Runs every server call on one background thread so the UI loop never waits on I/O.
///
/// Each request produces exactly one `ApiResponse`, handed to `on_response`. Nothing is
/// retried. The worker exits once every request sender has been dropped.
pub fn spawn_api_worker<B, F>(
    backend: B,
    requests: Receiver<ApiRequest>,
    on_response: F,
) -> io::Result<thread::JoinHandle<()>>
where
    B: Backend + 'static,
    F: Fn(ApiResponse) + Send + 'static,
{
    thread::Builder::new()
        .name("flashmind::api_worker".to_string())
        .spawn(move || {
            let rt = match tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
            {
                Ok(rt) => rt,
                Err(e) => {
                    tracing::error!("Failed to start API runtime: {}", e);
                    return;
                }
            };

            while let Ok(request) = requests.recv() {
                let response = rt.block_on(dispatch(&backend, request));
                on_response(response);
            }

            tracing::debug!("API request channel closed, worker exiting");
        })
}

async fn dispatch<B: Backend>(backend: &B, request: ApiRequest) -> ApiResponse {
    match request {
        ApiRequest::Upload { path, set_id } => {
            tracing::info!("Worker uploading {:?}", path);
            let result = backend.upload_notes(&path, &set_id).await;
            ApiResponse::Upload { path, result }
        }
        ApiRequest::SaveQuizResult(result) => {
            tracing::info!(
                "Worker saving quiz result {}/{} for set {}",
                result.score,
                result.total,
                result.set_id
            );
            let outcome = backend.save_quiz_result(&result).await;
            ApiResponse::QuizSaved { result, outcome }
        }
        ApiRequest::FetchProgress => ApiResponse::Progress(backend.fetch_progress().await),
    }
}
