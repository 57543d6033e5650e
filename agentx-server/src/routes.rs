//! HTTP route handlers.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use axum::Json;
use axum::Router;
use axum::extract::{DefaultBodyLimit, Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::warn;

use agentx_rag::{Document, DocumentSummary, RagError, SourceAttribution};

use crate::state::AppState;

const MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;

/// Build the application router.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/query", post(query))
        .route("/voice-query", post(voice_query))
        .route("/upload-document", post(upload_document))
        .route("/documents", get(list_documents))
        .nest_service("/audio", ServeDir::new(state.audio_dir.clone()))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// A handler error carrying an HTTP status and message.
pub struct ApiError(StatusCode, String);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.0, Json(serde_json::json!({ "detail": self.1 }))).into_response()
    }
}

impl From<RagError> for ApiError {
    fn from(err: RagError) -> Self {
        let status = match err {
            RagError::ValidationError(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        ApiError(status, err.to_string())
    }
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "healthy" }))
}

#[derive(Debug, Deserialize)]
pub struct QueryRequest {
    pub question: String,
}

#[derive(Debug, Serialize)]
pub struct QueryResponse {
    pub answer: String,
    pub sources: Vec<SourceAttribution>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
}

/// Acquire a concurrency permit, answer the question, and attempt TTS.
async fn answer_with_audio(state: &AppState, question: &str) -> Result<QueryResponse, ApiError> {
    let _permit = state
        .limiter
        .acquire()
        .await
        .map_err(|_| ApiError(StatusCode::SERVICE_UNAVAILABLE, "server shutting down".into()))?;

    let result = state.pipeline.answer_query(question).await;
    let audio_url = synthesize_audio(state, &result.answer).await;
    Ok(QueryResponse { answer: result.answer, sources: result.sources, audio_url })
}

/// Synthesize the answer to an MP3 under the audio dir. Failures are
/// tolerated: the answer is returned without audio.
async fn synthesize_audio(state: &AppState, answer: &str) -> Option<String> {
    let tts = state.tts.as_ref()?;
    match tts.synthesize_speech(answer, None).await {
        Ok(audio) => {
            let mut hasher = DefaultHasher::new();
            answer.hash(&mut hasher);
            let filename = format!("response_{}.mp3", hasher.finish() % 10000);
            let path = state.audio_dir.join(&filename);
            if let Err(e) = tokio::fs::create_dir_all(&state.audio_dir).await {
                warn!(error = %e, "failed to create audio directory");
                return None;
            }
            match tokio::fs::write(&path, &audio).await {
                Ok(()) => Some(format!("/audio/{filename}")),
                Err(e) => {
                    warn!(error = %e, "failed to write audio response");
                    None
                }
            }
        }
        Err(e) => {
            warn!(error = %e, "text-to-speech failed; returning answer without audio");
            None
        }
    }
}

async fn query(
    State(state): State<AppState>,
    Json(request): Json<QueryRequest>,
) -> Result<Json<QueryResponse>, ApiError> {
    let response = answer_with_audio(&state, &request.question).await?;
    Ok(Json(response))
}

#[derive(Debug, Serialize)]
pub struct VoiceQueryResponse {
    pub question: String,
    pub answer: String,
    pub sources: Vec<SourceAttribution>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
}

async fn voice_query(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<VoiceQueryResponse>, ApiError> {
    let field = multipart
        .next_field()
        .await
        .map_err(|e| ApiError(StatusCode::BAD_REQUEST, format!("invalid multipart body: {e}")))?
        .ok_or_else(|| ApiError(StatusCode::BAD_REQUEST, "missing audio file".into()))?;
    let audio = field
        .bytes()
        .await
        .map_err(|e| ApiError(StatusCode::BAD_REQUEST, format!("failed to read audio: {e}")))?;

    let question = state.stt.transcribe(audio.to_vec(), "ar").await.map_err(|e| {
        ApiError(StatusCode::INTERNAL_SERVER_ERROR, format!("transcription failed: {e}"))
    })?;

    let response = answer_with_audio(&state, &question).await?;
    Ok(Json(VoiceQueryResponse {
        question,
        answer: response.answer,
        sources: response.sources,
        audio_url: response.audio_url,
    }))
}

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub message: String,
    pub chunks_added: usize,
}

async fn upload_document(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    let field = multipart
        .next_field()
        .await
        .map_err(|e| ApiError(StatusCode::BAD_REQUEST, format!("invalid multipart body: {e}")))?
        .ok_or_else(|| ApiError(StatusCode::BAD_REQUEST, "missing document file".into()))?;
    let filename = field.file_name().unwrap_or("uploaded.txt").to_string();
    let bytes = field
        .bytes()
        .await
        .map_err(|e| ApiError(StatusCode::BAD_REQUEST, format!("failed to read file: {e}")))?;
    let text = String::from_utf8(bytes.to_vec())
        .map_err(|_| ApiError(StatusCode::BAD_REQUEST, "document must be valid UTF-8".into()))?;

    let _permit = state
        .limiter
        .acquire()
        .await
        .map_err(|_| ApiError(StatusCode::SERVICE_UNAVAILABLE, "server shutting down".into()))?;

    let report = state.pipeline.ingest(&Document::new(filename.clone(), text)).await?;
    Ok(Json(UploadResponse {
        message: format!("Added {} chunks from {filename}", report.chunks_added),
        chunks_added: report.chunks_added,
    }))
}

#[derive(Debug, Serialize)]
pub struct DocumentsResponse {
    pub documents: Vec<DocumentSummary>,
}

async fn list_documents(
    State(state): State<AppState>,
) -> Result<Json<DocumentsResponse>, ApiError> {
    let documents = state.pipeline.list_documents().await?;
    Ok(Json(DocumentsResponse { documents }))
}
