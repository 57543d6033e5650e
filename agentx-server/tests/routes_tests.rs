//! Route tests against the full router with mock providers.

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use tokio::sync::Semaphore;
use tower::ServiceExt;

use agentx_model::{SpeechError, SpeechToText, TextToSpeech};
use agentx_rag::greeting::Language;
use agentx_rag::inmemory::InMemoryVectorStore;
use agentx_rag::messages::greeting_response;
use agentx_rag::{ChatModel, EmbeddingProvider, RagConfig, RagPipeline};
use agentx_server::{AppState, app};

const DIM: usize = 4;

struct MockEmbedder;

#[async_trait]
impl EmbeddingProvider for MockEmbedder {
    async fn embed(&self, text: &str) -> agentx_rag::Result<Vec<f32>> {
        let mut v = vec![0.0f32; DIM];
        for (i, b) in text.bytes().enumerate() {
            v[i % DIM] += f32::from(b);
        }
        let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            for x in &mut v {
                *x /= norm;
            }
        }
        Ok(v)
    }

    fn dimensions(&self) -> usize {
        DIM
    }
}

struct MockModel;

#[async_trait]
impl ChatModel for MockModel {
    async fn generate(
        &self,
        _prompt: &str,
        _temperature: f32,
        _max_tokens: u32,
    ) -> agentx_rag::Result<String> {
        Ok("mock answer".to_string())
    }
}

struct MockStt;

#[async_trait]
impl SpeechToText for MockStt {
    async fn transcribe(
        &self,
        _audio: Vec<u8>,
        _language_hint: &str,
    ) -> Result<String, SpeechError> {
        Ok("hello".to_string())
    }
}

struct FailingTts;

#[async_trait]
impl TextToSpeech for FailingTts {
    async fn synthesize_speech(
        &self,
        _text: &str,
        _voice_id: Option<&str>,
    ) -> Result<Vec<u8>, SpeechError> {
        Err(SpeechError::ProviderError {
            provider: "mock".to_string(),
            message: "simulated outage".to_string(),
        })
    }
}

fn test_state(tts: Option<Arc<dyn TextToSpeech>>) -> AppState {
    let pipeline = RagPipeline::builder()
        .config(RagConfig::default())
        .embedding_provider(Arc::new(MockEmbedder))
        .vector_store(Arc::new(InMemoryVectorStore::new()))
        .chat_model(Arc::new(MockModel))
        .build()
        .unwrap();

    AppState {
        pipeline: Arc::new(pipeline),
        stt: Arc::new(MockStt),
        tts,
        limiter: Arc::new(Semaphore::new(4)),
        audio_dir: std::env::temp_dir().join("agentx-test-audio"),
    }
}

async fn json_body(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn health_reports_healthy() {
    let response = app(test_state(None))
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["status"], "healthy");
}

#[tokio::test]
async fn query_greeting_returns_canned_answer_without_sources() {
    let request = Request::post("/query")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"question":"hello"}"#))
        .unwrap();
    let response = app(test_state(None)).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["answer"], greeting_response(Language::En));
    assert_eq!(body["sources"].as_array().unwrap().len(), 0);
    assert!(body.get("audio_url").is_none());
}

#[tokio::test]
async fn query_tolerates_tts_failure() {
    let request = Request::post("/query")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"question":"hello"}"#))
        .unwrap();
    let response =
        app(test_state(Some(Arc::new(FailingTts)))).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["answer"], greeting_response(Language::En));
    assert!(body.get("audio_url").is_none());
}

#[tokio::test]
async fn documents_empty_on_fresh_index() {
    let response = app(test_state(None))
        .oneshot(Request::get("/documents").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["documents"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn upload_then_list_documents() {
    let state = test_state(None);
    let router = app(state);

    let boundary = "test-boundary";
    let body = format!(
        "--{boundary}\r\ncontent-disposition: form-data; name=\"file\"; \
         filename=\"policy.txt\"\r\ncontent-type: text/plain\r\n\r\nEmployees get 21 vacation \
         days.\r\n--{boundary}--\r\n"
    );
    let request = Request::post("/upload-document")
        .header(header::CONTENT_TYPE, format!("multipart/form-data; boundary={boundary}"))
        .body(Body::from(body))
        .unwrap();
    let response = router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let upload = json_body(response).await;
    assert_eq!(upload["chunks_added"], 1);

    let response = router
        .oneshot(Request::get("/documents").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let body = json_body(response).await;
    let documents = body["documents"].as_array().unwrap();
    assert_eq!(documents.len(), 1);
    assert_eq!(documents[0]["source"], "policy.txt");
    assert_eq!(documents[0]["chunk_count"], 1);
}

#[tokio::test]
async fn upload_rejects_empty_document() {
    let boundary = "test-boundary";
    let body = format!(
        "--{boundary}\r\ncontent-disposition: form-data; name=\"file\"; \
         filename=\"empty.txt\"\r\ncontent-type: text/plain\r\n\r\n   \r\n--{boundary}--\r\n"
    );
    let request = Request::post("/upload-document")
        .header(header::CONTENT_TYPE, format!("multipart/form-data; boundary={boundary}"))
        .body(Body::from(body))
        .unwrap();
    let response = app(test_state(None)).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn voice_query_transcribes_then_answers() {
    let boundary = "test-boundary";
    let body = format!(
        "--{boundary}\r\ncontent-disposition: form-data; name=\"file\"; \
         filename=\"audio.wav\"\r\ncontent-type: audio/wav\r\n\r\nfake-audio-bytes\r\n--{boundary}--\r\n"
    );
    let request = Request::post("/voice-query")
        .header(header::CONTENT_TYPE, format!("multipart/form-data; boundary={boundary}"))
        .body(Body::from(body))
        .unwrap();
    let response = app(test_state(None)).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["question"], "hello");
    assert_eq!(body["answer"], greeting_response(Language::En));
}
