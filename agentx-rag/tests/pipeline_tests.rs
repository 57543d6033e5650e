//! End-to-end pipeline scenarios with mock providers.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use agentx_rag::greeting::Language;
use agentx_rag::inmemory::InMemoryVectorStore;
use agentx_rag::messages::{apology_response, greeting_response, no_results_response};
use agentx_rag::{
    ChatModel, Document, EmbeddingProvider, RagConfig, RagError, RagPipeline, VectorStore,
};
use async_trait::async_trait;

const DIM: usize = 8;

/// Deterministic embedder: folds byte values into a fixed-dimension vector
/// and normalizes, so similar texts land near each other.
struct MockEmbedder {
    calls: AtomicUsize,
}

impl MockEmbedder {
    fn new() -> Self {
        Self { calls: AtomicUsize::new(0) }
    }

    fn embed_text(text: &str) -> Vec<f32> {
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
        v
    }
}

#[async_trait]
impl EmbeddingProvider for MockEmbedder {
    async fn embed(&self, text: &str) -> agentx_rag::Result<Vec<f32>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(Self::embed_text(text))
    }

    async fn embed_batch(&self, texts: &[&str]) -> agentx_rag::Result<Vec<Vec<f32>>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(texts.iter().map(|t| Self::embed_text(t)).collect())
    }

    fn dimensions(&self) -> usize {
        DIM
    }
}

struct FailingEmbedder;

#[async_trait]
impl EmbeddingProvider for FailingEmbedder {
    async fn embed(&self, _text: &str) -> agentx_rag::Result<Vec<f32>> {
        Err(RagError::EmbeddingError {
            provider: "mock".to_string(),
            message: "simulated outage".to_string(),
        })
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
        Ok("  mock answer  ".to_string())
    }
}

struct FailingModel;

#[async_trait]
impl ChatModel for FailingModel {
    async fn generate(
        &self,
        _prompt: &str,
        _temperature: f32,
        _max_tokens: u32,
    ) -> agentx_rag::Result<String> {
        Err(RagError::GenerationError {
            provider: "mock".to_string(),
            message: "simulated outage".to_string(),
        })
    }
}

fn build_pipeline(
    embedder: Arc<dyn EmbeddingProvider>,
    store: Arc<dyn VectorStore>,
    model: Arc<dyn ChatModel>,
) -> RagPipeline {
    RagPipeline::builder()
        .config(RagConfig::default())
        .embedding_provider(embedder)
        .vector_store(store)
        .chat_model(model)
        .build()
        .unwrap()
}

fn default_pipeline() -> (RagPipeline, Arc<InMemoryVectorStore>) {
    let store = Arc::new(InMemoryVectorStore::new());
    let pipeline = build_pipeline(
        Arc::new(MockEmbedder::new()),
        Arc::clone(&store) as Arc<dyn VectorStore>,
        Arc::new(MockModel),
    );
    (pipeline, store)
}

#[tokio::test]
async fn english_greeting_short_circuits() {
    let (pipeline, _store) = default_pipeline();
    let result = pipeline.answer_query("hello").await;
    assert_eq!(result.answer, greeting_response(Language::En));
    assert!(result.sources.is_empty());
}

#[tokio::test]
async fn arabic_greeting_gets_arabic_response() {
    let (pipeline, _store) = default_pipeline();
    let result = pipeline.answer_query("كيف حالك").await;
    assert_eq!(result.answer, greeting_response(Language::Ar));
    assert!(result.sources.is_empty());
}

#[tokio::test]
async fn empty_index_returns_localized_no_results() {
    let (pipeline, _store) = default_pipeline();

    let en = pipeline.answer_query("what is the notice period").await;
    assert_eq!(en.answer, no_results_response(Language::En));
    assert!(en.sources.is_empty());

    let ar = pipeline.answer_query("ما هي فترة الإشعار").await;
    assert_eq!(ar.answer, no_results_response(Language::Ar));
    assert!(ar.sources.is_empty());
}

#[tokio::test]
async fn single_chunk_document_yields_one_attributed_source() {
    let (pipeline, _store) = default_pipeline();

    let doc = Document::new("policy.txt", "Employees get 21 vacation days.");
    let report = pipeline.ingest(&doc).await.unwrap();
    assert_eq!(report.chunks_added, 1);

    let result = pipeline.answer_query("how many vacation days do employees get").await;
    assert_eq!(result.answer, "mock answer");
    assert_eq!(result.sources.len(), 1);
    assert_eq!(result.sources[0].source, "policy.txt");
    assert_eq!(result.sources[0].chunk_id, 0);

    // relevance_score = 1 - distance, so it must stay within (0, 1] for
    // cosine distance between non-identical, non-opposite vectors.
    let query = MockEmbedder::embed_text("how many vacation days do employees get");
    let hits = pipeline.vector_store().query(&query, 5).await.unwrap();
    assert_eq!(hits.len(), 1);
    let expected = 1.0 - hits[0].distance;
    assert!((result.sources[0].relevance_score - expected).abs() < 1e-6);
}

#[tokio::test]
async fn attribution_matches_hit_count_and_order() {
    let (pipeline, store) = default_pipeline();

    let text =
        "Vacation policy grants 21 days. Sick leave requires a note. Remote work is allowed \
         twice a week. Salaries are paid monthly. Probation lasts three months. Overtime is \
         compensated in time off. Health insurance covers dependents. Training budget renews \
         yearly. Performance reviews happen twice a year. Notice period is one month.";
    let report = pipeline.ingest(&Document::new("handbook.txt", text)).await.unwrap();
    assert!(report.chunks_added > 1);
    assert_eq!(store.count().await.unwrap(), report.chunks_added);

    let result = pipeline.answer_query("what is the sick leave policy").await;
    let expected_hits = report.chunks_added.min(pipeline.config().top_k);
    assert_eq!(result.sources.len(), expected_hits);

    // Sources follow retrieval order: nonincreasing relevance.
    for pair in result.sources.windows(2) {
        assert!(pair[0].relevance_score >= pair[1].relevance_score);
    }
}

#[tokio::test]
async fn query_failure_becomes_localized_apology() {
    let store = Arc::new(InMemoryVectorStore::new());
    let pipeline = build_pipeline(
        Arc::new(FailingEmbedder),
        store as Arc<dyn VectorStore>,
        Arc::new(MockModel),
    );

    let en = pipeline.answer_query("what is the vacation policy").await;
    assert_eq!(en.answer, apology_response(Language::En));
    assert!(en.sources.is_empty());

    let ar = pipeline.answer_query("ما هي سياسة الإجازات").await;
    assert_eq!(ar.answer, apology_response(Language::Ar));
    assert!(ar.sources.is_empty());
}

#[tokio::test]
async fn generation_failure_becomes_apology_after_ingest() {
    let store = Arc::new(InMemoryVectorStore::new());
    let embedder = Arc::new(MockEmbedder::new());
    let pipeline = build_pipeline(
        Arc::clone(&embedder) as Arc<dyn EmbeddingProvider>,
        store as Arc<dyn VectorStore>,
        Arc::new(FailingModel),
    );

    pipeline.ingest(&Document::new("doc.txt", "Some policy text.")).await.unwrap();
    let result = pipeline.answer_query("what does the policy say").await;
    assert_eq!(result.answer, apology_response(Language::En));
    assert!(result.sources.is_empty());
}

#[tokio::test]
async fn ingestion_failure_propagates_and_writes_nothing() {
    let store = Arc::new(InMemoryVectorStore::new());
    let pipeline = build_pipeline(
        Arc::new(FailingEmbedder),
        Arc::clone(&store) as Arc<dyn VectorStore>,
        Arc::new(MockModel),
    );

    let err = pipeline.ingest(&Document::new("doc.txt", "Some policy text.")).await.unwrap_err();
    assert!(matches!(err, RagError::EmbeddingError { .. }));
    assert_eq!(store.count().await.unwrap(), 0);
}

#[tokio::test]
async fn empty_document_is_rejected() {
    let (pipeline, store) = default_pipeline();
    let err = pipeline.ingest(&Document::new("empty.txt", "   \n ")).await.unwrap_err();
    assert!(matches!(err, RagError::ValidationError(_)));
    assert_eq!(store.count().await.unwrap(), 0);
}

#[tokio::test]
async fn ingestion_embeds_in_one_batched_call() {
    let store = Arc::new(InMemoryVectorStore::new());
    let embedder = Arc::new(MockEmbedder::new());
    let pipeline = build_pipeline(
        Arc::clone(&embedder) as Arc<dyn EmbeddingProvider>,
        store as Arc<dyn VectorStore>,
        Arc::new(MockModel),
    );

    let text = "First sentence here. Second sentence follows. Third one too. Fourth for good \
                measure. Fifth to force multiple chunks into the embedding batch. The handbook \
                continues with details about onboarding, equipment requests, office access \
                badges, expense reporting deadlines, travel booking rules, and the quarterly \
                all-hands schedule, which together push this document well past a single \
                three-hundred-character window.";
    let report = pipeline.ingest(&Document::new("doc.txt", text)).await.unwrap();
    assert!(report.chunks_added > 1);
    assert_eq!(embedder.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn reingestion_appends_new_records() {
    let (pipeline, store) = default_pipeline();

    let first = pipeline.ingest(&Document::new("doc.txt", "Some policy text.")).await.unwrap();
    let second = pipeline.ingest(&Document::new("doc.txt", "Some policy text.")).await.unwrap();
    assert_eq!(first.chunks_added, second.chunks_added);
    // uuid-suffixed ids keep duplicate uploads from colliding
    assert_eq!(store.count().await.unwrap(), first.chunks_added * 2);
}

#[tokio::test]
async fn list_documents_groups_by_source() {
    let (pipeline, _store) = default_pipeline();

    let a = pipeline.ingest(&Document::new("a.txt", "Alpha policy text.")).await.unwrap();
    let b = pipeline
        .ingest(&Document::new(
            "b.txt",
            "Beta policy text is much longer than alpha. It keeps going with more sentences. \
             And yet more text so it spans several chunks. Definitely more than one chunk here \
             when the window is three hundred characters, so push past that limit with padding \
             text about policies, procedures, and onboarding guidelines for new employees who \
             join the company and need to learn about benefits, leave, and working hours across \
             departments and offices.",
        ))
        .await
        .unwrap();

    let docs = pipeline.list_documents().await.unwrap();
    assert_eq!(docs.len(), 2);
    assert_eq!(docs[0].source, "a.txt");
    assert_eq!(docs[0].chunk_count, a.chunks_added);
    assert_eq!(docs[1].source, "b.txt");
    assert_eq!(docs[1].chunk_count, b.chunks_added);
}

#[tokio::test]
async fn builder_requires_all_components() {
    let err = RagPipeline::builder().config(RagConfig::default()).build().err().unwrap();
    assert!(matches!(err, RagError::ConfigError(_)));
}

#[test]
fn config_builder_validates_parameters() {
    assert!(RagConfig::builder().chunk_size(100).chunk_overlap(100).build().is_err());
    assert!(RagConfig::builder().top_k(0).build().is_err());
    assert!(RagConfig::builder().temperature(3.0).build().is_err());
    let config = RagConfig::builder().chunk_size(300).chunk_overlap(50).top_k(5).build().unwrap();
    assert_eq!(config.top_k, 5);
}
