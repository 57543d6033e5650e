//! Conversational small-talk detection.
//!
//! Recognized greetings short-circuit the retrieval path entirely: the
//! pipeline replies with a canned friendly response in the hinted language
//! and returns no sources. This is a latency/cost optimization, so the
//! phrase table is configurable without touching retrieval.

use serde::{Deserialize, Serialize};

/// Language hint for localized responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// Arabic.
    Ar,
    /// English.
    En,
}

impl Language {
    /// Detect the language of arbitrary text by the presence of Arabic script.
    pub fn detect(text: &str) -> Self {
        if text.chars().any(|c| ('\u{0600}'..='\u{06FF}').contains(&c)) {
            Language::Ar
        } else {
            Language::En
        }
    }
}

/// Classification of an incoming question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryIntent {
    /// Conversational small talk; carries the language to respond in.
    Greeting(Language),
    /// A genuine information request that should go through retrieval.
    InformationRequest,
}

/// Default greeting and small-talk phrases, Arabic and English.
const DEFAULT_PHRASES: &[&str] = &[
    "how are you",
    "كيف حالك",
    "كيفك",
    "شلونك",
    "ازيك",
    "hello",
    "hi",
    "مرحبا",
    "أهلا",
    "السلام عليكم",
    "good morning",
    "good evening",
    "صباح الخير",
    "مساء الخير",
];

/// Substrings that mark a greeting as Arabic.
const ARABIC_MARKERS: &[&str] = &["كيف", "شلون", "ازي", "مرحبا", "أهلا", "السلام", "صباح", "مساء"];

/// Classifies questions as small talk or information requests.
///
/// Matching is case-insensitive substring containment over a phrase table,
/// after trimming surrounding whitespace. `classify` is a pure function:
/// total, deterministic, and side-effect free.
#[derive(Debug, Clone)]
pub struct GreetingDetector {
    phrases: Vec<String>,
    arabic_markers: Vec<String>,
}

impl Default for GreetingDetector {
    fn default() -> Self {
        Self {
            phrases: DEFAULT_PHRASES.iter().map(|s| s.to_string()).collect(),
            arabic_markers: ARABIC_MARKERS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl GreetingDetector {
    /// Create a detector with the built-in Arabic/English phrase table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a detector with a custom phrase table and Arabic markers.
    pub fn with_phrases(
        phrases: impl IntoIterator<Item = String>,
        arabic_markers: impl IntoIterator<Item = String>,
    ) -> Self {
        Self {
            phrases: phrases.into_iter().collect(),
            arabic_markers: arabic_markers.into_iter().collect(),
        }
    }

    /// Classify a question as a greeting or an information request.
    pub fn classify(&self, question: &str) -> QueryIntent {
        let normalized = question.trim().to_lowercase();
        let is_greeting = self.phrases.iter().any(|p| normalized.contains(p.as_str()));
        if !is_greeting {
            return QueryIntent::InformationRequest;
        }
        let lang = if self.arabic_markers.iter().any(|m| normalized.contains(m.as_str())) {
            Language::Ar
        } else {
            Language::En
        };
        QueryIntent::Greeting(lang)
    }
}
