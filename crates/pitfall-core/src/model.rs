use serde::{Deserialize, Serialize};

/// A candidate question as handed over by the storage layer.
///
/// Bodies are raw HTML as crawled. The engine only reads these; nothing is written back.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuestionRecord {
    /// Question id, e.g. 1234567
    pub id: u64,
    pub title: String,
    /// Question body (HTML)
    pub body: String,
    /// Lowercased tag names
    pub tags: Vec<String>,
    /// Body of the accepted answer (HTML), when the question has one
    pub accepted_answer_body: Option<String>,
}

/// One candidate question in the two views the classifier needs.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: u64,
    /// Title, body and accepted answer with markup and code removed, lowercased.
    /// The only text that is vectorized.
    pub text: String,
    /// Same parts with tags stripped but code kept, so seed patterns also see thread
    /// dumps and stack traces.
    pub seed_text: String,
}
