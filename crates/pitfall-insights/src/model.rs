use serde::{Deserialize, Deserializer};

/// One crawled thread file: a question with its answers.
///
/// Comment sections are present in the files but not needed here, so they are ignored
/// along with any other unknown fields.
#[derive(Debug, Clone, Deserialize)]
pub struct QuestionThread {
    pub question: Question,
    #[serde(default, deserialize_with = "null_as_default")]
    pub answers: Vec<Answer>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Question {
    pub question_id: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    /// HTML body
    #[serde(default, deserialize_with = "null_as_default")]
    pub body: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
    #[serde(default)]
    pub accepted_answer_id: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Answer {
    pub answer_id: u64,
    /// HTML body
    #[serde(default, deserialize_with = "null_as_default")]
    pub body: String,
    #[serde(default)]
    pub is_accepted: bool,
}

impl QuestionThread {
    /// The accepted answer, by `accepted_answer_id` first, then by the `is_accepted` flag.
    pub fn accepted_answer(&self) -> Option<&Answer> {
        self.question
            .accepted_answer_id
            .and_then(|id| self.answers.iter().find(|a| a.answer_id == id))
            .or_else(|| self.answers.iter().find(|a| a.is_accepted))
    }
}

/// Crawled files carry explicit `null`s for absent text; treat them like missing fields.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
