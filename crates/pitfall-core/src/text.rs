/// Markup normalization and tokenization for crawled question/answer bodies.
///
/// Bodies arrive as HTML fragments. Two views are derived from them:
/// - `normalize`: code spans removed entirely, tags stripped, lowercased. This is the
///   only text the vectorizer and classifier ever see, so code identifiers never enter
///   the vocabulary.
/// - `strip_tags`: tags stripped but code content kept and case preserved. Used by the
///   candidate filter, which must see concurrency APIs that only appear in code samples.
///
/// Both are regex based and best effort: malformed markup is never an error, whatever
/// text remains after stripping is returned.
use regex::Regex;

use crate::error::CoreError;

/// Tokens shorter than this (in characters) are discarded.
pub const MIN_TOKEN_LEN: usize = 2;

const CODE_BLOCK_PATTERN: &str = r"(?is)<pre\b[^>]*>.*?</pre\s*>|<code\b[^>]*>.*?</code\s*>";
const TAG_PATTERN: &str = r"<[^>]+>";
const ENTITY_PATTERN: &str = r"(?i)&(?:lt|gt|amp|quot|nbsp);";
const WHITESPACE_PATTERN: &str = r"\s+";

pub struct TextNormalizer {
    code_block: Regex,
    tag: Regex,
    entity: Regex,
    whitespace: Regex,
}

impl TextNormalizer {
    pub fn new() -> Result<Self, CoreError> {
        Ok(Self {
            code_block: compile(CODE_BLOCK_PATTERN)?,
            tag: compile(TAG_PATTERN)?,
            entity: compile(ENTITY_PATTERN)?,
            whitespace: compile(WHITESPACE_PATTERN)?,
        })
    }

    /// Plain lowercase text with `<pre>`/`<code>` spans dropped, tags stripped and the
    /// common entities blanked. Empty input yields an empty string.
    pub fn normalize(&self, raw: &str) -> String {
        if raw.is_empty() {
            return String::new();
        }
        let without_code = self.code_block.replace_all(raw, " ");
        self.clean(&without_code).to_lowercase()
    }

    /// Like `normalize`, but code content is unwrapped rather than removed and the
    /// original case is kept.
    pub fn strip_tags(&self, raw: &str) -> String {
        if raw.is_empty() {
            return String::new();
        }
        self.clean(raw)
    }

    fn clean(&self, text: &str) -> String {
        let without_tags = self.tag.replace_all(text, " ");
        let without_entities = self.entity.replace_all(&without_tags, " ");
        self.whitespace
            .replace_all(&without_entities, " ")
            .trim()
            .to_string()
    }
}

/// Lowercase, split on runs of non-word characters, drop tokens shorter than
/// `MIN_TOKEN_LEN`.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|token| token.chars().count() >= MIN_TOKEN_LEN)
        .map(str::to_string)
        .collect()
}

pub(crate) fn compile(pattern: &str) -> Result<Regex, CoreError> {
    Regex::new(pattern).map_err(|e| CoreError::pattern(pattern, e))
}
