/// Error types for the pitfall classification engine.
///
/// The engine itself never fails on data: empty text, empty corpora and unclassifiable
/// documents are ordinary outcomes. The only fallible step is compiling the built-in
/// pattern tables, which happens once when the analyzer is constructed.

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("invalid pattern {pattern:?}: {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

impl CoreError {
    pub(crate) fn pattern(pattern: &str, source: regex::Error) -> Self {
        Self::Pattern {
            pattern: pattern.to_string(),
            source,
        }
    }
}
