/// Coarse concurrency-relatedness gate.
///
/// Runs before vectorization and is tuned for recall: anything that might be about
/// threads passes, and the classifier's similarity threshold discards the noise later.
/// A document rejected here can never be recovered.
use regex::{Regex, RegexSet};

use crate::error::CoreError;
use crate::text::compile;

/// Case-insensitive whole-word concurrency vocabulary.
const KEYWORD_PATTERNS: &[&str] = &[
    r"\bthreads?\b",
    r"\bthread(ed|ing)\b",
    r"\bmulti[\s-]?thread\w*",
    r"\bconcurren(t|cy)\b",
    r"\bparallel(ism|ize|ized)?\b",
    r"\bdeadlock\w*",
    r"\blivelock\w*",
    r"\brace[\s-]+conditions?\b",
    r"\bdata[\s-]+races?\b",
    r"\bsynchroniz\w*",
    r"\bvolatile\b",
    r"\batomic\w*",
    r"\bmutex\w*",
    r"\bsemaphores?\b",
    r"\block(s|ed|ing)?\b",
    r"\bunlock\w*",
    r"\breentrant\s*lock\w*",
    r"\bread\s*write\s*lock\w*",
    r"\bmonitors?\b",
    r"\bthread[\s-]*pools?\b",
    r"\bexecutor\w*",
    r"\bcompletable\s*future\w*",
    r"\bfutures?\b",
    r"\bcountdown\s*latch\w*",
    r"\bcyclic\s*barrier\w*",
    r"\bwait\s*\(\s*\)",
    r"\bnotify(all)?\b",
    r"\bhappens[\s-]+before\b",
    r"\bmemory\s+(model|visibility)\b",
    r"\bstarvation\b",
    r"\bcontention\b",
    r"\bcontext\s+switch\w*",
    r"\binterrupt(ed|s|ion)?\b",
    r"\bfork\s*/?\s*join\w*",
    r"\basync\w*",
    r"\bcallable\b",
    r"\brunnable\b",
    r"\bthread\s*local\w*",
    r"\bblocking\s*queue\w*",
    r"\bproducer[\s-]+consumer\b",
    r"\bcritical\s+sections?\b",
    r"\bthread[\s-]+safe(ty)?\b",
];

/// Class-name shaped exception, optionally package qualified. Case-sensitive, and left
/// open on both ends so plurals and compound names (`UncaughtExceptionHandler`) match.
const EXCEPTION_PATTERN: &str = r"(?:[a-z_]\w*\.)*[A-Z]\w*Exception";

pub struct CandidateFilter {
    keywords: RegexSet,
    exception: Regex,
}

impl CandidateFilter {
    pub fn new() -> Result<Self, CoreError> {
        let keywords = RegexSet::new(KEYWORD_PATTERNS.iter().map(|p| format!("(?i){p}")))
            .map_err(|e| CoreError::pattern("candidate keyword set", e))?;
        Ok(Self {
            keywords,
            exception: compile(EXCEPTION_PATTERN)?,
        })
    }

    /// True when the text mentions any concurrency keyword or an exception class name.
    pub fn is_candidate(&self, text: &str) -> bool {
        self.keywords.is_match(text) || self.exception.is_match(text)
    }

    pub fn pattern_count(&self) -> usize {
        self.keywords.len() + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::TextNormalizer;

    fn filter() -> CandidateFilter {
        CandidateFilter::new().unwrap()
    }

    #[test]
    fn accepts_concurrency_vocabulary() {
        let f = filter();
        for text in [
            "my app hits a deadlock",
            "Race condition when two requests arrive",
            "should this field be volatile?",
            "sizing a thread pool for io work",
            "ExecutorService never shuts down",
            "semaphore permits leak",
            "is SimpleDateFormat thread-safe",
            "producer-consumer with a bounded buffer",
        ] {
            assert!(f.is_candidate(text), "expected candidate: {text}");
        }
    }

    #[test]
    fn accepts_exception_class_names() {
        let f = filter();
        assert!(f.is_candidate("getting java.util.ConcurrentModificationException in a loop"));
        assert!(f.is_candidate("IllegalMonitorStateException on wake-up"));
        assert!(f.is_candidate("Why do I get ExecutionExceptions from get()"));
        assert!(f.is_candidate("registering an UncaughtExceptionHandler does nothing"));
        assert!(f.is_candidate("a custom InvalidStateExceptionWrapper is thrown"));
    }

    #[test]
    fn exception_pattern_is_case_sensitive() {
        let f = filter();
        assert!(!f.is_candidate("this throws an exception at startup"));
    }

    #[test]
    fn rejects_unrelated_text() {
        let f = filter();
        assert!(!f.is_candidate("how to format a date string"));
        assert!(!f.is_candidate("center a div with flexbox"));
        assert!(!f.is_candidate(""));
    }

    #[test]
    fn has_a_broad_pattern_set() {
        assert!(filter().pattern_count() >= 35);
    }

    #[test]
    fn code_only_evidence_passes_on_markup_text_but_not_on_normalized_text() {
        let html = "<p>Why is this slow?</p><pre><code>synchronized(lock){ total += x; }</code></pre>";
        let normalizer = TextNormalizer::new().unwrap();
        let f = filter();

        assert!(f.is_candidate(&normalizer.strip_tags(html)));
        assert!(!f.is_candidate(&normalizer.normalize(html)));
    }
}
