/// End-to-end pitfall discovery over one corpus snapshot.
///
/// Pipeline per call:
/// 1. merge title, body and accepted answer; gate with the candidate filter
/// 2. fit the vectorizer over every candidate's normalized text
/// 3. build one prototype per taxonomy category
/// 4. classify every candidate (in parallel, read-only shared state)
/// 5. aggregate, sort and truncate
///
/// Nothing is cached between calls: vocabulary and prototypes are rebuilt from the
/// records passed in, so repeated calls on the same records give the same output.
use rayon::prelude::*;
use tracing::{debug, info};

use crate::aggregate::{PitfallStat, ResultAggregator};
use crate::classifier::Classifier;
use crate::error::CoreError;
use crate::filter::CandidateFilter;
use crate::model::{Document, QuestionRecord};
use crate::prototype::build_prototypes;
use crate::taxonomy::Taxonomy;
use crate::text::TextNormalizer;
use crate::vectorizer::CorpusVectorizer;

/// Output of one run together with the numbers behind it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnalysisReport {
    pub stats: Vec<PitfallStat>,
    pub corpus_size: usize,
    pub candidates: usize,
    pub classified: usize,
    pub unclassified: usize,
    pub vocabulary_size: usize,
}

pub struct PitfallAnalyzer {
    normalizer: TextNormalizer,
    filter: CandidateFilter,
    taxonomy: Taxonomy,
    classifier: Classifier,
}

impl PitfallAnalyzer {
    /// Compile the built-in pattern tables. Fails only if a built-in pattern is invalid.
    pub fn new() -> Result<Self, CoreError> {
        Ok(Self {
            normalizer: TextNormalizer::new()?,
            filter: CandidateFilter::new()?,
            taxonomy: Taxonomy::builtin()?,
            classifier: Classifier::default(),
        })
    }

    pub fn taxonomy(&self) -> &Taxonomy {
        &self.taxonomy
    }

    /// Top `top_n` pitfall categories by number of classified questions.
    pub fn analyze(&self, records: &[QuestionRecord], top_n: usize) -> Vec<PitfallStat> {
        self.analyze_report(records, top_n).stats
    }

    pub fn analyze_report(&self, records: &[QuestionRecord], top_n: usize) -> AnalysisReport {
        let documents: Vec<Document> = records
            .iter()
            .map(|record| self.document(record))
            .filter(|document| self.filter.is_candidate(&document.seed_text))
            .collect();

        if documents.is_empty() {
            info!(corpus_size = records.len(), "no concurrency candidates in corpus");
            return AnalysisReport {
                corpus_size: records.len(),
                ..AnalysisReport::default()
            };
        }

        let texts: Vec<&str> = documents.iter().map(|d| d.text.as_str()).collect();
        let vectorizer = CorpusVectorizer::fit(&texts);
        let prototypes = build_prototypes(&vectorizer, &self.taxonomy, &documents);
        debug!(
            vocabulary = vectorizer.vocabulary_size(),
            prototypes = prototypes.iter().filter(|p| !p.vector.is_empty()).count(),
            "corpus model fitted"
        );

        let results: Vec<_> = documents
            .par_iter()
            .map(|document| {
                let vector = vectorizer.vectorize(&document.text);
                self.classifier.classify(document, &vector, &prototypes)
            })
            .collect();

        let mut aggregator = ResultAggregator::new();
        let mut classified = 0usize;
        for result in results.iter().flatten() {
            aggregator.add(result);
            classified += 1;
        }

        let report = AnalysisReport {
            stats: aggregator.finish(top_n),
            corpus_size: records.len(),
            candidates: documents.len(),
            classified,
            unclassified: documents.len() - classified,
            vocabulary_size: vectorizer.vocabulary_size(),
        };

        info!(
            corpus_size = report.corpus_size,
            candidates = report.candidates,
            classified = report.classified,
            unclassified = report.unclassified,
            vocabulary = report.vocabulary_size,
            returned = report.stats.len(),
            "pitfall analysis complete"
        );

        report
    }

    /// Normalized text for vectorizing plus the code-keeping view for seed matching.
    pub fn document(&self, record: &QuestionRecord) -> Document {
        let parts = [
            self.normalizer.normalize(&record.title),
            self.normalizer.normalize(&record.body),
            self.normalizer
                .normalize(record.accepted_answer_body.as_deref().unwrap_or_default()),
        ];
        Document {
            id: record.id,
            text: join_non_empty(&parts),
            seed_text: self.markup_text(record),
        }
    }

    /// Candidate-filter and seed-matching view of a record: markup stripped, code kept,
    /// case preserved.
    pub fn markup_text(&self, record: &QuestionRecord) -> String {
        let parts = [
            self.normalizer.strip_tags(&record.title),
            self.normalizer.strip_tags(&record.body),
            self.normalizer
                .strip_tags(record.accepted_answer_body.as_deref().unwrap_or_default()),
        ];
        join_non_empty(&parts)
    }
}

fn join_non_empty(parts: &[String]) -> String {
    parts
        .iter()
        .filter(|p| !p.is_empty())
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(" ")
}
