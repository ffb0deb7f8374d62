use serde::{Deserialize, Serialize};

use crate::classifier::ClassificationResult;

/// Maximum number of example question ids kept per category.
pub const MAX_EXAMPLES: usize = 3;

/// Count of questions assigned to one pitfall category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
pub struct PitfallStat {
    /// Category code, e.g. "P2"
    pub code: String,
    /// Category label, e.g. "Deadlock"
    pub label: String,
    /// Number of questions classified into this category
    pub count: u64,
    /// Up to three sample question ids, in corpus order
    pub examples: Vec<u64>,
}

/// Folds classification results into per-category counts.
///
/// Categories are kept in the order they were first assigned; `finish` sorts by count
/// with a stable sort, so equal counts keep that order.
#[derive(Debug, Default)]
pub struct ResultAggregator {
    stats: Vec<PitfallStat>,
}

impl ResultAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, result: &ClassificationResult<'_>) {
        let code = result.category.code;
        let position = match self.stats.iter().position(|s| s.code == code) {
            Some(position) => position,
            None => {
                self.stats.push(PitfallStat {
                    code: code.to_string(),
                    label: result.category.label.to_string(),
                    count: 0,
                    examples: Vec::new(),
                });
                self.stats.len() - 1
            }
        };

        let stat = &mut self.stats[position];
        stat.count += 1;
        if stat.examples.len() < MAX_EXAMPLES {
            stat.examples.push(result.document_id);
        }
    }

    /// Sorted by descending count and truncated to `top_n`.
    pub fn finish(mut self, top_n: usize) -> Vec<PitfallStat> {
        self.stats.sort_by(|a, b| b.count.cmp(&a.count));
        self.stats.truncate(top_n);
        self.stats
    }
}

impl<'t> Extend<ClassificationResult<'t>> for ResultAggregator {
    fn extend<I: IntoIterator<Item = ClassificationResult<'t>>>(&mut self, iter: I) {
        for result in iter {
            self.add(&result);
        }
    }
}
