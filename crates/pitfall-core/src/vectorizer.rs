/// Corpus-relative TF-IDF vectorization.
///
/// A `CorpusVectorizer` is fitted once per analysis run over the candidate corpus and
/// discarded afterwards. Vectors are only comparable when produced by the same fitted
/// vectorizer, since term indices are assigned per fit.
use std::collections::{BTreeMap, HashMap, HashSet};

use crate::text::tokenize;

/// Sparse term-weight vector keyed by vocabulary index.
///
/// Absent keys mean weight 0; no stored entry is ever exactly 0. Backed by a `BTreeMap`
/// so iteration (and therefore floating point summation order) is deterministic.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    weights: BTreeMap<usize, f64>,
}

impl SparseVector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_weights(weights: impl IntoIterator<Item = (usize, f64)>) -> Self {
        let mut vector = Self::new();
        for (index, weight) in weights {
            vector.set(index, weight);
        }
        vector
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn get(&self, index: usize) -> f64 {
        self.weights.get(&index).copied().unwrap_or(0.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.weights.iter().map(|(&index, &weight)| (index, weight))
    }

    /// Sets a weight, removing the entry instead when the weight is 0.
    pub fn set(&mut self, index: usize, weight: f64) {
        if weight == 0.0 {
            self.weights.remove(&index);
        } else {
            self.weights.insert(index, weight);
        }
    }

    pub fn norm(&self) -> f64 {
        self.weights.values().map(|w| w * w).sum::<f64>().sqrt()
    }

    /// Dot product over the intersection of non-zero dimensions.
    pub fn dot(&self, other: &SparseVector) -> f64 {
        let (small, large) = if self.len() <= other.len() {
            (self, other)
        } else {
            (other, self)
        };
        small
            .weights
            .iter()
            .filter_map(|(index, weight)| large.weights.get(index).map(|w| weight * w))
            .sum()
    }

    /// Component-wise arithmetic mean. The mean of no vectors is the empty vector.
    pub fn mean<'a>(vectors: impl IntoIterator<Item = &'a SparseVector>) -> SparseVector {
        let mut sums: BTreeMap<usize, f64> = BTreeMap::new();
        let mut count = 0usize;
        for vector in vectors {
            count += 1;
            for (index, weight) in vector.iter() {
                *sums.entry(index).or_insert(0.0) += weight;
            }
        }
        if count == 0 {
            return SparseVector::new();
        }
        let divisor = count as f64;
        SparseVector::from_weights(sums.into_iter().map(|(index, sum)| (index, sum / divisor)))
    }
}

/// Cosine of the angle between two vectors. Any comparison involving an empty (or
/// zero-norm) vector is 0.
pub fn cosine_similarity(a: &SparseVector, b: &SparseVector) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let denominator = a.norm() * b.norm();
    if denominator == 0.0 {
        return 0.0;
    }
    a.dot(b) / denominator
}

/// Vocabulary and inverse document frequencies fitted over one corpus snapshot.
#[derive(Debug, Clone, Default)]
pub struct CorpusVectorizer {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
    document_count: usize,
}

impl CorpusVectorizer {
    /// Fit over the full corpus.
    ///
    /// Terms are indexed by first occurrence across the documents. For every term,
    /// `idf = ln(N / (1 + df))` where `df` is the number of documents containing the
    /// term at least once. A term present in every document gets a negative idf; that
    /// is kept as is.
    pub fn fit<S: AsRef<str>>(documents: &[S]) -> Self {
        let mut vocabulary: HashMap<String, usize> = HashMap::new();
        let mut document_frequency: Vec<usize> = Vec::new();

        for document in documents {
            let mut seen: HashSet<usize> = HashSet::new();
            for token in tokenize(document.as_ref()) {
                let next_index = vocabulary.len();
                let index = *vocabulary.entry(token).or_insert(next_index);
                if index == document_frequency.len() {
                    document_frequency.push(0);
                }
                if seen.insert(index) {
                    document_frequency[index] += 1;
                }
            }
        }

        let n = documents.len() as f64;
        let idf = document_frequency
            .iter()
            .map(|&df| (n / (1.0 + df as f64)).ln())
            .collect();

        Self {
            vocabulary,
            idf,
            document_count: documents.len(),
        }
    }

    /// Raw term count times idf for every known token. Unknown tokens are dropped, so
    /// empty or out-of-vocabulary text yields an empty vector.
    pub fn vectorize(&self, text: &str) -> SparseVector {
        let mut counts: BTreeMap<usize, u32> = BTreeMap::new();
        for token in tokenize(text) {
            if let Some(&index) = self.vocabulary.get(&token) {
                *counts.entry(index).or_insert(0) += 1;
            }
        }
        SparseVector::from_weights(
            counts
                .into_iter()
                .map(|(index, count)| (index, f64::from(count) * self.idf[index])),
        )
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn document_count(&self) -> usize {
        self.document_count
    }

    pub fn index_of(&self, term: &str) -> Option<usize> {
        self.vocabulary.get(term).copied()
    }

    pub fn idf(&self, term: &str) -> Option<f64> {
        self.index_of(term).map(|index| self.idf[index])
    }
}
