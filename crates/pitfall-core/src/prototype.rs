/// Per-category reference vectors.
///
/// A prototype is the mean TF-IDF vector of the category description plus every corpus
/// document whose code-keeping text matches one of the category's seed patterns. The description always
/// contributes, so every category gets a prototype even without corpus support; it may
/// still be empty when none of the description's terms occur in the corpus.
use tracing::debug;

use crate::model::Document;
use crate::taxonomy::{PitfallCategory, Taxonomy};
use crate::vectorizer::{CorpusVectorizer, SparseVector};

#[derive(Debug, Clone)]
pub struct CategoryPrototype<'t> {
    pub category: &'t PitfallCategory,
    pub vector: SparseVector,
    /// Number of corpus documents that matched a seed pattern.
    pub support: usize,
}

pub fn build_prototypes<'t>(
    vectorizer: &CorpusVectorizer,
    taxonomy: &'t Taxonomy,
    documents: &[Document],
) -> Vec<CategoryPrototype<'t>> {
    taxonomy
        .categories()
        .iter()
        .map(|category| build_prototype(vectorizer, category, documents))
        .collect()
}

fn build_prototype<'t>(
    vectorizer: &CorpusVectorizer,
    category: &'t PitfallCategory,
    documents: &[Document],
) -> CategoryPrototype<'t> {
    let mut references = vec![vectorizer.vectorize(category.description)];
    references.extend(
        documents
            .iter()
            .filter(|d| category.matches_seed(&d.seed_text))
            .map(|d| vectorizer.vectorize(&d.text)),
    );
    let support = references.len() - 1;
    let vector = SparseVector::mean(&references);

    debug!(
        code = category.code,
        support,
        dimensions = vector.len(),
        "category prototype built"
    );

    CategoryPrototype {
        category,
        vector,
        support,
    }
}
