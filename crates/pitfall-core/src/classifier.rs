/// Nearest-prototype classification with a lexical bonus.
///
/// Each document is scored against every non-empty category prototype by cosine
/// similarity; a category whose seed patterns match the document's code-keeping text
/// gets a fixed bonus on top. The best category wins if it reaches the threshold, otherwise the
/// document stays unclassified and is left out of every count.
use crate::model::Document;
use crate::prototype::CategoryPrototype;
use crate::taxonomy::PitfallCategory;
use crate::vectorizer::{cosine_similarity, SparseVector};

/// Minimum adjusted score for a document to be assigned a category.
pub const SIMILARITY_THRESHOLD: f64 = 0.10;
/// Added to the similarity when the document matches one of the category's seeds.
pub const SEED_BONUS: f64 = 0.10;

#[derive(Debug, Clone)]
pub struct ClassificationResult<'t> {
    pub document_id: u64,
    pub category: &'t PitfallCategory,
    pub score: f64,
}

#[derive(Debug, Clone, Copy)]
pub struct Classifier {
    threshold: f64,
    seed_bonus: f64,
}

impl Default for Classifier {
    fn default() -> Self {
        Self {
            threshold: SIMILARITY_THRESHOLD,
            seed_bonus: SEED_BONUS,
        }
    }
}

impl Classifier {
    /// Best category for the document, or `None` when nothing reaches the threshold.
    ///
    /// Categories are visited in taxonomy order and only a strictly greater score
    /// replaces the current best, so exact ties go to the lowest category code.
    pub fn classify<'t>(
        &self,
        document: &Document,
        vector: &SparseVector,
        prototypes: &[CategoryPrototype<'t>],
    ) -> Option<ClassificationResult<'t>> {
        let mut best: Option<(&'t PitfallCategory, f64)> = None;

        for prototype in prototypes.iter().filter(|p| !p.vector.is_empty()) {
            let mut score = cosine_similarity(vector, &prototype.vector);
            if prototype.category.matches_seed(&document.seed_text) {
                score += self.seed_bonus;
            }
            if best.map_or(true, |(_, top)| score > top) {
                best = Some((prototype.category, score));
            }
        }

        let (category, score) = best?;
        if score < self.threshold {
            return None;
        }
        Some(ClassificationResult {
            document_id: document.id,
            category,
            score,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::taxonomy::Taxonomy;

    fn doc(id: u64, text: &str) -> Document {
        Document {
            id,
            text: text.to_string(),
            seed_text: text.to_string(),
        }
    }

    fn prototype<'t>(
        taxonomy: &'t Taxonomy,
        code: &str,
        weights: &[(usize, f64)],
    ) -> CategoryPrototype<'t> {
        CategoryPrototype {
            category: taxonomy.get(code).unwrap(),
            vector: SparseVector::from_weights(weights.iter().copied()),
            support: 0,
        }
    }

    #[test]
    fn picks_the_most_similar_prototype() {
        let taxonomy = Taxonomy::builtin().unwrap();
        let prototypes = vec![
            prototype(&taxonomy, "P1", &[(0, 1.0)]),
            prototype(&taxonomy, "P3", &[(1, 1.0)]),
        ];
        let vector = SparseVector::from_weights([(1, 2.0), (2, 0.5)]);

        let result = Classifier::default()
            .classify(&doc(7, "plain words"), &vector, &prototypes)
            .unwrap();
        assert_eq!(result.document_id, 7);
        assert_eq!(result.category.code, "P3");
    }

    #[test]
    fn seed_bonus_overrides_weak_similarity() {
        let taxonomy = Taxonomy::builtin().unwrap();
        let prototypes = vec![
            prototype(&taxonomy, "P1", &[(0, 1.0), (1, 1.0)]),
            prototype(&taxonomy, "P2", &[(5, 1.0)]),
        ];
        // slightly similar to P1, orthogonal to P2, but says "deadlock"
        let vector = SparseVector::from_weights([(0, 0.05), (9, 1.0)]);

        let result = Classifier::default()
            .classify(&doc(1, "a deadlock again"), &vector, &prototypes)
            .unwrap();
        assert_eq!(result.category.code, "P2");
        assert!((result.score - SEED_BONUS).abs() < 1e-12);
    }

    #[test]
    fn seed_bonus_uses_code_keeping_text() {
        let taxonomy = Taxonomy::builtin().unwrap();
        let prototypes = vec![
            prototype(&taxonomy, "P1", &[(0, 1.0)]),
            prototype(&taxonomy, "P2", &[(1, 1.0)]),
        ];
        let document = Document {
            id: 3,
            text: "app hangs".to_string(),
            seed_text: "App hangs java.lang.Thread.State: BLOCKED (on object monitor)".to_string(),
        };

        let result = Classifier::default()
            .classify(&document, &SparseVector::from_weights([(9, 1.0)]), &prototypes)
            .unwrap();
        assert_eq!(result.category.code, "P2");
    }

    #[test]
    fn below_threshold_is_unclassified() {
        let taxonomy = Taxonomy::builtin().unwrap();
        let prototypes = vec![prototype(&taxonomy, "P1", &[(0, 1.0), (1, 10.0)])];
        let vector = SparseVector::from_weights([(0, 1.0), (2, 10.0)]);

        let result =
            Classifier::default().classify(&doc(1, "nothing specific"), &vector, &prototypes);
        assert!(result.is_none());
    }

    #[test]
    fn empty_prototypes_are_skipped() {
        let taxonomy = Taxonomy::builtin().unwrap();
        let prototypes = vec![prototype(&taxonomy, "P2", &[])];
        let vector = SparseVector::from_weights([(0, 1.0)]);

        // the seed matches, but the category has no prototype to score against
        let result = Classifier::default().classify(&doc(1, "deadlock"), &vector, &prototypes);
        assert!(result.is_none());
    }

    #[test]
    fn no_prototypes_means_unclassified() {
        let result = Classifier::default().classify(
            &doc(1, "deadlock"),
            &SparseVector::from_weights([(0, 1.0)]),
            &[],
        );
        assert!(result.is_none());
    }

    #[test]
    fn ties_go_to_the_lowest_category_code() {
        let taxonomy = Taxonomy::builtin().unwrap();
        let prototypes = vec![
            prototype(&taxonomy, "P4", &[(0, 1.0)]),
            prototype(&taxonomy, "P6", &[(0, 3.0)]),
        ];
        let vector = SparseVector::from_weights([(0, 2.0)]);

        let result = Classifier::default()
            .classify(&doc(1, "plain words"), &vector, &prototypes)
            .unwrap();
        assert_eq!(result.category.code, "P4");
    }

    #[test]
    fn empty_document_vector_relies_on_seed_evidence_only() {
        let taxonomy = Taxonomy::builtin().unwrap();
        let prototypes = vec![
            prototype(&taxonomy, "P1", &[(0, 1.0)]),
            prototype(&taxonomy, "P3", &[(1, 1.0)]),
        ];
        let empty = SparseVector::new();

        let classifier = Classifier::default();
        let with_seed = classifier
            .classify(&doc(1, "is volatile enough"), &empty, &prototypes)
            .unwrap();
        assert_eq!(with_seed.category.code, "P3");
        assert!(classifier
            .classify(&doc(2, "no evidence"), &empty, &prototypes)
            .is_none());
    }
}
