use std::sync::Arc;

use pitfall_core::analyzer::PitfallAnalyzer;
use pitfall_core::api::{
    AnalysisMeta, CategoryListResponse, MultithreadingPitfallResponse, PitfallQueryParams,
};
use tracing::info;

use crate::config::Config;
use crate::dataset::{corpus_fingerprint, LocalDataset};
use crate::error::AppError;

/// Shared between the REST and MCP front ends.
///
/// The dataset is re-read on every request so edits to the directory show up without a
/// restart; the analysis itself runs on the blocking pool.
#[derive(Clone)]
pub struct InsightService {
    dataset: Arc<LocalDataset>,
    analyzer: Arc<PitfallAnalyzer>,
}

impl InsightService {
    pub fn new(dataset: LocalDataset, analyzer: PitfallAnalyzer) -> Self {
        Self {
            dataset: Arc::new(dataset),
            analyzer: Arc::new(analyzer),
        }
    }

    /// Compiles the analyzer's pattern tables and binds the configured dataset.
    pub fn from_config(config: &Config) -> Result<Self, AppError> {
        let analyzer = PitfallAnalyzer::new()?;
        info!(categories = analyzer.taxonomy().len(), "taxonomy compiled");
        Ok(Self::new(LocalDataset::from_config(config)?, analyzer))
    }

    pub async fn multithreading_pitfalls(
        &self,
        params: &PitfallQueryParams,
    ) -> Result<(MultithreadingPitfallResponse, AnalysisMeta), AppError> {
        let top_n = params.resolved_top_n().map_err(AppError::InvalidRequest)?;
        info!(top_n, dataset = %self.dataset.path().display(), "pitfall analysis requested");

        let dataset = Arc::clone(&self.dataset);
        let analyzer = Arc::clone(&self.analyzer);
        tokio::task::spawn_blocking(move || -> Result<_, AppError> {
            let records = dataset.load_candidates()?;
            let report = analyzer.analyze_report(&records, top_n);
            let meta = AnalysisMeta {
                corpus_size: report.corpus_size,
                candidates: report.candidates,
                classified: report.classified,
                unclassified: report.unclassified,
                vocabulary_size: report.vocabulary_size,
                corpus_fingerprint: corpus_fingerprint(&records),
            };
            Ok((
                MultithreadingPitfallResponse {
                    pitfalls: report.stats,
                },
                meta,
            ))
        })
        .await?
    }

    pub fn categories(&self) -> CategoryListResponse {
        CategoryListResponse {
            categories: self
                .analyzer
                .taxonomy()
                .categories()
                .iter()
                .map(|c| c.info())
                .collect(),
        }
    }
}
