use std::sync::Arc;

use crate::{
    error::AppResult,
    models::RecommendationResponse,
    services::{Enricher, Ranker},
    store::Catalog,
};

/// Generates recommendations for a movie title
///
/// Holds the loaded catalog together with the ranking and enrichment steps.
/// Nothing here is mutated after construction, so one instance serves every
/// request.
#[derive(Clone)]
pub struct Recommender {
    catalog: Arc<Catalog>,
    ranker: Ranker,
    enricher: Enricher,
}

impl Recommender {
    pub fn new(catalog: Arc<Catalog>, ranker: Ranker, enricher: Enricher) -> Self {
        Self {
            catalog,
            ranker,
            enricher,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Ranks neighbors of `title` and attaches display metadata
    ///
    /// Returns `AppError::NotFound` when no movie has that exact title,
    /// blank titles included.
    pub async fn recommend(&self, title: &str) -> AppResult<RecommendationResponse> {
        let neighbors = match self.ranker.rank(&self.catalog, title) {
            Ok(neighbors) => neighbors,
            Err(e) => {
                tracing::warn!(title = %title, error = %e, "Movie not found");
                return Err(e);
            }
        };

        tracing::info!(
            title = %title,
            results = neighbors.len(),
            "Ranked similar movies"
        );

        let recommendations = self.enricher.enrich_all(&self.catalog, &neighbors).await;

        Ok(RecommendationResponse {
            title: title.to_string(),
            recommendations,
        })
    }
}
