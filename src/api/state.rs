use std::sync::Arc;

use crate::{
    config::Config,
    error::AppResult,
    services::{Enricher, PosterFetcher, Ranker, Recommender, TmdbPosterFetcher},
    store::{self, Catalog},
};

/// Shared application state
///
/// Read-only after startup; cloning only bumps reference counts.
#[derive(Clone)]
pub struct AppState {
    pub recommender: Arc<Recommender>,
}

impl AppState {
    /// Wires a state from an already loaded catalog and a poster provider
    pub fn new(
        catalog: Catalog,
        fetcher: Arc<dyn PosterFetcher>,
        fallback_poster_url: String,
        recommendation_count: usize,
    ) -> Self {
        let recommender = Recommender::new(
            Arc::new(catalog),
            Ranker::new(recommendation_count),
            Enricher::new(fetcher, fallback_poster_url),
        );

        Self {
            recommender: Arc::new(recommender),
        }
    }

    /// Loads the artifacts named in `config` and connects the TMDB provider
    ///
    /// Fails with `AppError::LoadFailure` if either artifact is missing,
    /// unreadable, or inconsistent with the other.
    pub fn from_config(config: &Config) -> AppResult<Self> {
        let catalog = store::load_catalog(&config.movies_path(), &config.similarity_path())?;
        let fetcher = TmdbPosterFetcher::from_config(config)?;

        Ok(Self::new(
            catalog,
            Arc::new(fetcher),
            config.fallback_poster_url.clone(),
            config.recommendation_count,
        ))
    }

    pub fn catalog(&self) -> &Catalog {
        self.recommender.catalog()
    }
}
