/// TMDB poster provider
///
/// Looks up `/3/movie/{id}` and joins the returned `poster_path` onto the
/// configured image base. One request per lookup, bounded by the client
/// timeout, never retried.
use std::time::Duration;

use reqwest::Client as HttpClient;

use crate::{
    config::Config,
    error::{AppError, AppResult},
    models::TmdbMovieDetails,
    services::providers::PosterFetcher,
};

#[derive(Clone)]
pub struct TmdbPosterFetcher {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
    language: String,
    poster_base_url: String,
}

impl TmdbPosterFetcher {
    pub fn new(
        api_key: String,
        api_url: String,
        language: String,
        poster_base_url: String,
        timeout: Duration,
    ) -> AppResult<Self> {
        let http_client = HttpClient::builder().timeout(timeout).build()?;

        Ok(Self {
            http_client,
            api_key,
            api_url,
            language,
            poster_base_url,
        })
    }

    pub fn from_config(config: &Config) -> AppResult<Self> {
        Self::new(
            config.tmdb_api_key.clone(),
            config.tmdb_api_url.clone(),
            config.tmdb_language.clone(),
            config.poster_base_url.clone(),
            config.poster_timeout(),
        )
    }

    fn poster_url(&self, poster_path: &str) -> String {
        format!(
            "{}/{}",
            self.poster_base_url.trim_end_matches('/'),
            poster_path.trim_start_matches('/')
        )
    }
}

#[async_trait::async_trait]
impl PosterFetcher for TmdbPosterFetcher {
    async fn fetch_poster(&self, movie_id: i64) -> AppResult<String> {
        let url = format!("{}/3/movie/{}", self.api_url.trim_end_matches('/'), movie_id);

        let response = self
            .http_client
            .get(&url)
            .query(&[
                ("api_key", self.api_key.as_str()),
                ("language", self.language.as_str()),
            ])
            .send()
            .await
            .map_err(|e| AppError::FetchFailed(format!("request for movie {} failed: {}", movie_id, e)))?;

        if !response.status().is_success() {
            return Err(AppError::FetchFailed(format!(
                "TMDB returned status {} for movie {}",
                response.status(),
                movie_id
            )));
        }

        let details: TmdbMovieDetails = response.json().await.map_err(|e| {
            AppError::FetchFailed(format!("malformed TMDB response for movie {}: {}", movie_id, e))
        })?;

        let poster_path = details
            .poster_path
            .filter(|p| !p.trim().is_empty())
            .ok_or_else(|| {
                AppError::FetchFailed(format!("movie {} has no poster_path", movie_id))
            })?;

        tracing::debug!(movie_id, provider = self.name(), "Poster fetched");

        Ok(self.poster_url(&poster_path))
    }

    fn name(&self) -> &'static str {
        "tmdb"
    }
}
