/// Poster metadata provider abstraction
///
/// The enricher only needs one thing from the outside world: a poster image
/// URL for a movie identifier. Providers implement that single lookup and
/// report every failure through `AppResult`; substituting a placeholder is
/// the caller's decision.
use crate::error::AppResult;

pub mod tmdb;

pub use tmdb::TmdbPosterFetcher;

/// Trait for poster lookup providers
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait PosterFetcher: Send + Sync {
    /// Fetch the full poster image URL for a movie
    ///
    /// Returns `AppError::FetchFailed` when the provider cannot produce a URL,
    /// whatever the reason (timeout, bad status, malformed body, no poster).
    async fn fetch_poster(&self, movie_id: i64) -> AppResult<String>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
