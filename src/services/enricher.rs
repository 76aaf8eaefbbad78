use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    models::{Movie, Neighbor, Recommendation},
    services::providers::PosterFetcher,
    store::Catalog,
};

pub const UNKNOWN_TITLE: &str = "Unknown";

/// Turns ranked catalog rows into display records
///
/// Every record gets a poster URL: when the fetcher fails for any reason the
/// configured placeholder is substituted and the remaining items carry on.
#[derive(Clone)]
pub struct Enricher {
    fetcher: Arc<dyn PosterFetcher>,
    fallback_poster_url: String,
}

impl Enricher {
    pub fn new(fetcher: Arc<dyn PosterFetcher>, fallback_poster_url: String) -> Self {
        Self {
            fetcher,
            fallback_poster_url,
        }
    }

    /// Display record for the movie at row `index`
    pub async fn enrich(&self, catalog: &Catalog, index: usize) -> Recommendation {
        let movie = catalog.movie(index).cloned().unwrap_or_default();
        let poster = lookup_poster(self.fetcher.as_ref(), movie.id).await;
        self.describe(movie, poster)
    }

    /// Display records for `neighbors`, in the same order
    ///
    /// Poster lookups run concurrently; results are collected in rank order.
    pub async fn enrich_all(&self, catalog: &Catalog, neighbors: &[Neighbor]) -> Vec<Recommendation> {
        let mut tasks = Vec::with_capacity(neighbors.len());

        for neighbor in neighbors {
            let movie = catalog.movie(neighbor.index).cloned().unwrap_or_default();
            let fetcher = Arc::clone(&self.fetcher);
            let movie_id = movie.id;
            let task =
                tokio::spawn(async move { lookup_poster(fetcher.as_ref(), movie_id).await });
            tasks.push((movie, task));
        }

        let mut results = Vec::with_capacity(tasks.len());
        for (movie, task) in tasks {
            let poster = match task.await {
                Ok(poster) => poster,
                Err(e) => Err(AppError::Internal(e.to_string())),
            };
            results.push(self.describe(movie, poster));
        }

        results
    }

    fn describe(&self, movie: Movie, poster: AppResult<String>) -> Recommendation {
        let poster_url = match poster {
            Ok(url) => url,
            Err(e) => {
                tracing::warn!(
                    movie_id = ?movie.id,
                    provider = self.fetcher.name(),
                    error = %e,
                    "Poster unavailable, using placeholder"
                );
                self.fallback_poster_url.clone()
            }
        };

        Recommendation {
            title: movie.title.unwrap_or_else(|| UNKNOWN_TITLE.to_string()),
            poster_url,
            year: movie.year,
            rating: movie.rating.unwrap_or(0.0),
        }
    }
}

async fn lookup_poster(fetcher: &dyn PosterFetcher, movie_id: Option<i64>) -> AppResult<String> {
    match movie_id {
        Some(id) => fetcher.fetch_poster(id).await,
        None => Err(AppError::FetchFailed("movie has no identifier".to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::YearSource;
    use crate::services::providers::MockPosterFetcher;
    use crate::store::SimilarityMatrix;
    use mockall::predicate::eq;

    const FALLBACK: &str = "https://placehold.co/500x750/333/FFFFFF?text=No+Poster";

    fn catalog(movies: Vec<Movie>) -> Catalog {
        let n = movies.len();
        Catalog::new(
            movies,
            SimilarityMatrix::from_rows(vec![vec![0.0; n]; n]).unwrap(),
            YearSource::ReleaseDate,
        )
        .unwrap()
    }

    fn movie(id: i64, title: &str) -> Movie {
        Movie {
            id: Some(id),
            title: Some(title.to_string()),
            year: Some(2000 + id as i32),
            rating: Some(id as f64),
        }
    }

    fn enricher(mock: MockPosterFetcher) -> Enricher {
        Enricher::new(Arc::new(mock), FALLBACK.to_string())
    }

    #[tokio::test]
    async fn test_enrich_success() {
        let mut mock = MockPosterFetcher::new();
        mock.expect_fetch_poster()
            .with(eq(7))
            .times(1)
            .returning(|id| Ok(format!("https://image.tmdb.org/t/p/w500/{}.jpg", id)));
        mock.expect_name().return_const("mock");

        let catalog = catalog(vec![movie(7, "Heat")]);
        let rec = enricher(mock).enrich(&catalog, 0).await;

        assert_eq!(rec.title, "Heat");
        assert_eq!(rec.poster_url, "https://image.tmdb.org/t/p/w500/7.jpg");
        assert_eq!(rec.year, Some(2007));
        assert_eq!(rec.rating, 7.0);
    }

    #[tokio::test]
    async fn test_enrich_failure_uses_fallback() {
        let mut mock = MockPosterFetcher::new();
        mock.expect_fetch_poster()
            .returning(|_| Err(AppError::FetchFailed("timed out".to_string())));
        mock.expect_name().return_const("mock");

        let catalog = catalog(vec![movie(1, "Heat")]);
        let rec = enricher(mock).enrich(&catalog, 0).await;

        assert_eq!(rec.poster_url, FALLBACK);
    }

    #[tokio::test]
    async fn test_missing_fields_use_defaults() {
        let mut mock = MockPosterFetcher::new();
        mock.expect_fetch_poster().never();
        mock.expect_name().return_const("mock");

        let catalog = catalog(vec![Movie::default()]);
        let rec = enricher(mock).enrich(&catalog, 0).await;

        assert_eq!(rec.title, UNKNOWN_TITLE);
        assert_eq!(rec.rating, 0.0);
        assert_eq!(rec.year, None);
        assert_eq!(rec.poster_url, FALLBACK);
    }

    #[tokio::test]
    async fn test_enrich_all_keeps_rank_order_and_isolates_failures() {
        let mut mock = MockPosterFetcher::new();
        mock.expect_fetch_poster().returning(|id| {
            if id == 3 {
                Err(AppError::FetchFailed("timed out".to_string()))
            } else {
                Ok(format!("https://img/{}.jpg", id))
            }
        });
        mock.expect_name().return_const("mock");

        let catalog = catalog((0..6).map(|i| movie(i, &format!("M{}", i))).collect());
        let neighbors: Vec<Neighbor> = [5, 3, 1, 4, 2]
            .iter()
            .map(|&index| Neighbor { index, score: 0.5 })
            .collect();

        let recs = enricher(mock).enrich_all(&catalog, &neighbors).await;

        let titles: Vec<&str> = recs.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["M5", "M3", "M1", "M4", "M2"]);
        assert_eq!(recs[1].poster_url, FALLBACK);
        assert_eq!(recs[0].poster_url, "https://img/5.jpg");
        assert_eq!(recs[2].poster_url, "https://img/1.jpg");
        assert_eq!(recs[3].poster_url, "https://img/4.jpg");
        assert_eq!(recs[4].poster_url, "https://img/2.jpg");
        assert!(recs.iter().all(|r| !r.poster_url.is_empty()));
    }
}
