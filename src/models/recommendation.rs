use serde::{Deserialize, Serialize};

/// A ranked candidate: row index into the catalog and its similarity score
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Neighbor {
    pub index: usize,
    pub score: f64,
}

/// Display record for one recommended movie
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recommendation {
    pub title: String,
    pub poster_url: String,
    /// `None` when the release year is unknown
    pub year: Option<i32>,
    pub rating: f64,
}

/// Response body for a recommendation request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationResponse {
    /// The title that was queried
    pub title: String,
    /// Recommendations in rank order
    pub recommendations: Vec<Recommendation>,
}

/// Movie details returned by the TMDB `/3/movie/{id}` endpoint
///
/// Only the poster path is read; all other fields are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbMovieDetails {
    #[serde(default)]
    pub poster_path: Option<String>,
}
