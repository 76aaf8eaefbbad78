pub mod movie;
pub mod recommendation;

pub use movie::{parse_release_year, Movie, YearSource};
pub use recommendation::{Neighbor, Recommendation, RecommendationResponse, TmdbMovieDetails};
