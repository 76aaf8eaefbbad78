pub mod enricher;
pub mod providers;
pub mod ranker;
pub mod recommendations;

pub use enricher::Enricher;
pub use providers::{PosterFetcher, TmdbPosterFetcher};
pub use ranker::Ranker;
pub use recommendations::Recommender;
