pub mod artifacts;
pub mod catalog;
pub mod similarity;

pub use artifacts::load_catalog;
pub use catalog::Catalog;
pub use similarity::SimilarityMatrix;
