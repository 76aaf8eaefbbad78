use crate::{
    error::{AppError, AppResult},
    models::{Movie, YearSource},
    store::SimilarityMatrix,
};

/// Immutable movie table paired with its similarity matrix
///
/// Built once at startup and shared read-only for the process lifetime.
/// Construction guarantees that row `i` of the matrix describes `movies[i]`,
/// so lookups by index never go out of bounds.
#[derive(Debug, Clone)]
pub struct Catalog {
    movies: Vec<Movie>,
    similarity: SimilarityMatrix,
    year_source: YearSource,
}

impl Catalog {
    pub fn new(
        movies: Vec<Movie>,
        similarity: SimilarityMatrix,
        year_source: YearSource,
    ) -> AppResult<Self> {
        if movies.len() != similarity.len() {
            return Err(AppError::LoadFailure(format!(
                "movie table has {} rows but similarity matrix is {}x{}",
                movies.len(),
                similarity.len(),
                similarity.len()
            )));
        }

        Ok(Self {
            movies,
            similarity,
            year_source,
        })
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    pub fn year_source(&self) -> YearSource {
        self.year_source
    }

    pub fn movie(&self, index: usize) -> Option<&Movie> {
        self.movies.get(index)
    }

    /// Row index of the first movie whose title matches exactly
    pub fn find_index(&self, title: &str) -> Option<usize> {
        self.movies
            .iter()
            .position(|m| m.title.as_deref() == Some(title))
    }

    pub fn similarity_row(&self, index: usize) -> Option<&[f64]> {
        self.similarity.row(index)
    }

    /// All known titles in table order
    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.movies.iter().filter_map(|m| m.title.as_deref())
    }
}
