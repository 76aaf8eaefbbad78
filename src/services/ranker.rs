use std::cmp::Ordering;

use crate::{
    error::{AppError, AppResult},
    models::Neighbor,
    store::Catalog,
};

/// Number of neighbors returned when no limit is configured
pub const DEFAULT_LIMIT: usize = 5;

/// Ranks catalog rows by similarity to a queried movie
///
/// The queried row is excluded by index before sorting, so a matrix whose
/// diagonal is not its row maximum still never recommends the movie itself.
#[derive(Debug, Clone, Copy)]
pub struct Ranker {
    limit: usize,
}

impl Default for Ranker {
    fn default() -> Self {
        Self::new(DEFAULT_LIMIT)
    }
}

impl Ranker {
    pub fn new(limit: usize) -> Self {
        Self { limit }
    }

    /// Top neighbors of the first movie titled exactly `title`
    pub fn rank(&self, catalog: &Catalog, title: &str) -> AppResult<Vec<Neighbor>> {
        let index = catalog
            .find_index(title)
            .ok_or_else(|| AppError::NotFound(title.to_string()))?;

        Ok(self.rank_index(catalog, index))
    }

    /// Top neighbors of the movie at row `index`
    pub fn rank_index(&self, catalog: &Catalog, index: usize) -> Vec<Neighbor> {
        catalog
            .similarity_row(index)
            .map(|row| top_neighbors(row, index, self.limit))
            .unwrap_or_default()
    }
}

/// Highest-scoring columns of `row`, skipping column `exclude`
///
/// Ordered by score descending, ties by ascending index. `-0.0` ties with
/// `0.0`; NaN scores rank below every other score.
pub fn top_neighbors(row: &[f64], exclude: usize, limit: usize) -> Vec<Neighbor> {
    let mut candidates: Vec<Neighbor> = row
        .iter()
        .enumerate()
        .filter(|(index, _)| *index != exclude)
        .map(|(index, &score)| Neighbor { index, score })
        .collect();

    candidates.sort_by(compare_neighbors);
    candidates.truncate(limit);
    candidates
}

fn compare_neighbors(a: &Neighbor, b: &Neighbor) -> Ordering {
    sort_key(b.score)
        .total_cmp(&sort_key(a.score))
        .then_with(|| a.index.cmp(&b.index))
}

fn sort_key(score: f64) -> f64 {
    if score.is_nan() {
        f64::NEG_INFINITY
    } else {
        // total_cmp orders -0.0 below 0.0
        score + 0.0
    }
}
