use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::{
    error::{AppError, AppResult},
    models::{Movie, YearSource},
    store::{Catalog, SimilarityMatrix},
};

/// Movie table as written by the offline step
///
/// Either column-oriented (`{"title": {"0": "Avatar", ...}, ...}`, a
/// dataframe `to_dict()` dump) or a list of row objects.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawMovieTable {
    Columns(BTreeMap<String, BTreeMap<String, Value>>),
    Records(Vec<Map<String, Value>>),
}

/// Loads both artifacts and checks that they describe the same movies
pub fn load_catalog(movies_path: &Path, similarity_path: &Path) -> AppResult<Catalog> {
    let (movies, year_source) = load_movies(movies_path)?;
    let similarity = load_similarity(similarity_path)?;
    let catalog = Catalog::new(movies, similarity, year_source)?;

    tracing::info!(
        movies = catalog.len(),
        year_source = ?catalog.year_source(),
        movies_path = %movies_path.display(),
        similarity_path = %similarity_path.display(),
        "Artifacts loaded"
    );

    Ok(catalog)
}

/// Reads the movie table and resolves its year source
pub fn load_movies(path: &Path) -> AppResult<(Vec<Movie>, YearSource)> {
    let raw: RawMovieTable = read_json(path)?;
    parse_movie_table(raw)
}

/// Reads the similarity matrix
pub fn load_similarity(path: &Path) -> AppResult<SimilarityMatrix> {
    let rows: Vec<Vec<f64>> = read_json(path)?;
    SimilarityMatrix::from_rows(rows)
}

fn read_json<T: DeserializeOwned>(path: &Path) -> AppResult<T> {
    let file = File::open(path).map_err(|e| {
        AppError::LoadFailure(format!("cannot open {}: {}", path.display(), e))
    })?;

    serde_json::from_reader(BufReader::new(file)).map_err(|e| {
        AppError::LoadFailure(format!("cannot parse {}: {}", path.display(), e))
    })
}

fn parse_movie_table(raw: RawMovieTable) -> AppResult<(Vec<Movie>, YearSource)> {
    match raw {
        RawMovieTable::Columns(columns) => {
            let year_source = YearSource::detect(columns.keys().map(String::as_str));

            let mut positions = BTreeSet::new();
            for cells in columns.values() {
                for key in cells.keys() {
                    let position: usize = key.parse().map_err(|_| {
                        AppError::LoadFailure(format!("row key {:?} is not a row position", key))
                    })?;
                    positions.insert((position, key.as_str()));
                }
            }

            let movies = positions
                .into_iter()
                .map(|(_, key)| {
                    Movie::from_row(
                        |column| columns.get(column).and_then(|cells| cells.get(key)),
                        year_source,
                    )
                })
                .collect();

            Ok((movies, year_source))
        }
        RawMovieTable::Records(records) => {
            let year_source = YearSource::detect(
                records
                    .iter()
                    .flat_map(|record| record.keys().map(String::as_str)),
            );

            let movies = records
                .iter()
                .map(|record| Movie::from_row(|column| record.get(column), year_source))
                .collect();

            Ok((movies, year_source))
        }
    }
}
