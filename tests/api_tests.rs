use std::sync::Arc;

use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum_test::TestServer;
use serde_json::Value;

use movie_recommender::{
    api::{create_router, AppState},
    error::{AppError, AppResult},
    models::{Movie, RecommendationResponse, YearSource},
    services::PosterFetcher,
    store::{Catalog, SimilarityMatrix},
};

const FALLBACK: &str = "https://placehold.co/500x750/333/FFFFFF?text=No+Poster";

/// Serves `https://img/{id}.jpg`, except for ids listed as unreachable
struct StubFetcher {
    unreachable: Vec<i64>,
}

#[async_trait::async_trait]
impl PosterFetcher for StubFetcher {
    async fn fetch_poster(&self, movie_id: i64) -> AppResult<String> {
        if self.unreachable.contains(&movie_id) {
            return Err(AppError::FetchFailed("operation timed out".to_string()));
        }
        Ok(format!("https://img/{}.jpg", movie_id))
    }

    fn name(&self) -> &'static str {
        "stub"
    }
}

fn movie(id: i64, title: &str, year: Option<i32>, rating: Option<f64>) -> Movie {
    Movie {
        id: Some(id),
        title: Some(title.to_string()),
        year,
        rating,
    }
}

/// Five movies; "Alien" is clearly closest to "Aliens"
fn small_catalog() -> Catalog {
    let movies = vec![
        movie(348, "Alien", Some(1979), Some(8.1)),
        movie(679, "Aliens", Some(1986), Some(7.9)),
        movie(8077, "Alien 3", None, Some(6.4)),
        movie(78, "Blade Runner", Some(1982), None),
        movie(218, "The Terminator", Some(1984), Some(7.5)),
    ];
    let matrix = SimilarityMatrix::from_rows(vec![
        vec![1.0, 0.9, 0.6, 0.3, 0.2],
        vec![0.9, 1.0, 0.5, 0.1, 0.4],
        vec![0.6, 0.5, 1.0, 0.0, 0.0],
        vec![0.3, 0.1, 0.0, 1.0, 0.2],
        vec![0.2, 0.4, 0.0, 0.2, 1.0],
    ])
    .unwrap();
    Catalog::new(movies, matrix, YearSource::ReleaseDate).unwrap()
}

fn create_test_server(unreachable: Vec<i64>) -> TestServer {
    let state = AppState::new(
        small_catalog(),
        Arc::new(StubFetcher { unreachable }),
        FALLBACK.to_string(),
        5,
    );
    TestServer::new(create_router(state)).unwrap()
}

#[tokio::test]
async fn test_health_check() {
    let server = create_test_server(vec![]);
    let response = server.get("/health").await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["movies"], 5);
}

#[tokio::test]
async fn test_list_movies_in_table_order() {
    let server = create_test_server(vec![]);
    let response = server.get("/api/v1/movies").await;
    response.assert_status_ok();

    let titles: Vec<String> = response.json();
    assert_eq!(
        titles,
        vec!["Alien", "Aliens", "Alien 3", "Blade Runner", "The Terminator"]
    );
}

#[tokio::test]
async fn test_recommendations_small_catalog() {
    let server = create_test_server(vec![]);
    let response = server
        .get("/api/v1/recommendations")
        .add_query_param("title", "Alien")
        .await;
    response.assert_status_ok();

    let body: RecommendationResponse = response.json();
    assert_eq!(body.title, "Alien");

    // Only four other movies exist, so fewer than five come back
    let titles: Vec<&str> = body.recommendations.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, vec!["Aliens", "Alien 3", "Blade Runner", "The Terminator"]);

    let first = &body.recommendations[0];
    assert_eq!(first.poster_url, "https://img/679.jpg");
    assert_eq!(first.year, Some(1986));
    assert_eq!(first.rating, 7.9);

    assert_eq!(body.recommendations[1].year, None);
    assert_eq!(body.recommendations[2].rating, 0.0);
}

#[tokio::test]
async fn test_poster_timeout_uses_fallback_for_that_item_only() {
    let server = create_test_server(vec![8077]);
    let response = server
        .get("/api/v1/recommendations")
        .add_query_param("title", "Aliens")
        .await;
    response.assert_status_ok();

    let body: RecommendationResponse = response.json();
    let posters: Vec<&str> = body
        .recommendations
        .iter()
        .map(|r| r.poster_url.as_str())
        .collect();

    assert_eq!(
        posters,
        vec![
            "https://img/348.jpg",
            FALLBACK,
            "https://img/218.jpg",
            "https://img/78.jpg",
        ]
    );
}

#[tokio::test]
async fn test_unknown_title_returns_not_found_and_empty_results() {
    let server = create_test_server(vec![]);
    let response = server
        .get("/api/v1/recommendations")
        .add_query_param("title", "Alien: Romulus")
        .await;
    response.assert_status(StatusCode::NOT_FOUND);

    let body: Value = response.json();
    assert_eq!(body["error"], "Movie not found: Alien: Romulus");
    assert_eq!(body["recommendations"].as_array().unwrap().len(), 0);

    // The service stays usable afterwards
    let response = server
        .get("/api/v1/recommendations")
        .add_query_param("title", "Alien")
        .await;
    response.assert_status_ok();
}

#[tokio::test]
async fn test_blank_title_is_not_found_with_empty_results() {
    let server = create_test_server(vec![]);
    let response = server
        .get("/api/v1/recommendations")
        .add_query_param("title", "  ")
        .await;
    response.assert_status(StatusCode::NOT_FOUND);

    let body: Value = response.json();
    assert_eq!(body["recommendations"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_request_id_echoed() {
    let server = create_test_server(vec![]);
    let response = server
        .get("/health")
        .add_header(
            HeaderName::from_static("x-request-id"),
            HeaderValue::from_static("frontend-42"),
        )
        .await;

    assert_eq!(response.header("x-request-id"), "frontend-42");
}
