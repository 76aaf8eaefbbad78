//! Movie recommendation lookup service.
//!
//! Ranks movies by a precomputed similarity matrix and decorates the top
//! results with TMDB posters, release year and rating.

pub mod api;
pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod services;
pub mod store;
