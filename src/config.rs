use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Directory holding the precomputed artifacts
    #[serde(default = "default_artifacts_dir")]
    pub artifacts_dir: PathBuf,

    /// Movie metadata table, relative to `artifacts_dir`
    #[serde(default = "default_movies_file")]
    pub movies_file: String,

    /// Similarity matrix, relative to `artifacts_dir`
    #[serde(default = "default_similarity_file")]
    pub similarity_file: String,

    /// TMDB API key
    pub tmdb_api_key: String,

    /// TMDB API base URL
    #[serde(default = "default_tmdb_api_url")]
    pub tmdb_api_url: String,

    /// Language tag sent with every TMDB lookup
    #[serde(default = "default_tmdb_language")]
    pub tmdb_language: String,

    /// Prefix joined with `poster_path` to build the image URL
    #[serde(default = "default_poster_base_url")]
    pub poster_base_url: String,

    /// Placeholder returned whenever a poster cannot be fetched
    #[serde(default = "default_fallback_poster_url")]
    pub fallback_poster_url: String,

    /// Per-request timeout for poster lookups
    #[serde(default = "default_poster_timeout_secs")]
    pub poster_timeout_secs: u64,

    /// Number of neighbors returned per recommendation
    #[serde(default = "default_recommendation_count")]
    pub recommendation_count: usize,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_artifacts_dir() -> PathBuf {
    PathBuf::from("artifacts")
}

fn default_movies_file() -> String {
    "movie_dict.json".to_string()
}

fn default_similarity_file() -> String {
    "similarity.json".to_string()
}

fn default_tmdb_api_url() -> String {
    "https://api.themoviedb.org".to_string()
}

fn default_tmdb_language() -> String {
    "en-US".to_string()
}

fn default_poster_base_url() -> String {
    "https://image.tmdb.org/t/p/w500".to_string()
}

fn default_fallback_poster_url() -> String {
    "https://placehold.co/500x750/333/FFFFFF?text=No+Poster".to_string()
}

fn default_poster_timeout_secs() -> u64 {
    5
}

fn default_recommendation_count() -> usize {
    5
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    pub fn movies_path(&self) -> PathBuf {
        self.artifacts_dir.join(&self.movies_file)
    }

    pub fn similarity_path(&self) -> PathBuf {
        self.artifacts_dir.join(&self.similarity_file)
    }

    pub fn poster_timeout(&self) -> Duration {
        Duration::from_secs(self.poster_timeout_secs)
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
