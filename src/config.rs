use std::net::SocketAddr;

use anyhow::Context;

#[derive(Clone, Debug)]
pub struct Config {
    pub addr: SocketAddr,
    pub database_url: String,
    pub tmdb_api_key: String,
    pub tmdb_base_url: String,
    pub tmdb_language: String,
    pub books_api_key: String,
    pub books_base_url: String,
    pub books_language: Option<String>,
    pub static_dir: String,
    pub seed_delay_ms: u64,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port: u16 =
            std::env::var("PORT").unwrap_or_else(|_| "3000".to_string()).parse().context("PORT")?;

        let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL")?;

        let tmdb_api_key = std::env::var("TMDB_API_KEY").unwrap_or_else(|_| "".to_string());
        let tmdb_base_url = std::env::var("TMDB_BASE_URL")
            .unwrap_or_else(|_| "https://api.themoviedb.org/3".to_string());
        let tmdb_language = std::env::var("TMDB_LANGUAGE").unwrap_or_else(|_| "en-US".to_string());

        let books_api_key =
            std::env::var("GOOGLE_BOOKS_API_KEY").unwrap_or_else(|_| "".to_string());
        let books_base_url = std::env::var("GOOGLE_BOOKS_BASE_URL")
            .unwrap_or_else(|_| "https://www.googleapis.com/books/v1".to_string());
        let books_language = std::env::var("GOOGLE_BOOKS_LANGUAGE").ok();

        let static_dir = std::env::var("STATIC_DIR").unwrap_or_else(|_| "static".to_string());

        let seed_delay_ms: u64 =
            std::env::var("SEED_DELAY_MS").ok().and_then(|s| s.parse().ok()).unwrap_or(500);

        Ok(Self {
            addr: format!("{host}:{port}").parse().context("HOST/PORT")?,
            database_url,
            tmdb_api_key,
            tmdb_base_url,
            tmdb_language,
            books_api_key,
            books_base_url,
            books_language,
            static_dir,
            seed_delay_ms,
        })
    }
}
