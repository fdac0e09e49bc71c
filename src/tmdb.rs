use serde::Deserialize;

use crate::{
    error::{AppError, AppResult},
    models::{ContentKind, NewContent},
};

const POSTER_BASE_URL: &str = "https://image.tmdb.org/t/p/w500";

pub struct TmdbClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    language: String,
}

impl TmdbClient {
    pub fn new(client: reqwest::Client, api_key: String, base_url: String, language: String) -> Self {
        if api_key.trim().is_empty() {
            tracing::warn!("movie search disabled - no TMDB_API_KEY provided");
        }
        Self { client, api_key, base_url, language }
    }

    pub async fn search(&self, query: &str) -> AppResult<Vec<NewContent>> {
        if self.api_key.trim().is_empty() {
            return Err(AppError::Config("TMDB_API_KEY is not configured"));
        }

        let url = format!("{}/search/movie", self.base_url.trim_end_matches('/'));
        let resp: SearchResponse = self
            .client
            .get(url)
            .query(&[
                ("api_key", self.api_key.as_str()),
                ("language", self.language.as_str()),
                ("query", query),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        tracing::debug!(query = %query, results = resp.results.len(), "movie search completed");

        Ok(resp.results.into_iter().map(normalize_movie).collect())
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<SearchMovie>,
}

#[derive(Debug, Deserialize)]
struct SearchMovie {
    id: i64,
    title: String,
    poster_path: Option<String>,
    release_date: Option<String>,
    #[serde(default)]
    genre_ids: Vec<i32>,
    overview: Option<String>,
}

fn normalize_movie(movie: SearchMovie) -> NewContent {
    NewContent {
        kind: ContentKind::Movie,
        title: movie.title,
        poster_url: movie.poster_path.map(|p| format!("{POSTER_BASE_URL}{p}")),
        release_date: movie.release_date.filter(|d| !d.is_empty()),
        genre: (!movie.genre_ids.is_empty()).then(|| {
            movie.genre_ids.iter().map(|id| id.to_string()).collect::<Vec<_>>().join(", ")
        }),
        author: None,
        publisher: None,
        description: movie.overview.filter(|s| !s.is_empty()),
        external_id: Some(movie.id.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_a_full_result() {
        let raw = serde_json::json!({
            "results": [{
                "id": 27205,
                "title": "Inception",
                "poster_path": "/inception.jpg",
                "release_date": "2010-07-15",
                "genre_ids": [28, 878, 12],
                "overview": "A thief who steals corporate secrets."
            }]
        });
        let resp: SearchResponse = serde_json::from_value(raw).unwrap();
        let item = normalize_movie(resp.results.into_iter().next().unwrap());

        assert_eq!(item.kind, ContentKind::Movie);
        assert_eq!(item.title, "Inception");
        assert_eq!(item.poster_url.as_deref(), Some("https://image.tmdb.org/t/p/w500/inception.jpg"));
        assert_eq!(item.genre.as_deref(), Some("28, 878, 12"));
        assert_eq!(item.external_id.as_deref(), Some("27205"));
        assert!(item.author.is_none());
    }

    #[test]
    fn empty_fields_become_none() {
        let raw = serde_json::json!({
            "results": [{ "id": 1, "title": "Untitled", "release_date": "", "overview": "" }]
        });
        let resp: SearchResponse = serde_json::from_value(raw).unwrap();
        let item = normalize_movie(resp.results.into_iter().next().unwrap());

        assert!(item.poster_url.is_none());
        assert!(item.release_date.is_none());
        assert!(item.genre.is_none());
        assert!(item.description.is_none());
    }

    #[test]
    fn missing_results_key_parses_as_empty() {
        let resp: SearchResponse = serde_json::from_str("{}").unwrap();
        assert!(resp.results.is_empty());
    }
}
