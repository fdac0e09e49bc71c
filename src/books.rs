use serde::Deserialize;

use crate::{
    error::{AppError, AppResult},
    models::{ContentKind, NewContent},
};

pub struct BooksClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    language: Option<String>,
}

impl BooksClient {
    pub fn new(
        client: reqwest::Client,
        api_key: String,
        base_url: String,
        language: Option<String>,
    ) -> Self {
        if api_key.trim().is_empty() {
            tracing::warn!("book search disabled - no GOOGLE_BOOKS_API_KEY provided");
        }
        Self { client, api_key, base_url, language }
    }

    pub async fn search(&self, query: &str) -> AppResult<Vec<NewContent>> {
        if self.api_key.trim().is_empty() {
            return Err(AppError::Config("GOOGLE_BOOKS_API_KEY is not configured"));
        }

        let url = format!("{}/volumes", self.base_url.trim_end_matches('/'));
        let mut req = self
            .client
            .get(url)
            .query(&[("q", query), ("key", self.api_key.as_str())]);
        if let Some(lang) = &self.language {
            req = req.query(&[("langRestrict", lang.as_str())]);
        }

        let resp: VolumesResponse = req.send().await?.error_for_status()?.json().await?;

        tracing::debug!(query = %query, results = resp.items.len(), "book search completed");

        Ok(resp.items.into_iter().map(normalize_volume).collect())
    }
}

#[derive(Debug, Deserialize)]
struct VolumesResponse {
    #[serde(default)]
    items: Vec<Volume>,
}

#[derive(Debug, Deserialize)]
struct Volume {
    id: String,
    #[serde(rename = "volumeInfo", default)]
    volume_info: VolumeInfo,
}

#[derive(Debug, Default, Deserialize)]
struct VolumeInfo {
    #[serde(default)]
    title: String,
    authors: Option<Vec<String>>,
    publisher: Option<String>,
    #[serde(rename = "publishedDate")]
    published_date: Option<String>,
    description: Option<String>,
    #[serde(rename = "imageLinks")]
    image_links: Option<ImageLinks>,
}

#[derive(Debug, Deserialize)]
struct ImageLinks {
    thumbnail: Option<String>,
}

fn normalize_volume(volume: Volume) -> NewContent {
    let info = volume.volume_info;
    NewContent {
        kind: ContentKind::Book,
        title: info.title,
        poster_url: info.image_links.and_then(|links| links.thumbnail),
        release_date: info.published_date.filter(|d| !d.is_empty()),
        genre: None,
        author: info.authors.filter(|a| !a.is_empty()).map(|a| a.join(", ")),
        publisher: info.publisher.filter(|p| !p.is_empty()),
        description: info.description.filter(|d| !d.is_empty()),
        external_id: Some(volume.id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_a_full_volume() {
        let raw = serde_json::json!({
            "items": [{
                "id": "uW_0foM1hI0C",
                "volumeInfo": {
                    "title": "Sapiens",
                    "authors": ["Yuval Noah Harari"],
                    "publisher": "Harper",
                    "publishedDate": "2015-02-10",
                    "description": "A brief history of humankind.",
                    "imageLinks": { "thumbnail": "http://books.google.com/thumb.jpg" }
                }
            }]
        });
        let resp: VolumesResponse = serde_json::from_value(raw).unwrap();
        let item = normalize_volume(resp.items.into_iter().next().unwrap());

        assert_eq!(item.kind, ContentKind::Book);
        assert_eq!(item.title, "Sapiens");
        assert_eq!(item.author.as_deref(), Some("Yuval Noah Harari"));
        assert_eq!(item.publisher.as_deref(), Some("Harper"));
        assert_eq!(item.poster_url.as_deref(), Some("http://books.google.com/thumb.jpg"));
        assert_eq!(item.external_id.as_deref(), Some("uW_0foM1hI0C"));
    }

    #[test]
    fn joins_multiple_authors() {
        let raw = serde_json::json!({
            "items": [{
                "id": "x",
                "volumeInfo": { "title": "Anthology", "authors": ["A. One", "B. Two"] }
            }]
        });
        let resp: VolumesResponse = serde_json::from_value(raw).unwrap();
        let item = normalize_volume(resp.items.into_iter().next().unwrap());
        assert_eq!(item.author.as_deref(), Some("A. One, B. Two"));
    }

    #[test]
    fn sparse_volume_info_yields_nones() {
        let raw = serde_json::json!({ "items": [{ "id": "y" }] });
        let resp: VolumesResponse = serde_json::from_value(raw).unwrap();
        let item = normalize_volume(resp.items.into_iter().next().unwrap());

        assert!(item.author.is_none());
        assert!(item.publisher.is_none());
        assert!(item.poster_url.is_none());
        assert_eq!(item.title, "");
    }

    #[test]
    fn missing_items_key_parses_as_empty() {
        let resp: VolumesResponse = serde_json::from_str("{\"kind\": \"books#volumes\"}").unwrap();
        assert!(resp.items.is_empty());
    }
}
