use sea_orm::FromQueryResult;
use serde::{Deserialize, Serialize};

use crate::{
    entities::{content, review},
    error::{AppError, AppResult},
};

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Movie,
    Book,
}

impl ContentKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ContentKind::Movie => "movie",
            ContentKind::Book => "book",
        }
    }
}

/// A catalog item normalized from an upstream search result. Doubles as the
/// create-content request body.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NewContent {
    #[serde(rename = "type")]
    pub kind: ContentKind,
    pub title: String,
    pub poster_url: Option<String>,
    pub release_date: Option<String>,
    pub genre: Option<String>,
    pub author: Option<String>,
    pub publisher: Option<String>,
    pub description: Option<String>,
    pub external_id: Option<String>,
}

/// Content row augmented with read-time aggregates from the review join.
#[derive(Debug, FromQueryResult, Serialize)]
pub struct ContentWithStats {
    pub id: i32,
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    pub poster_url: Option<String>,
    pub release_date: Option<String>,
    pub genre: Option<String>,
    pub author: Option<String>,
    pub publisher: Option<String>,
    pub description: Option<String>,
    pub external_id: Option<String>,
    pub created_at: i64,
    pub avg_rating: f64,
    pub review_count: i64,
}

/// Review row joined with its content's display fields.
#[derive(Debug, FromQueryResult, Serialize)]
pub struct ReviewWithContent {
    pub id: i32,
    pub content_id: i32,
    pub rating: i32,
    pub one_liner: Option<String>,
    pub detailed_review: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
    pub content_title: String,
    #[serde(rename = "content_type")]
    pub content_kind: String,
    pub poster_url: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ContentDetail {
    pub content: content::Model,
    pub reviews: Vec<review::Model>,
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub query: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct ContentListQuery {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub genre: Option<String>,
    pub sort: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ReviewListQuery {
    pub sort: Option<String>,
    pub limit: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct CreateReviewRequest {
    pub content_id: Option<i32>,
    pub rating: Option<i32>,
    pub one_liner: Option<String>,
    pub detailed_review: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateReviewRequest {
    pub rating: Option<i32>,
    pub one_liner: Option<String>,
    pub detailed_review: Option<String>,
}

pub fn validate_rating(rating: i32) -> AppResult<()> {
    if !(1..=5).contains(&rating) {
        return Err(AppError::Validation("rating must be between 1 and 5".to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rating_bounds() {
        assert!(validate_rating(0).is_err());
        assert!(validate_rating(6).is_err());
        for rating in 1..=5 {
            assert!(validate_rating(rating).is_ok());
        }
    }

    #[test]
    fn content_kind_round_trips_through_json() {
        let json = serde_json::to_string(&ContentKind::Movie).unwrap();
        assert_eq!(json, "\"movie\"");
        let kind: ContentKind = serde_json::from_str("\"book\"").unwrap();
        assert_eq!(kind, ContentKind::Book);
    }

    #[test]
    fn new_content_serializes_kind_as_type() {
        let item = NewContent {
            kind: ContentKind::Book,
            title: "Cosmos".to_string(),
            poster_url: None,
            release_date: Some("1980".to_string()),
            genre: None,
            author: Some("Carl Sagan".to_string()),
            publisher: None,
            description: None,
            external_id: Some("abc123".to_string()),
        };
        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(value["type"], "book");
        assert_eq!(value["author"], "Carl Sagan");
    }
}
