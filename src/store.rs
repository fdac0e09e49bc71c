use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseBackend, DatabaseConnection,
    EntityTrait, FromQueryResult, PaginatorTrait, QueryFilter, QueryOrder, Set, Statement, Value,
};

use crate::{
    entities::{content, review},
    error::AppResult,
    models::{ContentDetail, ContentListQuery, ContentWithStats, NewContent, ReviewListQuery,
        ReviewWithContent},
};

const DEFAULT_REVIEW_LIMIT: u64 = 10;
const MAX_REVIEW_LIMIT: u64 = 100;

pub struct Store {
    db: DatabaseConnection,
}

impl Store {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    pub async fn insert_content(&self, new: &NewContent) -> AppResult<content::Model> {
        let model = content::ActiveModel {
            id: Default::default(),
            kind: Set(new.kind.as_str().to_string()),
            title: Set(new.title.clone()),
            poster_url: Set(new.poster_url.clone()),
            release_date: Set(new.release_date.clone()),
            genre: Set(new.genre.clone()),
            author: Set(new.author.clone()),
            publisher: Set(new.publisher.clone()),
            description: Set(new.description.clone()),
            external_id: Set(new.external_id.clone()),
            created_at: Set(now_sec()),
        };

        let saved = model.insert(&self.db).await?;
        tracing::debug!(id = saved.id, title = %saved.title, "content saved");
        Ok(saved)
    }

    pub async fn list_contents(&self, query: &ContentListQuery) -> AppResult<Vec<ContentWithStats>> {
        let (sql, values) = build_content_listing(query);
        let rows = ContentWithStats::find_by_statement(Statement::from_sql_and_values(
            DatabaseBackend::Postgres,
            sql,
            values,
        ))
        .all(&self.db)
        .await?;
        Ok(rows)
    }

    pub async fn content_detail(&self, id: i32) -> AppResult<Option<ContentDetail>> {
        let Some(item) = content::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        let reviews = review::Entity::find()
            .filter(review::Column::ContentId.eq(id))
            .order_by_desc(review::Column::CreatedAt)
            .all(&self.db)
            .await?;

        Ok(Some(ContentDetail { content: item, reviews }))
    }

    /// Dependent reviews go with the row via the FK cascade.
    pub async fn delete_content(&self, id: i32) -> AppResult<bool> {
        let res = content::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(res.rows_affected > 0)
    }

    pub async fn insert_review(
        &self,
        content_id: i32,
        rating: i32,
        one_liner: Option<String>,
        detailed_review: Option<String>,
    ) -> AppResult<review::Model> {
        let now = now_sec();
        let model = review::ActiveModel {
            id: Default::default(),
            content_id: Set(content_id),
            rating: Set(rating),
            one_liner: Set(one_liner),
            detailed_review: Set(detailed_review),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let saved = model.insert(&self.db).await?;
        tracing::debug!(id = saved.id, content_id = saved.content_id, rating = saved.rating, "review saved");
        Ok(saved)
    }

    /// Full replace of the user-editable fields; `created_at` is left alone.
    pub async fn update_review(
        &self,
        id: i32,
        rating: i32,
        one_liner: Option<String>,
        detailed_review: Option<String>,
    ) -> AppResult<Option<review::Model>> {
        let Some(existing) = review::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        let mut active: review::ActiveModel = existing.into();
        active.rating = Set(rating);
        active.one_liner = Set(one_liner);
        active.detailed_review = Set(detailed_review);
        active.updated_at = Set(now_sec());

        let updated = active.update(&self.db).await?;
        Ok(Some(updated))
    }

    pub async fn delete_review(&self, id: i32) -> AppResult<bool> {
        let res = review::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(res.rows_affected > 0)
    }

    pub async fn list_reviews(&self, query: &ReviewListQuery) -> AppResult<Vec<ReviewWithContent>> {
        let sql = build_review_listing(query.sort.as_deref());
        let limit = cap_limit(query.limit);
        let rows = ReviewWithContent::find_by_statement(Statement::from_sql_and_values(
            DatabaseBackend::Postgres,
            sql,
            [Value::from(limit as i64)],
        ))
        .all(&self.db)
        .await?;
        Ok(rows)
    }

    pub async fn all_contents(&self) -> AppResult<Vec<content::Model>> {
        let rows = content::Entity::find()
            .order_by_desc(content::Column::CreatedAt)
            .all(&self.db)
            .await?;
        Ok(rows)
    }

    pub async fn table_counts(&self) -> AppResult<(u64, u64)> {
        let contents = content::Entity::find().count(&self.db).await?;
        let reviews = review::Entity::find().count(&self.db).await?;
        Ok((contents, reviews))
    }

    pub async fn review_count_for_content(&self, content_id: i32) -> AppResult<u64> {
        let count = review::Entity::find()
            .filter(review::Column::ContentId.eq(content_id))
            .count(&self.db)
            .await?;
        Ok(count)
    }

    pub async fn delete_reviews_for_content(&self, content_id: i32) -> AppResult<u64> {
        let res = review::Entity::delete_many()
            .filter(review::Column::ContentId.eq(content_id))
            .exec(&self.db)
            .await?;
        Ok(res.rows_affected)
    }

    /// Empties both tables and restarts the id sequences. Reviews go first so
    /// the content delete never trips the FK.
    pub async fn clear_all(&self) -> AppResult<(u64, u64)> {
        let reviews = review::Entity::delete_many().exec(&self.db).await?.rows_affected;
        let contents = content::Entity::delete_many().exec(&self.db).await?.rows_affected;

        for sequence in ["contents_id_seq", "reviews_id_seq"] {
            self.db
                .execute(Statement::from_string(
                    DatabaseBackend::Postgres,
                    format!("ALTER SEQUENCE {sequence} RESTART WITH 1"),
                ))
                .await?;
        }

        Ok((contents, reviews))
    }
}

fn build_content_listing(query: &ContentListQuery) -> (String, Vec<Value>) {
    let mut sql = String::from(
        "SELECT c.id, c.kind, c.title, c.poster_url, c.release_date, c.genre, c.author, \
         c.publisher, c.description, c.external_id, c.created_at, \
         COALESCE(AVG(r.rating), 0)::float8 AS avg_rating, \
         COUNT(r.id) AS review_count \
         FROM contents c LEFT JOIN reviews r ON r.content_id = c.id",
    );

    let mut values: Vec<Value> = Vec::new();
    let mut conditions: Vec<String> = Vec::new();

    if let Some(kind) = query.kind.as_deref() {
        values.push(kind.into());
        conditions.push(format!("c.kind = ${}", values.len()));
    }
    if let Some(genre) = query.genre.as_deref() {
        values.push(format!("%{genre}%").into());
        conditions.push(format!("c.genre LIKE ${}", values.len()));
    }

    if !conditions.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&conditions.join(" AND "));
    }

    sql.push_str(" GROUP BY c.id");
    sql.push_str(match query.sort.as_deref() {
        Some("rating") => " ORDER BY avg_rating DESC, c.created_at DESC",
        _ => " ORDER BY c.created_at DESC",
    });

    (sql, values)
}

fn build_review_listing(sort: Option<&str>) -> String {
    let order_by = match sort {
        Some("rating") => "r.rating DESC, r.created_at DESC",
        _ => "r.created_at DESC",
    };
    format!(
        "SELECT r.id, r.content_id, r.rating, r.one_liner, r.detailed_review, \
         r.created_at, r.updated_at, \
         c.title AS content_title, c.kind AS content_kind, c.poster_url \
         FROM reviews r INNER JOIN contents c ON r.content_id = c.id \
         ORDER BY {order_by} LIMIT $1"
    )
}

fn cap_limit(limit: Option<u64>) -> u64 {
    limit.unwrap_or(DEFAULT_REVIEW_LIMIT).min(MAX_REVIEW_LIMIT)
}

fn now_sec() -> i64 {
    jiff::Timestamp::now().as_second()
}

#[cfg(test)]
mod tests {
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    use super::*;

    #[test]
    fn content_listing_defaults_to_newest_first() {
        let (sql, values) = build_content_listing(&ContentListQuery::default());
        assert!(sql.contains("LEFT JOIN reviews"));
        assert!(sql.contains("GROUP BY c.id"));
        assert!(sql.ends_with("ORDER BY c.created_at DESC"));
        assert!(!sql.contains("WHERE"));
        assert!(values.is_empty());
    }

    #[test]
    fn content_listing_applies_both_filters_in_order() {
        let query = ContentListQuery {
            kind: Some("movie".to_string()),
            genre: Some("28".to_string()),
            sort: None,
        };
        let (sql, values) = build_content_listing(&query);
        assert!(sql.contains("WHERE c.kind = $1 AND c.genre LIKE $2"));
        assert_eq!(values.len(), 2);
        assert_eq!(values[1], Value::from("%28%"));
    }

    #[test]
    fn rating_sort_breaks_ties_on_creation_time() {
        let query = ContentListQuery {
            kind: None,
            genre: None,
            sort: Some("rating".to_string()),
        };
        let (sql, _) = build_content_listing(&query);
        assert!(sql.ends_with("ORDER BY avg_rating DESC, c.created_at DESC"));
    }

    #[test]
    fn unknown_sort_falls_back_to_date() {
        let query = ContentListQuery {
            kind: None,
            genre: None,
            sort: Some("alphabetical".to_string()),
        };
        let (sql, _) = build_content_listing(&query);
        assert!(sql.ends_with("ORDER BY c.created_at DESC"));
    }

    #[test]
    fn review_listing_orders_and_caps() {
        assert!(build_review_listing(Some("rating")).contains("ORDER BY r.rating DESC, r.created_at DESC"));
        assert!(build_review_listing(None).contains("ORDER BY r.created_at DESC"));

        assert_eq!(cap_limit(None), 10);
        assert_eq!(cap_limit(Some(6)), 6);
        assert_eq!(cap_limit(Some(500)), 100);
    }

    #[tokio::test]
    async fn update_review_missing_row_returns_none() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<review::Model>::new()])
            .into_connection();
        let store = Store::new(db);

        let updated = store.update_review(42, 4, None, None).await.unwrap();
        assert!(updated.is_none());
    }

    #[tokio::test]
    async fn update_review_keeps_created_at() {
        let existing = review::Model {
            id: 7,
            content_id: 1,
            rating: 2,
            one_liner: Some("meh".to_string()),
            detailed_review: None,
            created_at: 1_700_000_000,
            updated_at: 1_700_000_000,
        };
        let replaced = review::Model {
            rating: 5,
            one_liner: None,
            updated_at: 1_700_000_500,
            ..existing.clone()
        };

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![existing]])
            .append_query_results([vec![replaced]])
            .into_connection();
        let store = Store::new(db);

        let updated = store.update_review(7, 5, None, None).await.unwrap().unwrap();
        assert_eq!(updated.rating, 5);
        assert_eq!(updated.created_at, 1_700_000_000);
        assert!(updated.updated_at > updated.created_at);
    }

    #[tokio::test]
    async fn delete_review_reports_missing_row() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([MockExecResult { last_insert_id: 0, rows_affected: 0 }])
            .into_connection();
        let store = Store::new(db);

        assert!(!store.delete_review(99).await.unwrap());
    }

    #[tokio::test]
    async fn delete_content_reports_deleted_row() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([MockExecResult { last_insert_id: 0, rows_affected: 1 }])
            .into_connection();
        let store = Store::new(db);

        assert!(store.delete_content(3).await.unwrap());
    }
}
