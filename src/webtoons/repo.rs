use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::db::StoreError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Webtoon {
    pub id: Uuid,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub characters: Vec<String>,
}

/// Webtoon fields before the store assigns an id.
#[derive(Debug, Clone)]
pub struct NewWebtoon {
    pub title: String,
    pub description: Option<String>,
    pub characters: Vec<String>,
}

/// Ids are opaque strings at this boundary; a backend rejects ones it cannot parse
/// with `StoreError::InvalidId`.
#[async_trait]
pub trait WebtoonRepo: Send + Sync {
    /// All webtoons in the store's natural (insertion) order.
    async fn list(&self) -> Result<Vec<Webtoon>, StoreError>;
    async fn create(&self, new: NewWebtoon) -> Result<Webtoon, StoreError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Webtoon>, StoreError>;
    /// Returns the removed record, or `None` when nothing matched.
    async fn delete_by_id(&self, id: &str) -> Result<Option<Webtoon>, StoreError>;
}

pub(crate) fn parse_id(id: &str) -> Result<Uuid, StoreError> {
    Uuid::parse_str(id).map_err(|_| StoreError::InvalidId(id.to_string()))
}

#[derive(Clone)]
pub struct PgWebtoonRepo {
    db: PgPool,
}

impl PgWebtoonRepo {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl WebtoonRepo for PgWebtoonRepo {
    async fn list(&self) -> Result<Vec<Webtoon>, StoreError> {
        let rows = sqlx::query_as::<_, Webtoon>(
            r#"
            SELECT id, title, description, characters
            FROM webtoons
            ORDER BY created_at ASC
            "#,
        )
        .fetch_all(&self.db)
        .await?;
        Ok(rows)
    }

    async fn create(&self, new: NewWebtoon) -> Result<Webtoon, StoreError> {
        let row = sqlx::query_as::<_, Webtoon>(
            r#"
            INSERT INTO webtoons (title, description, characters)
            VALUES ($1, $2, $3)
            RETURNING id, title, description, characters
            "#,
        )
        .bind(new.title)
        .bind(new.description)
        .bind(new.characters)
        .fetch_one(&self.db)
        .await?;
        Ok(row)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Webtoon>, StoreError> {
        let id = parse_id(id)?;
        let row = sqlx::query_as::<_, Webtoon>(
            r#"
            SELECT id, title, description, characters
            FROM webtoons
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?;
        Ok(row)
    }

    async fn delete_by_id(&self, id: &str) -> Result<Option<Webtoon>, StoreError> {
        let id = parse_id(id)?;
        let row = sqlx::query_as::<_, Webtoon>(
            r#"
            DELETE FROM webtoons
            WHERE id = $1
            RETURNING id, title, description, characters
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?;
        Ok(row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_id_rejects_non_uuid() {
        assert!(parse_id(&Uuid::new_v4().to_string()).is_ok());
        assert!(matches!(parse_id("42"), Err(StoreError::InvalidId(s)) if s == "42"));
    }

    #[test]
    fn description_is_omitted_when_absent() {
        let w = Webtoon {
            id: Uuid::new_v4(),
            title: "A".into(),
            description: None,
            characters: vec![],
        };
        let json = serde_json::to_value(&w).unwrap();
        assert!(json.get("description").is_none());
        assert_eq!(json["characters"], serde_json::json!([]));
    }
}
