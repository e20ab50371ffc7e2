//! Profile model

use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use chrono::{DateTime, Utc};
use validator::Validate;

/// A resolved campus entity and the foreign keys linking it to each source
#[derive(Debug, Clone, Default, Serialize, Deserialize, FromRow)]
pub struct Profile {
    pub entity_id: String,
    pub name: Option<String>,
    pub role: Option<String>,
    pub email: Option<String>,
    pub department: Option<String>,
    pub student_id: Option<String>,
    pub staff_id: Option<String>,
    pub card_id: Option<String>,
    pub device_hash: Option<String>,
    pub face_id: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ProfileSearch {
    #[validate(length(min = 1, max = 128))]
    pub q: String,
}

impl Profile {
    pub fn card_key(&self) -> Option<&str> {
        non_empty(self.card_id.as_deref())
    }

    pub fn device_key(&self) -> Option<&str> {
        non_empty(self.device_hash.as_deref())
    }

    pub fn face_key(&self) -> Option<&str> {
        non_empty(self.face_id.as_deref())
    }

    pub async fn find_by_entity_id(pool: &PgPool, entity_id: &str) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Profile>("SELECT * FROM profiles WHERE entity_id = $1")
            .bind(entity_id)
            .fetch_optional(pool)
            .await
    }

    /// Case-insensitive substring match over the identifying columns
    pub async fn search(pool: &PgPool, query: &str) -> Result<Vec<Self>, sqlx::Error> {
        let pattern = format!("%{}%", escape_like(query));

        sqlx::query_as::<_, Profile>(
            r#"
            SELECT * FROM profiles
            WHERE name ILIKE $1
               OR email ILIKE $1
               OR student_id ILIKE $1
               OR staff_id ILIKE $1
               OR card_id ILIKE $1
            ORDER BY created_at DESC NULLS LAST
            LIMIT 50
            "#
        )
        .bind(pattern)
        .fetch_all(pool)
        .await
    }

    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM profiles")
            .fetch_one(pool)
            .await
    }
}

/// Blank keys count as absent; anything else is used exactly as stored
fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Escape LIKE wildcards so user input matches literally
fn escape_like(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_keys_are_absent() {
        let profile = Profile {
            entity_id: "e1".to_string(),
            card_id: Some("C1".to_string()),
            device_hash: Some("  ".to_string()),
            face_id: None,
            ..Default::default()
        };

        assert_eq!(profile.card_key(), Some("C1"));
        assert_eq!(profile.device_key(), None);
        assert_eq!(profile.face_key(), None);
    }

    #[test]
    fn test_keys_keep_stored_padding() {
        let profile = Profile {
            entity_id: "e1".to_string(),
            card_id: Some(" C1 ".to_string()),
            ..Default::default()
        };

        assert_eq!(profile.card_key(), Some(" C1 "));
    }

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("50%_off\\"), "50\\%\\_off\\\\");
        assert_eq!(escape_like("Alice"), "Alice");
    }

    #[test]
    fn test_search_query_length() {
        assert!(ProfileSearch { q: String::new() }.validate().is_err());
        assert!(ProfileSearch { q: "x".repeat(129) }.validate().is_err());
        assert!(ProfileSearch { q: "alice".to_string() }.validate().is_ok());
    }
}
