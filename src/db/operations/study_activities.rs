use serde::{Deserialize, Serialize};
use sqlx::Row;

use crate::db::Database;

pub const DEFAULT_ACTIVITY_NAME: &str = "Vocabulary Quiz";
pub const DEFAULT_ACTIVITY_THUMBNAIL: &str = "https://example.com/thumbnail.jpg";
pub const DEFAULT_ACTIVITY_DESCRIPTION: &str = "Practice your vocabulary with flashcards";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudyActivity {
    pub id: i64,
    pub name: String,
    pub thumbnail_url: String,
    pub description: String,
}

impl StudyActivity {
    pub fn placeholder(id: i64) -> Self {
        Self {
            id,
            name: DEFAULT_ACTIVITY_NAME.to_string(),
            thumbnail_url: DEFAULT_ACTIVITY_THUMBNAIL.to_string(),
            description: DEFAULT_ACTIVITY_DESCRIPTION.to_string(),
        }
    }
}

/// Looks up an activity, falling back to a placeholder record when the row is
/// missing. Absence of a study activity is not an error: the caller always
/// receives a value carrying the requested id.
pub async fn get_study_activity(db: &Database, id: i64) -> Result<StudyActivity, sqlx::Error> {
    let row = sqlx::query(
        r#"
        SELECT "id",
               COALESCE("name", ?) AS "name",
               COALESCE("thumbnail_url", ?) AS "thumbnail_url",
               COALESCE("description", ?) AS "description"
        FROM "study_activities"
        WHERE "id" = ?
        "#,
    )
    .bind(DEFAULT_ACTIVITY_NAME)
    .bind(DEFAULT_ACTIVITY_THUMBNAIL)
    .bind(DEFAULT_ACTIVITY_DESCRIPTION)
    .bind(id)
    .fetch_optional(db.pool())
    .await?;

    match row {
        Some(row) => Ok(StudyActivity {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            thumbnail_url: row.try_get("thumbnail_url")?,
            description: row.try_get("description")?,
        }),
        None => Ok(StudyActivity::placeholder(id)),
    }
}

pub async fn create_study_activity(
    db: &Database,
    name: &str,
    thumbnail_url: Option<&str>,
    description: Option<&str>,
) -> Result<i64, sqlx::Error> {
    let result = sqlx::query(
        r#"INSERT INTO "study_activities" ("name", "thumbnail_url", "description") VALUES (?, ?, ?)"#,
    )
    .bind(name)
    .bind(thumbnail_url)
    .bind(description)
    .execute(db.pool())
    .await?;
    Ok(result.last_insert_rowid())
}
