use serde::{Deserialize, Serialize};
use sqlx::Row;

use crate::db::{Database, StoreError};

/// Correctness tally for a single word, derived from the full review history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WordStats {
    pub correct_count: i64,
    pub wrong_count: i64,
}

/// Appends one review event with the current timestamp. There is no
/// deduplication: recording the same answer twice produces two events and
/// both count.
pub async fn record_review(
    db: &Database,
    word_id: i64,
    study_session_id: i64,
    correct: bool,
) -> Result<(), StoreError> {
    sqlx::query(
        r#"
        INSERT INTO "word_review_items" ("word_id", "study_session_id", "correct", "created_at")
        VALUES (?, ?, ?, ?)
        "#,
    )
    .bind(word_id)
    .bind(study_session_id)
    .bind(correct)
    .bind(chrono::Utc::now().naive_utc())
    .execute(db.pool())
    .await
    .map_err(|err| match err {
        sqlx::Error::Database(ref db_err) if db_err.message().contains("FOREIGN KEY") => {
            StoreError::Validation("word or study session does not exist".into())
        }
        other => StoreError::Sqlx(other),
    })?;

    Ok(())
}

/// Pure aggregate over all events for the word; no events yields (0, 0).
pub async fn correctness_counts(db: &Database, word_id: i64) -> Result<WordStats, sqlx::Error> {
    let row = sqlx::query(
        r#"
        SELECT
            COUNT(CASE WHEN "correct" = 1 THEN 1 END) AS "correct_count",
            COUNT(CASE WHEN "correct" = 0 THEN 1 END) AS "wrong_count"
        FROM "word_review_items"
        WHERE "word_id" = ?
        "#,
    )
    .bind(word_id)
    .fetch_one(db.pool())
    .await?;

    Ok(WordStats {
        correct_count: row.try_get("correct_count")?,
        wrong_count: row.try_get("wrong_count")?,
    })
}
