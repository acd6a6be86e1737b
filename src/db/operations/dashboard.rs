use serde::{Deserialize, Serialize};
use sqlx::Row;

use crate::db::Database;

/// A word studied many times still counts once: `total_words_studied` is the
/// number of distinct words in the review ledger.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudyProgress {
    pub total_words_studied: i64,
    pub total_available_words: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuickStats {
    pub total_words: i64,
    pub words_studied: i64,
    /// Activity types, not session runs.
    pub study_activities: i64,
}

pub async fn study_progress(db: &Database) -> Result<StudyProgress, sqlx::Error> {
    let row = sqlx::query(
        r#"
        SELECT
            (SELECT COUNT(DISTINCT "word_id") FROM "word_review_items") AS "total_words_studied",
            (SELECT COUNT(*) FROM "words") AS "total_available_words"
        "#,
    )
    .fetch_one(db.pool())
    .await?;

    Ok(StudyProgress {
        total_words_studied: row.try_get("total_words_studied")?,
        total_available_words: row.try_get("total_available_words")?,
    })
}

pub async fn quick_stats(db: &Database) -> Result<QuickStats, sqlx::Error> {
    let row = sqlx::query(
        r#"
        SELECT
            (SELECT COUNT(*) FROM "words") AS "total_words",
            (SELECT COUNT(DISTINCT "word_id") FROM "word_review_items") AS "words_studied",
            (SELECT COUNT(*) FROM "study_activities") AS "study_activities"
        "#,
    )
    .fetch_one(db.pool())
    .await?;

    Ok(QuickStats {
        total_words: row.try_get("total_words")?,
        words_studied: row.try_get("words_studied")?,
        study_activities: row.try_get("study_activities")?,
    })
}
