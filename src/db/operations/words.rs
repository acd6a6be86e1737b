use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use crate::db::operations::groups::{self, Group};
use crate::db::operations::reviews::{self, WordStats};
use crate::db::{Database, StoreError};
use crate::pagination::PageParams;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Word {
    pub id: i64,
    pub original_text: String,
    pub pronunciation: String,
    pub translated_text: String,
    /// Opaque structured breakdown of the word; stored verbatim, never
    /// interpreted by the backend.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parts: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub part_of_speech: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewWord {
    pub original_text: String,
    pub pronunciation: String,
    pub translated_text: String,
    pub parts: Option<serde_json::Value>,
    pub part_of_speech: Option<String>,
    pub example: Option<String>,
}

pub async fn list_words(
    db: &Database,
    params: &PageParams,
) -> Result<(Vec<Word>, i64), sqlx::Error> {
    let total_items: i64 = sqlx::query_scalar(r#"SELECT COUNT(*) FROM "words""#)
        .fetch_one(db.pool())
        .await?;

    let rows = sqlx::query(
        r#"
        SELECT "id", "original_text", "pronunciation", "translated_text",
               "parts", "part_of_speech", "example"
        FROM "words"
        ORDER BY "id" ASC
        LIMIT ? OFFSET ?
        "#,
    )
    .bind(params.per_page)
    .bind(params.offset())
    .fetch_all(db.pool())
    .await?;

    let words = rows.iter().map(map_word_row).collect::<Result<_, _>>()?;
    Ok((words, total_items))
}

/// Word detail composed with fresh stats and group memberships. A word with
/// no reviews reports (0, 0); a word in no groups reports an empty list.
pub async fn get_word(db: &Database, id: i64) -> Result<(Word, WordStats, Vec<Group>), StoreError> {
    let row = sqlx::query(
        r#"
        SELECT "id", "original_text", "pronunciation", "translated_text",
               "parts", "part_of_speech", "example"
        FROM "words"
        WHERE "id" = ?
        "#,
    )
    .bind(id)
    .fetch_optional(db.pool())
    .await?;

    let word = match row {
        Some(row) => map_word_row(&row)?,
        None => return Err(StoreError::NotFound),
    };

    let stats = reviews::correctness_counts(db, id).await?;
    let word_groups = groups::groups_for_word(db, id).await?;

    Ok((word, stats, word_groups))
}

/// Inserts a word and its group links atomically: either the word and every
/// link exist afterward, or nothing does.
pub async fn create_word(
    db: &Database,
    word: &NewWord,
    group_ids: &[i64],
) -> Result<i64, StoreError> {
    // A repeated group id is a single membership, not a constraint violation.
    let mut group_ids: Vec<i64> = group_ids.to_vec();
    group_ids.sort_unstable();
    group_ids.dedup();

    let mut tx = db.pool().begin().await?;

    for group_id in &group_ids {
        let exists: Option<i64> = sqlx::query_scalar(r#"SELECT "id" FROM "groups" WHERE "id" = ?"#)
            .bind(group_id)
            .fetch_optional(&mut *tx)
            .await?;
        if exists.is_none() {
            return Err(StoreError::Validation(format!(
                "group {group_id} does not exist"
            )));
        }
    }

    let parts_text = word
        .parts
        .as_ref()
        .map(serde_json::to_string)
        .transpose()
        .map_err(|e| StoreError::Validation(format!("invalid parts payload: {e}")))?;

    let result = sqlx::query(
        r#"
        INSERT INTO "words"
            ("original_text", "pronunciation", "translated_text", "parts", "part_of_speech", "example")
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&word.original_text)
    .bind(&word.pronunciation)
    .bind(&word.translated_text)
    .bind(parts_text)
    .bind(&word.part_of_speech)
    .bind(&word.example)
    .execute(&mut *tx)
    .await?;

    let word_id = result.last_insert_rowid();

    for group_id in &group_ids {
        sqlx::query(r#"INSERT INTO "words_groups" ("word_id", "group_id") VALUES (?, ?)"#)
            .bind(word_id)
            .bind(group_id)
            .execute(&mut *tx)
            .await?;
    }

    tx.commit().await?;
    Ok(word_id)
}

fn map_word_row(row: &SqliteRow) -> Result<Word, sqlx::Error> {
    let parts_text: Option<String> = row.try_get("parts")?;
    let parts = parts_text.and_then(|text| serde_json::from_str(&text).ok());

    Ok(Word {
        id: row.try_get("id")?,
        original_text: row.try_get("original_text")?,
        pronunciation: row.try_get("pronunciation")?,
        translated_text: row.try_get("translated_text")?,
        parts,
        part_of_speech: row.try_get("part_of_speech")?,
        example: row.try_get("example")?,
    })
}
