use std::collections::HashMap;

use serde::Deserialize;

use crate::db::{Database, StoreError};

const WORD_SEEDS_JSON: &str = include_str!("../seeds/words.json");

const ACTIVITY_SEEDS: &[(&str, &str, &str)] = &[
    (
        "Vocabulary Quiz",
        "https://example.com/thumbnail.jpg",
        "Practice your vocabulary with flashcards",
    ),
    (
        "Typing Tutor",
        "https://example.com/typing.jpg",
        "Type the translation of each word",
    ),
];

#[derive(Debug, Deserialize)]
struct WordSeed {
    original_text: String,
    pronunciation: String,
    translated_text: String,
    parts: Option<serde_json::Value>,
    part_of_speech: Option<String>,
    example: Option<String>,
    #[serde(default)]
    groups: Vec<String>,
}

/// Imports the bundled seed data when the lexicon is empty.
pub async fn run_if_empty(db: &Database) -> Result<(), StoreError> {
    let word_count: i64 = sqlx::query_scalar(r#"SELECT COUNT(*) FROM "words""#)
        .fetch_one(db.pool())
        .await?;
    if word_count > 0 {
        tracing::debug!("lexicon already populated, skipping seed import");
        return Ok(());
    }

    import(db, WORD_SEEDS_JSON).await?;
    tracing::info!("seed import complete");
    Ok(())
}

/// Runs the full import inside a single transaction: a failure on any word,
/// group, or activity leaves the store exactly as it was.
pub async fn import(db: &Database, words_json: &str) -> Result<(), StoreError> {
    let seeds: Vec<WordSeed> = serde_json::from_str(words_json)
        .map_err(|e| StoreError::Validation(format!("invalid seed data: {e}")))?;

    let mut tx = db.pool().begin().await?;

    let mut group_ids: HashMap<String, i64> = HashMap::new();
    for seed in &seeds {
        for name in &seed.groups {
            if !group_ids.contains_key(name) {
                let result = sqlx::query(r#"INSERT INTO "groups" ("name") VALUES (?)"#)
                    .bind(name)
                    .execute(&mut *tx)
                    .await?;
                group_ids.insert(name.clone(), result.last_insert_rowid());
            }
        }
    }

    for seed in &seeds {
        if seed.original_text.trim().is_empty() || seed.translated_text.trim().is_empty() {
            return Err(StoreError::Validation(
                "seed word is missing original or translated text".to_string(),
            ));
        }

        let parts_text = seed
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
        .bind(&seed.original_text)
        .bind(&seed.pronunciation)
        .bind(&seed.translated_text)
        .bind(parts_text)
        .bind(&seed.part_of_speech)
        .bind(&seed.example)
        .execute(&mut *tx)
        .await?;
        let word_id = result.last_insert_rowid();

        let mut linked: Vec<i64> = seed
            .groups
            .iter()
            .filter_map(|name| group_ids.get(name).copied())
            .collect();
        linked.sort_unstable();
        linked.dedup();

        for group_id in linked {
            sqlx::query(r#"INSERT INTO "words_groups" ("word_id", "group_id") VALUES (?, ?)"#)
                .bind(word_id)
                .bind(group_id)
                .execute(&mut *tx)
                .await?;
        }
    }

    for &(name, thumbnail_url, description) in ACTIVITY_SEEDS {
        sqlx::query(
            r#"INSERT INTO "study_activities" ("name", "thumbnail_url", "description") VALUES (?, ?, ?)"#,
        )
        .bind(name)
        .bind(thumbnail_url)
        .bind(description)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    Ok(())
}
