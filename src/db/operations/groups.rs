use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use crate::db::{Database, StoreError};
use crate::pagination::PageParams;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Group {
    pub id: i64,
    pub name: String,
    pub stats: GroupStats,
}

/// `total_word_count` is always derived from the association table, never
/// persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupStats {
    pub total_word_count: i64,
}

pub async fn list_groups(
    db: &Database,
    params: &PageParams,
) -> Result<(Vec<Group>, i64), sqlx::Error> {
    let total_items: i64 = sqlx::query_scalar(r#"SELECT COUNT(*) FROM "groups""#)
        .fetch_one(db.pool())
        .await?;

    let rows = sqlx::query(
        r#"
        SELECT g."id", g."name", COUNT(wg."word_id") AS "total_word_count"
        FROM "groups" g
        LEFT JOIN "words_groups" wg ON g."id" = wg."group_id"
        GROUP BY g."id"
        ORDER BY g."id" ASC
        LIMIT ? OFFSET ?
        "#,
    )
    .bind(params.per_page)
    .bind(params.offset())
    .fetch_all(db.pool())
    .await?;

    let groups = rows.iter().map(map_group_row).collect::<Result<_, _>>()?;
    Ok((groups, total_items))
}

pub async fn get_group(db: &Database, id: i64) -> Result<Group, StoreError> {
    let row = sqlx::query(
        r#"
        SELECT g."id", g."name", COUNT(wg."word_id") AS "total_word_count"
        FROM "groups" g
        LEFT JOIN "words_groups" wg ON g."id" = wg."group_id"
        WHERE g."id" = ?
        GROUP BY g."id"
        "#,
    )
    .bind(id)
    .fetch_optional(db.pool())
    .await?;

    match row {
        Some(row) => Ok(map_group_row(&row)?),
        None => Err(StoreError::NotFound),
    }
}

/// Groups a word belongs to; empty when the word has no memberships.
pub async fn groups_for_word(db: &Database, word_id: i64) -> Result<Vec<Group>, sqlx::Error> {
    let rows = sqlx::query(
        r#"
        SELECT g."id", g."name",
               (SELECT COUNT(*) FROM "words_groups" c WHERE c."group_id" = g."id") AS "total_word_count"
        FROM "groups" g
        JOIN "words_groups" wg ON g."id" = wg."group_id"
        WHERE wg."word_id" = ?
        ORDER BY g."id" ASC
        "#,
    )
    .bind(word_id)
    .fetch_all(db.pool())
    .await?;

    rows.iter().map(map_group_row).collect()
}

pub async fn create_group(db: &Database, name: &str) -> Result<i64, StoreError> {
    if name.trim().is_empty() {
        return Err(StoreError::Validation("group name must not be empty".into()));
    }

    let result = sqlx::query(r#"INSERT INTO "groups" ("name") VALUES (?)"#)
        .bind(name.trim())
        .execute(db.pool())
        .await?;
    Ok(result.last_insert_rowid())
}

fn map_group_row(row: &SqliteRow) -> Result<Group, sqlx::Error> {
    Ok(Group {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        stats: GroupStats {
            total_word_count: row.try_get("total_word_count")?,
        },
    })
}
