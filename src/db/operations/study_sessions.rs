use chrono::{DateTime, Duration, NaiveDateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use crate::db::operations::study_activities::DEFAULT_ACTIVITY_NAME;
use crate::db::{Database, StoreError};
use crate::pagination::PageParams;

/// No end time is persisted for a session; summaries approximate it with a
/// fixed offset from the start.
const SESSION_DURATION_MINUTES: i64 = 10;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSummary {
    pub id: i64,
    pub activity_name: String,
    pub group_name: String,
    pub start_time: String,
    pub end_time: String,
    pub review_items_count: i64,
}

/// Creates a session for a group/activity pair, validating both references.
pub async fn create_study_session(
    db: &Database,
    group_id: i64,
    study_activity_id: i64,
) -> Result<i64, StoreError> {
    let group_exists: Option<i64> = sqlx::query_scalar(r#"SELECT "id" FROM "groups" WHERE "id" = ?"#)
        .bind(group_id)
        .fetch_optional(db.pool())
        .await?;
    if group_exists.is_none() {
        return Err(StoreError::Validation(format!(
            "group {group_id} does not exist"
        )));
    }

    let activity_exists: Option<i64> =
        sqlx::query_scalar(r#"SELECT "id" FROM "study_activities" WHERE "id" = ?"#)
            .bind(study_activity_id)
            .fetch_optional(db.pool())
            .await?;
    if activity_exists.is_none() {
        return Err(StoreError::Validation(format!(
            "study activity {study_activity_id} does not exist"
        )));
    }

    let result = sqlx::query(
        r#"
        INSERT INTO "study_sessions" ("group_id", "study_activity_id", "created_at")
        VALUES (?, ?, ?)
        "#,
    )
    .bind(group_id)
    .bind(study_activity_id)
    .bind(Utc::now().naive_utc())
    .execute(db.pool())
    .await?;

    Ok(result.last_insert_rowid())
}

/// Sessions for one activity, most recent first.
pub async fn list_sessions_for_activity(
    db: &Database,
    study_activity_id: i64,
    params: &PageParams,
) -> Result<(Vec<SessionSummary>, i64), sqlx::Error> {
    let total_items: i64 = sqlx::query_scalar(
        r#"SELECT COUNT(*) FROM "study_sessions" WHERE "study_activity_id" = ?"#,
    )
    .bind(study_activity_id)
    .fetch_one(db.pool())
    .await?;

    let rows = sqlx::query(
        r#"
        SELECT
            ss."id",
            COALESCE(sa."name", ?) AS "activity_name",
            g."name" AS "group_name",
            ss."created_at",
            (SELECT COUNT(*) FROM "word_review_items" wri
             WHERE wri."study_session_id" = ss."id") AS "review_items_count"
        FROM "study_sessions" ss
        JOIN "groups" g ON ss."group_id" = g."id"
        LEFT JOIN "study_activities" sa ON ss."study_activity_id" = sa."id"
        WHERE ss."study_activity_id" = ?
        ORDER BY ss."created_at" DESC
        LIMIT ? OFFSET ?
        "#,
    )
    .bind(DEFAULT_ACTIVITY_NAME)
    .bind(study_activity_id)
    .bind(params.per_page)
    .bind(params.offset())
    .fetch_all(db.pool())
    .await?;

    let sessions = rows.iter().map(map_summary_row).collect::<Result<_, _>>()?;
    Ok((sessions, total_items))
}

/// The single most recent session across all activities and groups.
pub async fn last_study_session(db: &Database) -> Result<SessionSummary, StoreError> {
    let row = sqlx::query(
        r#"
        SELECT
            ss."id",
            COALESCE(sa."name", ?) AS "activity_name",
            g."name" AS "group_name",
            ss."created_at",
            (SELECT COUNT(*) FROM "word_review_items" wri
             WHERE wri."study_session_id" = ss."id") AS "review_items_count"
        FROM "study_sessions" ss
        JOIN "groups" g ON ss."group_id" = g."id"
        LEFT JOIN "study_activities" sa ON ss."study_activity_id" = sa."id"
        ORDER BY ss."created_at" DESC
        LIMIT 1
        "#,
    )
    .bind(DEFAULT_ACTIVITY_NAME)
    .fetch_optional(db.pool())
    .await?;

    match row {
        Some(row) => Ok(map_summary_row(&row)?),
        None => Err(StoreError::NotFound),
    }
}

fn map_summary_row(row: &SqliteRow) -> Result<SessionSummary, sqlx::Error> {
    let created_at: NaiveDateTime = row.try_get("created_at")?;
    let end_at = created_at + Duration::minutes(SESSION_DURATION_MINUTES);

    Ok(SessionSummary {
        id: row.try_get("id")?,
        activity_name: row.try_get("activity_name")?,
        group_name: row.try_get("group_name")?,
        start_time: format_naive_iso(created_at),
        end_time: format_naive_iso(end_at),
        review_items_count: row.try_get("review_items_count")?,
    })
}

fn format_naive_iso(value: NaiveDateTime) -> String {
    DateTime::<Utc>::from_naive_utc_and_offset(value, Utc)
        .to_rfc3339_opts(SecondsFormat::Millis, true)
}
