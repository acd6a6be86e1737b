use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use lang_portal_backend::db::operations::words::{self, NewWord};

mod common;

async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn post_json(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

#[tokio::test]
async fn health_reports_connected_database() {
    let test = common::create_test_app().await;

    let (status, body) = get_json(&test.app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], "connected");
}

#[tokio::test]
async fn empty_words_list_returns_exact_envelope() {
    let test = common::create_test_app().await;

    let (status, body) = get_json(&test.app, "/api/words").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "items": [],
            "pagination": {
                "current_page": 1,
                "total_pages": 0,
                "total_items": 0,
                "items_per_page": 100
            }
        })
    );
}

#[tokio::test]
async fn words_page_three_of_250_has_fifty_items() {
    let test = common::create_test_app().await;
    common::insert_words(&test.db, 250).await;

    let (status, body) = get_json(&test.app, "/api/words?page=3").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["items"].as_array().unwrap().len(), 50);
    assert_eq!(body["pagination"]["current_page"], 3);
    assert_eq!(body["pagination"]["total_pages"], 3);
    assert_eq!(body["pagination"]["total_items"], 250);

    let (status, body) = get_json(&test.app, "/api/words?page=4").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["items"].as_array().unwrap().len(), 0);
    assert_eq!(body["pagination"]["total_pages"], 3);
}

#[tokio::test]
async fn page_below_one_is_a_validation_error() {
    let test = common::create_test_app().await;

    let (status, body) = get_json(&test.app, "/api/words?page=0").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn non_numeric_word_id_is_bad_request() {
    let test = common::create_test_app().await;

    let response = test
        .app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/words/abc")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn missing_word_is_not_found() {
    let test = common::create_test_app().await;

    let (status, body) = get_json(&test.app, "/api/words/9999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn missing_study_activity_yields_placeholder_not_error() {
    let test = common::create_test_app().await;

    let (status, body) = get_json(&test.app, "/api/study_activities/42").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], 42);
    assert_eq!(body["name"], "Vocabulary Quiz");
    assert_eq!(body["description"], "Practice your vocabulary with flashcards");
}

#[tokio::test]
async fn create_study_session_validates_references() {
    let test = common::create_test_app().await;

    let (status, body) = post_json(
        &test.app,
        "/api/study_sessions",
        json!({"group_id": 1, "study_activity_id": 1}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");

    let group_id = common::insert_group(&test.db, "Basic Greetings").await;
    let activity_id = common::insert_activity(&test.db, "Vocabulary Quiz").await;

    let (status, body) = post_json(
        &test.app,
        "/api/study_sessions",
        json!({"group_id": group_id, "study_activity_id": activity_id}),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["group_id"], group_id);
    assert!(body["id"].as_i64().unwrap() > 0);
}

#[tokio::test]
async fn review_events_accumulate_without_deduplication() {
    let test = common::create_test_app().await;
    let word_ids = common::insert_words(&test.db, 1).await;
    let group_id = common::insert_group(&test.db, "Verbs").await;
    let activity_id = common::insert_activity(&test.db, "Vocabulary Quiz").await;

    let (_, session) = post_json(
        &test.app,
        "/api/study_sessions",
        json!({"group_id": group_id, "study_activity_id": activity_id}),
    )
    .await;
    let session_id = session["id"].as_i64().unwrap();
    let word_id = word_ids[0];

    let review_uri = format!("/api/study_sessions/{session_id}/words/{word_id}/review");
    for _ in 0..3 {
        let (status, _) = post_json(&test.app, &review_uri, json!({"correct": true})).await;
        assert_eq!(status, StatusCode::CREATED);
    }
    for _ in 0..2 {
        let (status, _) = post_json(&test.app, &review_uri, json!({"correct": false})).await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, body) = get_json(&test.app, &format!("/api/words/{word_id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["stats"]["correct_count"], 3);
    assert_eq!(body["stats"]["wrong_count"], 2);

    // Idempotent read: asking again reports the same tally.
    let (_, body) = get_json(&test.app, &format!("/api/words/{word_id}")).await;
    assert_eq!(body["stats"]["correct_count"], 3);
    assert_eq!(body["stats"]["wrong_count"], 2);
}

#[tokio::test]
async fn group_word_counts_follow_memberships() {
    let test = common::create_test_app().await;
    let group_g = common::insert_group(&test.db, "G").await;
    let group_h = common::insert_group(&test.db, "H").await;

    let word_a = words::create_word(
        &test.db,
        &NewWord {
            original_text: "A".into(),
            pronunciation: "a".into(),
            translated_text: "a".into(),
            parts: None,
            part_of_speech: None,
            example: None,
        },
        &[group_g, group_h],
    )
    .await
    .unwrap();
    words::create_word(
        &test.db,
        &NewWord {
            original_text: "B".into(),
            pronunciation: "b".into(),
            translated_text: "b".into(),
            parts: None,
            part_of_speech: None,
            example: None,
        },
        &[group_g],
    )
    .await
    .unwrap();

    let (status, body) = get_json(&test.app, &format!("/api/groups/{group_g}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["stats"]["total_word_count"], 2);

    let (status, body) = get_json(&test.app, &format!("/api/words/{word_a}")).await;
    assert_eq!(status, StatusCode::OK);
    let group_ids: Vec<i64> = body["groups"]
        .as_array()
        .unwrap()
        .iter()
        .map(|g| g["id"].as_i64().unwrap())
        .collect();
    assert_eq!(group_ids, vec![group_g, group_h]);
}

#[tokio::test]
async fn word_with_no_memberships_has_empty_groups() {
    let test = common::create_test_app().await;
    let word_ids = common::insert_words(&test.db, 1).await;

    let (status, body) = get_json(&test.app, &format!("/api/words/{}", word_ids[0])).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["groups"].as_array().unwrap().len(), 0);
    assert_eq!(body["stats"]["correct_count"], 0);
    assert_eq!(body["stats"]["wrong_count"], 0);
}

#[tokio::test]
async fn last_study_session_is_not_found_before_any_session() {
    let test = common::create_test_app().await;

    let (status, body) = get_json(&test.app, "/api/dashboard/last_study_session").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn dashboard_reflects_recorded_reviews() {
    let test = common::create_test_app().await;
    let word_ids = common::insert_words(&test.db, 5).await;
    let group_id = common::insert_group(&test.db, "Adjectives").await;
    let activity_id = common::insert_activity(&test.db, "Vocabulary Quiz").await;

    let (_, session) = post_json(
        &test.app,
        "/api/study_sessions",
        json!({"group_id": group_id, "study_activity_id": activity_id}),
    )
    .await;
    let session_id = session["id"].as_i64().unwrap();

    // The same word reviewed repeatedly still counts once toward progress.
    let review_uri = format!("/api/study_sessions/{session_id}/words/{}/review", word_ids[0]);
    for _ in 0..4 {
        post_json(&test.app, &review_uri, json!({"correct": true})).await;
    }

    let (status, body) = get_json(&test.app, "/api/dashboard/study_progress").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_words_studied"], 1);
    assert_eq!(body["total_available_words"], 5);

    let (status, body) = get_json(&test.app, "/api/dashboard/quick-stats").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_words"], 5);
    assert_eq!(body["words_studied"], 1);
    assert_eq!(body["study_activities"], 1);

    let (status, body) = get_json(&test.app, "/api/dashboard/last_study_session").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], session_id);
    assert_eq!(body["group_name"], "Adjectives");
    assert_eq!(body["activity_name"], "Vocabulary Quiz");
    assert_eq!(body["review_items_count"], 4);

    let start: chrono::DateTime<chrono::Utc> =
        body["start_time"].as_str().unwrap().parse().unwrap();
    let end: chrono::DateTime<chrono::Utc> = body["end_time"].as_str().unwrap().parse().unwrap();
    assert_eq!(end - start, chrono::Duration::minutes(10));
}

#[tokio::test]
async fn activity_sessions_list_is_paginated_and_most_recent_first() {
    let test = common::create_test_app().await;
    let group_id = common::insert_group(&test.db, "Verbs").await;
    let activity_id = common::insert_activity(&test.db, "Vocabulary Quiz").await;
    let other_activity = common::insert_activity(&test.db, "Typing Tutor").await;

    let mut session_ids = Vec::new();
    for _ in 0..3 {
        let (_, session) = post_json(
            &test.app,
            "/api/study_sessions",
            json!({"group_id": group_id, "study_activity_id": activity_id}),
        )
        .await;
        session_ids.push(session["id"].as_i64().unwrap());
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    }
    post_json(
        &test.app,
        "/api/study_sessions",
        json!({"group_id": group_id, "study_activity_id": other_activity}),
    )
    .await;

    let uri = format!("/api/study_activities/{activity_id}/study_sessions");
    let (status, body) = get_json(&test.app, &uri).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["pagination"]["total_items"], 3);
    assert_eq!(body["pagination"]["total_pages"], 1);

    let listed: Vec<i64> = body["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["id"].as_i64().unwrap())
        .collect();
    let mut expected = session_ids.clone();
    expected.reverse();
    assert_eq!(listed, expected);
}

#[tokio::test]
async fn create_word_endpoint_links_groups_atomically() {
    let test = common::create_test_app().await;
    let group_id = common::insert_group(&test.db, "Adjectives").await;

    let (status, body) = post_json(
        &test.app,
        "/api/words",
        json!({
            "original_text": "やすい",
            "pronunciation": "yasui",
            "translated_text": "cheap",
            "parts": {"type": "i-adjective"},
            "group_ids": [group_id]
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let word_id = body["id"].as_i64().unwrap();

    let (_, body) = get_json(&test.app, &format!("/api/words/{word_id}")).await;
    assert_eq!(body["original_text"], "やすい");
    assert_eq!(body["parts"]["type"], "i-adjective");
    assert_eq!(body["groups"][0]["id"], group_id);

    // Unknown group: nothing is persisted.
    let (status, _) = post_json(
        &test.app,
        "/api/words",
        json!({
            "original_text": "たかい",
            "pronunciation": "takai",
            "translated_text": "expensive",
            "group_ids": [9999]
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, body) = get_json(&test.app, "/api/words").await;
    assert_eq!(body["pagination"]["total_items"], 1);
}
