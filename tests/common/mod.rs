#![allow(dead_code)]

use axum::Router;
use lang_portal_backend::db::operations::words::NewWord;
use lang_portal_backend::db::Database;
use tempfile::TempDir;

pub struct TestApp {
    pub app: Router,
    pub db: Database,
    _tmp: TempDir,
}

pub async fn create_test_app() -> TestApp {
    let tmp = TempDir::new().expect("failed to create temp dir");
    let db = Database::connect(&tmp.path().join("test.db"))
        .await
        .expect("failed to open test database");

    TestApp {
        app: lang_portal_backend::create_app(db.clone()),
        db,
        _tmp: tmp,
    }
}

pub fn sample_word(n: usize) -> NewWord {
    NewWord {
        original_text: format!("word-{n}"),
        pronunciation: format!("pron-{n}"),
        translated_text: format!("translation-{n}"),
        parts: None,
        part_of_speech: None,
        example: None,
    }
}

pub async fn insert_words(db: &Database, count: usize) -> Vec<i64> {
    let mut ids = Vec::with_capacity(count);
    for n in 0..count {
        let id = lang_portal_backend::db::operations::words::create_word(db, &sample_word(n), &[])
            .await
            .expect("failed to insert word");
        ids.push(id);
    }
    ids
}

pub async fn insert_group(db: &Database, name: &str) -> i64 {
    lang_portal_backend::db::operations::groups::create_group(db, name)
        .await
        .expect("failed to insert group")
}

pub async fn insert_activity(db: &Database, name: &str) -> i64 {
    lang_portal_backend::db::operations::study_activities::create_study_activity(
        db, name, None, None,
    )
    .await
    .expect("failed to insert study activity")
}
