use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use std::sync::Arc;
use tower::ServiceExt;

use examroom_api::models::{Catalog, Chapter, Officer, Question, Subject};
use examroom_api::{config::Config, create_router, services::AppState};

pub fn test_config() -> Config {
    Config {
        bind_addr: "127.0.0.1:0".to_string(),
        contest_dir: "./unused".to_string(),
        roster_path: "./unused".to_string(),
        ui_dir: None,
    }
}

fn question(id: i32) -> Question {
    Question {
        id,
        prompt: format!("Question {id}"),
        option_a: "Option A".to_string(),
        option_b: "Option B".to_string(),
        option_c: "Option C".to_string(),
        option_d: "Option D".to_string(),
        // Every fixture question keys on A so full-score submissions are
        // easy to build from the dealt question ids.
        correct: "A".to_string(),
    }
}

pub fn sample_catalog() -> Catalog {
    Catalog::new(vec![
        Subject {
            id: 1,
            name: "Traffic Law".to_string(),
            description: "Traffic Law".to_string(),
            duration_minutes: 20,
            quota: 3,
            chapters: vec![
                Chapter {
                    id: 1,
                    subject_id: 1,
                    name: "Basics".to_string(),
                    quota: 2,
                    questions: (1..=3).map(question).collect(),
                },
                Chapter {
                    id: 2,
                    subject_id: 1,
                    name: "Signs".to_string(),
                    quota: 1,
                    questions: (4..=5).map(question).collect(),
                },
            ],
        },
        Subject {
            id: 2,
            name: "Empty Subject".to_string(),
            description: "Empty Subject".to_string(),
            duration_minutes: 10,
            quota: 0,
            chapters: Vec::new(),
        },
    ])
}

pub fn sample_roster() -> Vec<Officer> {
    vec![
        Officer::new(
            1,
            "Nguyen Van A".to_string(),
            "Unit 1".to_string(),
            "Captain".to_string(),
            "Squad lead".to_string(),
        ),
        Officer::new(
            2,
            "Tran Thi B".to_string(),
            "Unit 2".to_string(),
            "Lieutenant".to_string(),
            "Staff".to_string(),
        ),
        Officer::new(
            3,
            "Le Van C".to_string(),
            "Unit 1".to_string(),
            "Major".to_string(),
            "Deputy".to_string(),
        ),
    ]
}

pub fn create_test_app() -> Router {
    // Initialize tracing for tests
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();

    let app_state = Arc::new(AppState::new(test_config(), sample_catalog(), sample_roster()));
    create_router(app_state)
}

pub async fn get_json(app: &Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body)
        .unwrap_or_else(|e| panic!("non-JSON body for {uri} ({status}): {e}"));
    (status, json)
}

pub async fn post_json(
    app: &Router,
    uri: &str,
    body: serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body)
        .unwrap_or_else(|e| panic!("non-JSON body for {uri} ({status}): {e}"));
    (status, json)
}
