use axum::{
    body::{to_bytes, Body},
    http::{HeaderMap, Request, StatusCode},
    Router,
};
use serde_json::json;
use tower::ServiceExt;

mod common;

use common::{create_test_app, get_json, post_json};

async fn get_raw(app: &Router, uri: &str) -> (StatusCode, HeaderMap, Vec<u8>) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, headers, body.to_vec())
}

/// Runs the whole lifecycle for officer 1 on subject 1 with a full-score
/// answer map.
async fn complete_a_test(app: &Router) {
    let (_, body) = get_json(app, "/api/v1/tests/officer-subject?officerID=1&subjectID=1").await;
    let test = body["data"].clone();
    let test_id = test["id"].as_i64().unwrap();

    post_json(
        app,
        &format!("/api/v1/tests/start?officerID=1&testID={test_id}"),
        json!({}),
    )
    .await;

    let mut answers = serde_json::Map::new();
    for question in test["questions"].as_array().unwrap() {
        answers.insert(question["id"].to_string(), json!("a"));
    }
    let (status, _) = post_json(
        app,
        &format!("/api/v1/tests/submit?officerID=1&testID={test_id}"),
        serde_json::Value::Object(answers),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn officers_list_keeps_roster_order() {
    let app = create_test_app();

    let (status, body) = get_json(&app, "/api/v1/officers").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
    assert_eq!(body["message"], "Officers retrieved successfully");
    assert_eq!(body["count"], 3);

    let officers = body["data"].as_array().unwrap();
    assert_eq!(officers[0]["id"], 1);
    assert_eq!(officers[1]["id"], 2);
    assert_eq!(officers[2]["id"], 3);
    assert_eq!(officers[0]["score"], 0.0);
    assert!(officers[0]["submissions"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn single_officer_lookup() {
    let app = create_test_app();

    let (status, body) = get_json(&app, "/api/v1/officers/2").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Officer retrieved successfully");
    assert_eq!(body["data"]["name"], "Tran Thi B");
    assert_eq!(body["data"]["unit"], "Unit 2");

    let (status, body) = get_json(&app, "/api/v1/officers/99").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "officer not found");
}

#[tokio::test]
async fn units_are_sorted_and_deduplicated() {
    let app = create_test_app();

    let (status, body) = get_json(&app, "/api/v1/units").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Units retrieved successfully");
    assert_eq!(body["count"], 2);
    assert_eq!(body["data"], json!(["Unit 1", "Unit 2"]));
}

#[tokio::test]
async fn submissions_show_up_on_the_officer_record() {
    let app = create_test_app();
    complete_a_test(&app).await;

    let (status, body) = get_json(&app, "/api/v1/officers/1").await;
    assert_eq!(status, StatusCode::OK);

    let officer = &body["data"];
    let score = officer["score"].as_f64().unwrap();
    assert!((score - 10.0).abs() < 1e-6);

    let submissions = officer["submissions"].as_array().unwrap();
    assert_eq!(submissions.len(), 1);
    assert_eq!(submissions[0]["subject_name"], "Traffic Law");
    assert_eq!(submissions[0]["officer_id"], 1);
    assert!(!submissions[0]["submitted_at"].is_null());
}

#[tokio::test]
async fn csv_export_ranks_officers_by_score() {
    let app = create_test_app();
    complete_a_test(&app).await;

    let (status, headers, body) = get_raw(&app, "/api/v1/results/export?format=csv").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        headers.get("content-type").unwrap(),
        "text/csv; charset=utf-8"
    );
    assert_eq!(
        headers.get("content-disposition").unwrap(),
        "attachment; filename=\"standings.csv\""
    );

    let text = String::from_utf8(body).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "Place,Name,Unit,Rank,Position,Submissions,Score");
    // Officer 1 holds first place with the only score on the board
    assert!(lines[1].starts_with("1,Nguyen Van A,"));
    assert!(lines[1].ends_with(",1,10.0"));
    assert_eq!(lines.len(), 4);
}

#[tokio::test]
async fn xlsx_export_is_a_workbook_download() {
    let app = create_test_app();

    let (status, headers, body) = get_raw(&app, "/api/v1/results/export").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        headers.get("content-type").unwrap(),
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
    );
    assert_eq!(
        headers.get("content-disposition").unwrap(),
        "attachment; filename=\"standings.xlsx\""
    );
    assert!(body.len() > 4);
    assert_eq!(&body[..2], b"PK");
}
