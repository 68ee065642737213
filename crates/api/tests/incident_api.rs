//! HTTP-level integration tests for the incident pages.
//!
//! Uses Axum's tower::ServiceExt to send requests directly to the router
//! without an actual TCP listener.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, location, post_form, seeded_app};
use serde_json::Value;
use sqlx::PgPool;

const NEW_INCIDENT: &str = "type=Insider+Threat&severity=Medium&status=Open\
    &date=2024-11-02&description=Badge+cloned+at+front+desk&user_id=";

/// Incidents from the list page.
async fn listed_incidents(pool: &PgPool) -> Vec<Value> {
    let app = common::build_test_app(pool);
    let response = get(app, "/incidents").await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await["data"]["incidents"]
        .as_array()
        .unwrap()
        .clone()
}

// ---------------------------------------------------------------------------
// List
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = false)]
async fn test_list_incidents_view(pool: PgPool) {
    let app = seeded_app(&pool).await;
    let response = get(app, "/incidents").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let data = &json["data"];

    let incidents = data["incidents"].as_array().unwrap();
    assert_eq!(incidents.len(), 3);
    // Most recent first.
    assert_eq!(incidents[0]["type"], "Malware");
    assert_eq!(incidents[0]["date"], "2024-10-15");
    assert_eq!(incidents[0]["user_name"], "Marcelo Moreno");
    assert_eq!(incidents[2]["type"], "Data Breach");
    assert!(incidents[2]["user_id"].is_null());
    assert!(incidents[2]["user_name"].is_null());

    assert_eq!(data["severities"], serde_json::json!(["Critical", "High"]));
    assert_eq!(data["users"].as_array().unwrap().len(), 3);
    assert_eq!(data["users"][0]["email"], "john@example.com");
}

#[sqlx::test(migrations = false)]
async fn test_failed_read_returns_500_and_next_request_succeeds(pool: PgPool) {
    // No bootstrap: the first repository call fails on a missing table.
    let app = common::build_test_app(&pool);
    let response = get(app, "/incidents").await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response).await;
    assert_eq!(json["code"], "INTERNAL_ERROR");

    let app = common::build_test_app(&pool);
    let response = get(app, "/health").await;
    assert_eq!(body_json(response).await["db_healthy"], true);

    common::seed(&pool).await;
    assert_eq!(listed_incidents(&pool).await.len(), 3);
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = false)]
async fn test_create_redirects_and_lists_once(pool: PgPool) {
    let app = seeded_app(&pool).await;
    let response = post_form(app, "/incidents/create", NEW_INCIDENT).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/incidents");

    let incidents = listed_incidents(&pool).await;
    assert_eq!(incidents.len(), 4);

    let created: Vec<&Value> = incidents
        .iter()
        .filter(|i| i["type"] == "Insider Threat")
        .collect();
    assert_eq!(created.len(), 1);
    assert!(created[0]["user_id"].is_null());
}

#[sqlx::test(migrations = false)]
async fn test_create_then_edit_form_round_trips_fields(pool: PgPool) {
    let app = seeded_app(&pool).await;
    let form = "type=Phishing&severity=Low&status=In+Progress&date=2024-11-05\
        &description=Spoofed+invoice+email&user_id=2";
    let response = post_form(app, "/incidents/create", form).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    // The seed occupies ids 1-3.
    let app = common::build_test_app(&pool);
    let response = get(app, "/incidents/update/4").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let incident = &json["data"]["incident"];
    assert_eq!(incident["id"], 4);
    assert_eq!(incident["type"], "Phishing");
    assert_eq!(incident["severity"], "Low");
    assert_eq!(incident["status"], "In Progress");
    assert_eq!(incident["date"], "2024-11-05");
    assert_eq!(incident["description"], "Spoofed invoice email");
    assert_eq!(incident["user_id"], 2);
}

#[sqlx::test(migrations = false)]
async fn test_create_keeps_empty_description_verbatim(pool: PgPool) {
    let app = seeded_app(&pool).await;
    let form = "type=Malware&severity=Low&status=Open&date=2024-11-06&description=&user_id=";
    let response = post_form(app, "/incidents/create", form).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let app = common::build_test_app(&pool);
    let response = get(app, "/incidents/update/4").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let incident = &json["data"]["incident"];
    assert_eq!(incident["description"], "");
    assert!(incident["user_id"].is_null());
}

#[sqlx::test(migrations = false)]
async fn test_create_missing_required_field_returns_400(pool: PgPool) {
    let app = seeded_app(&pool).await;
    let response = post_form(
        app,
        "/incidents/create",
        "type=Malware&status=Open&date=2024-11-02",
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "MISSING_FIELD");
    assert_eq!(json["error"], "Missing required field: severity");

    assert_eq!(listed_incidents(&pool).await.len(), 3);
}

#[sqlx::test(migrations = false)]
async fn test_create_with_malformed_date_returns_400(pool: PgPool) {
    let app = seeded_app(&pool).await;
    let response = post_form(
        app,
        "/incidents/create",
        "type=Malware&severity=Low&status=Open&date=11%2F02%2F2024",
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = false)]
async fn test_create_with_unknown_user_returns_400(pool: PgPool) {
    let app = seeded_app(&pool).await;
    let response = post_form(
        app,
        "/incidents/create",
        "type=Malware&severity=Low&status=Open&date=2024-11-02&user_id=77",
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");

    assert_eq!(listed_incidents(&pool).await.len(), 3);
}

// ---------------------------------------------------------------------------
// Read-for-update
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = false)]
async fn test_edit_form_for_unknown_id_has_null_incident(pool: PgPool) {
    let app = seeded_app(&pool).await;
    let response = get(app, "/incidents/update/9999").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert!(json["data"]["incident"].is_null());
    assert_eq!(json["data"]["users"].as_array().unwrap().len(), 3);
    assert_eq!(json["data"]["severities"], serde_json::json!(["Critical", "High"]));
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = false)]
async fn test_update_status_changes_only_that_row(pool: PgPool) {
    let app = seeded_app(&pool).await;
    let before = listed_incidents(&pool).await;

    let form = "type=Malware&severity=Critical&status=Closed&date=2024-10-15\
        &description=Ransomware+detected+on+workstation&user_id=2";
    let response = post_form(app, "/incidents/update/2", form).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/incidents");

    let after = listed_incidents(&pool).await;
    assert_eq!(before.len(), after.len());
    for (old, new) in before.iter().zip(after.iter()) {
        if new["id"] == 2 {
            assert_eq!(new["status"], "Closed");
            let mut expected = old.clone();
            expected["status"] = "Closed".into();
            assert_eq!(new, &expected);
        } else {
            assert_eq!(new, old);
        }
    }
}

#[sqlx::test(migrations = false)]
async fn test_update_unknown_id_is_silent(pool: PgPool) {
    let app = seeded_app(&pool).await;
    let response = post_form(app, "/incidents/update/9999", NEW_INCIDENT).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    assert_eq!(listed_incidents(&pool).await.len(), 3);
}

#[sqlx::test(migrations = false)]
async fn test_update_missing_field_returns_400(pool: PgPool) {
    let app = seeded_app(&pool).await;
    let response = post_form(
        app,
        "/incidents/update/1",
        "type=Phishing&severity=High&status=Open",
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Missing required field: date");
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = false)]
async fn test_delete_removes_incident(pool: PgPool) {
    let app = seeded_app(&pool).await;
    let response = get(app, "/incidents/delete/1").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/incidents");

    let incidents = listed_incidents(&pool).await;
    assert_eq!(incidents.len(), 2);
    assert!(incidents.iter().all(|i| i["id"] != 1));
}

#[sqlx::test(migrations = false)]
async fn test_delete_unknown_id_keeps_count(pool: PgPool) {
    let app = seeded_app(&pool).await;
    let response = get(app, "/incidents/delete/9999").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    assert_eq!(listed_incidents(&pool).await.len(), 3);
}
