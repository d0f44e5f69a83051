//! End-to-end tests driving the full router against the in-memory store.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic, clippy::indexing_slicing)]

use std::sync::Arc;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Method, Request, StatusCode, header};
use serde_json::{Value, json};
use tokio_test::assert_ok;
use tower::ServiceExt;

use hydration_tracker::api;
use hydration_tracker::app_state::AppState;
use hydration_tracker::config::ServiceConfig;
use hydration_tracker::domain::beverage::BEVERAGE_CATALOG;
use hydration_tracker::persistence::{MemoryStore, Store};

fn test_app() -> Router {
    let store: Arc<dyn Store> = Arc::new(MemoryStore::with_beverages(&BEVERAGE_CATALOG));
    let state = AppState::new(store, &ServiceConfig::default());
    api::build_router(&state).with_state(state)
}

async fn call(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    };
    let response = assert_ok!(app.clone().oneshot(request.unwrap()).await);
    let status = response.status();
    let bytes = assert_ok!(to_bytes(response.into_body(), usize::MAX).await);
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, json)
}

async fn register(app: &Router, username: &str) -> (String, String) {
    let (status, body) = call(
        app,
        Method::POST,
        "/api/v1/auth/register",
        None,
        Some(json!({
            "username": username,
            "email": format!("{username}@example.com"),
            "password": "correct horse",
            "password_confirm": "correct horse",
            "weight_kg": 70.0,
            "birth_date": "1990-01-01",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    let access = body["tokens"]["access_token"].as_str().unwrap().to_string();
    let refresh = body["tokens"]["refresh_token"].as_str().unwrap().to_string();
    (access, refresh)
}

#[tokio::test]
async fn health_reports_connected_store() {
    let app = test_app();
    let (status, body) = call(&app, Method::GET, "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["database"], "connected");
    assert_eq!(body["service"], "hydration-tracker");
}

#[tokio::test]
async fn openapi_document_is_served() {
    let app = test_app();
    let (status, body) = call(&app, Method::GET, "/api-docs/openapi.json", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/api/v1/consumptions"].is_object());
}

#[tokio::test]
async fn protected_routes_require_a_token() {
    let app = test_app();
    let (status, body) = call(&app, Method::GET, "/api/v1/profile", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], 4001);

    let (status, body) = call(&app, Method::GET, "/api/v1/profile", Some("garbage"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], 4003);
}

#[tokio::test]
async fn refresh_token_is_not_an_access_token() {
    let app = test_app();
    let (_, refresh) = register(&app, "ana").await;
    let (status, _) = call(&app, Method::GET, "/api/v1/profile", Some(&refresh), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn duplicate_registration_names_the_field() {
    let app = test_app();
    register(&app, "ana").await;
    let (status, body) = call(
        &app,
        Method::POST,
        "/api/v1/auth/register",
        None,
        Some(json!({
            "username": "ana",
            "email": "other@example.com",
            "password": "correct horse",
            "password_confirm": "correct horse",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["field"], "username");

    let (status, body) = call(
        &app,
        Method::GET,
        "/api/v1/auth/check-email?email=ANA@example.com",
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["available"], false);
}

#[tokio::test]
async fn activity_and_drinks_drive_the_daily_goal() {
    let app = test_app();
    let (token, _) = register(&app, "ana").await;

    let (status, goal) = call(&app, Method::GET, "/api/v1/daily-goals/today", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    let baseline = goal["target_ml"].as_i64().unwrap();

    let (status, activity) = call(
        &app,
        Method::POST,
        "/api/v1/activities",
        Some(&token),
        Some(json!({
            "activity_type": "running",
            "duration_minutes": 30,
            "intensity": "high",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{activity}");
    assert_eq!(activity["sweat_loss_ml"], 601);

    let (_, profile) = call(&app, Method::GET, "/api/v1/profile", Some(&token), None).await;
    assert_eq!(profile["daily_goal_ml"].as_i64().unwrap(), baseline + 601);

    let (_, beverages) = call(&app, Method::GET, "/api/v1/beverages", Some(&token), None).await;
    let water = beverages
        .as_array()
        .unwrap()
        .iter()
        .find(|b| b["slug"] == "water")
        .unwrap()["id"]
        .clone();
    let beer = beverages
        .as_array()
        .unwrap()
        .iter()
        .find(|b| b["slug"] == "beer")
        .unwrap()["id"]
        .clone();

    for (beverage, volume) in [(&water, 500), (&beer, 330)] {
        let (status, body) = call(
            &app,
            Method::POST,
            "/api/v1/consumptions",
            Some(&token),
            Some(json!({ "beverage_id": beverage, "volume_ml": volume })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
    }

    let (status, today) = call(&app, Method::GET, "/api/v1/consumptions/today", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(today["total_volume_ml"], 830);
    assert_eq!(today["total_effective_ml"], 665);
    assert_eq!(today["total_compensation_water_ml"], 165);
    assert_eq!(today["goal"]["completed"], false);

    let (_, goal) = call(&app, Method::GET, "/api/v1/daily-goals/today", Some(&token), None).await;
    assert_eq!(goal["target_ml"].as_i64().unwrap(), baseline + 601);
    assert_eq!(goal["effective_ml"], 665);
}

#[tokio::test]
async fn malformed_input_keeps_the_error_envelope() {
    let app = test_app();
    let (token, _) = register(&app, "ana").await;

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/v1/activities")
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["error"]["code"], 1002);

    let (status, body) = call(
        &app,
        Method::GET,
        "/api/v1/activities/not-a-uuid",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], 1002);

    let (status, body) = call(
        &app,
        Method::POST,
        "/api/v1/activities",
        Some(&token),
        Some(json!({ "activity_type": "walking", "duration_minutes": 0 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["field"], "duration_minutes");
}

#[tokio::test]
async fn malformed_values_name_their_field() {
    let app = test_app();
    let (status, body) = call(
        &app,
        Method::POST,
        "/api/v1/auth/register",
        None,
        Some(json!({
            "username": "ana",
            "email": "ana@example.com",
            "password": "correct horse",
            "password_confirm": "correct horse",
            "birth_date": "1990-13-45",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], 1001);
    assert_eq!(body["error"]["field"], "birth_date");

    let (token, _) = register(&app, "ana").await;
    let (status, body) = call(
        &app,
        Method::POST,
        "/api/v1/activities",
        Some(&token),
        Some(json!({ "activity_type": "flying", "duration_minutes": 30 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["field"], "activity_type");

    let (status, body) = call(
        &app,
        Method::GET,
        "/api/v1/daily-goals?from=2024-13-01",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["field"], "from");
}

#[tokio::test]
async fn free_plan_is_gated() {
    let app = test_app();
    let (token, _) = register(&app, "ana").await;

    let (status, body) = call(&app, Method::GET, "/api/v1/premium/stats", Some(&token), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"]["code"], 4031);

    for i in 0..3 {
        let (status, _) = call(
            &app,
            Method::POST,
            "/api/v1/containers",
            Some(&token),
            Some(json!({ "name": format!("Bottle {i}"), "capacity_ml": 500 })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }
    let (status, body) = call(
        &app,
        Method::POST,
        "/api/v1/containers",
        Some(&token),
        Some(json!({ "name": "One too many", "capacity_ml": 500 })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"]["code"], 4032);

    let (_, limits) = call(&app, Method::GET, "/api/v1/premium/limits", Some(&token), None).await;
    assert_eq!(limits["limits"]["max_containers"], 3);
    assert_eq!(limits["usage"]["containers"], 3);
}

#[tokio::test]
async fn refresh_rotates_and_logout_revokes() {
    let app = test_app();
    let (access, refresh) = register(&app, "ana").await;

    let (status, pair) = call(
        &app,
        Method::POST,
        "/api/v1/auth/refresh",
        None,
        Some(json!({ "refresh_token": refresh })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let new_refresh = pair["refresh_token"].as_str().unwrap().to_string();

    let (status, _) = call(
        &app,
        Method::POST,
        "/api/v1/auth/refresh",
        None,
        Some(json!({ "refresh_token": refresh })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = call(
        &app,
        Method::POST,
        "/api/v1/auth/logout",
        Some(&access),
        Some(json!({ "refresh_token": new_refresh })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = call(&app, Method::GET, "/api/v1/profile", Some(&access), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let (status, _) = call(
        &app,
        Method::POST,
        "/api/v1/auth/refresh",
        None,
        Some(json!({ "refresh_token": new_refresh })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn users_cannot_touch_each_other() {
    let app = test_app();
    let (ana, _) = register(&app, "ana").await;
    let (bo, _) = register(&app, "bo").await;

    let (status, reminder) = call(
        &app,
        Method::POST,
        "/api/v1/reminders",
        Some(&ana),
        Some(json!({ "time": "09:30:00", "message": "Drink a glass of water" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{reminder}");
    let uri = format!("/api/v1/reminders/{}", reminder["id"].as_str().unwrap());

    let (status, _) = call(&app, Method::GET, &uri, Some(&bo), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = call(&app, Method::DELETE, &uri, Some(&bo), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = call(&app, Method::DELETE, &uri, Some(&ana), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}
