use std::sync::Arc;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Method, Request, StatusCode, header};
use serde_json::{Value, json};
use tokio::sync::Mutex;
use tower::ServiceExt;

use scrum_vote::protocol::SessionState;
use scrum_vote::server::{SessionStore, router};

fn app() -> Router {
    router(Arc::new(Mutex::new(SessionStore::new())))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut request = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            request = request.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(request.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

async fn state(app: &Router) -> SessionState {
    let (status, body) = send(app, Method::GET, "/api/state", None).await;
    assert_eq!(status, StatusCode::OK);
    serde_json::from_value(body).unwrap()
}

#[tokio::test]
async fn test_empty_session() {
    let app = app();
    let (status, body) = send(&app, Method::GET, "/api/state", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "revealed": false,
            "totalParticipants": 0,
            "votesSubmitted": 0,
            "participantsStatus": []
        })
    );
}

#[tokio::test]
async fn test_full_round() {
    let app = app();

    let (status, body) = send(&app, Method::POST, "/api/register", Some(json!({"firstName": "Alice"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ok"], json!(true));
    assert_eq!(body["state"]["totalParticipants"], json!(1));

    send(&app, Method::POST, "/api/register", Some(json!({"firstName": "Bob"}))).await;

    let (status, _) = send(&app, Method::POST, "/api/vote", Some(json!({"firstName": "Alice", "vote": "3"}))).await;
    assert_eq!(status, StatusCode::OK);

    let hidden = state(&app).await;
    assert!(!hidden.revealed);
    assert_eq!(hidden.votes_submitted, 1);
    assert!(hidden.distribution.is_none());

    let (_, body) = send(&app, Method::POST, "/api/vote", Some(json!({"firstName": "Bob", "vote": "?"}))).await;
    assert_eq!(body["state"]["revealed"], json!(true));
    assert_eq!(body["state"]["distribution"], json!({"3": 1, "?": 1}));
    assert_eq!(body["state"]["average"], json!(3.0));

    let (status, body) = send(&app, Method::POST, "/api/reset", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["state"]["totalParticipants"], json!(0));
    assert_eq!(body["state"]["revealed"], json!(false));
}

#[tokio::test]
async fn test_manual_reveal() {
    let app = app();
    send(&app, Method::POST, "/api/register", Some(json!({"firstName": "Alice"}))).await;
    send(&app, Method::POST, "/api/register", Some(json!({"firstName": "Bob"}))).await;
    send(&app, Method::POST, "/api/vote", Some(json!({"firstName": "Alice", "vote": "8"}))).await;

    let (status, body) = send(&app, Method::POST, "/api/reveal", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["state"]["revealed"], json!(true));
    assert_eq!(body["state"]["distribution"], json!({"8": 1}));

    let revealed = state(&app).await;
    assert!(revealed.revealed);
    assert_eq!(revealed.average, Some(8.0));
}

#[tokio::test]
async fn test_validation_errors() {
    let app = app();

    let (status, body) = send(&app, Method::POST, "/api/register", Some(json!({"firstName": "A"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "Le prenom est requis (2 caracteres min)."}));

    let (status, body) = send(&app, Method::POST, "/api/register", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], json!("Le prenom est requis (2 caracteres min)."));

    let (status, body) = send(&app, Method::POST, "/api/vote", Some(json!({"firstName": "Alice", "vote": "4"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "Vote invalide."}));

    let (status, body) = send(&app, Method::POST, "/api/vote", Some(json!({"firstName": "Alice", "vote": 5}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "Vote invalide."}));

    assert_eq!(state(&app).await.total_participants, 0);
}

#[tokio::test]
async fn test_malformed_body_is_treated_as_empty() {
    let app = app();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/register")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unknown_route() {
    let app = app();
    let (status, body) = send(&app, Method::POST, "/api/nope", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "Not found"}));

    // Known paths with the wrong method are not found either.
    let (status, body) = send(&app, Method::POST, "/api/state", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "Not found"}));

    let (status, body) = send(&app, Method::GET, "/api/vote", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "Not found"}));
}
