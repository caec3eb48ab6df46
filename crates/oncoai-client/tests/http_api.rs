//! Wire format of `HttpPredictionApi`, checked against a loopback axum
//! server that behaves like the prediction service.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{Form, Json, Multipart},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use oncoai_client::api::{
    Credentials, PredictionApi, Registration, BATCH_PREDICT_PATH, PREDICT_PATH, REGISTER_PATH, TOKEN_PATH,
};
use oncoai_client::dom::ids;
use oncoai_client::{App, Document, Dom, Event, HttpPredictionApi, SelectedFile, StorageTokenStore, TokenStore};
use oncoai_common::client_config::ApiConfig;
use oncoai_common::{ClientConfig, FeatureVector, OncoaiError, FEATURE_COUNT};
use secrecy::{ExposeSecret, SecretString};
use serde_json::{json, Value};

const TOKEN: &str = "jwt-for-alice";

fn authorised(headers: &HeaderMap) -> bool {
    let expected = format!("Bearer {}", TOKEN);
    headers.get("authorization").and_then(|v| v.to_str().ok()) == Some(expected.as_str())
}

fn unauthorised() -> Response {
    (StatusCode::UNAUTHORIZED, Json(json!({"detail": "Not authenticated"}))).into_response()
}

async fn register(Json(body): Json<Value>) -> Response {
    if body["username"] == "taken" {
        return (StatusCode::BAD_REQUEST, Json(json!({"detail": "Username already registered"}))).into_response();
    }
    (
        StatusCode::CREATED,
        Json(json!({
            "username": body["username"],
            "name": body["full_name"],
            "email": body["email"],
        })),
    )
        .into_response()
}

async fn token(Form(form): Form<HashMap<String, String>>) -> Response {
    let ok = form.get("username").map(String::as_str) == Some("alice")
        && form.get("password").map(String::as_str) == Some("secret1");
    if !ok {
        return (StatusCode::UNAUTHORIZED, Json(json!({"detail": "Usuario o contraseña incorrectos"}))).into_response();
    }
    Json(json!({
        "access_token": TOKEN,
        "token_type": "bearer",
        "user": {"username": "alice", "name": "Alice Liddell"},
    }))
    .into_response()
}

async fn predict(headers: HeaderMap, Json(body): Json<Value>) -> Response {
    if !authorised(&headers) {
        return unauthorised();
    }
    let features = body["features"].as_array().cloned().unwrap_or_default();
    if features.len() != FEATURE_COUNT {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"detail": "Se requieren 32 características para el modelo"})),
        )
            .into_response();
    }
    let sum: f64 = features.iter().filter_map(Value::as_f64).sum();
    let probability = if sum == 0.0 { 0.42 } else { 0.9 };
    Json(json!({ "survival_probability": probability })).into_response()
}

async fn batch_predict(headers: HeaderMap, mut multipart: Multipart) -> Response {
    if !authorised(&headers) {
        return unauthorised();
    }
    while let Ok(Some(field)) = multipart.next_field().await {
        if field.name() != Some("file") {
            continue;
        }
        if field.file_name() != Some("cohort.csv") || field.content_type() != Some("text/csv") {
            return (StatusCode::BAD_REQUEST, Json(json!({"error": "Formato no soportado"}))).into_response();
        }
        let text = field.text().await.unwrap_or_default();
        let rows = text.lines().skip(1).count();
        let predictions: Vec<Value> = (0..rows)
            .map(|i| {
                let probability = if i == 0 { json!(0.7) } else { Value::Null };
                json!({ "row": i, "survival_probability": probability })
            })
            .collect();
        return Json(json!({ "predictions": predictions })).into_response();
    }
    (StatusCode::UNPROCESSABLE_ENTITY, Json(json!({"detail": [{"msg": "field required"}]}))).into_response()
}

async fn spawn_server() -> SocketAddr {
    let app = Router::new()
        .route(REGISTER_PATH, post(register))
        .route(TOKEN_PATH, post(token))
        .route(PREDICT_PATH, post(predict))
        .route(BATCH_PREDICT_PATH, post(batch_predict));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

fn api_config(addr: SocketAddr) -> ApiConfig {
    ApiConfig { base_url: format!("http://{}", addr), timeout_secs: Some(10) }
}

#[tokio::test]
async fn test_token_is_form_encoded() {
    let addr = spawn_server().await;
    let api = HttpPredictionApi::new(api_config(addr)).unwrap();

    let resp = api.token(&Credentials::new("alice", "secret1")).await.unwrap();
    assert_eq!(resp.access_token, TOKEN);
    assert_eq!(resp.user.map(|u| u.display_name().to_string()).as_deref(), Some("Alice Liddell"));

    let err = api.token(&Credentials::new("alice", "nope")).await.unwrap_err();
    assert!(matches!(err, OncoaiError::Api { status: 401, .. }));
    assert_eq!(err.detail(), Some("Usuario o contraseña incorrectos"));
}

#[tokio::test]
async fn test_register_posts_json() {
    let addr = spawn_server().await;
    let api = HttpPredictionApi::new(api_config(addr)).unwrap();
    let mut registration = Registration {
        username: "dave".into(),
        email: "dave@example.org".into(),
        full_name: "Dave Bowman".into(),
        password: SecretString::from("secret1"),
    };

    let user = api.register(&registration).await.unwrap();
    assert_eq!(user.username, "dave");
    assert_eq!(user.name.as_deref(), Some("Dave Bowman"));

    registration.username = "taken".into();
    let err = api.register(&registration).await.unwrap_err();
    assert_eq!(err.detail(), Some("Username already registered"));
}

#[tokio::test]
async fn test_predict_sends_bearer_and_features() {
    let addr = spawn_server().await;
    let api = HttpPredictionApi::new(api_config(addr)).unwrap();

    let token = SecretString::from(TOKEN);
    let prediction = api.predict(&token, &FeatureVector::zeros()).await.unwrap();
    assert_eq!(prediction.survival_probability, 0.42);

    let err = api.predict(&SecretString::from("stale"), &FeatureVector::zeros()).await.unwrap_err();
    assert_eq!(err.detail(), Some("Not authenticated"));
}

#[tokio::test]
async fn test_batch_predict_uploads_file_part() {
    let addr = spawn_server().await;
    let api = HttpPredictionApi::new(api_config(addr)).unwrap();
    let file = SelectedFile::new("cohort.csv", "B2M_expression,B2M_scna\n0.1,0\n0.2,1\n0.3,0\n");

    let batch = api.batch_predict(&SecretString::from(TOKEN), &file).await.unwrap();
    assert_eq!(batch.predictions.len(), 3);
    assert_eq!(batch.predictions[0].survival_probability, Some(0.7));
    assert_eq!(batch.predictions[2].survival_probability, None);
}

#[tokio::test]
async fn test_error_without_detail_string_has_no_detail() {
    let addr = spawn_server().await;
    let api = HttpPredictionApi::new(api_config(addr)).unwrap();
    // {"error": ...} body carries no `detail`.
    let file = SelectedFile::new("cohort.txt", "x");
    let err = api.batch_predict(&SecretString::from(TOKEN), &file).await.unwrap_err();
    assert!(matches!(err, OncoaiError::Api { status: 400, detail: None }));
}

#[tokio::test]
async fn test_unreachable_server_is_a_transport_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let api = HttpPredictionApi::new(api_config(addr)).unwrap();
    let err = api.token(&Credentials::new("alice", "secret1")).await.unwrap_err();
    assert!(matches!(err, OncoaiError::Http(_)));
    assert_eq!(err.user_message("Error de autenticación"), "Error de autenticación");
}

#[tokio::test]
async fn test_full_session_against_live_server() {
    let addr = spawn_server().await;
    let mut config = ClientConfig::default();
    config.api = api_config(addr);

    let store = Arc::new(StorageTokenStore::in_memory());
    let api = Arc::new(HttpPredictionApi::new(config.api.clone()).unwrap());
    let app = App::survival_page(&config, store.clone(), api);
    let mut doc = Document::survival_page();
    app.load(&mut doc).await;

    doc.set_field_value(ids::PASSWORD_FORM, "username", "alice");
    doc.set_field_value(ids::PASSWORD_FORM, "password", "secret1");
    app.dispatch(Event::LoginSubmitted, &mut doc).await;
    assert_eq!(store.token().map(|t| t.expose_secret().to_string()).as_deref(), Some(TOKEN));

    app.dispatch(Event::ManualSubmitted, &mut doc).await;
    assert!(doc.inner_html(ids::MANUAL_RESULT).contains("42.00%"));

    doc.set_field_value(ids::PREDICT_FORM, "LCK_scna", "1");
    app.dispatch(Event::ManualSubmitted, &mut doc).await;
    assert!(doc.inner_html(ids::MANUAL_RESULT).contains("90.00%"));

    doc.select_file(ids::BATCH_FORM, Some(SelectedFile::new("cohort.csv", "h\n1\n2\n")));
    app.dispatch(Event::BatchSubmitted, &mut doc).await;
    assert!(doc.inner_html(ids::BATCH_RESULT).contains("<strong>Total:</strong> 2 predicciones procesadas"));

    app.dispatch(Event::LogoutClicked, &mut doc).await;
    assert!(store.token().is_none());
}
