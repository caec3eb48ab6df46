//! Prediction API client.
//!
//! Endpoints:
//!   POST /auth/register              JSON registration, no auth
//!   POST /token                      form-urlencoded credentials, no auth
//!   POST /api/predict/               JSON `{features: [32]}`, bearer
//!   POST /api/predict/batch_predict  multipart `file`, bearer
//!
//! Error bodies are JSON with a `detail` string; anything else is reported
//! without detail so callers fall back to their generic message.

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use oncoai_common::client_config::ApiConfig;
use oncoai_common::{
    BatchPredictions, FeatureVector, OncoaiError, PredictionResult, Result, SurvivalPrediction,
    UserInfo,
};
use reqwest::multipart::{Form, Part};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::dom::SelectedFile;

pub const REGISTER_PATH: &str = "/auth/register";
pub const TOKEN_PATH: &str = "/token";
pub const PREDICT_PATH: &str = "/api/predict/";
pub const BATCH_PREDICT_PATH: &str = "/api/predict/batch_predict";

// ── Request / Response ────────────────────────────────────────────────────────

/// Login form contents.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: SecretString,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self { username: username.into(), password: SecretString::from(password.into()) }
    }
}

/// Registration form contents.
#[derive(Debug, Clone)]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub password: SecretString,
}

#[derive(Serialize)]
struct RegisterBody<'a> {
    username: &'a str,
    password: &'a str,
    full_name: &'a str,
    email: &'a str,
}

#[derive(Serialize)]
struct PredictBody<'a> {
    features: &'a FeatureVector,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisteredUser {
    pub username: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub user: Option<UserInfo>,
}

// ── Trait ─────────────────────────────────────────────────────────────────────

#[async_trait]
pub trait PredictionApi: Send + Sync {
    async fn register(&self, registration: &Registration) -> Result<RegisteredUser>;
    async fn token(&self, credentials: &Credentials) -> Result<TokenResponse>;
    async fn predict(&self, token: &SecretString, features: &FeatureVector) -> Result<SurvivalPrediction>;
    async fn batch_predict(&self, token: &SecretString, file: &SelectedFile) -> Result<BatchPredictions>;
}

async fn decode<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T> {
    let status = resp.status();
    if !status.is_success() {
        let detail = resp
            .json::<serde_json::Value>()
            .await
            .ok()
            .and_then(|body| body.get("detail").and_then(|d| d.as_str()).map(str::to_string));
        return Err(OncoaiError::Api { status: status.as_u16(), detail });
    }
    Ok(resp.json::<T>().await?)
}

// ── HTTP implementation ───────────────────────────────────────────────────────

pub struct HttpPredictionApi {
    config: ApiConfig,
    client: reqwest::Client,
}

impl HttpPredictionApi {
    pub fn new(config: ApiConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        Ok(Self { config, client: builder.build()? })
    }
}

#[async_trait]
impl PredictionApi for HttpPredictionApi {
    async fn register(&self, registration: &Registration) -> Result<RegisteredUser> {
        let url = self.config.endpoint(REGISTER_PATH);
        debug!(url = %url, username = %registration.username, "Registering user");
        let body = RegisterBody {
            username: &registration.username,
            password: registration.password.expose_secret(),
            full_name: &registration.full_name,
            email: &registration.email,
        };
        let resp = self.client.post(&url).json(&body).send().await?;
        decode(resp).await
    }

    async fn token(&self, credentials: &Credentials) -> Result<TokenResponse> {
        let url = self.config.endpoint(TOKEN_PATH);
        debug!(url = %url, username = %credentials.username, "Requesting access token");
        let form = [
            ("username", credentials.username.as_str()),
            ("password", credentials.password.expose_secret()),
        ];
        let resp = self.client.post(&url).form(&form[..]).send().await?;
        decode(resp).await
    }

    async fn predict(&self, token: &SecretString, features: &FeatureVector) -> Result<SurvivalPrediction> {
        let url = self.config.endpoint(PREDICT_PATH);
        debug!(url = %url, n_features = features.len(), "Submitting manual prediction");
        let resp = self
            .client
            .post(&url)
            .bearer_auth(token.expose_secret())
            .json(&PredictBody { features })
            .send()
            .await?;
        decode(resp).await
    }

    async fn batch_predict(&self, token: &SecretString, file: &SelectedFile) -> Result<BatchPredictions> {
        let url = self.config.endpoint(BATCH_PREDICT_PATH);
        debug!(url = %url, file = %file.name, bytes = file.bytes.len(), "Submitting batch prediction");
        let part = Part::bytes(file.bytes.clone())
            .file_name(file.name.clone())
            .mime_str(file.content_type())?;
        let resp = self
            .client
            .post(&url)
            .bearer_auth(token.expose_secret())
            .multipart(Form::new().part("file", part))
            .send()
            .await?;
        decode(resp).await
    }
}

// ── Mock Implementation for Testing ────────────────────────────────────────

/// A call received by `MockPredictionApi`.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiCall {
    Register { username: String, email: String, full_name: String },
    Token { username: String },
    Predict { bearer: String, features: Vec<f64> },
    BatchPredict { bearer: String, file_name: String },
}

/// Scripted API double that records every call.
pub struct MockPredictionApi {
    calls: Mutex<Vec<ApiCall>>,
    failure: Option<(u16, Option<String>)>,
    token: TokenResponse,
    probability: f64,
    batch: Vec<PredictionResult>,
}

impl MockPredictionApi {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            failure: None,
            token: TokenResponse {
                access_token: "mock-token".to_string(),
                token_type: Some("bearer".to_string()),
                user: None,
            },
            probability: 0.5,
            batch: Vec::new(),
        }
    }

    pub fn with_token(mut self, access_token: &str, user: Option<UserInfo>) -> Self {
        self.token.access_token = access_token.to_string();
        self.token.user = user;
        self
    }

    pub fn with_probability(mut self, probability: f64) -> Self {
        self.probability = probability;
        self
    }

    pub fn with_batch(mut self, batch: Vec<PredictionResult>) -> Self {
        self.batch = batch;
        self
    }

    /// Make every call fail with this status and optional `detail`.
    pub fn failing(mut self, status: u16, detail: Option<&str>) -> Self {
        self.failure = Some((status, detail.map(str::to_string)));
        self
    }

    pub fn calls(&self) -> Vec<ApiCall> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().map(|c| c.len()).unwrap_or_default()
    }

    fn record(&self, call: ApiCall) -> Result<()> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }
        match &self.failure {
            Some((status, detail)) => Err(OncoaiError::Api { status: *status, detail: detail.clone() }),
            None => Ok(()),
        }
    }
}

impl Default for MockPredictionApi {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PredictionApi for MockPredictionApi {
    async fn register(&self, registration: &Registration) -> Result<RegisteredUser> {
        self.record(ApiCall::Register {
            username: registration.username.clone(),
            email: registration.email.clone(),
            full_name: registration.full_name.clone(),
        })?;
        Ok(RegisteredUser {
            username: registration.username.clone(),
            name: Some(registration.full_name.clone()),
            email: Some(registration.email.clone()),
        })
    }

    async fn token(&self, credentials: &Credentials) -> Result<TokenResponse> {
        self.record(ApiCall::Token { username: credentials.username.clone() })?;
        Ok(self.token.clone())
    }

    async fn predict(&self, token: &SecretString, features: &FeatureVector) -> Result<SurvivalPrediction> {
        self.record(ApiCall::Predict {
            bearer: token.expose_secret().to_string(),
            features: features.values().to_vec(),
        })?;
        Ok(SurvivalPrediction { survival_probability: self.probability })
    }

    async fn batch_predict(&self, token: &SecretString, file: &SelectedFile) -> Result<BatchPredictions> {
        self.record(ApiCall::BatchPredict {
            bearer: token.expose_secret().to_string(),
            file_name: file.name.clone(),
        })?;
        Ok(BatchPredictions { predictions: self.batch.clone() })
    }
}
