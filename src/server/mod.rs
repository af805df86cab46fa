//! HTTP 接口：披萨估算的同步端点。
//!
//! HTTP facade over the pizza estimator.
//!
//! | Route | Description |
//! |-------|-------------|
//! | `POST /calculate_pizza` | `{people_count, appetite_level?}` → `{recommendation}` |
//! | `GET /health` | liveness probe |
//!
//! Body shape errors use axum's default JSON rejection. Estimator rejections
//! map to `422` with `{"error": {"kind", "message"}}`.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::ServerConfig;
use crate::pizza::{AppetiteLevel, PizzaEstimator, PizzaOrderEstimate};
use crate::{Error, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PizzaRequest {
    pub people_count: i64,
    #[serde(default = "default_appetite")]
    pub appetite_level: String,
}

fn default_appetite() -> String {
    AppetiteLevel::default().as_str().to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PizzaResponse {
    pub recommendation: PizzaOrderEstimate,
}

/// Error body for estimator failures.
#[derive(Debug)]
pub struct ApiError(Error);

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            Error::InvalidArgument { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = json!({ "error": { "kind": self.0.kind(), "message": self.0.to_string() } });
        (status, Json(body)).into_response()
    }
}

/// Build the router. The estimator is shared read-only across requests.
pub fn create_app(estimator: Arc<PizzaEstimator>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/calculate_pizza", post(calculate_pizza))
        .with_state(estimator)
        .layer(TraceLayer::new_for_http())
}

/// Bind and serve until the process is stopped.
pub async fn serve(config: ServerConfig, estimator: Arc<PizzaEstimator>) -> Result<()> {
    let listener = TcpListener::bind(config.bind_addr).await?;
    info!(addr = %listener.local_addr()?, "pizza API listening");
    axum::serve(listener, create_app(estimator)).await?;
    Ok(())
}

async fn health_check() -> &'static str {
    "ok"
}

async fn calculate_pizza(
    State(estimator): State<Arc<PizzaEstimator>>,
    Json(req): Json<PizzaRequest>,
) -> std::result::Result<Json<PizzaResponse>, ApiError> {
    let recommendation = estimator.estimate(req.people_count, &req.appetite_level)?;
    Ok(Json(PizzaResponse { recommendation }))
}
