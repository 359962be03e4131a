use anyhow::{Context, Result};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::analysis::{
    ANALYSIS_FAILED_MESSAGE, AnalysisClient, AnalysisMode, AnalysisRequest, AnalysisResult,
    error_details,
};
use crate::config::AnalyzerSettings;

#[derive(Clone)]
struct AppState {
    client: AnalysisClient,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct AnalyzeBody {
    mode: AnalysisMode,
    primary: String,
    #[serde(default)]
    secondary: Option<String>,
}

#[derive(Debug, Serialize)]
struct AnalyzeResponse {
    label: String,
    result: AnalysisResult,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

#[derive(Debug, Serialize)]
struct HealthBody {
    status: &'static str,
}

pub fn build_router(client: AnalysisClient) -> Router {
    Router::new()
        .route("/health", get(handle_health))
        .route("/analyze", post(handle_analyze))
        .with_state(AppState { client })
}

pub async fn run_http_server(settings: &AnalyzerSettings, bind: &str) -> Result<()> {
    let app = build_router(AnalysisClient::from_settings(settings));

    let listener = tokio::net::TcpListener::bind(bind)
        .await
        .with_context(|| format!("failed to bind HTTP server to `{bind}`"))?;
    let local_addr = listener.local_addr().ok();

    info!(
        model = %settings.model,
        requested_bind = %bind,
        bound_addr = local_addr.map(|addr| addr.to_string()),
        "starting HTTP server"
    );

    axum::serve(listener, app)
        .await
        .context("HTTP server exited with an error")
}

async fn handle_health() -> Json<HealthBody> {
    Json(HealthBody { status: "ok" })
}

async fn handle_analyze(State(state): State<AppState>, Json(body): Json<AnalyzeBody>) -> Response {
    let request = match AnalysisRequest::from_inputs(
        body.mode,
        &body.primary,
        body.secondary.as_deref().unwrap_or_default(),
    ) {
        Ok(request) => request,
        Err(error) => {
            return error_response(StatusCode::BAD_REQUEST, error.to_string());
        }
    };

    match state.client.analyze(&request).await {
        Ok(result) => {
            let body = AnalyzeResponse {
                label: request.label(),
                result,
            };
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(error) => {
            warn!(
                mode = %error.mode(),
                error = %error_details(&error),
                "HTTP analyze request failed"
            );
            error_response(StatusCode::BAD_GATEWAY, ANALYSIS_FAILED_MESSAGE.to_owned())
        }
    }
}

fn error_response(status: StatusCode, error: String) -> Response {
    (status, Json(ErrorBody { error })).into_response()
}
