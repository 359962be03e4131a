use std::sync::Arc;

use reqwest::StatusCode;
use serde_json::{Value, json};
use socialsense::analysis::{ANALYSIS_FAILED_MESSAGE, AnalysisClient};
use socialsense::server::build_router;
use socialsense::test_support::{ScriptedModel, ScriptedReply, brand_response_json};

struct RunningServer {
    base_url: String,
    task: tokio::task::JoinHandle<()>,
}

impl Drop for RunningServer {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn start_server(model: Arc<ScriptedModel>) -> Option<RunningServer> {
    let listener = match tokio::net::TcpListener::bind("127.0.0.1:0").await {
        Ok(listener) => listener,
        Err(error) => {
            eprintln!("skipping: local TCP bind is not permitted in this environment: {error}");
            return None;
        }
    };
    let addr = listener.local_addr().expect("listener should have an address");
    let app = build_router(AnalysisClient::new(model));
    let task = tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    Some(RunningServer {
        base_url: format!("http://{addr}"),
        task,
    })
}

#[tokio::test]
async fn health_reports_ok() {
    let Some(server) = start_server(ScriptedModel::new(Vec::<ScriptedReply>::new())).await else {
        return;
    };

    let body: Value = reqwest::get(format!("{}/health", server.base_url))
        .await
        .expect("health request should complete")
        .json()
        .await
        .expect("health body should be JSON");
    assert_eq!(body, json!({"status": "ok"}));
}

#[tokio::test]
async fn analyze_returns_tagged_result_with_label() {
    let model = ScriptedModel::replying(brand_response_json());
    let Some(server) = start_server(model.clone()).await else {
        return;
    };

    let response = reqwest::Client::new()
        .post(format!("{}/analyze", server.base_url))
        .json(&json!({"mode": "BRAND", "primary": " Starlight Coffee "}))
        .send()
        .await
        .expect("analyze request should complete");

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.expect("body should be JSON");
    assert_eq!(body["label"], "Starlight Coffee");
    assert_eq!(body["result"]["type"], "BRAND");
    assert_eq!(body["result"]["sentiment"]["positive"], 65.0);
    assert_eq!(model.call_count(), 1);
}

#[tokio::test]
async fn analyze_rejects_missing_competitor_without_calling_model() {
    let model = ScriptedModel::new(Vec::<ScriptedReply>::new());
    let Some(server) = start_server(model.clone()).await else {
        return;
    };

    let response = reqwest::Client::new()
        .post(format!("{}/analyze", server.base_url))
        .json(&json!({"mode": "COMPETITOR", "primary": "@Nike", "secondary": "  "}))
        .send()
        .await
        .expect("analyze request should complete");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.expect("body should be JSON");
    assert_eq!(body["error"], "Please provide a competitor to compare.");
    assert_eq!(model.call_count(), 0);
}

#[tokio::test]
async fn analyze_hides_upstream_failure_details() {
    let model = ScriptedModel::new([ScriptedReply::HttpStatus(503)]);
    let Some(server) = start_server(model).await else {
        return;
    };

    let response = reqwest::Client::new()
        .post(format!("{}/analyze", server.base_url))
        .json(&json!({"mode": "YOUTUBE", "primary": "https://youtu.be/abc123"}))
        .send()
        .await
        .expect("analyze request should complete");

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body: Value = response.json().await.expect("body should be JSON");
    assert_eq!(body["error"], ANALYSIS_FAILED_MESSAGE);
}
