use serde_json::json;
use socialsense::analysis::{
    ANALYSIS_FAILED_MESSAGE, AnalysisClient, AnalysisError, AnalysisFailureCause, AnalysisMode,
    AnalysisRequest, AnalysisResult, ValidationError,
};
use socialsense::dashboard::controller::{
    ApplyOutcome, DashboardController, DashboardStatus, DashboardView, SubmitOutcome,
};
use socialsense::dashboard::events::RequestTicket;
use socialsense::model::ModelClientError;
use socialsense::test_support::{
    ScriptedModel, ScriptedReply, brand_response_json, competitor_response_json, settings_for,
    youtube_response_json,
};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const GENERATE_PATH: &str = "/models/gemini-2.5-flash:generateContent";

fn gemini_reply(text: &str) -> serde_json::Value {
    json!({
        "candidates": [{
            "content": {"role": "model", "parts": [{"text": text}]}
        }]
    })
}

fn dispatch(controller: &mut DashboardController) -> (RequestTicket, AnalysisRequest) {
    match controller.submit() {
        SubmitOutcome::Dispatch { ticket, request } => (ticket, request),
        other => panic!("expected dispatch, got {other:?}"),
    }
}

#[tokio::test]
async fn brand_analysis_over_http_reaches_ready_state() {
    let server = MockServer::start().await;
    let fenced = format!("```json\n{}\n```", brand_response_json());
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .and(header("x-goog-api-key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(gemini_reply(&fenced)))
        .expect(1)
        .mount(&server)
        .await;

    let client = AnalysisClient::from_settings(&settings_for(&server.uri()));
    let mut controller = DashboardController::new();
    controller.set_primary_input("  Starlight Coffee ");
    let (ticket, request) = dispatch(&mut controller);

    let outcome = client
        .analyze(&request)
        .await
        .map_err(|error| error.to_string());
    assert_eq!(controller.apply_result(ticket, outcome), ApplyOutcome::Applied);

    let DashboardView::Brand { data, label } = controller.view() else {
        panic!("expected brand dashboard, got {:?}", controller.status());
    };
    assert_eq!(label, "Starlight Coffee");
    assert_eq!(data.sentiment.positive, 65.0);
    assert_eq!(data.word_cloud.len(), 3);
    assert_eq!(data.sample_posts[1].sentiment, "Negative");

    let serialized = serde_json::to_value(controller.result().expect("ready result"))
        .expect("result should serialize");
    assert_eq!(serialized["type"], "BRAND");
}

#[tokio::test]
async fn request_body_carries_schema_and_instruction() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(gemini_reply(&youtube_response_json())),
        )
        .mount(&server)
        .await;

    let client = AnalysisClient::from_settings(&settings_for(&server.uri()));
    let data = client
        .analyze_youtube("https://youtu.be/abc123")
        .await
        .expect("youtube analysis should succeed");
    assert_eq!(data.trending_topics[0], "Lighting setup");

    let received = server
        .received_requests()
        .await
        .expect("request recording is enabled");
    assert_eq!(received.len(), 1);
    let body: serde_json::Value =
        serde_json::from_slice(&received[0].body).expect("request body should be JSON");
    let instruction = body["contents"][0]["parts"][0]["text"]
        .as_str()
        .expect("instruction text");
    assert!(instruction.contains("https://youtu.be/abc123"));
    assert_eq!(
        body["generationConfig"]["responseMimeType"],
        "application/json"
    );
    assert_eq!(body["generationConfig"]["responseSchema"]["type"], "OBJECT");
}

#[tokio::test]
async fn provider_error_status_fails_with_generic_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
        .mount(&server)
        .await;

    let client = AnalysisClient::from_settings(&settings_for(&server.uri()));
    let error = client
        .analyze_brand("Starlight Coffee")
        .await
        .expect_err("HTTP 500 should fail");

    assert_eq!(error.mode(), AnalysisMode::Brand);
    assert_eq!(error.user_message(), ANALYSIS_FAILED_MESSAGE);
    let AnalysisError::AnalysisFailed {
        cause: AnalysisFailureCause::Model(ModelClientError::HttpStatus { status, body }),
        ..
    } = error
    else {
        panic!("expected HTTP status failure");
    };
    assert_eq!(status.as_u16(), 500);
    assert_eq!(body, "upstream exploded");

    let mut controller = DashboardController::new();
    controller.set_primary_input("Starlight Coffee");
    let (ticket, _) = dispatch(&mut controller);
    controller.apply_result(ticket, Err(body));
    assert_eq!(
        controller.view(),
        DashboardView::Error(ANALYSIS_FAILED_MESSAGE)
    );
}

#[tokio::test]
async fn unparseable_reply_is_invalid_response_format() {
    let model = ScriptedModel::replying("Sure! Here is your analysis.");
    let client = AnalysisClient::new(model.clone());

    let error = client
        .analyze_brand("Starlight Coffee")
        .await
        .expect_err("prose should not parse");
    assert!(matches!(
        error,
        AnalysisError::AnalysisFailed {
            cause: AnalysisFailureCause::InvalidResponseFormat(_),
            ..
        }
    ));
    assert_eq!(model.call_count(), 1);
}

#[tokio::test]
async fn reply_missing_required_fields_is_schema_mismatch() {
    let model = ScriptedModel::replying(r#"{"sentiment": {"positive": 1}}"#);
    let client = AnalysisClient::new(model);

    let error = client
        .analyze_youtube("https://youtu.be/abc123")
        .await
        .expect_err("partial payload should fail");
    assert!(matches!(
        error,
        AnalysisError::AnalysisFailed {
            mode: AnalysisMode::Youtube,
            cause: AnalysisFailureCause::SchemaMismatch(_),
        }
    ));
}

#[tokio::test]
async fn competitor_analysis_names_both_sides() {
    let model = ScriptedModel::new([ScriptedReply::Text(competitor_response_json())]);
    let client = AnalysisClient::new(model.clone());

    let mut controller = DashboardController::new();
    controller.set_mode(AnalysisMode::Competitor);
    controller.set_primary_input("@Nike");
    controller.set_secondary_input("@Adidas");
    let (ticket, request) = dispatch(&mut controller);

    let outcome = client.analyze(&request).await.map_err(|e| e.to_string());
    controller.apply_result(ticket, outcome);

    let Some(AnalysisResult::Competitor(data)) = controller.result() else {
        panic!("expected competitor result, got {:?}", controller.status());
    };
    assert_eq!(
        data.comparison.primary.as_ref().map(|m| m.name.as_str()),
        Some("Nike")
    );
    assert_eq!(
        data.comparison.competitor.as_ref().map(|m| m.name.as_str()),
        Some("Adidas")
    );
    assert!(data.top_posts.competitor.is_empty());
    assert_eq!(controller.result_label(), Some("@Nike vs @Adidas"));

    let requests = model.requests();
    assert!(requests[0].instruction.contains("@Nike"));
    assert!(requests[0].instruction.contains("@Adidas"));
}

#[tokio::test]
async fn validation_failures_never_reach_the_model() {
    let model = ScriptedModel::new(Vec::<ScriptedReply>::new());
    let _client = AnalysisClient::new(model.clone());

    let mut controller = DashboardController::new();
    controller.set_primary_input("   ");
    assert_eq!(
        controller.submit(),
        SubmitOutcome::Rejected(ValidationError::MissingPrimaryInput)
    );

    controller.set_mode(AnalysisMode::Competitor);
    controller.set_primary_input("@Nike");
    assert_eq!(
        controller.submit(),
        SubmitOutcome::Rejected(ValidationError::MissingCompetitor)
    );
    assert_eq!(
        controller.status(),
        &DashboardStatus::Error {
            message: "Please provide a competitor to compare.".to_owned()
        }
    );
    assert_eq!(model.call_count(), 0);
}

#[tokio::test]
async fn slow_provider_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(gemini_reply(&brand_response_json()))
                .set_delay(std::time::Duration::from_millis(500)),
        )
        .mount(&server)
        .await;

    let mut settings = settings_for(&server.uri());
    settings.model_timeout_ms = 50;
    let client = AnalysisClient::from_settings(&settings);

    let error = client
        .analyze_brand("Starlight Coffee")
        .await
        .expect_err("delayed reply should time out");
    assert!(matches!(
        error,
        AnalysisError::AnalysisFailed {
            cause: AnalysisFailureCause::Model(ModelClientError::Timeout { timeout_ms: 50 }),
            ..
        }
    ));
}
