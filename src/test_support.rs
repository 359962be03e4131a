use std::collections::VecDeque;
use std::process::Command;
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::json;

use crate::config::AnalyzerSettings;
use crate::model::{GenerativeModel, ModelClientError, StructuredRequest};

#[derive(Debug, Clone)]
pub enum ScriptedReply {
    Text(String),
    HttpStatus(u16),
}

/// In-memory model that replays scripted replies in order and records every
/// request it receives.
#[derive(Debug, Default)]
pub struct ScriptedModel {
    replies: Mutex<VecDeque<ScriptedReply>>,
    requests: Mutex<Vec<StructuredRequest>>,
}

impl ScriptedModel {
    pub fn new(replies: impl IntoIterator<Item = ScriptedReply>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into_iter().collect()),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn replying(text: impl Into<String>) -> Arc<Self> {
        Self::new([ScriptedReply::Text(text.into())])
    }

    pub fn requests(&self) -> Vec<StructuredRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

#[async_trait]
impl GenerativeModel for ScriptedModel {
    async fn generate_json(&self, request: &StructuredRequest) -> Result<String, ModelClientError> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request.clone());

        let reply = self
            .replies
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front();
        match reply {
            Some(ScriptedReply::Text(text)) => Ok(text),
            Some(ScriptedReply::HttpStatus(code)) => Err(ModelClientError::HttpStatus {
                status: StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
                body: "scripted failure".to_owned(),
            }),
            None => Err(ModelClientError::MissingField {
                field: "scripted reply",
            }),
        }
    }
}

pub fn settings_for(base_url: &str) -> AnalyzerSettings {
    AnalyzerSettings {
        api_key: "test-key".to_owned(),
        model: "gemini-2.5-flash".to_owned(),
        gemini_base_url: base_url.to_owned(),
        model_timeout_ms: 2_000,
    }
}

pub fn brand_response_json() -> String {
    json!({
        "sentiment": {"positive": 65, "negative": 25, "neutral": 10},
        "wordCloud": [
            {"text": "latte", "value": 88},
            {"text": "service", "value": 40},
            {"text": "price", "value": 62}
        ],
        "topThemes": {
            "positive": ["Seasonal drinks", "Friendly baristas"],
            "negative": ["Long queues"]
        },
        "samplePosts": [
            {"platform": "Twitter", "username": "@bean_fan", "content": "Best oat latte in town", "sentiment": "Positive"},
            {"platform": "Instagram", "username": "@queue_hater", "content": "20 minutes for a drip coffee", "sentiment": "Negative"}
        ]
    })
    .to_string()
}

pub fn youtube_response_json() -> String {
    json!({
        "sentiment": {"positive": 70, "negative": 10, "neutral": 20},
        "trendingTopics": ["Lighting setup", "Editing workflow"],
        "commonQuestions": ["Which camera is this?"],
        "contentIdeas": [
            {"title": "My Full Editing Workflow", "description": "Walk through the edit of this video."}
        ]
    })
    .to_string()
}

pub fn competitor_response_json() -> String {
    json!({
        "comparison": [
            {"name": "Nike", "engagementRate": 3.5, "postingFrequency": 5, "positiveSentiment": 80},
            {"name": "Adidas", "engagementRate": 2.1, "postingFrequency": 7, "positiveSentiment": 60}
        ],
        "topPosts": {
            "brand": [{"platform": "Instagram", "username": "@nike", "content": "Just do it.", "sentiment": "Positive"}],
            "competitor": []
        }
    })
    .to_string()
}

/// Strips every credential and logging variable the binary reads so a spawned
/// process only sees what the test sets.
pub fn clear_analyzer_env(command: &mut Command) {
    for name in [
        "GEMINI_API_KEY",
        "API_KEY",
        "MODEL",
        "GEMINI_BASE_URL",
        "MODEL_TIMEOUT_MS",
        "SOCIALSENSE_FILE_LOG",
        "SOCIALSENSE_LOG_DIR",
    ] {
        command.env_remove(name);
    }
    command.env("RUST_LOG", "error");
}
