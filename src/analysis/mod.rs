use std::sync::Arc;

use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use crate::config::AnalyzerSettings;
use crate::model::{GenerativeModel, ModelClient, ModelClientError, StructuredRequest};

pub mod prompts;
pub mod response;
pub mod types;

pub use self::response::{ResponseFormatError, parse_json_response};
pub use self::types::{
    AnalysisMode, AnalysisResult, BrandData, CompetitorComparison, CompetitorData,
    CompetitorMetric, ContentIdea, Sentiment, SocialMediaPost, TopPosts, TopThemes,
    WordCloudItem, YouTubeData,
};

/// The only failure text shown to users; the cause goes to the logs.
pub const ANALYSIS_FAILED_MESSAGE: &str =
    "Failed to get analysis from AI. Please check your API key and try again.";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Please provide a topic or link to analyze.")]
    MissingPrimaryInput,

    #[error("Please provide a competitor to compare.")]
    MissingCompetitor,
}

#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("{mode} analysis failed")]
    AnalysisFailed {
        mode: AnalysisMode,
        #[source]
        cause: AnalysisFailureCause,
    },
}

impl AnalysisError {
    pub fn mode(&self) -> AnalysisMode {
        match self {
            Self::AnalysisFailed { mode, .. } => *mode,
        }
    }

    pub fn user_message(&self) -> &'static str {
        ANALYSIS_FAILED_MESSAGE
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AnalysisFailureCause {
    #[error(transparent)]
    Model(#[from] ModelClientError),

    #[error(transparent)]
    InvalidResponseFormat(#[from] ResponseFormatError),

    #[error("response did not match the expected schema")]
    SchemaMismatch(#[source] serde_json::Error),
}

/// A validated request. Inputs are trimmed and non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisRequest {
    Brand { topic: String },
    Youtube { video: String },
    Competitor { brand: String, competitor: String },
}

impl AnalysisRequest {
    pub fn from_inputs(
        mode: AnalysisMode,
        primary: &str,
        secondary: &str,
    ) -> Result<Self, ValidationError> {
        let primary = primary.trim();
        if primary.is_empty() {
            return Err(ValidationError::MissingPrimaryInput);
        }

        Ok(match mode {
            AnalysisMode::Brand => Self::Brand {
                topic: primary.to_owned(),
            },
            AnalysisMode::Youtube => Self::Youtube {
                video: primary.to_owned(),
            },
            AnalysisMode::Competitor => {
                let secondary = secondary.trim();
                if secondary.is_empty() {
                    return Err(ValidationError::MissingCompetitor);
                }
                Self::Competitor {
                    brand: primary.to_owned(),
                    competitor: secondary.to_owned(),
                }
            }
        })
    }

    pub fn mode(&self) -> AnalysisMode {
        match self {
            Self::Brand { .. } => AnalysisMode::Brand,
            Self::Youtube { .. } => AnalysisMode::Youtube,
            Self::Competitor { .. } => AnalysisMode::Competitor,
        }
    }

    /// Describes what was analyzed, e.g. `"Nike vs Adidas"`.
    pub fn label(&self) -> String {
        match self {
            Self::Brand { topic } => topic.clone(),
            Self::Youtube { video } => video.clone(),
            Self::Competitor { brand, competitor } => format!("{brand} vs {competitor}"),
        }
    }
}

#[derive(Clone)]
pub struct AnalysisClient {
    model: Arc<dyn GenerativeModel>,
}

impl AnalysisClient {
    pub fn new(model: Arc<dyn GenerativeModel>) -> Self {
        Self { model }
    }

    pub fn from_settings(settings: &AnalyzerSettings) -> Self {
        Self::new(Arc::new(ModelClient::new(settings.clone())))
    }

    pub async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult, AnalysisError> {
        match request {
            AnalysisRequest::Brand { topic } => {
                self.analyze_brand(topic).await.map(AnalysisResult::Brand)
            }
            AnalysisRequest::Youtube { video } => {
                self.analyze_youtube(video).await.map(AnalysisResult::Youtube)
            }
            AnalysisRequest::Competitor { brand, competitor } => self
                .analyze_competitors(brand, competitor)
                .await
                .map(AnalysisResult::Competitor),
        }
    }

    pub async fn analyze_brand(&self, brand: &str) -> Result<BrandData, AnalysisError> {
        self.run_structured(AnalysisMode::Brand, prompts::brand_request(brand))
            .await
    }

    pub async fn analyze_youtube(&self, video: &str) -> Result<YouTubeData, AnalysisError> {
        self.run_structured(AnalysisMode::Youtube, prompts::youtube_request(video))
            .await
    }

    pub async fn analyze_competitors(
        &self,
        brand: &str,
        competitor: &str,
    ) -> Result<CompetitorData, AnalysisError> {
        self.run_structured(
            AnalysisMode::Competitor,
            prompts::competitor_request(brand, competitor),
        )
        .await
    }

    async fn run_structured<T: DeserializeOwned>(
        &self,
        mode: AnalysisMode,
        request: StructuredRequest,
    ) -> Result<T, AnalysisError> {
        info!(mode = %mode, "requesting analysis");

        let raw = self
            .model
            .generate_json(&request)
            .await
            .map_err(|error| failed(mode, error.into()))?;
        debug!(mode = %mode, response_chars = raw.chars().count(), "received analysis response");

        let value = parse_json_response(&raw).map_err(|error| {
            warn!(mode = %mode, raw = %error.raw(), "analysis response was not valid JSON");
            failed(mode, error.into())
        })?;

        serde_json::from_value::<T>(value).map_err(|error| {
            warn!(mode = %mode, error = %error, raw = %raw, "analysis response did not match schema");
            failed(mode, AnalysisFailureCause::SchemaMismatch(error))
        })
    }
}

fn failed(mode: AnalysisMode, cause: AnalysisFailureCause) -> AnalysisError {
    AnalysisError::AnalysisFailed { mode, cause }
}

/// Joins an error and its source chain with `": "` for logs.
pub fn error_details(error: &(dyn std::error::Error + 'static)) -> String {
    let mut details = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        details.push_str(": ");
        details.push_str(&cause.to_string());
        source = cause.source();
    }
    details
}
