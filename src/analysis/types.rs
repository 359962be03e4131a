use std::fmt::{Display, Formatter};
use std::str::FromStr;

use anyhow::anyhow;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AnalysisMode {
    #[default]
    Brand,
    Youtube,
    Competitor,
}

impl AnalysisMode {
    pub const ALL: [AnalysisMode; 3] = [Self::Brand, Self::Youtube, Self::Competitor];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Brand => "BRAND",
            Self::Youtube => "YOUTUBE",
            Self::Competitor => "COMPETITOR",
        }
    }

    pub fn tab_label(self) -> &'static str {
        match self {
            Self::Brand => "Brand Sentiment",
            Self::Youtube => "YouTube Analyzer",
            Self::Competitor => "Competitor Scanner",
        }
    }

    pub fn needs_secondary_input(self) -> bool {
        self == Self::Competitor
    }
}

impl Display for AnalysisMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AnalysisMode {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> anyhow::Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "brand" => Ok(Self::Brand),
            "youtube" => Ok(Self::Youtube),
            "competitor" => Ok(Self::Competitor),
            other => Err(anyhow!(
                "invalid analysis mode `{other}`; expected `brand`, `youtube` or `competitor`"
            )),
        }
    }
}

/// Percentages as reported by the model. They are not normalized and may not
/// sum to 100.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Sentiment {
    pub positive: f64,
    pub negative: f64,
    pub neutral: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordCloudItem {
    pub text: String,
    pub value: f64,
}

/// `sentiment` stays a free string: the competitor schema does not constrain
/// it, so anything outside Positive/Negative/Neutral must still decode.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SocialMediaPost {
    #[serde(default)]
    pub platform: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub sentiment: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TopThemes {
    pub positive: Vec<String>,
    pub negative: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandData {
    pub sentiment: Sentiment,
    pub word_cloud: Vec<WordCloudItem>,
    pub top_themes: TopThemes,
    pub sample_posts: Vec<SocialMediaPost>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentIdea {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YouTubeData {
    pub sentiment: Sentiment,
    pub trending_topics: Vec<String>,
    pub common_questions: Vec<String>,
    pub content_ideas: Vec<ContentIdea>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompetitorMetric {
    pub name: String,
    pub engagement_rate: f64,
    pub posting_frequency: f64,
    pub positive_sentiment: f64,
}

/// The brand pair is positional on the wire; here each side is named.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CompetitorComparison {
    pub primary: Option<CompetitorMetric>,
    pub competitor: Option<CompetitorMetric>,
}

impl CompetitorComparison {
    /// Entry 0 is the primary brand, entry 1 the competitor. Extra entries are
    /// ignored.
    pub fn from_entries(entries: Vec<CompetitorMetric>) -> Self {
        let mut entries = entries.into_iter();
        Self {
            primary: entries.next(),
            competitor: entries.next(),
        }
    }

    pub fn into_entries(self) -> Vec<CompetitorMetric> {
        self.primary.into_iter().chain(self.competitor).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TopPosts {
    pub brand: Vec<SocialMediaPost>,
    pub competitor: Vec<SocialMediaPost>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "CompetitorPayload", into = "CompetitorPayload")]
pub struct CompetitorData {
    pub comparison: CompetitorComparison,
    pub top_posts: TopPosts,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CompetitorPayload {
    comparison: Vec<CompetitorMetric>,
    top_posts: TopPosts,
}

impl From<CompetitorPayload> for CompetitorData {
    fn from(payload: CompetitorPayload) -> Self {
        Self {
            comparison: CompetitorComparison::from_entries(payload.comparison),
            top_posts: payload.top_posts,
        }
    }
}

impl From<CompetitorData> for CompetitorPayload {
    fn from(data: CompetitorData) -> Self {
        Self {
            comparison: data.comparison.into_entries(),
            top_posts: data.top_posts,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "UPPERCASE")]
pub enum AnalysisResult {
    Brand(BrandData),
    Youtube(YouTubeData),
    Competitor(CompetitorData),
}

impl AnalysisResult {
    pub fn mode(&self) -> AnalysisMode {
        match self {
            Self::Brand(_) => AnalysisMode::Brand,
            Self::Youtube(_) => AnalysisMode::Youtube,
            Self::Competitor(_) => AnalysisMode::Competitor,
        }
    }
}
