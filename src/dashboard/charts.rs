use eframe::egui::Color32;

use crate::analysis::{CompetitorComparison, CompetitorMetric, Sentiment};

use super::style::{BRAND_PRIMARY, BRAND_SECONDARY, NEGATIVE_COLOR, NEUTRAL_COLOR, POSITIVE_COLOR};

pub const ENGAGEMENT_RATE_LABEL: &str = "Engagement Rate (%)";
pub const POSTING_FREQUENCY_LABEL: &str = "Posting Frequency (p/w)";
pub const POSITIVE_SENTIMENT_LABEL: &str = "Positive Sentiment (%)";

#[derive(Debug, Clone, PartialEq)]
pub struct SentimentSegment {
    pub label: &'static str,
    pub value: f64,
    pub color: Color32,
    /// Share of the segment total, rounded to a whole percent.
    pub percent: u32,
}

impl SentimentSegment {
    pub fn display_label(&self) -> String {
        format!("{} {}%", self.label, self.percent)
    }
}

/// Pie segments in Positive, Negative, Neutral order. Values are passed
/// through untouched; percentages are relative to the sum of the non-negative
/// values, matching what the pie draws.
pub fn sentiment_segments(sentiment: &Sentiment) -> [SentimentSegment; 3] {
    let total = [sentiment.positive, sentiment.negative, sentiment.neutral]
        .into_iter()
        .map(|value| value.max(0.0))
        .sum::<f64>();
    let segment = |label, value: f64, color| SentimentSegment {
        label,
        value,
        color,
        percent: percent_of(value, total),
    };

    [
        segment("Positive", sentiment.positive, POSITIVE_COLOR),
        segment("Negative", sentiment.negative, NEGATIVE_COLOR),
        segment("Neutral", sentiment.neutral, NEUTRAL_COLOR),
    ]
}

fn percent_of(value: f64, total: f64) -> u32 {
    if total > 0.0 && value > 0.0 {
        (value / total * 100.0).round() as u32
    } else {
        0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonSide {
    Primary,
    Competitor,
}

impl ComparisonSide {
    pub fn color(self) -> Color32 {
        match self {
            Self::Primary => BRAND_PRIMARY,
            Self::Competitor => BRAND_SECONDARY,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SeriesValue {
    pub side: ComparisonSide,
    pub name: String,
    pub value: f64,
}

/// One bar group: a metric with one value per brand present in the comparison.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricRow {
    pub metric: &'static str,
    pub values: Vec<SeriesValue>,
}

impl MetricRow {
    pub fn value_for(&self, name: &str) -> Option<f64> {
        self.values
            .iter()
            .find(|entry| entry.name == name)
            .map(|entry| entry.value)
    }
}

/// Pivots the two brands into three metric rows. A missing side simply has no
/// value in any row.
pub fn competitor_rows(comparison: &CompetitorComparison) -> Vec<MetricRow> {
    let sides = [
        (ComparisonSide::Primary, comparison.primary.as_ref()),
        (ComparisonSide::Competitor, comparison.competitor.as_ref()),
    ];
    let metrics: [(&'static str, fn(&CompetitorMetric) -> f64); 3] = [
        (ENGAGEMENT_RATE_LABEL, |metric| metric.engagement_rate),
        (POSTING_FREQUENCY_LABEL, |metric| metric.posting_frequency),
        (POSITIVE_SENTIMENT_LABEL, |metric| metric.positive_sentiment),
    ];

    metrics
        .into_iter()
        .map(|(label, read)| MetricRow {
            metric: label,
            values: sides
                .iter()
                .filter_map(|&(side, metric)| {
                    metric.map(|metric| SeriesValue {
                        side,
                        name: metric.name.clone(),
                        value: read(metric),
                    })
                })
                .collect(),
        })
        .collect()
}
