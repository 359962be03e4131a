use std::fmt::Write as _;

use crate::analysis::{AnalysisResult, BrandData, CompetitorData, SocialMediaPost, YouTubeData};
use crate::dashboard::charts::{competitor_rows, sentiment_segments};
use crate::dashboard::renderer::{
    NO_POST_DATA_TEXT, brand_dashboard_title, competitor_dashboard_title, competitor_names,
};
use crate::dashboard::word_cloud::layout_word_cloud;

const MAX_CLOUD_TERMS: usize = 10;

/// Plain-text rendering of a result for the `analyze` command.
pub fn render_report(result: &AnalysisResult, label: &str) -> String {
    let mut out = String::new();
    match result {
        AnalysisResult::Brand(data) => write_brand(&mut out, data, label),
        AnalysisResult::Youtube(data) => write_youtube(&mut out, data, label),
        AnalysisResult::Competitor(data) => write_competitor(&mut out, data),
    }
    out
}

fn write_brand(out: &mut String, data: &BrandData, label: &str) {
    heading(out, &brand_dashboard_title(label));
    write_sentiment(out, &data.sentiment);

    section(out, "Word Cloud");
    let terms = layout_word_cloud(&data.word_cloud)
        .into_iter()
        .take(MAX_CLOUD_TERMS)
        .map(|word| format!("{} ({})", word.text, word.value))
        .collect::<Vec<_>>();
    let _ = writeln!(out, "  {}", terms.join(", "));

    section(out, "Top Positive Themes");
    list(out, &data.top_themes.positive);
    section(out, "Top Negative Themes");
    list(out, &data.top_themes.negative);

    section(out, "Sample Social Media Posts");
    for post in &data.sample_posts {
        write_post(out, post);
    }
}

fn write_youtube(out: &mut String, data: &YouTubeData, video: &str) {
    heading(out, "YouTube Comment Analysis");
    let _ = writeln!(out, "{video}");
    write_sentiment(out, &data.sentiment);

    section(out, "Trending Topics");
    list(out, &data.trending_topics);
    section(out, "Common Questions");
    list(out, &data.common_questions);

    section(out, "AI-Generated Content Ideas");
    for idea in &data.content_ideas {
        let _ = writeln!(out, "  * {}: {}", idea.title, idea.description);
    }
}

fn write_competitor(out: &mut String, data: &CompetitorData) {
    heading(out, &competitor_dashboard_title(data));

    section(out, "Metrics Comparison");
    for row in competitor_rows(&data.comparison) {
        let values = row
            .values
            .iter()
            .map(|entry| format!("{} {}", entry.name, entry.value))
            .collect::<Vec<_>>();
        let _ = writeln!(out, "  {}: {}", row.metric, values.join(" | "));
    }

    let (primary, competitor) = competitor_names(data);
    for (name, posts) in [
        (primary, &data.top_posts.brand),
        (competitor, &data.top_posts.competitor),
    ] {
        section(out, &format!("Top Post for {name}"));
        match posts.first() {
            Some(post) => write_post(out, post),
            None => {
                let _ = writeln!(out, "  {NO_POST_DATA_TEXT}");
            }
        }
    }
}

fn write_sentiment(out: &mut String, sentiment: &crate::analysis::Sentiment) {
    section(out, "Sentiment Breakdown");
    let parts = sentiment_segments(sentiment)
        .iter()
        .map(|segment| segment.display_label())
        .collect::<Vec<_>>();
    let _ = writeln!(out, "  {}", parts.join(" | "));
}

fn write_post(out: &mut String, post: &SocialMediaPost) {
    let _ = writeln!(
        out,
        "  [{}] {} ({}): \"{}\"",
        post.platform, post.username, post.sentiment, post.content
    );
}

fn heading(out: &mut String, title: &str) {
    let _ = writeln!(out, "{title}");
    let _ = writeln!(out, "{}", "=".repeat(title.chars().count()));
}

fn section(out: &mut String, title: &str) {
    let _ = writeln!(out);
    let _ = writeln!(out, "{title}");
}

fn list(out: &mut String, items: &[String]) {
    for item in items {
        let _ = writeln!(out, "  - {item}");
    }
}
