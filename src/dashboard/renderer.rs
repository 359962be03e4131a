use eframe::egui::{self, Color32, RichText, Ui};

use crate::analysis::{BrandData, CompetitorData, SocialMediaPost, YouTubeData};

use super::charts::competitor_rows;
use super::style::{MUTED_TEXT, NEGATIVE_COLOR, POSITIVE_COLOR};
use super::widgets::{
    bullet_list, competitor_bar_chart, content_idea_card, feature_card, post_card, sentiment_pie,
    word_cloud,
};

pub const PRIMARY_FALLBACK_NAME: &str = "Your Brand";
pub const COMPETITOR_FALLBACK_NAME: &str = "Competitor";
pub const NO_POST_DATA_TEXT: &str = "No post data available.";

pub fn brand_dashboard_title(label: &str) -> String {
    format!("Brand Sentiment Analysis for {label}")
}

pub fn competitor_dashboard_title(data: &CompetitorData) -> String {
    let (primary, competitor) = competitor_names(data);
    format!("Competitor Analysis: {primary} vs {competitor}")
}

/// Display names for both sides, falling back when the model returned fewer
/// than two comparison entries.
pub fn competitor_names(data: &CompetitorData) -> (&str, &str) {
    let primary = data
        .comparison
        .primary
        .as_ref()
        .map_or(PRIMARY_FALLBACK_NAME, |metric| metric.name.as_str());
    let competitor = data
        .comparison
        .competitor
        .as_ref()
        .map_or(COMPETITOR_FALLBACK_NAME, |metric| metric.name.as_str());
    (primary, competitor)
}

pub fn render_brand_dashboard(ui: &mut Ui, data: &BrandData, label: &str) {
    ui.heading(RichText::new(brand_dashboard_title(label)).color(Color32::WHITE));
    ui.add_space(12.0);

    ui.columns(2, |columns| {
        feature_card(&mut columns[0], "📊", "Sentiment Breakdown", |ui| {
            sentiment_pie(ui, &data.sentiment);
        });
        feature_card(&mut columns[1], "☁", "Word Cloud", |ui| {
            word_cloud(ui, &data.word_cloud);
        });
    });
    ui.add_space(12.0);

    ui.columns(2, |columns| {
        feature_card(&mut columns[0], "👍", "Top Positive Themes", |ui| {
            bullet_list(ui, &data.top_themes.positive, "✔", POSITIVE_COLOR);
        });
        feature_card(&mut columns[1], "👎", "Top Negative Themes", |ui| {
            bullet_list(ui, &data.top_themes.negative, "✖", NEGATIVE_COLOR);
        });
    });
    ui.add_space(12.0);

    feature_card(ui, "💬", "Sample Social Media Posts", |ui| {
        for post in &data.sample_posts {
            post_card(ui, post);
            ui.add_space(6.0);
        }
    });
}

pub fn render_youtube_dashboard(ui: &mut Ui, data: &YouTubeData, video: &str) {
    ui.heading(RichText::new("YouTube Comment Analysis").color(Color32::WHITE));
    ui.label(RichText::new(video).color(MUTED_TEXT));
    ui.add_space(12.0);

    ui.columns(2, |columns| {
        feature_card(&mut columns[0], "📊", "Sentiment Breakdown", |ui| {
            sentiment_pie(ui, &data.sentiment);
        });
        feature_card(&mut columns[1], "📈", "Trending Topics", |ui| {
            ui.horizontal_wrapped(|ui| {
                for topic in &data.trending_topics {
                    ui.label(RichText::new(format!("#{topic}")).color(Color32::LIGHT_BLUE));
                }
            });
        });
    });
    ui.add_space(12.0);

    feature_card(ui, "❓", "Common Questions", |ui| {
        for question in &data.common_questions {
            ui.label(RichText::new(format!("\"{question}\"")).color(Color32::LIGHT_GRAY));
        }
    });
    ui.add_space(12.0);

    feature_card(ui, "💡", "AI-Generated Content Ideas", |ui| {
        for idea in &data.content_ideas {
            content_idea_card(ui, idea);
            ui.add_space(6.0);
        }
    });
}

pub fn render_competitor_dashboard(ui: &mut Ui, data: &CompetitorData) {
    let (primary, competitor) = competitor_names(data);
    ui.heading(RichText::new(competitor_dashboard_title(data)).color(Color32::WHITE));
    ui.add_space(12.0);

    let rows = competitor_rows(&data.comparison);
    feature_card(ui, "📊", "Metrics Comparison", |ui| {
        competitor_bar_chart(ui, &rows);
    });
    ui.add_space(12.0);

    ui.columns(2, |columns| {
        top_post_card(&mut columns[0], primary, &data.top_posts.brand);
        top_post_card(&mut columns[1], competitor, &data.top_posts.competitor);
    });
}

fn top_post_card(ui: &mut Ui, name: &str, posts: &[SocialMediaPost]) {
    feature_card(ui, "🏆", &format!("Top Post for {name}"), |ui| match posts.first() {
        Some(post) => post_card(ui, post),
        None => {
            ui.label(RichText::new(NO_POST_DATA_TEXT).color(MUTED_TEXT));
        }
    });
}

pub fn render_welcome(ui: &mut Ui) {
    ui.vertical_centered(|ui| {
        ui.add_space(80.0);
        ui.heading(RichText::new("Welcome to SocialSense AI").color(Color32::WHITE));
        ui.label(
            RichText::new("Select an analysis type and enter a topic to begin.").color(MUTED_TEXT),
        );
    });
}

pub fn render_loading(ui: &mut Ui) {
    ui.vertical_centered(|ui| {
        ui.add_space(80.0);
        ui.add(egui::Spinner::new().size(32.0));
        ui.label(RichText::new("Analyzing...").color(MUTED_TEXT));
    });
}

pub fn render_error(ui: &mut Ui, message: &str) {
    egui::Frame::group(ui.style())
        .fill(NEGATIVE_COLOR.gamma_multiply(0.15))
        .stroke(egui::Stroke::new(1.0, NEGATIVE_COLOR))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(RichText::new("Error").strong().color(NEGATIVE_COLOR));
            ui.label(RichText::new(message).color(Color32::LIGHT_RED));
        });
}
