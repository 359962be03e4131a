use std::f32::consts::{FRAC_PI_2, TAU};

use eframe::egui::{
    self, Align2, Color32, FontId, Painter, Pos2, Rect, RichText, Sense, Shape, Stroke, Ui, Vec2,
    pos2, vec2,
};

use crate::analysis::{ContentIdea, Sentiment, SocialMediaPost, WordCloudItem};

use super::charts::{ComparisonSide, MetricRow, sentiment_segments};
use super::style::{
    CARD_BACKGROUND, CARD_BORDER, MUTED_TEXT, platform_icon, sentiment_style,
};
use super::word_cloud::layout_word_cloud;

const PIE_RADIUS: f32 = 80.0;
const WEDGE_STEP_RADIANS: f32 = 0.05;
const BAR_CHART_HEIGHT: f32 = 300.0;
const BAR_GROUP_FILL: f32 = 0.8;

pub fn feature_card(ui: &mut Ui, icon: &str, title: &str, add_contents: impl FnOnce(&mut Ui)) {
    egui::Frame::group(ui.style())
        .fill(CARD_BACKGROUND)
        .stroke(Stroke::new(1.0, CARD_BORDER))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(
                RichText::new(format!("{icon}  {title}"))
                    .size(16.0)
                    .strong()
                    .color(Color32::WHITE),
            );
            ui.separator();
            add_contents(ui);
        });
}

pub fn sentiment_pie(ui: &mut Ui, sentiment: &Sentiment) {
    let segments = sentiment_segments(sentiment);
    let total: f64 = segments.iter().map(|segment| segment.value.max(0.0)).sum();

    let (response, painter) = ui.allocate_painter(
        vec2(ui.available_width(), PIE_RADIUS * 2.0 + 8.0),
        Sense::hover(),
    );
    let center = response.rect.center();

    if total > 0.0 {
        let mut start = -FRAC_PI_2;
        for segment in &segments {
            let sweep = (segment.value.max(0.0) / total) as f32 * TAU;
            paint_wedge(&painter, center, start, sweep, segment.color);
            start += sweep;
        }
    } else {
        painter.circle_stroke(center, PIE_RADIUS, Stroke::new(1.0, MUTED_TEXT));
    }

    ui.horizontal_wrapped(|ui| {
        for segment in &segments {
            color_swatch(ui, segment.color);
            ui.label(segment.display_label());
            ui.add_space(8.0);
        }
    });
}

fn paint_wedge(painter: &Painter, center: Pos2, start: f32, sweep: f32, color: Color32) {
    if sweep <= 0.0 {
        return;
    }

    let steps = ((sweep / WEDGE_STEP_RADIANS).ceil() as usize).max(1);
    for step in 0..steps {
        let from = start + sweep * step as f32 / steps as f32;
        let to = start + sweep * (step + 1) as f32 / steps as f32;
        painter.add(Shape::convex_polygon(
            vec![
                center,
                center + PIE_RADIUS * Vec2::angled(from),
                center + PIE_RADIUS * Vec2::angled(to),
            ],
            color,
            Stroke::NONE,
        ));
    }
}

fn color_swatch(ui: &mut Ui, color: Color32) {
    let (rect, _) = ui.allocate_exact_size(vec2(12.0, 12.0), Sense::hover());
    ui.painter().rect_filled(rect, 2.0, color);
}

pub fn competitor_bar_chart(ui: &mut Ui, rows: &[MetricRow]) {
    let max_value = rows
        .iter()
        .flat_map(|row| row.values.iter().map(|entry| entry.value))
        .fold(0.0_f64, f64::max);
    let scale_max = if max_value > 0.0 { max_value } else { 1.0 };

    let (response, painter) =
        ui.allocate_painter(vec2(ui.available_width(), BAR_CHART_HEIGHT), Sense::hover());
    let plot = Rect::from_min_max(
        response.rect.min + vec2(8.0, 20.0),
        response.rect.max - vec2(8.0, 28.0),
    );
    painter.line_segment(
        [plot.left_bottom(), plot.right_bottom()],
        Stroke::new(1.0, CARD_BORDER),
    );

    let group_width = plot.width() / rows.len().max(1) as f32;
    let bar_width = group_width * BAR_GROUP_FILL / 2.0;
    for (index, row) in rows.iter().enumerate() {
        let group_left = plot.left() + group_width * index as f32;
        let bars_left = group_left + group_width * (1.0 - BAR_GROUP_FILL) / 2.0;

        for entry in &row.values {
            let slot = match entry.side {
                ComparisonSide::Primary => 0.0,
                ComparisonSide::Competitor => 1.0,
            };
            let left = bars_left + slot * bar_width;
            let height = (entry.value.max(0.0) / scale_max) as f32 * plot.height();
            let bar = Rect::from_min_max(
                pos2(left + 2.0, plot.bottom() - height),
                pos2(left + bar_width - 2.0, plot.bottom()),
            );
            painter.rect_filled(bar, 2.0, entry.side.color());
            painter.text(
                pos2(bar.center().x, bar.top() - 2.0),
                Align2::CENTER_BOTTOM,
                entry.value.to_string(),
                FontId::proportional(11.0),
                Color32::LIGHT_GRAY,
            );
        }

        painter.text(
            pos2(group_left + group_width / 2.0, plot.bottom() + 6.0),
            Align2::CENTER_TOP,
            row.metric,
            FontId::proportional(12.0),
            MUTED_TEXT,
        );
    }

    if let Some(first) = rows.first() {
        ui.horizontal_wrapped(|ui| {
            for entry in &first.values {
                color_swatch(ui, entry.side.color());
                ui.label(&entry.name);
                ui.add_space(8.0);
            }
        });
    }
}

pub fn word_cloud(ui: &mut Ui, items: &[WordCloudItem]) {
    let words = layout_word_cloud(items);
    if words.is_empty() {
        return;
    }

    ui.horizontal_wrapped(|ui| {
        ui.spacing_mut().item_spacing = vec2(14.0, 6.0);
        for word in &words {
            let mut text = RichText::new(word.text)
                .size(word.font_size())
                .color(word.color());
            if word.bold {
                text = text.strong();
            }
            ui.label(text).on_hover_text(word.value.to_string());
        }
    });
}

pub fn post_card(ui: &mut Ui, post: &SocialMediaPost) {
    let style = sentiment_style(&post.sentiment);
    egui::Frame::group(ui.style())
        .fill(style.background_tint)
        .stroke(Stroke::new(2.0, style.border_color))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.horizontal(|ui| {
                if let Some(icon) = platform_icon(&post.platform) {
                    ui.label(icon);
                }
                ui.label(RichText::new(&post.username).strong().color(Color32::WHITE));
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(
                        RichText::new(format!("{} {}", style.icon, post.sentiment))
                            .small()
                            .color(style.text_color),
                    );
                });
            });
            ui.label(RichText::new(format!("\"{}\"", post.content)).color(Color32::LIGHT_GRAY));
        });
}

pub fn content_idea_card(ui: &mut Ui, idea: &ContentIdea) {
    egui::Frame::group(ui.style())
        .fill(CARD_BACKGROUND)
        .stroke(Stroke::new(1.0, super::style::BRAND_SECONDARY))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(
                RichText::new(format!("💡 {}", idea.title))
                    .size(16.0)
                    .strong()
                    .color(Color32::WHITE),
            );
            ui.label(RichText::new(&idea.description).color(MUTED_TEXT));
        });
}

pub fn bullet_list(ui: &mut Ui, items: &[String], marker: &str, color: Color32) {
    for item in items {
        ui.label(RichText::new(format!("{marker} {item}")).color(color));
    }
}
