use eframe::egui::Color32;

use crate::analysis::WordCloudItem;

use super::style::{BRAND_PRIMARY, BRAND_SECONDARY};

pub const SIZE_TIERS: [f32; 6] = [14.0, 16.0, 18.0, 20.0, 24.0, 30.0];
pub const COLOR_TIERS: [Color32; 6] = [
    Color32::from_rgb(209, 213, 219),
    Color32::from_rgb(243, 244, 246),
    Color32::WHITE,
    BRAND_SECONDARY,
    BRAND_PRIMARY,
    Color32::from_rgb(129, 140, 248),
];
pub const BOLD_RATIO: f64 = 0.7;

#[derive(Debug, Clone, PartialEq)]
pub struct StyledWord<'a> {
    pub text: &'a str,
    pub value: f64,
    pub ratio: f64,
    pub size_tier: usize,
    pub color_tier: usize,
    pub bold: bool,
}

impl StyledWord<'_> {
    pub fn font_size(&self) -> f32 {
        SIZE_TIERS[self.size_tier]
    }

    pub fn color(&self) -> Color32 {
        COLOR_TIERS[self.color_tier]
    }
}

/// Buckets `ratio` into `tier_count` equal bands; a ratio of 1.0 lands in the
/// last band.
pub fn tier_index(ratio: f64, tier_count: usize) -> usize {
    if tier_count == 0 {
        return 0;
    }
    let scaled = (ratio.clamp(0.0, 1.0) * tier_count as f64).floor() as usize;
    scaled.min(tier_count - 1)
}

/// Styles every word relative to the largest value and orders them largest
/// first. Empty input yields nothing.
pub fn layout_word_cloud(items: &[WordCloudItem]) -> Vec<StyledWord<'_>> {
    let max_value = items
        .iter()
        .map(|item| item.value)
        .fold(f64::NEG_INFINITY, f64::max);

    let mut words = items
        .iter()
        .map(|item| {
            let ratio = if max_value.is_finite() && max_value > 0.0 {
                (item.value / max_value).clamp(0.0, 1.0)
            } else {
                0.0
            };
            StyledWord {
                text: &item.text,
                value: item.value,
                ratio,
                size_tier: tier_index(ratio, SIZE_TIERS.len()),
                color_tier: tier_index(ratio, COLOR_TIERS.len()),
                bold: ratio > BOLD_RATIO,
            }
        })
        .collect::<Vec<_>>();

    words.sort_by(|a, b| b.value.total_cmp(&a.value));
    words
}
