use eframe::egui::Color32;

pub const POSITIVE_COLOR: Color32 = Color32::from_rgb(34, 197, 94);
pub const NEGATIVE_COLOR: Color32 = Color32::from_rgb(239, 68, 68);
pub const NEUTRAL_COLOR: Color32 = Color32::from_rgb(107, 114, 128);

pub const BRAND_PRIMARY: Color32 = Color32::from_rgb(79, 70, 229);
pub const BRAND_SECONDARY: Color32 = Color32::from_rgb(124, 58, 237);
pub const CARD_BACKGROUND: Color32 = Color32::from_rgb(31, 41, 55);
pub const CARD_BORDER: Color32 = Color32::from_rgb(55, 65, 81);
pub const MUTED_TEXT: Color32 = Color32::from_rgb(156, 163, 175);

const TINT_FACTOR: f32 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SentimentStyle {
    pub icon: &'static str,
    pub border_color: Color32,
    pub text_color: Color32,
    pub background_tint: Color32,
}

impl SentimentStyle {
    fn from_base(icon: &'static str, base: Color32) -> Self {
        Self {
            icon,
            border_color: base,
            text_color: base,
            background_tint: base.gamma_multiply(TINT_FACTOR),
        }
    }
}

/// Resolves a post sentiment label. Anything other than "Positive" or
/// "Negative" gets the neutral style.
pub fn sentiment_style(label: &str) -> SentimentStyle {
    match label {
        "Positive" => SentimentStyle::from_base("👍", POSITIVE_COLOR),
        "Negative" => SentimentStyle::from_base("👎", NEGATIVE_COLOR),
        _ => SentimentStyle::from_base("😐", NEUTRAL_COLOR),
    }
}

/// Only a few platforms have an icon; the rest render without one.
pub fn platform_icon(platform: &str) -> Option<&'static str> {
    match platform {
        "Twitter" => Some("🐦"),
        "YouTube" => Some("▶"),
        "Instagram" => Some("📷"),
        _ => None,
    }
}
