use std::env;
use std::fmt::{Debug, Formatter};

use anyhow::{Context, Result, anyhow, ensure};

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL_TIMEOUT_MS: u64 = 60_000;
pub const DEFAULT_LOG_DIR: &str = "logs";

const API_KEY_VARS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];

#[derive(Clone, PartialEq, Eq)]
pub struct AnalyzerSettings {
    pub api_key: String,
    pub model: String,
    pub gemini_base_url: String,
    pub model_timeout_ms: u64,
}

impl AnalyzerSettings {
    pub fn from_env() -> Result<Self> {
        // Load .env if present, but do not fail if file does not exist.
        let _ = dotenvy::dotenv();

        let api_key = API_KEY_VARS
            .iter()
            .find_map(|name| read_optional_env(name))
            .ok_or_else(|| {
                anyhow!("GEMINI_API_KEY (or API_KEY) must be set to call the analysis service")
            })?;

        let model = env::var("MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_owned());
        ensure!(!model.trim().is_empty(), "MODEL cannot be empty");

        let gemini_base_url =
            env::var("GEMINI_BASE_URL").unwrap_or_else(|_| DEFAULT_GEMINI_BASE_URL.to_owned());
        ensure!(
            !gemini_base_url.trim().is_empty(),
            "GEMINI_BASE_URL cannot be empty"
        );

        let model_timeout_ms = parse_u64_env("MODEL_TIMEOUT_MS", DEFAULT_MODEL_TIMEOUT_MS)?;
        ensure!(
            model_timeout_ms > 0,
            "MODEL_TIMEOUT_MS must be greater than 0"
        );

        Ok(Self {
            api_key,
            model,
            gemini_base_url,
            model_timeout_ms,
        })
    }
}

impl Debug for AnalyzerSettings {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnalyzerSettings")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("gemini_base_url", &self.gemini_base_url)
            .field("model_timeout_ms", &self.model_timeout_ms)
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileLogSettings {
    pub filter: String,
    pub directory: String,
}

impl FileLogSettings {
    /// File logging is opt-in: `None` unless `SOCIALSENSE_FILE_LOG` carries a filter.
    pub fn from_env() -> Option<Self> {
        let filter = read_optional_env("SOCIALSENSE_FILE_LOG")?;
        let directory =
            read_optional_env("SOCIALSENSE_LOG_DIR").unwrap_or_else(|| DEFAULT_LOG_DIR.to_owned());
        Some(Self { filter, directory })
    }
}

fn read_optional_env(name: &str) -> Option<String> {
    env::var(name).ok().and_then(|value| {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_owned())
        }
    })
}

fn parse_u64_env(name: &str, default: u64) -> Result<u64> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<u64>()
            .with_context(|| format!("failed to parse {name} as u64")),
        Err(_) => Ok(default),
    }
}
