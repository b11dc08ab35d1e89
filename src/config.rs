//! Process configuration loaded from the environment

use crate::error::{QaError, QaResult};
use crate::types::BodySource;
use std::env;
use std::path::PathBuf;

pub const DEFAULT_TOP_K: usize = 3;
pub const DEFAULT_MODEL: &str = "gpt-4o-2024-11-20";
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_PORT: u16 = 8000;

#[derive(Debug, Clone)]
pub struct QaConfig {
    /// Contexts drawn per index when the request does not say
    pub top_k: usize,
    pub body_source: BodySource,
    pub model: String,
    /// Directory holding `*_structure.json` files
    pub results_dir: PathBuf,
    pub openai_api_key: Option<String>,
    pub openai_base_url: String,
    pub port: u16,
}

impl Default for QaConfig {
    fn default() -> Self {
        Self {
            top_k: DEFAULT_TOP_K,
            body_source: BodySource::PreferSummary,
            model: DEFAULT_MODEL.to_string(),
            results_dir: PathBuf::from("results"),
            openai_api_key: None,
            openai_base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl QaConfig {
    /// Read `.env` and process environment
    pub fn from_env() -> QaResult<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (unset and empty values are ignored)
    pub fn from_lookup<F>(lookup: F) -> QaResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(raw) = get("PAGEINDEX_QA_TOP_K") {
            config.top_k = parse_top_k(&raw)?;
        }
        // Compared as-is: only an exact (case-insensitive) "yes" prefers summaries
        if let Some(raw) = lookup("PAGEINDEX_QA_USE_SUMMARY").filter(|v| !v.is_empty()) {
            config.body_source = BodySource::from_use_summary(raw.eq_ignore_ascii_case("yes"));
        }
        if let Some(model) = get("PAGEINDEX_MODEL") {
            config.model = model;
        }
        if let Some(dir) = get("PAGEINDEX_RESULTS_DIR") {
            config.results_dir = PathBuf::from(dir);
        }
        config.openai_api_key = get("CHATGPT_API_KEY").or_else(|| get("OPENAI_API_KEY"));
        if let Some(url) = get("OPENAI_BASE_URL") {
            config.openai_base_url = url.trim_end_matches('/').to_string();
        }
        if let Some(raw) = get("PAGEINDEX_QA_PORT") {
            config.port = raw
                .trim()
                .parse()
                .map_err(|_| QaError::Configuration(format!("PAGEINDEX_QA_PORT is not a port: {}", raw)))?;
        }

        Ok(config)
    }

    pub fn with_results_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.results_dir = dir.into();
        self
    }
}

fn parse_top_k(raw: &str) -> QaResult<usize> {
    match raw.trim().parse::<usize>() {
        Ok(k) if k >= 1 => Ok(k),
        _ => Err(QaError::Configuration(format!(
            "PAGEINDEX_QA_TOP_K must be a positive integer, got '{}'",
            raw
        ))),
    }
}
