use anyhow::{anyhow, bail, Context, Result};

use crate::generation::policy::{GenerationPolicy, IntroExclusion};
use crate::session::store::DEFAULT_MAX_SESSIONS;

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub rust_log: String,
    /// Serve corpus queries from an in-memory snapshot instead of SQLite.
    pub preload_corpus: bool,
    pub max_sessions: usize,
    pub policy: GenerationPolicy,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = GenerationPolicy::default();
        let policy = GenerationPolicy {
            intro_exclusion: match std::env::var("INTRO_EXCLUSION") {
                Ok(v) => v.parse::<IntroExclusion>().map_err(|e| anyhow!(e))?,
                Err(_) => defaults.intro_exclusion,
            },
            reusable_surahs: match std::env::var("REUSABLE_SURAHS") {
                Ok(v) => parse_surah_list(&v)?,
                Err(_) => defaults.reusable_surahs.clone(),
            },
            max_question_count: positive_env("MAX_QUESTION_COUNT", defaults.max_question_count)?,
            ..defaults
        };

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            preload_corpus: std::env::var("PRELOAD_CORPUS")
                .unwrap_or_else(|_| "true".to_string())
                .parse::<bool>()
                .context("PRELOAD_CORPUS must be 'true' or 'false'")?,
            max_sessions: positive_env("MAX_SESSIONS", DEFAULT_MAX_SESSIONS)?,
            policy,
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn positive_env(key: &str, default: usize) -> Result<usize> {
    match std::env::var(key) {
        Ok(raw) => parse_positive(key, &raw),
        Err(_) => Ok(default),
    }
}

fn parse_positive(key: &str, raw: &str) -> Result<usize> {
    let value = raw
        .trim()
        .parse::<usize>()
        .with_context(|| format!("{key} must be a positive integer"))?;
    if value == 0 {
        bail!("{key} must be a positive integer, got 0");
    }
    Ok(value)
}

/// Parses a comma-separated surah list such as `2,3,4`. Empty means none.
fn parse_surah_list(raw: &str) -> Result<Vec<i32>> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<i32>()
                .with_context(|| format!("REUSABLE_SURAHS entry '{s}' is not a surah number"))
        })
        .collect()
}
