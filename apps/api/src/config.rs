use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub anthropic_api_key: String,
    pub port: u16,
    pub rust_log: String,
    /// Bound on a single article fetch.
    pub fetch_timeout: Duration,
    /// Bound on a single synthesis attempt, on top of the LLM client's own timeout.
    pub generation_timeout: Duration,
    /// Largest `num_questions` a caller may request.
    pub max_questions: usize,
    /// Drop quiz items whose answer is not one of their options.
    pub strict_answer_check: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            anthropic_api_key: require_env("ANTHROPIC_API_KEY")?,
            port: env_or("PORT", 8080u16)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            fetch_timeout: Duration::from_secs(env_or("FETCH_TIMEOUT_SECS", 15u64)?),
            generation_timeout: Duration::from_secs(env_or("GENERATION_TIMEOUT_SECS", 90u64)?),
            max_questions: env_or("MAX_QUESTIONS", 20usize)?,
            strict_answer_check: env_or("STRICT_ANSWER_CHECK", false)?,
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

/// Reads an optional variable, parsing it when present.
fn env_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value: {raw}")),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_or_falls_back_when_unset() {
        let value: u64 = env_or("WIKIQUIZ_TEST_UNSET_VARIABLE", 42).unwrap();
        assert_eq!(value, 42);
    }

    #[test]
    fn test_env_or_rejects_garbage() {
        std::env::set_var("WIKIQUIZ_TEST_BAD_PORT", "eighty");
        let result: Result<u16> = env_or("WIKIQUIZ_TEST_BAD_PORT", 8080);
        assert!(result.is_err());
    }

    #[test]
    fn test_env_or_parses_bool() {
        std::env::set_var("WIKIQUIZ_TEST_STRICT", "true");
        let value: bool = env_or("WIKIQUIZ_TEST_STRICT", false).unwrap();
        assert!(value);
    }
}
