//! Process configuration, loaded once at startup and injected into services.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

/// Outbound LLM (DashScope OpenAI-compatible mode) settings.
#[derive(Debug, Clone)]
pub struct AiConfig {
    /// Secret API key; `None` leaves AI features in degraded mode.
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    /// Per-call timeout in milliseconds.
    pub timeout_ms: u64,
    /// Total attempts for retryable completion failures.
    pub max_attempts: usize,
}

/// Outbound AMAP geocoding settings.
#[derive(Debug, Clone)]
pub struct GeocodeConfig {
    /// Secret API key; `None` disables coordinate enrichment.
    pub api_key: Option<String>,
    pub base_url: String,
    /// Per-call timeout in milliseconds.
    pub timeout_ms: u64,
    /// Fixed spacing between serial batch requests, for provider rate limits.
    pub request_spacing_ms: u64,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: String,
    pub data_dir: PathBuf,
    pub log_dir: PathBuf,
    pub ai: AiConfig,
    pub geocode: GeocodeConfig,
}

impl AppConfig {
    /// Read configuration from the process environment. Missing API keys put
    /// the corresponding feature in degraded mode instead of failing startup.
    pub fn from_env() -> Self {
        let ai = AiConfig {
            api_key: env::var("DASHSCOPE_API_KEY")
                .ok()
                .or_else(|| env::var("ALIYUN_API_KEY").ok())
                .and_then(non_empty),
            base_url: env_or(
                "TRIPFLOW_AI_BASE_URL",
                "https://dashscope.aliyuncs.com/compatible-mode/v1",
            ),
            model: env_or("TRIPFLOW_AI_MODEL", "qwen-plus"),
            timeout_ms: env_parse("TRIPFLOW_AI_TIMEOUT_MS", 30_000),
            max_attempts: env_parse("TRIPFLOW_AI_MAX_ATTEMPTS", 2),
        };

        let geocode = GeocodeConfig {
            api_key: env::var("AMAP_WEB_KEY").ok().and_then(non_empty),
            base_url: env_or(
                "TRIPFLOW_GEOCODE_BASE_URL",
                "https://restapi.amap.com/v3/geocode/geo",
            ),
            timeout_ms: env_parse("TRIPFLOW_GEOCODE_TIMEOUT_MS", 10_000),
            request_spacing_ms: env_parse("TRIPFLOW_GEOCODE_SPACING_MS", 100),
        };

        AppConfig {
            bind_addr: env_or("TRIPFLOW_BIND_ADDR", "0.0.0.0:3000"),
            data_dir: PathBuf::from(env_or("TRIPFLOW_DATA_DIR", "./data")),
            log_dir: PathBuf::from(env_or("TRIPFLOW_LOG_DIR", "./logs")),
            ai,
            geocode,
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).ok().and_then(non_empty).unwrap_or_else(|| default.to_string())
}

fn env_parse<T: FromStr>(key: &str, default: T) -> T {
    env::var(key).ok().and_then(|v| v.trim().parse().ok()).unwrap_or(default)
}

fn non_empty(v: String) -> Option<String> {
    let s = v.trim();
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_empty_filters_blank_values() {
        assert_eq!(non_empty("  ".into()), None);
        assert_eq!(non_empty(" key ".into()), Some("key".into()));
    }

    #[test]
    fn env_parse_falls_back_on_missing_or_garbage() {
        assert_eq!(env_parse("TRIPFLOW_TEST_UNSET_VAR", 42u64), 42);
    }
}
