use std::time::Duration;

pub const DEFAULT_API_BASE_URL: &str = "https://techtest.youapp.ai/api";
pub const DEFAULT_TOKEN_KEY: &str = "token";
pub const DEFAULT_LOG_FILTER: &str = "info";

/// How long a success message stays visible before the follow-up action
/// (navigate, collapse) runs.
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_millis(1500);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub api_base_url: String,
    /// `localStorage` key holding the session token.
    pub token_key: String,
    pub settle_delay: Duration,
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            token_key: DEFAULT_TOKEN_KEY.to_string(),
            settle_delay: DEFAULT_SETTLE_DELAY,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl AppConfig {
    /// Defaults, overridden by `PROFILE_API_BASE_URL` / `PROFILE_LOG_FILTER`
    /// when they were set at build time. A browser bundle has no runtime env.
    pub fn from_build_env() -> Self {
        Self::from_overrides(
            option_env!("PROFILE_API_BASE_URL"),
            option_env!("PROFILE_LOG_FILTER"),
        )
    }

    fn from_overrides(base_url: Option<&str>, log_filter: Option<&str>) -> Self {
        let mut config = Self::default();
        if let Some(url) = base_url.map(str::trim).filter(|s| !s.is_empty()) {
            config.api_base_url = url.to_string();
        }
        if let Some(filter) = log_filter.map(str::trim).filter(|s| !s.is_empty()) {
            config.log_filter = filter.to_string();
        }
        config.api_base_url = config.api_base_url.trim_end_matches('/').to_string();
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_overrides(None, None);
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.token_key, "token");
        assert_eq!(config.settle_delay, Duration::from_millis(1500));
        assert_eq!(config.log_filter, "info");
    }

    #[test]
    fn test_overrides_trim_trailing_slash() {
        let config = AppConfig::from_overrides(Some("http://localhost:3000/api/"), Some("debug"));
        assert_eq!(config.api_base_url, "http://localhost:3000/api");
        assert_eq!(config.log_filter, "debug");
    }

    #[test]
    fn test_blank_overrides_are_ignored() {
        let config = AppConfig::from_overrides(Some("  "), Some(""));
        assert_eq!(config, AppConfig::default());
    }
}
