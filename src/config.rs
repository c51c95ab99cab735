//! Client Configuration
//!
//! Backend location and fixed UI tunables.

use std::sync::OnceLock;

const DEFAULT_API_BASE: &str = "http://localhost:8000";

/// How long a feedback banner stays visible
pub const FEEDBACK_BANNER_MS: u32 = 3_500;
/// Trailing debounce for cook/skip taps on the recommend screen
pub const ACTION_DEBOUNCE_MS: u32 = 300;
/// Trailing debounce for the my-recipes search box
pub const SEARCH_DEBOUNCE_MS: u32 = 300;
/// Window of the admin conversion statistic
pub const CONVERSION_WINDOW_DAYS: u32 = 7;
/// Demo users selectable on the admin debug panel
pub const DEMO_USERS: [u8; 2] = [1, 2];

#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub api_base: String,
}

impl ClientConfig {
    fn from_env(api_base: Option<&str>) -> Self {
        let base = api_base
            .map(str::trim)
            .filter(|b| !b.is_empty())
            .unwrap_or(DEFAULT_API_BASE);
        Self {
            api_base: base.trim_end_matches('/').to_string(),
        }
    }

    /// Absolute URL for an API path starting with `/`
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_base, path)
    }
}

static CONFIG: OnceLock<ClientConfig> = OnceLock::new();

/// Configuration resolved once from `HANKKI_API_BASE` at build time
pub fn client() -> &'static ClientConfig {
    CONFIG.get_or_init(|| ClientConfig::from_env(option_env!("HANKKI_API_BASE")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn falls_back_to_localhost() {
        assert_eq!(ClientConfig::from_env(None).api_base, DEFAULT_API_BASE);
        assert_eq!(ClientConfig::from_env(Some("  ")).api_base, DEFAULT_API_BASE);
    }

    #[test]
    fn trims_trailing_slash() {
        let cfg = ClientConfig::from_env(Some("https://api.example.com/"));
        assert_eq!(cfg.url("/api/pantry/"), "https://api.example.com/api/pantry/");
    }
}
