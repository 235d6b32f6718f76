//! Controller configuration.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const DEFAULT_ACTION_URL: &str = "/get-cookies";
pub const DEFAULT_HEADERS: &str = "User-Agent: HttpCookies.info/1.0";
pub const DEFAULT_FALLBACK_MESSAGE: &str = "Something went wrong :(";

/// Settings a host passes to `FormController::new`.
///
/// Every field has a default, so hosts can deserialize a partial JSON object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    /// The form's action target; submissions are POSTed here.
    pub action_url: String,
    /// Headers field content at startup and after the panel collapses.
    pub default_headers: String,
    /// Shown when a transport failure carries no detail.
    pub fallback_message: String,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            action_url: DEFAULT_ACTION_URL.to_string(),
            default_headers: DEFAULT_HEADERS.to_string(),
            fallback_message: DEFAULT_FALLBACK_MESSAGE.to_string(),
        }
    }
}

impl ControllerConfig {
    pub fn with_action_url(mut self, action_url: impl Into<String>) -> Self {
        self.action_url = action_url.into();
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = self.action_url.trim();
        if url.is_empty() || url.contains(char::is_whitespace) {
            return Err(ConfigError::InvalidActionUrl(self.action_url.clone()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_uses_defaults() {
        let config: ControllerConfig =
            serde_json::from_str(r#"{"action_url":"https://httpcookies.info/get-cookies"}"#).unwrap();
        assert_eq!(config.action_url, "https://httpcookies.info/get-cookies");
        assert_eq!(config.default_headers, DEFAULT_HEADERS);
        assert_eq!(config.fallback_message, DEFAULT_FALLBACK_MESSAGE);
    }

    #[test]
    fn rejects_blank_action_url() {
        let config = ControllerConfig::default().with_action_url("  ");
        assert!(matches!(config.validate(), Err(ConfigError::InvalidActionUrl(_))));
        assert!(ControllerConfig::default().validate().is_ok());
    }
}
