//! SMS gateway configuration

use serde::{Deserialize, Serialize};

use super::parse_or;

/// SMS provider selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SmsProvider {
    /// Logs the message instead of sending it
    #[default]
    Mock,
    Twilio,
}

impl std::str::FromStr for SmsProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mock" => Ok(SmsProvider::Mock),
            "twilio" => Ok(SmsProvider::Twilio),
            _ => Err(format!("Invalid SMS provider: {}", s)),
        }
    }
}

/// SMS gateway configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SmsConfig {
    pub provider: SmsProvider,

    /// Provider account id (Twilio account SID)
    #[serde(default)]
    pub api_key: Option<String>,

    /// Provider secret (Twilio auth token)
    #[serde(default)]
    pub api_secret: Option<String>,

    /// Sender number in E.164 format
    #[serde(default)]
    pub from_number: Option<String>,

    /// Simulated latency of the mock gateway in milliseconds
    #[serde(default = "default_mock_delay_ms")]
    pub mock_delay_ms: u64,
}

impl Default for SmsConfig {
    fn default() -> Self {
        Self {
            provider: SmsProvider::Mock,
            api_key: None,
            api_secret: None,
            from_number: None,
            mock_delay_ms: default_mock_delay_ms(),
        }
    }
}

impl SmsConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self::from_source(&|key: &str| std::env::var(key).ok())
    }

    pub fn from_source<F>(lookup: &F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        Self {
            provider: parse_or(lookup, "SMS_PROVIDER", SmsProvider::Mock),
            api_key: non_empty("SMS_API_KEY"),
            api_secret: non_empty("SMS_API_SECRET"),
            from_number: non_empty("SMS_FROM_NUMBER"),
            mock_delay_ms: parse_or(lookup, "SMS_MOCK_DELAY_MS", default_mock_delay_ms()),
        }
    }

    /// Whether provider credentials are complete
    pub fn has_credentials(&self) -> bool {
        self.api_key.is_some() && self.api_secret.is_some() && self.from_number.is_some()
    }
}

fn default_mock_delay_ms() -> u64 {
    1000
}
