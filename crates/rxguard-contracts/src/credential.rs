//! Mock AI-provider credentials and their simulated health.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Which AI provider a credential belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Provider {
    #[serde(rename = "openai")]
    OpenAi,
    Azure,
    Other,
}

/// Simulated health of a credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiKeyStatus {
    /// Added but never health-checked.
    Untested,
    Active,
    Degraded,
    Down,
}

impl ApiKeyStatus {
    /// Active and degraded credentials may still serve requests.
    pub fn is_usable(&self) -> bool {
        matches!(self, Self::Active | Self::Degraded)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Untested => "untested",
            Self::Active => "active",
            Self::Degraded => "degraded",
            Self::Down => "down",
        }
    }
}

impl std::fmt::Display for ApiKeyStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A credential in the key pool.
///
/// At most one credential in a pool should carry `is_primary = true`. The
/// pool type does not enforce this; the command that sets the primary flag
/// clears it on every other credential.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiKeyCredential {
    pub id: String,
    pub label: String,
    pub provider: Provider,
    /// Only the last four characters of the secret are ever kept.
    pub key_masked: String,
    pub status: ApiKeyStatus,
    pub success_rate: f64,
    pub error_rate: f64,
    pub last_checked_at: Option<DateTime<Utc>>,
    pub is_primary: bool,
}

/// Mask a raw secret down to its last four characters.
///
/// Whitespace is trimmed first. A blank secret masks to eight asterisks.
pub fn mask_key(raw_key: &str) -> String {
    let trimmed = raw_key.trim();
    if trimmed.is_empty() {
        return "********".to_string();
    }
    let chars: Vec<char> = trimmed.chars().collect();
    let visible: String = chars[chars.len().saturating_sub(4)..].iter().collect();
    format!("************{visible}")
}
