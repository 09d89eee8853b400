//! General application configuration.

use serde::{Deserialize, Serialize};

/// Default result limit.
const fn default_limit() -> u32 {
    10
}

const fn default_message_limit() -> u32 {
    50
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Default result limit for list commands and endpoints.
    #[serde(default = "default_limit")]
    pub default_limit: u32,

    /// Default page size for chat history.
    #[serde(default = "default_message_limit")]
    pub message_limit: u32,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
            message_limit: default_message_limit(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = GeneralConfig::default();
        assert_eq!(config.default_limit, 10);
        assert_eq!(config.message_limit, 50);
    }
}
