use contact_relay_core::message::{MailRoute, DEFAULT_RECIPIENT, DEFAULT_SENDER};

pub const SENDER_ENV: &str = "CONTACT_RELAY_SENDER";
pub const RECIPIENT_ENV: &str = "CONTACT_RELAY_RECIPIENT";
pub const SES_REGION_ENV: &str = "CONTACT_RELAY_SES_REGION";
pub const DEFAULT_SES_REGION: &str = "us-east-1";

/// Process-wide settings, read once at cold start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayConfig {
    pub route: MailRoute,
    pub ses_region: String,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            route: MailRoute::default(),
            ses_region: DEFAULT_SES_REGION.to_string(),
        }
    }
}

impl RelayConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Blank or missing values fall back to the built-in defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let setting = |key: &str, default: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        Self {
            route: MailRoute {
                sender: setting(SENDER_ENV, DEFAULT_SENDER),
                recipient: setting(RECIPIENT_ENV, DEFAULT_RECIPIENT),
            },
            ses_region: setting(SES_REGION_ENV, DEFAULT_SES_REGION),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn falls_back_to_defaults_when_unset() {
        let config = RelayConfig::from_lookup(|_| None);
        assert_eq!(config, RelayConfig::default());
        assert_eq!(config.ses_region, "us-east-1");
    }

    #[test]
    fn reads_overrides_and_ignores_blank_values() {
        let vars = HashMap::from([
            (SENDER_ENV, "  relay@example.com "),
            (RECIPIENT_ENV, "   "),
            (SES_REGION_ENV, "eu-west-1"),
        ]);
        let config = RelayConfig::from_lookup(|key| vars.get(key).map(|value| value.to_string()));

        assert_eq!(config.route.sender, "relay@example.com");
        assert_eq!(config.route.recipient, DEFAULT_RECIPIENT);
        assert_eq!(config.ses_region, "eu-west-1");
    }
}
