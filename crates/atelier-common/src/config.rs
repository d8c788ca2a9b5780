//! Entitlement evaluation settings

use serde::{Deserialize, Serialize};

/// Settings for subscription-health evaluation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntitlementConfig {
    /// Days a past-due subscription stays usable after its period end
    pub grace_period_days: u32,
}

impl Default for EntitlementConfig {
    fn default() -> Self {
        Self { grace_period_days: 7 }
    }
}

impl EntitlementConfig {
    /// Build from the environment; `GRACE_PERIOD_DAYS` overrides the default
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(raw) = std::env::var("GRACE_PERIOD_DAYS") {
            match raw.parse() {
                Ok(days) => config.grace_period_days = days,
                Err(_) => tracing::warn!("ignoring invalid GRACE_PERIOD_DAYS: {}", raw),
            }
        }
        config
    }

    /// Grace period as a chrono duration
    pub fn grace_period(&self) -> chrono::Duration {
        chrono::Duration::days(self.grace_period_days as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_grace_period() {
        let config = EntitlementConfig::default();
        assert_eq!(config.grace_period_days, 7);
        assert_eq!(config.grace_period(), chrono::Duration::days(7));
    }
}
