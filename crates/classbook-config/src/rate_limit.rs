//! Rate limiting configuration.
//!
//! Limits are applied per peer IP address with `tower_governor`. The server
//! must be started with `into_make_service_with_connect_info::<SocketAddr>()`
//! for the peer address to be available.
//!
//! # Environment Variables
//!
//! - `RATE_LIMIT_ENABLED`: Default `true`
//! - `RATE_LIMIT_PER_SECOND`: Seconds between token replenishments. Default 2
//! - `RATE_LIMIT_BURST_SIZE`: Requests allowed before throttling. Default 30

use tower_governor::governor::{GovernorConfig, GovernorConfigBuilder};
use tower_governor::key_extractor::PeerIpKeyExtractor;

/// Rate limit configuration for the API
#[derive(Clone, Debug)]
pub struct RateLimitConfig {
    pub enabled: bool,
    pub per_second: u64,
    pub burst_size: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            per_second: 2,
            burst_size: 30,
        }
    }
}

impl RateLimitConfig {
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            enabled: crate::env_flag("RATE_LIMIT_ENABLED", defaults.enabled),
            per_second: crate::env_parse("RATE_LIMIT_PER_SECOND", defaults.per_second),
            burst_size: crate::env_parse("RATE_LIMIT_BURST_SIZE", defaults.burst_size),
        }
    }

    /// Configuration with rate limiting switched off.
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    /// Builds the governor configuration keyed by peer IP.
    ///
    /// Returns `None` when the limits are zero, which governor rejects.
    #[must_use]
    pub fn governor_config(
        &self,
    ) -> Option<GovernorConfig<PeerIpKeyExtractor, ::governor::middleware::NoOpMiddleware>> {
        GovernorConfigBuilder::default()
            .per_second(self.per_second)
            .burst_size(self.burst_size)
            .key_extractor(PeerIpKeyExtractor)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RateLimitConfig::default();
        assert!(config.enabled);
        assert_eq!(config.per_second, 2);
        assert_eq!(config.burst_size, 30);
    }

    #[test]
    fn test_disabled_keeps_limits() {
        let config = RateLimitConfig::disabled();
        assert!(!config.enabled);
        assert_eq!(config.burst_size, 30);
    }

    #[test]
    fn test_governor_config_builds() {
        assert!(RateLimitConfig::default().governor_config().is_some());
    }

    #[test]
    fn test_governor_config_rejects_zero_burst() {
        let config = RateLimitConfig {
            enabled: true,
            per_second: 1,
            burst_size: 0,
        };
        assert!(config.governor_config().is_none());
    }
}
