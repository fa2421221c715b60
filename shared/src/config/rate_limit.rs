//! Rate limiting configuration module
//!
//! Throttling of the verification endpoints happens in front of the
//! verification service; these limits are applied per client IP and route.

use serde::{Deserialize, Serialize};

/// A fixed-window request quota
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct RouteLimit {
    /// Max requests per window
    pub limit: u32,

    /// Window length in seconds
    pub window_seconds: u64,
}

impl RouteLimit {
    pub const fn new(limit: u32, window_seconds: u64) -> Self {
        Self {
            limit,
            window_seconds,
        }
    }
}

/// Rate limiting configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RateLimitConfig {
    /// Enable rate limiting
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Email and SMS send endpoints
    #[serde(default = "default_send_code")]
    pub send_code: RouteLimit,

    /// Code verification endpoint
    #[serde(default = "default_verify")]
    pub verify_code: RouteLimit,

    /// Captcha issue and captcha verification endpoints
    #[serde(default = "default_verify")]
    pub captcha: RouteLimit,

    /// Reverse proxies allowed to name the client via `X-Forwarded-For`.
    /// Empty means the socket peer is always the client.
    #[serde(default)]
    pub trusted_proxies: Vec<String>,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            send_code: default_send_code(),
            verify_code: default_verify(),
            captcha: default_verify(),
            trusted_proxies: Vec::new(),
        }
    }
}

impl RateLimitConfig {
    /// Load from `RATE_LIMIT_ENABLED` and `TRUSTED_PROXIES` (comma separated);
    /// quotas keep their defaults
    pub fn from_env() -> Self {
        let enabled = std::env::var("RATE_LIMIT_ENABLED")
            .map(|v| !matches!(v.to_lowercase().as_str(), "false" | "0" | "no"))
            .unwrap_or_else(|_| default_enabled());
        let trusted_proxies = std::env::var("TRUSTED_PROXIES")
            .map(|v| parse_proxy_list(&v))
            .unwrap_or_default();
        Self {
            enabled,
            trusted_proxies,
            ..Default::default()
        }
    }

    /// Configuration with throttling switched off
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Default::default()
        }
    }
}

fn parse_proxy_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty())
        .collect()
}

fn default_enabled() -> bool {
    true
}

fn default_send_code() -> RouteLimit {
    RouteLimit::new(3, 60)
}

fn default_verify() -> RouteLimit {
    RouteLimit::new(5, 60)
}
