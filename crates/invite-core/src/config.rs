//! Invite page configuration.
//!
//! Every operation that talks to the outside world (proxy endpoint, deep-link
//! scheme, fallback host, redirect delay) takes its value from an
//! [`InviteConfig`] instead of a global literal, so tests and alternative
//! deployments can substitute their own.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

/// Metadata proxy used in production.
pub const DEFAULT_PROXY_BASE: &str = "https://roblox-proxy.proxy-roblox.workers.dev";

/// URI scheme registered by the native game client.
pub const DEFAULT_SCHEME: &str = "roblox";

/// Host serving the public game pages.
pub const DEFAULT_WEB_HOST: &str = "www.roblox.com";

/// Delay before the deep-link redirect is attempted, in ms.
pub const DEFAULT_REDIRECT_DELAY_MS: u64 = 100;

// ---------------------------------------------------------------------------
// Config types
// ---------------------------------------------------------------------------

/// Where generated links point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LinkConfig {
    /// Scheme of the native deep link, without `://`.
    pub scheme: String,
    /// Host of the web fallback, without scheme.
    pub web_host: String,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            scheme: DEFAULT_SCHEME.to_string(),
            web_host: DEFAULT_WEB_HOST.to_string(),
        }
    }
}

/// Full configuration of the invite page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InviteConfig {
    /// Base URL of the metadata proxy (`{proxy_base}/api/gameInfo`).
    pub proxy_base: String,
    pub link: LinkConfig,
    pub redirect_delay_ms: u64,
}

impl Default for InviteConfig {
    fn default() -> Self {
        Self {
            proxy_base: DEFAULT_PROXY_BASE.to_string(),
            link: LinkConfig::default(),
            redirect_delay_ms: DEFAULT_REDIRECT_DELAY_MS,
        }
    }
}

impl InviteConfig {
    /// Replace individual values, ignoring `None` and blank overrides.
    ///
    /// Used by the web build to apply compile-time environment overrides.
    pub fn with_overrides(
        mut self,
        proxy_base: Option<&str>,
        scheme: Option<&str>,
        web_host: Option<&str>,
    ) -> Self {
        fn pick(v: Option<&str>) -> Option<&str> {
            v.map(str::trim).filter(|v| !v.is_empty())
        }

        if let Some(base) = pick(proxy_base) {
            self.proxy_base = base.to_string();
        }
        if let Some(scheme) = pick(scheme) {
            self.link.scheme = scheme.to_string();
        }
        if let Some(host) = pick(web_host) {
            self.link.web_host = host.to_string();
        }
        self
    }
}
