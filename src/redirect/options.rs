//! Per-request redirect options.

use crate::config::RedirectConfig;

/// Header set by TLS-terminating proxies in front of the redirector.
pub const X_FORWARDED_PROTO: &str = "x-forwarded-proto";

/// Options for a single redirect, derived from the static configuration
/// and the request's forwarded protocol. Never mutated after construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RedirectOptions<'a> {
    /// Domain suffix for the rewritten host; empty disables rewriting.
    pub target_host: &'a str,

    /// Query parameter carrying the original host; empty disables it.
    pub host_query_param: &'a str,

    /// Redirect to `https` instead of `http`.
    pub always_https: bool,
}

impl<'a> RedirectOptions<'a> {
    /// Merge the static configuration with the request's `X-Forwarded-Proto`.
    ///
    /// HTTPS is forced when configured, or when the request already arrived
    /// over HTTPS at the proxy in front of us.
    pub fn derive(config: &'a RedirectConfig, forwarded_proto: Option<&str>) -> Self {
        Self {
            target_host: &config.target_host,
            host_query_param: &config.host_query_param,
            always_https: config.always_https || forwarded_proto == Some("https"),
        }
    }

    /// Scheme of the redirect target.
    pub fn scheme(&self) -> &'static str {
        if self.always_https {
            "https"
        } else {
            "http"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(always_https: bool) -> RedirectConfig {
        RedirectConfig {
            target_host: "example.org".to_string(),
            host_query_param: "via".to_string(),
            always_https,
        }
    }

    #[test]
    fn test_derive_copies_static_values() {
        let config = config(false);
        let options = RedirectOptions::derive(&config, None);
        assert_eq!(options.target_host, "example.org");
        assert_eq!(options.host_query_param, "via");
        assert!(!options.always_https);
        assert_eq!(options.scheme(), "http");
    }

    #[test]
    fn test_forwarded_https_forces_https() {
        let config = config(false);
        let options = RedirectOptions::derive(&config, Some("https"));
        assert!(options.always_https);
        assert_eq!(options.scheme(), "https");
    }

    #[test]
    fn test_only_exact_https_counts() {
        let config = config(false);
        assert!(!RedirectOptions::derive(&config, Some("http")).always_https);
        assert!(!RedirectOptions::derive(&config, Some("HTTPS")).always_https);
        assert!(!RedirectOptions::derive(&config, Some("")).always_https);
    }

    #[test]
    fn test_static_https_wins_over_forwarded_http() {
        let config = config(true);
        assert!(RedirectOptions::derive(&config, Some("http")).always_https);
    }
}
