// crates/imagewall-config/src/policy.rs
// ============================================================================
// Module: Origin Policy
// Description: Deny-by-default evaluation of URLs against the allow-list.
// Purpose: Provide deterministic, fail-closed origin decisions.
// Dependencies: serde, url
// ============================================================================

//! ## Overview
//! An [`OriginPolicy`] is compiled from a validated allow-list and answers
//! whether a remote image URL is permitted. Evaluation is deterministic and
//! deny-by-default: an empty configuration permits nothing, and a URL without
//! an http(s) origin is always denied.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Serialize;
use url::Url;

use crate::config::ConfigError;
use crate::config::ImagesConfig;
use crate::config::Protocol;
use crate::pattern::hostname_matches;
use crate::pattern::pathname_matches;

// ============================================================================
// SECTION: Policy Model
// ============================================================================

/// Compiled origin allow-list policy.
#[derive(Debug, Clone)]
pub struct OriginPolicy {
    /// Compiled remote pattern rules, in configuration order.
    patterns: Vec<CompiledPattern>,
    /// Lowercased legacy domain entries, in configuration order.
    domains: Vec<String>,
}

/// Remote pattern rule normalized for matching.
#[derive(Debug, Clone)]
struct CompiledPattern {
    /// Required URL scheme.
    protocol: Protocol,
    /// Lowercased hostname pattern.
    hostname: String,
    /// Required effective port, when set.
    port: Option<u16>,
    /// Pathname pattern, when set.
    pathname: Option<String>,
}

impl OriginPolicy {
    /// Compiles an origin policy from an allow-list configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the configuration does not validate.
    pub fn from_config(config: &ImagesConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let patterns = config
            .remote_patterns
            .iter()
            .map(|pattern| CompiledPattern {
                protocol: pattern.protocol,
                hostname: pattern.hostname.to_ascii_lowercase(),
                port: pattern.port,
                pathname: pattern.pathname.clone(),
            })
            .collect();
        let domains =
            config.domains.iter().map(|domain| domain.to_ascii_lowercase()).collect();
        Ok(Self {
            patterns,
            domains,
        })
    }

    /// Evaluates a URL against the policy.
    #[must_use]
    pub fn evaluate(&self, url: &Url) -> OriginDecision {
        let protocol = match url.scheme() {
            scheme if scheme == Protocol::Http.as_str() => Protocol::Http,
            scheme if scheme == Protocol::Https.as_str() => Protocol::Https,
            _ => {
                return OriginDecision::Denied {
                    reason: DenyReason::UnsupportedScheme,
                };
            }
        };
        let Some(host) = url.host_str() else {
            return OriginDecision::Denied {
                reason: DenyReason::MissingHost,
            };
        };
        let host = host.to_ascii_lowercase();
        for (index, pattern) in self.patterns.iter().enumerate() {
            if pattern.matches(protocol, &host, url) {
                return OriginDecision::AllowedByPattern {
                    index,
                };
            }
        }
        for (index, domain) in self.domains.iter().enumerate() {
            if *domain == host {
                return OriginDecision::AllowedByDomain {
                    index,
                };
            }
        }
        OriginDecision::Denied {
            reason: DenyReason::NoRuleMatched,
        }
    }

    /// Returns true when the policy permits the URL.
    #[must_use]
    pub fn permits(&self, url: &Url) -> bool {
        self.evaluate(url).is_allowed()
    }
}

impl CompiledPattern {
    /// Returns true when the rule matches the URL origin and path.
    fn matches(&self, protocol: Protocol, host: &str, url: &Url) -> bool {
        if protocol != self.protocol {
            return false;
        }
        if !hostname_matches(&self.hostname, host) {
            return false;
        }
        if let Some(port) = self.port
            && url.port_or_known_default() != Some(port)
        {
            return false;
        }
        if let Some(pathname) = &self.pathname
            && !pathname_matches(pathname, url.path())
        {
            return false;
        }
        true
    }
}

// ============================================================================
// SECTION: Decisions
// ============================================================================

/// Outcome of evaluating a URL against the origin policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum OriginDecision {
    /// Permitted by a remote pattern rule.
    AllowedByPattern {
        /// Index of the matching entry in `images.remote_patterns`.
        index: usize,
    },
    /// Permitted by a legacy domain entry.
    AllowedByDomain {
        /// Index of the matching entry in `images.domains`.
        index: usize,
    },
    /// Denied; no allow-list rule matched.
    Denied {
        /// Reason the URL was denied.
        reason: DenyReason,
    },
}

impl OriginDecision {
    /// Returns true when the decision permits the URL.
    #[must_use]
    pub const fn is_allowed(&self) -> bool {
        matches!(self, Self::AllowedByPattern { .. } | Self::AllowedByDomain { .. })
    }
}

/// Reasons a URL is denied by the origin policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DenyReason {
    /// URL scheme is neither http nor https.
    UnsupportedScheme,
    /// URL has no hostname.
    MissingHost,
    /// No configured rule matched the URL.
    NoRuleMatched,
}

// ============================================================================
// SECTION: Tests
// ============================================================================
