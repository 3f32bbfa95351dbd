//! Allow-list entry validation tests for imagewall-config.
// crates/imagewall-config/tests/images_validation.rs
// =============================================================================
// Module: Images Validation Tests
// Description: Tests for domain and remote pattern entry validation.
// Purpose: Ensure malformed hostnames, ports, and pathnames are rejected.
// =============================================================================

use imagewall_config::ConfigError;
use imagewall_config::ImagesConfig;
use imagewall_config::Protocol;
use imagewall_config::RemotePattern;

type TestResult = Result<(), String>;

/// Assert that a validation result is an error containing a specific substring.
fn assert_invalid(result: Result<(), ConfigError>, needle: &str) -> TestResult {
    match result {
        Err(error) => {
            let message = error.to_string();
            if message.contains(needle) {
                Ok(())
            } else {
                Err(format!("error '{message}' did not contain '{needle}'"))
            }
        }
        Ok(()) => Err("expected invalid config".to_string()),
    }
}

/// Builds a pattern with only the two required fields set.
fn https_pattern(hostname: &str) -> RemotePattern {
    RemotePattern {
        protocol: Protocol::Https,
        hostname: hostname.to_string(),
        port: None,
        pathname: None,
    }
}

/// Builds an allow-list carrying a single remote pattern.
fn patterns_config(patterns: Vec<RemotePattern>) -> ImagesConfig {
    ImagesConfig {
        domains: Vec::new(),
        remote_patterns: patterns,
    }
}

/// Builds an allow-list carrying only legacy domains.
fn domains_config(domains: &[&str]) -> ImagesConfig {
    ImagesConfig {
        domains: domains.iter().map(ToString::to_string).collect(),
        remote_patterns: Vec::new(),
    }
}

// ============================================================================
// SECTION: Accepted Entries
// ============================================================================

#[test]
fn stock_photo_origins_validate() -> TestResult {
    let config = patterns_config(vec![
        https_pattern("images.unsplash.com"),
        https_pattern("pixabay.com"),
    ]);
    config.validate().map_err(|err| err.to_string())
}

#[test]
fn legacy_domains_validate() -> TestResult {
    let config = domains_config(&["cdn.example.com", "static.example.org"]);
    config.validate().map_err(|err| err.to_string())
}

#[test]
fn uppercase_hostname_accepted() -> TestResult {
    let config = patterns_config(vec![https_pattern("CDN.Example.COM")]);
    config.validate().map_err(|err| err.to_string())
}

#[test]
fn full_pattern_validates() -> TestResult {
    let config = patterns_config(vec![RemotePattern {
        protocol: Protocol::Http,
        hostname: "*.example.com".to_string(),
        port: Some(8080),
        pathname: Some("/images/**".to_string()),
    }]);
    config.validate().map_err(|err| err.to_string())
}

// ============================================================================
// SECTION: Rejected Hostnames
// ============================================================================

#[test]
fn path_traversal_hostname_rejected() -> TestResult {
    let config = patterns_config(vec![https_pattern("evil.com/../x")]);
    assert_invalid(config.validate(), "path, query, or port characters")
}

#[test]
fn empty_hostname_rejected() -> TestResult {
    let config = patterns_config(vec![https_pattern("")]);
    assert_invalid(config.validate(), "must be non-empty")
}

#[test]
fn embedded_port_rejected() -> TestResult {
    let config = patterns_config(vec![https_pattern("example.com:8080")]);
    assert_invalid(config.validate(), "path, query, or port characters")
}

#[test]
fn query_in_hostname_rejected() -> TestResult {
    let config = patterns_config(vec![https_pattern("example.com?width=100")]);
    assert_invalid(config.validate(), "path, query, or port characters")
}

#[test]
fn whitespace_hostname_rejected() -> TestResult {
    let config = patterns_config(vec![https_pattern("exam ple.com")]);
    assert_invalid(config.validate(), "whitespace")
}

#[test]
fn wildcard_domain_entry_rejected() -> TestResult {
    let config = domains_config(&["*.example.com"]);
    assert_invalid(config.validate(), "wildcard")
}

#[test]
fn misplaced_wildcard_rejected() -> TestResult {
    let config = patterns_config(vec![https_pattern("img.*.example.com")]);
    assert_invalid(config.validate(), "leftmost label")
}

#[test]
fn bare_wildcard_rejected() -> TestResult {
    let config = patterns_config(vec![https_pattern("**")]);
    assert_invalid(config.validate(), "literal suffix")
}

#[test]
fn overlong_hostname_rejected() -> TestResult {
    let hostname = format!("{}.com", "a".repeat(251));
    let config = patterns_config(vec![https_pattern(&hostname)]);
    assert_invalid(config.validate(), "exceeds max length")
}

#[test]
fn overlong_label_rejected() -> TestResult {
    let hostname = format!("{}.example.com", "a".repeat(64));
    let config = patterns_config(vec![https_pattern(&hostname)]);
    assert_invalid(config.validate(), "label exceeds max length")
}

// ============================================================================
// SECTION: Rejected Ports and Pathnames
// ============================================================================

#[test]
fn port_zero_rejected() -> TestResult {
    let mut pattern = https_pattern("example.com");
    pattern.port = Some(0);
    assert_invalid(patterns_config(vec![pattern]).validate(), "port must be between")
}

#[test]
fn relative_pathname_rejected() -> TestResult {
    let mut pattern = https_pattern("example.com");
    pattern.pathname = Some("images/photos".to_string());
    assert_invalid(patterns_config(vec![pattern]).validate(), "must start with '/'")
}

#[test]
fn pathname_with_query_rejected() -> TestResult {
    let mut pattern = https_pattern("example.com");
    pattern.pathname = Some("/images?w=100".to_string());
    assert_invalid(patterns_config(vec![pattern]).validate(), "query or fragment")
}

#[test]
fn pathname_with_dot_segments_rejected() -> TestResult {
    let mut pattern = https_pattern("example.com");
    pattern.pathname = Some("/images/../private".to_string());
    assert_invalid(patterns_config(vec![pattern]).validate(), "dot segments")
}

#[test]
fn inner_double_star_pathname_rejected() -> TestResult {
    let mut pattern = https_pattern("example.com");
    pattern.pathname = Some("/a/**/b".to_string());
    assert_invalid(patterns_config(vec![pattern]).validate(), "final segment")
}

#[test]
fn partial_wildcard_pathname_rejected() -> TestResult {
    let mut pattern = https_pattern("example.com");
    pattern.pathname = Some("/ima*/large".to_string());
    assert_invalid(patterns_config(vec![pattern]).validate(), "entire segment")
}

// ============================================================================
// SECTION: List Limits
// ============================================================================

#[test]
fn domains_at_limit_accepted() -> TestResult {
    let domains: Vec<String> = (0..256).map(|idx| format!("host{idx}.example.com")).collect();
    let config = ImagesConfig {
        domains,
        remote_patterns: Vec::new(),
    };
    config.validate().map_err(|err| err.to_string())
}

#[test]
fn domains_over_limit_rejected() -> TestResult {
    let domains: Vec<String> = (0..257).map(|idx| format!("host{idx}.example.com")).collect();
    let config = ImagesConfig {
        domains,
        remote_patterns: Vec::new(),
    };
    assert_invalid(config.validate(), "images.domains has too many entries")
}

#[test]
fn patterns_over_limit_rejected() -> TestResult {
    let patterns: Vec<RemotePattern> =
        (0..257).map(|idx| https_pattern(&format!("host{idx}.example.com"))).collect();
    let config = patterns_config(patterns);
    assert_invalid(config.validate(), "images.remote_patterns has too many entries")
}
