//! Utility functions for checking and cleaning email domains.

use crate::error::{AppError, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

/// Dot-separated labels of 1-63 letters/digits/hyphens (no hyphen at either
/// end), followed by an alphabetic TLD of at least two letters.
static DOMAIN_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(?:[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?\.)+[a-z]{2,63}$")
        .expect("Failed to compile domain regex pattern. This should not happen.")
});

/// Syntactic check that `domain` looks like a DNS-style domain name.
///
/// Does not resolve anything and says nothing about deliverability.
pub(crate) fn is_valid_domain(domain: &str) -> bool {
    DOMAIN_REGEX.is_match(domain)
}

/// Turns user-typed domain input into a bare lowercase domain name.
/// Handles a leading `@`, missing schemes, "www." prefixes, paths and ports.
///
/// # Arguments
/// * `input` - The raw domain field (e.g. "@Example.com" or "https://www.example.com/team").
///
/// # Returns
/// * `Ok(String)` containing the lowercase domain name if successful.
/// * `Err(AppError::DomainExtraction)` if the input is empty or has no host.
/// * `Err(AppError::InvalidDomain)` if the input contains non-ASCII characters;
///   these are rejected rather than converted to punycode.
pub(crate) fn clean_domain_input(input: &str) -> Result<String> {
    tracing::debug!("Attempting to clean domain input: {}", input);
    let trimmed = input.trim().trim_start_matches('@').trim();
    if trimmed.is_empty() {
        tracing::warn!("Received empty domain input.");
        return Err(AppError::DomainExtraction(
            "Input domain string is empty".to_string(),
        ));
    }

    if !trimmed.is_ascii() {
        tracing::warn!("Rejected non-ASCII domain input: {}", input);
        return Err(AppError::InvalidDomain(trimmed.to_string()));
    }

    let url_str_with_scheme = if !trimmed.starts_with("http://") && !trimmed.starts_with("https://")
    {
        format!("https://{}", trimmed)
    } else {
        trimmed.to_string()
    };

    let url = Url::parse(&url_str_with_scheme).map_err(|e| {
        tracing::warn!(
            "Failed to parse domain '{}' (original: {}): {}",
            url_str_with_scheme,
            input,
            e
        );
        AppError::UrlParse(e)
    })?;

    let host = url.host_str().ok_or_else(|| {
        AppError::DomainExtraction(format!(
            "Could not extract host from input: {}",
            input
        ))
    })?;

    let domain = host.strip_prefix("www.").unwrap_or(host).to_lowercase();

    tracing::debug!("Cleaned domain '{}' from '{}'", domain, input);
    Ok(domain)
}
