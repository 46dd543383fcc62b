//! Quick search: "Jean Pierre Dupont, Marie Curie @ company.com" formatted in every naming style.

use crate::error::{AppError, Result};
use crate::normalize::normalize;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::fmt;

/// Static shape check for an address. Says nothing about existence.
static EMAIL_SHAPE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z0-9]{2,}$")
        .expect("Failed to compile email regex pattern. This should not happen.")
});

static DISALLOWED_CHARS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[^a-z0-9.@-]")
        .expect("Failed to compile character filter regex. This should not happen.")
});

static HYPHEN_RUNS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"-+").expect("Failed to compile hyphen regex. This should not happen.")
});

/// A naming convention for the local-part of an address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub(crate) enum EmailStyle {
    #[serde(rename = "firstname.lastname")]
    FirstDotLast,
    #[serde(rename = "f.lastname")]
    InitialDotLast,
    #[serde(rename = "firstname.l")]
    FirstDotInitial,
    #[serde(rename = "firstnamelastname")]
    FirstLast,
    #[serde(rename = "flastname")]
    InitialLast,
    #[serde(rename = "lastname.firstname")]
    LastDotFirst,
    #[serde(rename = "l.firstname")]
    LastInitialDotFirst,
    #[serde(rename = "initials")]
    Initials,
}

impl EmailStyle {
    /// Every style, in display order.
    pub(crate) const ALL: [EmailStyle; 8] = [
        EmailStyle::FirstDotLast,
        EmailStyle::InitialDotLast,
        EmailStyle::FirstDotInitial,
        EmailStyle::FirstLast,
        EmailStyle::InitialLast,
        EmailStyle::LastDotFirst,
        EmailStyle::LastInitialDotFirst,
        EmailStyle::Initials,
    ];

    pub(crate) fn label(self) -> &'static str {
        match self {
            EmailStyle::FirstDotLast => "firstname.lastname",
            EmailStyle::InitialDotLast => "f.lastname",
            EmailStyle::FirstDotInitial => "firstname.l",
            EmailStyle::FirstLast => "firstnamelastname",
            EmailStyle::InitialLast => "flastname",
            EmailStyle::LastDotFirst => "lastname.firstname",
            EmailStyle::LastInitialDotFirst => "l.firstname",
            EmailStyle::Initials => "initials",
        }
    }
}

impl fmt::Display for EmailStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A parsed quick search line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct QuickSearch {
    pub names: Vec<String>,
    pub domain: String,
}

/// One formatted address of a name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct StyledEmail {
    pub style: EmailStyle,
    pub email: String,
    pub looks_valid: bool,
}

/// All styles for one name of a quick search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct StyledName {
    pub name: String,
    pub emails: Vec<StyledEmail>,
}

/// Parses "names @ domain", where names are comma-separated full names.
pub(crate) fn parse_quick_search(input: &str) -> Result<QuickSearch> {
    let mut parts = input.trim().split('@').map(str::trim);
    let names = parts.next().unwrap_or("");
    let domain = parts.next().unwrap_or("");

    if names.is_empty() || domain.is_empty() {
        tracing::warn!("Quick search input is missing names or domain: '{}'", input);
        return Err(AppError::QuickSearchFormat(format!(
            "expected 'First Last, Other Name @ domain', got '{}'",
            input
        )));
    }

    let names: Vec<String> = names
        .split(',')
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(str::to_string)
        .collect();

    if names.is_empty() {
        return Err(AppError::QuickSearchFormat(format!(
            "no names before '@' in '{}'",
            input
        )));
    }

    Ok(QuickSearch {
        names,
        domain: domain.to_string(),
    })
}

/// Splits a full name into (first, last) after folding accents.
///
/// The last word is the last name; any words before it are joined with `-`
/// into a compound first name. A single word is a first name alone.
pub(crate) fn split_full_name(full_name: &str) -> (String, String) {
    let folded = normalize(full_name.trim());
    let parts: Vec<&str> = folded.split_whitespace().collect();
    match parts.as_slice() {
        [] => (String::new(), String::new()),
        [only] => (only.to_string(), String::new()),
        [firsts @ .., last] => (firsts.join("-"), last.to_string()),
    }
}

fn first_char(s: &str) -> String {
    s.chars().next().map(String::from).unwrap_or_default()
}

/// Restricts an address to `[a-z0-9.@-]`, collapses hyphen runs and trims
/// hyphens at the edges of the local-part and the domain.
fn clean_email(raw: &str) -> String {
    let filtered = DISALLOWED_CHARS.replace_all(raw, "");
    let (local, domain) = filtered.split_once('@').unwrap_or((filtered.as_ref(), ""));
    let clean = |part: &str| HYPHEN_RUNS.replace_all(part, "-").trim_matches('-').to_string();
    format!("{}@{}", clean(local), clean(domain))
}

/// Formats one address for an already split and folded name.
pub(crate) fn format_email(first: &str, last: &str, domain: &str, style: EmailStyle) -> String {
    let f = first_char(first);
    let l = first_char(last);
    let raw = match style {
        EmailStyle::FirstDotLast => format!("{}.{}@{}", first, last, domain),
        EmailStyle::InitialDotLast => format!("{}.{}@{}", f, last, domain),
        EmailStyle::FirstDotInitial => format!("{}.{}@{}", first, l, domain),
        EmailStyle::FirstLast => format!("{}{}@{}", first, last, domain),
        EmailStyle::InitialLast => format!("{}{}@{}", f, last, domain),
        EmailStyle::LastDotFirst => format!("{}.{}@{}", last, first, domain),
        EmailStyle::LastInitialDotFirst => format!("{}.{}@{}", l, first, domain),
        EmailStyle::Initials => format!("{}{}@{}", f, l, domain),
    };
    clean_email(&raw.to_lowercase())
}

/// Static shape check used to flag formatted addresses.
pub(crate) fn looks_like_email(email: &str) -> bool {
    EMAIL_SHAPE_REGEX.is_match(email)
}

/// Formats every name in every style, keeping name order and style order.
pub(crate) fn format_all_styles(names: &[String], domain: &str) -> Vec<StyledName> {
    names
        .iter()
        .map(|name| {
            let (first, last) = split_full_name(name);
            let emails = EmailStyle::ALL
                .iter()
                .map(|&style| {
                    let email = format_email(&first, &last, domain, style);
                    let looks_valid = looks_like_email(&email);
                    StyledEmail {
                        style,
                        email,
                        looks_valid,
                    }
                })
                .collect();
            tracing::debug!("Formatted styles for '{}' as '{}' / '{}'", name, first, last);
            StyledName {
                name: name.clone(),
                emails,
            }
        })
        .collect()
}
