//! # Identifier Sanitisation
//!
//! Turns free-text dictionary keys and culture names into C# identifiers.
//!
//! ## Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    sanitize_identifier("save button")                   │
//! │                                                                         │
//! │  Already ^[A-Z][a-zA-Z0-9]*$ ?  ── yes ──► returned unchanged           │
//! │       │ no                                                              │
//! │       ▼                                                                 │
//! │  Title case        "save button"  → "Save Button"                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Strip non [A-Za-z0-9]           → "SaveButton"                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Strip leading digits            → "SaveButton"                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Upper-case first character      → "SaveButton"                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The result is not guaranteed unique; see [`crate::tree`] for how
//! collisions are handled.

use std::sync::LazyLock;

use regex::Regex;

static IDENTIFIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z][a-zA-Z0-9]*$").unwrap());

static NON_IDENTIFIER_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9]").unwrap());

static LEADING_DIGITS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]+").unwrap());

static CULTURE_LANGUAGE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[^(]*").unwrap());

static ISO_COUNTRY: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[A-Z]{2}$").unwrap());

/// Sanitises a raw dictionary key into a source identifier.
///
/// ## Examples
/// ```rust
/// use dictionary_core::sanitize_identifier;
///
/// assert_eq!(sanitize_identifier("General"), "General");
/// assert_eq!(sanitize_identifier("save button"), "SaveButton");
/// assert_eq!(sanitize_identifier("404 page-title"), "PageTitle");
/// ```
///
/// Idempotent: feeding the output back in returns it unchanged.
/// Returns an empty string when nothing usable remains.
pub fn sanitize_identifier(key: &str) -> String {
    if IDENTIFIER.is_match(key) {
        return key.to_string();
    }

    let stripped = strip_identifier(&title_case(key));
    capitalize_first(&stripped)
}

/// Builds the registry field name for a language.
///
/// The culture name up to any parenthesis, followed by the country code
/// taken from the end of the ISO code, then stripped like an identifier.
///
/// ## Examples
/// ```rust
/// use dictionary_core::sanitize_culture_name;
///
/// assert_eq!(sanitize_culture_name("en-GB", "English (United Kingdom)"), "EnglishGB");
/// assert_eq!(sanitize_culture_name("fr-FR", "French (France)"), "FrenchFR");
/// ```
pub fn sanitize_culture_name(iso_code: &str, culture_name: &str) -> String {
    let language = CULTURE_LANGUAGE
        .find(culture_name)
        .map(|m| m.as_str())
        .unwrap_or_default();
    let country = ISO_COUNTRY
        .find(iso_code)
        .map(|m| m.as_str())
        .unwrap_or_default();

    strip_identifier(&format!("{language}{country}"))
}

/// Removes every character outside `[A-Za-z0-9]`, then any leading digits.
///
/// Non-identifier characters go first so that "_1abc" cannot end up
/// starting with a digit.
pub(crate) fn strip_identifier(value: &str) -> String {
    let alphanumeric = NON_IDENTIFIER_CHARS.replace_all(value, "");
    LEADING_DIGITS.replace(&alphanumeric, "").into_owned()
}

/// Lower-cases the input and upper-cases the first letter of each word.
///
/// A word starts at the beginning of the string or after any character that
/// is not alphanumeric. Digits belong to the word they touch ("2nd" stays
/// "2nd").
fn title_case(value: &str) -> String {
    let mut result = String::with_capacity(value.len());
    let mut at_word_start = true;

    for c in value.chars() {
        if at_word_start && c.is_alphabetic() {
            result.extend(c.to_uppercase());
        } else {
            result.extend(c.to_lowercase());
        }
        at_word_start = !c.is_alphanumeric();
    }

    result
}

fn capitalize_first(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
