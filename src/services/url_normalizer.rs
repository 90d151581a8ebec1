// Address-bar input normalization.
// Runs before any location reaches the tab store; purely local string handling,
// no DNS lookups or network checks.

use crate::types::settings::NavigationSettings;
use crate::types::tab::NEW_TAB_LOCATION;

/// Schemes written without `//` that still count as already-schemed.
const OPAQUE_SCHEMES: &[&str] = &["about:", "data:", "mailto:", "javascript:"];

/// Turns raw input into a location.
///
/// 1. Empty input opens the new-tab page.
/// 2. Input that already carries a scheme passes through unchanged.
/// 3. Scheme-less input with a dot and no whitespace gets the default scheme.
/// 4. Anything else becomes a search query.
pub fn normalize_input(raw: &str, settings: &NavigationSettings) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return NEW_TAB_LOCATION.to_string();
    }

    if has_scheme(trimmed) {
        return trimmed.to_string();
    }

    if trimmed.contains('.') && !trimmed.chars().any(char::is_whitespace) {
        return format!("{}://{}", settings.default_scheme, trimmed);
    }

    search_location(trimmed, settings)
}

/// Builds the search-engine address for `query`.
pub fn search_location(query: &str, settings: &NavigationSettings) -> String {
    format!("{}{}", settings.search_url, urlencoding::encode(query))
}

/// True for `scheme://...` with a well-formed scheme token, and for the
/// opaque schemes listed above.
pub fn has_scheme(input: &str) -> bool {
    let lower = input.to_ascii_lowercase();
    if OPAQUE_SCHEMES.iter().any(|s| lower.starts_with(s)) {
        return true;
    }
    match input.split_once("://") {
        Some((scheme, _)) => {
            let mut chars = scheme.chars();
            matches!(chars.next(), Some(c) if c.is_ascii_alphabetic())
                && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        }
        None => false,
    }
}
