//! Supported-culture matching
//!
//! Pure functions that match a request-supplied locale name against the
//! configured supported list, optionally walking the name's parent chain
//! ("en-US" -> "en") when no exact match exists.

/// Parent-chain walk is capped so malformed or hostile locale names
/// cannot drive unbounded recursion.
pub const MAX_FALLBACK_DEPTH: u8 = 5;

/// Case-insensitive exact match against the supported list.
///
/// Returns the canonical form from the list, not the input form. The empty
/// name is the invariant culture and never matches a supported entry.
pub fn match_supported(name: &str, supported: &[String]) -> Option<String> {
    if name.is_empty() || supported.is_empty() {
        return None;
    }
    supported.iter().find(|s| s.eq_ignore_ascii_case(name)).cloned()
}

/// Exact match first, then (if enabled) the bounded parent-chain walk.
///
/// Locale names arrive from requests, so a name that is not a well-formed
/// tag degrades to "no match" instead of failing the request.
pub fn match_with_fallback(name: &str, supported: &[String], allow_fallback: bool) -> Option<String> {
    resolve(name, supported, allow_fallback, 0)
}

/// Tries each candidate in priority order, returning the first match.
pub fn match_any(names: &[String], supported: &[String], allow_fallback: bool) -> Option<String> {
    names
        .iter()
        .find_map(|name| match_with_fallback(name, supported, allow_fallback))
}

fn resolve(name: &str, supported: &[String], allow_fallback: bool, depth: u8) -> Option<String> {
    // The invariant culture has no parent and no supported-list entry to hit.
    if name.is_empty() {
        return None;
    }

    if let Some(found) = match_supported(name, supported) {
        return Some(found);
    }

    if allow_fallback && depth < MAX_FALLBACK_DEPTH && is_well_formed(name) {
        if let Some(parent) = parent_locale(name) {
            return resolve(parent, supported, allow_fallback, depth + 1);
        }
    }

    None
}

/// Immediate parent of a locale name: "en-US" -> "en". A single-segment
/// name has no parent.
fn parent_locale(name: &str) -> Option<&str> {
    name.rsplit_once('-').map(|(parent, _)| parent)
}

/// Well-formed here means BCP-47-shaped: ASCII alphanumeric subtags of
/// 1..=8 chars joined by '-'.
fn is_well_formed(name: &str) -> bool {
    name.split('-').all(|segment| {
        !segment.is_empty()
            && segment.len() <= 8
            && segment.chars().all(|c| c.is_ascii_alphanumeric())
    })
}
