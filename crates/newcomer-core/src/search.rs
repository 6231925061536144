//! Text matching shared by the filtering engines.
//!
//! All matching is substring based and case-insensitive, so "texas" finds
//! "Austin, Texas" and "québec" finds "Montréal, QUÉBEC".

/// Normalize a user-typed search term: trimmed, empty terms become None.
pub fn normalize_term(term: &str) -> Option<&str> {
    let trimmed = term.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

/// Check if text contains a term, ignoring case.
/// An empty term matches everything.
pub fn contains_ignore_case(text: &str, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }
    // Full Unicode lowercasing; FAQs arrive in the user's language
    text.to_lowercase().contains(&term.to_lowercase())
}

/// Check if any of the given fields contains the term.
pub fn any_field_contains(fields: &[&str], term: &str) -> bool {
    fields.iter().any(|field| contains_ignore_case(field, term))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_term() {
        assert_eq!(normalize_term("visa"), Some("visa"));
        assert_eq!(normalize_term("  visa  "), Some("visa"));
        assert_eq!(normalize_term(""), None);
        assert_eq!(normalize_term("   "), None);
    }

    #[test]
    fn test_contains_ignore_case() {
        assert!(contains_ignore_case("Austin, Texas", "texas"));
        assert!(contains_ignore_case("Austin, Texas", "TEXAS"));
        assert!(contains_ignore_case("Austin, Texas", "n, T"));
        assert!(!contains_ignore_case("Miami, Florida", "texas"));
        assert!(contains_ignore_case("anything", "")); // Empty term matches all
        assert!(!contains_ignore_case("Hi", "Hello")); // Term longer than text
    }

    #[test]
    fn test_contains_ignore_case_beyond_ascii() {
        assert!(contains_ignore_case("OFICINA DE INMIGRACIÓN", "inmigración"));
        assert!(contains_ignore_case("Montréal, QUÉBEC", "Québec"));
        assert!(!contains_ignore_case("Montreal, Quebec", "québec"));
    }

    #[test]
    fn test_any_field_contains() {
        assert!(any_field_contains(&["Job Fair", "Bring your resume"], "resume"));
        assert!(!any_field_contains(&["Job Fair", "Bring your resume"], "housing"));
        assert!(!any_field_contains(&[], "housing"));
    }
}
