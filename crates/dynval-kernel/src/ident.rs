//! Identifier validation for registered function names.

use regex::Regex;
use std::sync::OnceLock;

fn identifier_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[\p{L}_][\p{L}\p{Nd}_]*$").expect("identifier regex must compile")
    })
}

/// Whether `name` is a legal identifier: non-empty, starting with a letter
/// or underscore, and made only of letters, decimal digits and underscores.
/// Letters and digits are Unicode-aware.
pub fn is_valid_identifier(name: &str) -> bool {
    identifier_re().is_match(name)
}
