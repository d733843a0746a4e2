//! # Name Matching
//!
//! Style names and property keys are written by hand in several conventions:
//! `"Corner Radius"` in a design document, `"cornerRadius"` in code,
//! `"corner-radius"` in a JSON file. This module decides when two such spellings
//! refer to the same thing.
//!
//! ## Accepted spellings
//!
//! A candidate matches a canonical name when it equals one of these forms of
//! the canonical name:
//!
//! | form                    | `"Example Test String"` becomes |
//! |-------------------------|---------------------------------|
//! | exact                   | `Example Test String`           |
//! | lowercase               | `example test string`           |
//! | lowercase, no spaces    | `exampleteststring`             |
//! | no spaces, case kept    | `ExampleTestString`             |
//! | lowercase, dash-joined  | `example-test-string`           |
//! | lowercase, underscored  | `example_test_string`           |
//! | camelCase               | `exampleTestString`             |
//!
//! or when both names are equal after lowercasing and removing spaces.
//!
//! There is deliberately no edit-distance matching: `"Hedaer"` never matches
//! `"Header"`.
//!
//! ```rust
//! use swatch_theme::name::is_variant;
//!
//! assert!(is_variant("primary-background-color", "Primary Background Color"));
//! assert!(is_variant("primaryBackgroundColor", "Primary Background Color"));
//! assert!(!is_variant("primary", "Primary Background Color"));
//! ```

/// Returns `true` if `candidate` is an accepted spelling of `canonical`.
pub fn is_variant(candidate: &str, canonical: &str) -> bool {
    if candidate == canonical {
        return true;
    }

    let words: Vec<&str> = canonical.split_whitespace().collect();
    let lower = canonical.to_lowercase();

    candidate == lower
        || candidate == strip_spaces(&lower)
        || candidate == strip_spaces(canonical)
        || candidate == join_lower(&words, "-")
        || candidate == join_lower(&words, "_")
        || candidate == camel_case(&words)
        || loose(candidate) == loose(canonical)
}

/// Lowercases `name` and removes every whitespace character.
///
/// Two names with the same loose form are always considered variants of each other.
pub fn loose(name: &str) -> String {
    strip_spaces(&name.to_lowercase())
}

/// Builds the camelCase spelling of a space separated name.
///
/// ```rust
/// use swatch_theme::name::to_camel_case;
///
/// assert_eq!(to_camel_case("Header Text Color"), "headerTextColor");
/// ```
pub fn to_camel_case(name: &str) -> String {
    let words: Vec<&str> = name.split_whitespace().collect();
    camel_case(&words)
}

fn strip_spaces(name: &str) -> String {
    name.chars().filter(|c| !c.is_whitespace()).collect()
}

fn join_lower(words: &[&str], separator: &str) -> String {
    words
        .iter()
        .map(|word| word.to_lowercase())
        .collect::<Vec<_>>()
        .join(separator)
}

fn camel_case(words: &[&str]) -> String {
    let mut out = String::new();
    for (index, word) in words.iter().enumerate() {
        if index == 0 {
            out.push_str(&word.to_lowercase());
            continue;
        }
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            out.push_str(&chars.as_str().to_lowercase());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const CANONICAL: &str = "Example Test String";

    #[test]
    fn accepts_every_listed_spelling() {
        for spelling in [
            "Example Test String",
            "example test string",
            "exampleteststring",
            "ExampleTestString",
            "example-test-string",
            "example_test_string",
            "exampleTestString",
            "EXAMPLE TEST STRING",
            "EXAMPLETESTSTRING",
        ] {
            assert!(is_variant(spelling, CANONICAL), "{spelling} should match");
        }
    }

    #[test]
    fn rejects_partial_and_misspelled_names() {
        assert!(!is_variant("example test", CANONICAL));
        assert!(!is_variant("exmaple test string", CANONICAL));
        assert!(!is_variant("example.test.string", CANONICAL));
        assert!(!is_variant("", CANONICAL));
    }

    #[test]
    fn camel_case_lowers_the_tail_of_each_word() {
        assert_eq!(to_camel_case("URL Image NAME"), "urlImageName");
        assert_eq!(to_camel_case("  padded   words "), "paddedWords");
        assert_eq!(to_camel_case(""), "");
    }

    #[test]
    fn names_without_spaces_match_case_insensitively() {
        assert!(is_variant("cornerradius", "cornerRadius"));
        assert!(is_variant("CornerRadius", "cornerRadius"));
        assert!(!is_variant("corner_radius", "cornerRadius"));
    }
}
