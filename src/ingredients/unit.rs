//! Leading unit matcher
//!
//! Recognises one measurement unit at the head of a string, e.g. "cups",
//! "Tbsp", "cloves" or "package of".

use super::lexicon::UNIT_LEXICON;

/// A unit token ends at whitespace or at the end of the line.
fn ends_token(rest: &str) -> bool {
    rest.chars().next().map_or(true, char::is_whitespace)
}

/// ASCII case-insensitive `strip_prefix`.
fn strip_prefix_ignore_case<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    let head = s.get(..prefix.len())?;
    if head.eq_ignore_ascii_case(prefix) {
        Some(&s[prefix.len()..])
    } else {
        None
    }
}

/// Consume an optional plural "s" and abbreviation dot ("tbsp.", "lbs.").
fn strip_unit_suffix(after_unit: &str) -> Option<&str> {
    [strip_prefix_ignore_case(after_unit, "s"), Some(after_unit)]
        .into_iter()
        .flatten()
        .map(|rest| rest.strip_prefix('.').unwrap_or(rest))
        .find(|rest| ends_token(rest))
}

/// Consume an optional " of" connector ("cup of flour").
fn strip_of_connector(s: &str) -> &str {
    match strip_prefix_ignore_case(s.trim_start(), "of") {
        Some(rest) if ends_token(rest) => rest,
        _ => s,
    }
}

/// Split a leading unit (plus plural "s", "of" connector and trailing
/// whitespace) off `s`.
///
/// Units are tried longest first and at most one is consumed. Returns `None`
/// when `s` does not start with a known unit.
pub fn split_leading_unit(s: &str) -> Option<(&str, &str)> {
    UNIT_LEXICON.iter().find_map(|unit| {
        let after_unit = strip_prefix_ignore_case(s, unit)?;
        let after_suffix = strip_unit_suffix(after_unit)?;
        let rest = strip_of_connector(after_suffix).trim_start();
        Some((&s[..s.len() - rest.len()], rest))
    })
}

/// Remove one leading unit from `s`, if present.
pub fn strip_leading_unit(s: &str) -> &str {
    split_leading_unit(s).map_or(s, |(_, rest)| rest)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_singular_and_plural() {
        assert_eq!(strip_leading_unit("cup sugar"), "sugar");
        assert_eq!(strip_leading_unit("cups flour"), "flour");
        assert_eq!(strip_leading_unit("cloves garlic, minced"), "garlic, minced");
        assert_eq!(strip_leading_unit("pinches salt"), "salt");
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(strip_leading_unit("TBSP olive oil"), "olive oil");
        assert_eq!(strip_leading_unit("Tablespoons Butter"), "Butter");
    }

    #[test]
    fn test_longest_token_wins() {
        assert_eq!(
            split_leading_unit("tablespoons soy sauce"),
            Some(("tablespoons ", "soy sauce"))
        );
        assert_eq!(
            split_leading_unit("liters stock"),
            Some(("liters ", "stock"))
        );
    }

    #[test]
    fn test_of_connector() {
        assert_eq!(strip_leading_unit("cup of flour"), "flour");
        assert_eq!(strip_leading_unit("Package Of noodles"), "noodles");
        assert_eq!(strip_leading_unit("pinch of salt"), "salt");
    }

    #[test]
    fn test_of_must_be_a_word() {
        assert_eq!(strip_leading_unit("cup offal"), "offal");
    }

    #[test]
    fn test_requires_word_boundary() {
        // "l", "g" and "can" must not eat the start of a noun.
        assert_eq!(strip_leading_unit("lemon"), "lemon");
        assert_eq!(strip_leading_unit("garlic"), "garlic");
        assert_eq!(strip_leading_unit("canola oil"), "canola oil");
        assert_eq!(strip_leading_unit("sticky rice"), "sticky rice");
        assert_eq!(strip_leading_unit("cupcake liners"), "cupcake liners");
    }

    #[test]
    fn test_abbreviation_dot() {
        assert_eq!(strip_leading_unit("tbsp. olive oil"), "olive oil");
        assert_eq!(strip_leading_unit("lbs. ground beef"), "ground beef");
        assert_eq!(strip_leading_unit("oz."), "");
        assert_eq!(strip_leading_unit("g.x"), "g.x");
    }

    #[test]
    fn test_punctuation_after_unit_is_not_a_unit() {
        assert_eq!(strip_leading_unit("cup, chopped"), "cup, chopped");
        assert_eq!(strip_leading_unit("can-do attitude"), "can-do attitude");
        assert_eq!(strip_leading_unit("cup of, sifted"), "of, sifted");
    }

    #[test]
    fn test_unit_at_end_of_string() {
        assert_eq!(strip_leading_unit("cups"), "");
        assert_eq!(strip_leading_unit("g"), "");
        assert_eq!(strip_leading_unit("cup of"), "");
    }

    #[test]
    fn test_only_one_unit_stripped() {
        assert_eq!(strip_leading_unit("can 14 oz diced tomatoes"), "14 oz diced tomatoes");
        assert_eq!(strip_leading_unit("cup cup flour"), "cup flour");
    }

    #[test]
    fn test_no_unit() {
        assert_eq!(split_leading_unit("large eggs"), None);
        assert_eq!(strip_leading_unit("Salt to taste"), "Salt to taste");
        assert_eq!(strip_leading_unit(""), "");
    }

    #[test]
    fn test_non_ascii_input_does_not_panic() {
        assert_eq!(strip_leading_unit("é cup"), "é cup");
        assert_eq!(strip_leading_unit("gé"), "gé");
        assert_eq!(strip_leading_unit("½"), "½");
    }
}
