//! Leading quantity matcher
//!
//! Recognises the numeric head of an ingredient line: integers ("2"),
//! decimals ("1.5"), fractions ("1/2"), mixed numbers ("1 1/2"), ranges
//! ("1-2") and Unicode vulgar fractions ("½", "⅓").

/// Whether `c` can be part of a leading quantity run.
pub fn is_quantity_char(c: char) -> bool {
    c.is_ascii_digit()
        || c.is_whitespace()
        || matches!(c, '/' | '.' | '-')
        // ¼ ½ ¾
        || ('\u{00BC}'..='\u{00BE}').contains(&c)
        // ⅐ through ⅞
        || ('\u{2150}'..='\u{215E}').contains(&c)
}

/// Split `s` into its longest leading quantity run and the remainder.
///
/// The run includes surrounding whitespace, so the remainder starts at the
/// first character that cannot belong to a quantity. When `s` has no leading
/// quantity the run is empty.
pub fn split_leading_quantity(s: &str) -> (&str, &str) {
    let end = s
        .char_indices()
        .find(|(_, c)| !is_quantity_char(*c))
        .map(|(i, _)| i)
        .unwrap_or(s.len());
    s.split_at(end)
}

/// Remove the leading quantity run from `s`.
pub fn strip_leading_quantity(s: &str) -> &str {
    split_leading_quantity(s).1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer() {
        assert_eq!(strip_leading_quantity("2 eggs"), "eggs");
        assert_eq!(split_leading_quantity("12 eggs"), ("12 ", "eggs"));
    }

    #[test]
    fn test_decimal() {
        assert_eq!(strip_leading_quantity("1.5 cups milk"), "cups milk");
    }

    #[test]
    fn test_fraction() {
        assert_eq!(strip_leading_quantity("1/2 cup sugar"), "cup sugar");
    }

    #[test]
    fn test_mixed_number() {
        assert_eq!(strip_leading_quantity("1 1/2 cups flour"), "cups flour");
    }

    #[test]
    fn test_range() {
        assert_eq!(strip_leading_quantity("1-2 tbsp honey"), "tbsp honey");
        assert_eq!(strip_leading_quantity("2 - 3 carrots"), "carrots");
    }

    #[test]
    fn test_unicode_fractions() {
        assert_eq!(strip_leading_quantity("½ cup cream"), "cup cream");
        assert_eq!(strip_leading_quantity("¾ tsp salt"), "tsp salt");
        assert_eq!(strip_leading_quantity("1 ⅓ cups oats"), "cups oats");
        assert_eq!(strip_leading_quantity("⅞ cup rice"), "cup rice");
    }

    #[test]
    fn test_leading_whitespace_is_consumed() {
        assert_eq!(strip_leading_quantity("   3 apples"), "apples");
    }

    #[test]
    fn test_no_quantity_is_noop() {
        assert_eq!(strip_leading_quantity("Salt to taste"), "Salt to taste");
        assert_eq!(split_leading_quantity("flour"), ("", "flour"));
    }

    #[test]
    fn test_only_quantity() {
        assert_eq!(strip_leading_quantity("1 1/2"), "");
        assert_eq!(strip_leading_quantity(""), "");
        assert_eq!(strip_leading_quantity("   "), "");
    }

    #[test]
    fn test_stops_at_first_word() {
        // Digits after the first word are part of the noun phrase.
        assert_eq!(strip_leading_quantity("2 eggs, 1 beaten"), "eggs, 1 beaten");
    }

    #[test]
    fn test_other_fraction_like_glyphs_are_not_quantities() {
        // U+2189 (↉) sits outside the vulgar fraction block we accept.
        assert_eq!(strip_leading_quantity("↉ cup"), "↉ cup");
    }
}
