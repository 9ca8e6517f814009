//! Unit lexicon and exclusion set
//!
//! Static tables consulted by the ingredient matchers. Both are immutable and
//! built at most once per process.

use std::sync::LazyLock;

/// Measurement units recognised at the head of an ingredient line.
///
/// Every entry additionally matches with a trailing "s" (see the unit matcher),
/// so the explicit plurals below only matter for irregular forms such as
/// "pinches" or "bunches".
const UNITS_RAW: &[&str] = &[
    // Volume
    "cup",
    "cups",
    "tbsp",
    "tbsps",
    "tablespoon",
    "tablespoons",
    "tsp",
    "tsps",
    "teaspoon",
    "teaspoons",
    "ml",
    "milliliter",
    "milliliters",
    "l",
    "liter",
    "liters",
    // Weight
    "oz",
    "ounce",
    "ounces",
    "lb",
    "lbs",
    "pound",
    "pounds",
    "g",
    "gram",
    "grams",
    "kg",
    "kilogram",
    "kilograms",
    // Culinary counts
    "pinch",
    "pinches",
    "dash",
    "dashes",
    "clove",
    "cloves",
    "handful",
    "handfuls",
    "slice",
    "slices",
    "piece",
    "pieces",
    "can",
    "cans",
    "bottle",
    "bottles",
    "jar",
    "jars",
    "package",
    "packages",
    "stick",
    "sticks",
    "bunch",
    "bunches",
    "sprig",
    "sprigs",
];

/// Units sorted longest first, so a token is never pre-empted by a shorter
/// token sharing its initial letters. Ties are broken alphabetically to keep
/// the order stable.
pub static UNIT_LEXICON: LazyLock<Vec<&'static str>> = LazyLock::new(|| {
    let mut units = UNITS_RAW.to_vec();
    units.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
    units.dedup();
    units
});

/// Household staples that are never bought. Water and ice only: salt,
/// pepper and other seasonings stay on the list.
pub const EXCLUDED_ITEMS: &[&str] = &[
    "water",
    "boiled water",
    "hot water",
    "cold water",
    "warm water",
    "tap water",
    "ice",
    "ice cubes",
    "crushed ice",
];

/// Whether the whole of `text` (trimmed, case-insensitive) is an excluded staple.
///
/// This is an exact match: "water" is excluded, "sparkling water" is not.
pub fn is_excluded(text: &str) -> bool {
    let lower = text.trim().to_lowercase();
    EXCLUDED_ITEMS.contains(&lower.as_str())
}
