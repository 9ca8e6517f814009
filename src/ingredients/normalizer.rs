//! Ingredient line normalizer
//!
//! Turns a free-form recipe ingredient line ("1 1/2 cups chopped yellow
//! onions") into a shopping-list label ("chopped yellow onions"), or decides
//! that the line should not be shopped for at all.

use super::lexicon::is_excluded;
use super::quantity::strip_leading_quantity;
use super::unit::strip_leading_unit;

/// Normalize one ingredient line into a shopping-list label.
///
/// Returns `None` when the line is empty, names an excluded staple (water,
/// ice), or has nothing left after its quantity and unit are removed.
/// Otherwise returns the remaining text with its original casing. Only the
/// leading quantity and a single leading unit are removed; parenthetical and
/// trailing preparation notes are kept verbatim.
///
/// Examples:
/// - "1/2 cup chopped onions" -> Some("chopped onions")
/// - "3 cloves garlic, minced" -> Some("garlic, minced")
/// - "Salt to taste" -> Some("Salt to taste")
/// - "1 cup water" -> None
pub fn normalize_ingredient(raw: &str) -> Option<String> {
    if is_excluded(raw) {
        tracing::debug!(raw, "ingredient omitted: excluded staple");
        return None;
    }

    let without_quantity = strip_leading_quantity(raw).trim();
    let cleaned = strip_leading_unit(without_quantity).trim();

    if cleaned.is_empty() {
        tracing::debug!(raw, "ingredient omitted: no item left after quantity and unit");
        return None;
    }

    if is_excluded(cleaned) {
        tracing::debug!(raw, "ingredient omitted: excluded staple");
        return None;
    }

    Some(cleaned.to_string())
}

/// Normalize a recipe's ingredient lines, dropping omitted ones.
///
/// Surviving labels keep the relative order of their source lines.
pub fn normalize_ingredients<I, S>(lines: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    lines
        .into_iter()
        .filter_map(|line| normalize_ingredient(line.as_ref()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_and_blank() {
        assert_eq!(normalize_ingredient(""), None);
        assert_eq!(normalize_ingredient("   "), None);
        assert_eq!(normalize_ingredient("\t\n"), None);
    }

    #[test]
    fn test_excluded_staples() {
        assert_eq!(normalize_ingredient("Water"), None);
        assert_eq!(normalize_ingredient("1 cup water"), None);
        assert_eq!(normalize_ingredient("Ice Cubes"), None);
        assert_eq!(normalize_ingredient("2 cups hot water"), None);
        assert_eq!(normalize_ingredient("1 handful crushed ice"), None);
    }

    #[test]
    fn test_exclusion_is_case_insensitive() {
        assert_eq!(normalize_ingredient("WATER"), None);
        assert_eq!(normalize_ingredient("Water"), None);
        assert_eq!(normalize_ingredient("water"), None);
        assert_eq!(normalize_ingredient("1 L WATER"), None);
    }

    #[test]
    fn test_staple_with_descriptor_is_kept() {
        assert_eq!(
            normalize_ingredient("1 cup sparkling water"),
            Some("sparkling water".to_string())
        );
        assert_eq!(
            normalize_ingredient("1 can water chestnuts"),
            Some("water chestnuts".to_string())
        );
    }

    #[test]
    fn test_quantity_and_unit_stripped() {
        assert_eq!(
            normalize_ingredient("1/2 cup chopped onions"),
            Some("chopped onions".to_string())
        );
        assert_eq!(normalize_ingredient("1 1/2 cups flour"), Some("flour".to_string()));
        assert_eq!(normalize_ingredient("2 tbsp olive oil"), Some("olive oil".to_string()));
        assert_eq!(
            normalize_ingredient("3 cloves garlic, minced"),
            Some("garlic, minced".to_string())
        );
        assert_eq!(
            normalize_ingredient("1 1/2 cups chopped yellow onions"),
            Some("chopped yellow onions".to_string())
        );
    }

    #[test]
    fn test_seasonings_are_kept() {
        assert_eq!(normalize_ingredient("Salt to taste"), Some("Salt to taste".to_string()));
        assert_eq!(normalize_ingredient("1 pinch salt"), Some("salt".to_string()));
        assert_eq!(
            normalize_ingredient("Freshly ground black pepper"),
            Some("Freshly ground black pepper".to_string())
        );
        assert_eq!(normalize_ingredient("1 sprig rosemary"), Some("rosemary".to_string()));
    }

    #[test]
    fn test_casing_of_remainder_preserved() {
        assert_eq!(
            normalize_ingredient("2 TBSP Dijon Mustard"),
            Some("Dijon Mustard".to_string())
        );
    }

    #[test]
    fn test_quantity_without_unit() {
        assert_eq!(normalize_ingredient("2 large eggs"), Some("large eggs".to_string()));
        assert_eq!(normalize_ingredient("1 lemon"), Some("lemon".to_string()));
        assert_eq!(normalize_ingredient("½ avocado"), Some("avocado".to_string()));
    }

    #[test]
    fn test_unit_without_quantity() {
        assert_eq!(normalize_ingredient("Pinch of salt"), Some("salt".to_string()));
        assert_eq!(normalize_ingredient("Handful of basil"), Some("basil".to_string()));
    }

    #[test]
    fn test_notes_are_retained() {
        assert_eq!(
            normalize_ingredient("2 cups flour (all-purpose)"),
            Some("flour (all-purpose)".to_string())
        );
        assert_eq!(
            normalize_ingredient("1 lb chicken thighs, boneless and skinless"),
            Some("chicken thighs, boneless and skinless".to_string())
        );
    }

    #[test]
    fn test_quantity_and_unit_only_is_omitted() {
        assert_eq!(normalize_ingredient("2 cups"), None);
        assert_eq!(normalize_ingredient("500 g"), None);
        assert_eq!(normalize_ingredient("1 cup of"), None);
        assert_eq!(normalize_ingredient("1 1/2"), None);
    }

    #[test]
    fn test_abbreviated_units() {
        assert_eq!(normalize_ingredient("2 tbsp. olive oil"), Some("olive oil".to_string()));
        assert_eq!(
            normalize_ingredient("1/2 lb. ground beef"),
            Some("ground beef".to_string())
        );
        assert_eq!(normalize_ingredient("8 oz."), None);
    }

    #[test]
    fn test_unit_followed_by_punctuation_is_kept() {
        assert_eq!(normalize_ingredient("1 cup, chopped"), Some("cup, chopped".to_string()));
    }

    #[test]
    fn test_only_one_unit_is_stripped() {
        assert_eq!(
            normalize_ingredient("1 can 14 oz diced tomatoes"),
            Some("14 oz diced tomatoes".to_string())
        );
    }

    #[test]
    fn test_batch_preserves_order_and_drops_omissions() {
        let lines = vec![
            "2 cups flour",
            "1 cup water",
            "3 eggs",
            "",
            "Salt to taste",
            "Ice",
            "1 tsp vanilla extract",
        ];
        assert_eq!(
            normalize_ingredients(&lines),
            vec!["flour", "eggs", "Salt to taste", "vanilla extract"]
        );
    }

    #[test]
    fn test_batch_of_nothing() {
        let lines: Vec<String> = Vec::new();
        assert!(normalize_ingredients(lines).is_empty());
        assert!(normalize_ingredients(["water", "ice cubes"]).is_empty());
    }

    const QUANTITIES: &[&str] = &["", "1", "2", "1/2", "1 1/2", "1.5", "1-2", "½", "1 ½", "¾"];
    const UNITS: &[&str] = &[
        "", "cup", "cups", "Tablespoons", "tbsp", "tsp", "oz", "lb", "g", "kg", "ml", "l",
        "pinch", "cloves", "can", "package of", "bunches", "tbsp.", "lbs.", "oz.",
    ];
    const ITEMS: &[&str] = &[
        "flour",
        "chopped yellow onions",
        "Salt to taste",
        "garlic, minced",
        "olive oil (extra-virgin)",
        "Fresh Basil",
        "lemon zest",
    ];

    fn well_formed_lines() -> Vec<(String, &'static str)> {
        let mut lines = Vec::new();
        for quantity in QUANTITIES {
            for unit in UNITS {
                for item in ITEMS {
                    lines.push((format!("{} {} {}", quantity, unit, item), *item));
                }
            }
        }
        lines
    }

    #[test]
    fn test_well_formed_lines_reduce_to_item() {
        for (raw, item) in well_formed_lines() {
            assert_eq!(normalize_ingredient(&raw).as_deref(), Some(item), "raw: {:?}", raw);
        }
    }

    #[test]
    fn test_idempotent() {
        let mut inputs: Vec<String> = well_formed_lines().into_iter().map(|(raw, _)| raw).collect();
        inputs.extend(
            [
                "Salt to taste",
                "2 large eggs",
                "1 cup sparkling water",
                "Pinch of salt",
                "2 cups flour (all-purpose)",
                "  3 cloves garlic, minced  ",
                "2 tbsp. olive oil",
                "1/2 lb. ground beef",
                "1 cup, chopped",
                "1 can-do attitude",
            ]
            .iter()
            .map(|s| s.to_string()),
        );

        for raw in inputs {
            if let Some(once) = normalize_ingredient(&raw) {
                assert_eq!(
                    normalize_ingredient(&once).as_deref(),
                    Some(once.as_str()),
                    "raw: {:?}",
                    raw
                );
            }
        }
    }

    #[test]
    fn test_concurrent_calls_agree() {
        let handles: Vec<_> = (0..8)
            .map(|_| {
                std::thread::spawn(|| normalize_ingredients(["1/2 cup chopped onions", "water", "2 tbsp olive oil"]))
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), vec!["chopped onions", "olive oil"]);
        }
    }
}
