//! Ingredient normalization module
//!
//! Reduces recipe ingredient lines to shopping-list labels.

pub mod lexicon;
pub mod normalizer;
pub mod quantity;
pub mod unit;

pub use lexicon::{is_excluded, EXCLUDED_ITEMS, UNIT_LEXICON};
pub use normalizer::{normalize_ingredient, normalize_ingredients};
pub use quantity::{split_leading_quantity, strip_leading_quantity};
pub use unit::{split_leading_unit, strip_leading_unit};
