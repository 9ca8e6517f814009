//! Ingredient normalization tool

use serde::Serialize;

use crate::ingredients::normalize_ingredient;

/// Response for normalize_ingredients
#[derive(Debug, Serialize)]
pub struct NormalizeResponse {
    /// Shopping-item names, in input order
    pub items: Vec<String>,
    /// Input lines that produced no item
    pub omitted: Vec<String>,
}

/// Normalize a batch of ingredient lines, reporting which were dropped
pub fn normalize_lines(lines: &[String]) -> NormalizeResponse {
    let mut items = Vec::with_capacity(lines.len());
    let mut omitted = Vec::new();

    for line in lines {
        match normalize_ingredient(line) {
            Some(item) => items.push(item),
            None => omitted.push(line.clone()),
        }
    }

    NormalizeResponse { items, omitted }
}
