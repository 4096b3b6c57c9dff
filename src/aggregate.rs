//! Merging parsed ingredients across the selected recipes
//!
//! Entries are keyed by [`AggregateKey`] and kept in first-seen order. A
//! later line with the same key credits its recipe and adds its quantity,
//! but only when its unit is textually identical to the unit of the first
//! line seen for that key. There is no unit conversion: `200g` and
//! `1 tasse` of the same ingredient keep the first total and drop the second.

use crate::error::{ShoppingListError, ShoppingListResult};
use crate::model::{AggregateEntry, AggregateKey, ParsedIngredient, Recipe, RecipeId};
use crate::parse::parse_ingredient;
use indexmap::IndexMap;
use std::collections::HashSet;

/// Insertion-ordered accumulator of aggregate entries.
#[derive(Debug, Default)]
pub struct Aggregator {
    entries: IndexMap<AggregateKey, AggregateEntry>,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one parsed line contributed by `recipe_name` into the totals.
    pub fn add(&mut self, recipe_name: &str, parsed: ParsedIngredient) {
        let key = parsed.key();
        match self.entries.get_mut(&key) {
            Some(entry) => {
                if !entry.contributing_recipes.iter().any(|name| name == recipe_name) {
                    entry.contributing_recipes.push(recipe_name.to_string());
                }
                if parsed.unit == entry.unit {
                    entry.quantity += parsed.quantity;
                } else {
                    tracing::debug!(
                        ingredient = %entry.display_name,
                        unit = %entry.unit,
                        other_unit = %parsed.unit,
                        quantity = parsed.quantity,
                        recipe = %recipe_name,
                        "unit mismatch, quantity not summed"
                    );
                }
            }
            None => {
                self.entries.insert(
                    key,
                    AggregateEntry {
                        display_name: parsed.name,
                        quantity: parsed.quantity,
                        unit: parsed.unit,
                        contributing_recipes: vec![recipe_name.to_string()],
                    },
                );
            }
        }
    }

    /// Parse and fold every ingredient line of `recipe`, in order.
    pub fn add_recipe(&mut self, recipe: &Recipe) {
        for line in &recipe.ingredient_lines {
            self.add(&recipe.name, parse_ingredient(line));
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_entries(self) -> Vec<AggregateEntry> {
        self.entries.into_values().collect()
    }
}

/// Aggregate the ingredients of every selected recipe.
///
/// Recipes are visited in the order given, not in selection order. Ids in
/// `selected` that match no recipe are ignored.
pub fn aggregate(
    recipes: &[Recipe],
    selected: &HashSet<RecipeId>,
) -> ShoppingListResult<Vec<AggregateEntry>> {
    if selected.is_empty() {
        return Err(ShoppingListError::NoRecipesSelected);
    }

    let mut aggregator = Aggregator::new();
    let mut used = 0usize;
    for recipe in recipes.iter().filter(|recipe| selected.contains(&recipe.id)) {
        aggregator.add_recipe(recipe);
        used += 1;
    }

    if used < selected.len() {
        let known: HashSet<&RecipeId> = recipes.iter().map(|recipe| &recipe.id).collect();
        let mut unknown: Vec<&str> = selected
            .iter()
            .filter(|id| !known.contains(id))
            .map(RecipeId::as_str)
            .collect();
        unknown.sort_unstable();
        if !unknown.is_empty() {
            tracing::warn!(ids = ?unknown, "selected recipe ids not found");
        }
    }

    tracing::info!(
        recipes = used,
        entries = aggregator.len(),
        "ingredients aggregated"
    );

    Ok(aggregator.into_entries())
}
