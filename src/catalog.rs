//! Recipe catalog files for the command line.
//!
//! A catalog is a JSON or YAML list of recipes, either at the top level or
//! under a `recipes` key. Ingredients may be given as a list of lines or as
//! one multi-line string.

use crate::config::load_structured_file;
use crate::error::{ShoppingListError, ShoppingListResult};
use crate::model::{Recipe, RecipeId};
use anyhow::Result;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    recipes: Vec<Recipe>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CatalogFile {
    List(Vec<Recipe>),
    Document { recipes: Vec<Recipe> },
}

impl Catalog {
    pub fn new(recipes: Vec<Recipe>) -> Self {
        Self { recipes }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let parsed: CatalogFile = load_structured_file(path, "recipe")?;

        let recipes = match parsed {
            CatalogFile::List(recipes) | CatalogFile::Document { recipes } => recipes,
        };
        tracing::debug!(path = %path.display(), recipes = recipes.len(), "recipe catalog loaded");
        Ok(Self { recipes })
    }

    /// Reject blank ids, blank names and duplicate ids.
    pub fn validate(&self) -> ShoppingListResult<()> {
        let mut seen = HashSet::new();
        for recipe in &self.recipes {
            if recipe.id.as_str().trim().is_empty() {
                return Err(ShoppingListError::InvalidRecipe {
                    id: recipe.id.to_string(),
                    reason: format!("recipe '{}' has an empty id", recipe.name),
                });
            }
            if recipe.name.trim().is_empty() {
                return Err(ShoppingListError::InvalidRecipe {
                    id: recipe.id.to_string(),
                    reason: "name cannot be empty".to_string(),
                });
            }
            if !seen.insert(&recipe.id) {
                return Err(ShoppingListError::DuplicateRecipeId {
                    id: recipe.id.to_string(),
                });
            }
        }
        Ok(())
    }

    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn all_ids(&self) -> HashSet<RecipeId> {
        self.recipes.iter().map(|recipe| recipe.id.clone()).collect()
    }

    /// Turn raw selection strings into ids. Blank entries are skipped.
    pub fn resolve_selection<S: AsRef<str>>(ids: &[S]) -> HashSet<RecipeId> {
        ids.iter()
            .map(|id| id.as_ref().trim())
            .filter(|id| !id.is_empty())
            .map(RecipeId::from)
            .collect()
    }
}
