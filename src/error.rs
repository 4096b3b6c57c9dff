//! Error types for shopping-list generation
//!
//! The parser and the formatter are total functions and never fail. The only
//! errors in the core are precondition violations the caller can act on:
//! generating a list with nothing selected, or feeding in a catalog that
//! breaks the recipe invariants.

use thiserror::Error;

/// Result type for shopping-list operations
pub type ShoppingListResult<T> = Result<T, ShoppingListError>;

/// Errors surfaced to the caller of the shopping-list core
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShoppingListError {
    /// A list was requested with an empty recipe selection
    #[error("no recipes selected: at least one recipe is required to build a shopping list")]
    NoRecipesSelected,

    /// A recipe fails basic validation (blank id or name)
    #[error("invalid recipe '{id}': {reason}")]
    InvalidRecipe { id: String, reason: String },

    /// Two recipes in the same catalog share an identifier
    #[error("duplicate recipe id '{id}'")]
    DuplicateRecipeId { id: String },
}

impl ShoppingListError {
    /// Stable identifier for programmatic handling
    pub fn code(&self) -> &'static str {
        match self {
            ShoppingListError::NoRecipesSelected => "NO_RECIPES_SELECTED",
            ShoppingListError::InvalidRecipe { .. } => "INVALID_RECIPE",
            ShoppingListError::DuplicateRecipeId { .. } => "DUPLICATE_RECIPE_ID",
        }
    }

    /// Error category for logs
    pub fn category(&self) -> &'static str {
        match self {
            ShoppingListError::NoRecipesSelected
            | ShoppingListError::InvalidRecipe { .. }
            | ShoppingListError::DuplicateRecipeId { .. } => "validation_error",
        }
    }

    /// What the user should do before retrying
    pub fn suggestion(&self) -> &'static str {
        match self {
            ShoppingListError::NoRecipesSelected => {
                "select at least one recipe (--select ID[,ID...] or --all) and try again"
            }
            ShoppingListError::InvalidRecipe { .. } => {
                "give every recipe a non-empty id and name"
            }
            ShoppingListError::DuplicateRecipeId { .. } => {
                "make recipe ids unique within the catalog"
            }
        }
    }
}
