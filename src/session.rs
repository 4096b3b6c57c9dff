//! One generate → edit → export cycle of a shopping list.
//!
//! `begin` reads the recipes and the selection once; later changes to them
//! are not observed by an open session. After `edit`, the
//! free text is the only source of truth and the structured entries are
//! gone; nothing parses the edited text back.

use crate::aggregate::aggregate;
use crate::error::ShoppingListResult;
use crate::format::{ListOptions, format_entries, messaging_format, strip_quantities};
use crate::model::{AggregateEntry, ExportKind, Recipe, RecipeId};
use std::collections::HashSet;

#[derive(Debug, Clone)]
pub struct ShoppingListSession {
    entries: Option<Vec<AggregateEntry>>,
    editable_text: String,
    options: ListOptions,
}

impl ShoppingListSession {
    /// Aggregate and render the selected recipes with default options.
    pub fn begin(recipes: &[Recipe], selected: &HashSet<RecipeId>) -> ShoppingListResult<Self> {
        Self::begin_with_options(recipes, selected, ListOptions::default())
    }

    #[tracing::instrument(skip_all, fields(selected = selected.len()))]
    pub fn begin_with_options(
        recipes: &[Recipe],
        selected: &HashSet<RecipeId>,
        options: ListOptions,
    ) -> ShoppingListResult<Self> {
        let entries = aggregate(recipes, selected)?;
        let editable_text = format_entries(&entries);
        Ok(Self {
            entries: Some(entries),
            editable_text,
            options,
        })
    }

    /// Generated entries, until the text is edited.
    pub fn entries(&self) -> Option<&[AggregateEntry]> {
        self.entries.as_deref()
    }

    pub fn text(&self) -> &str {
        &self.editable_text
    }

    pub fn is_edited(&self) -> bool {
        self.entries.is_none()
    }

    /// Replace the list text verbatim.
    pub fn edit(&mut self, new_text: impl Into<String>) {
        self.editable_text = new_text.into();
        if self.entries.take().is_some() {
            tracing::debug!("shopping list edited by hand, structured entries dropped");
        }
    }

    /// Apply `kind` to the current text.
    pub fn export(&self, kind: ExportKind) -> String {
        tracing::debug!(kind = %kind, "exporting shopping list");
        match kind {
            ExportKind::Plain => self.editable_text.clone(),
            ExportKind::StripQuantities => strip_quantities(&self.editable_text),
            ExportKind::Messaging => {
                messaging_format(&self.editable_text, &self.options.messaging_header)
            }
        }
    }

    /// Abandon the list without exporting.
    pub fn cancel(self) {
        self.discard();
    }

    /// End the session and release the list.
    pub fn discard(self) {
        tracing::debug!(edited = self.is_edited(), "shopping list session discarded");
    }
}
