//! Consolidated shopping lists from free-form recipe ingredient lines.
//!
//! Lines such as `200g de farine` or `1/2 tasse de sucre` are parsed into
//! quantity, unit and name ([`parse`]), merged across the selected recipes
//! ([`aggregate`]), rendered as an editable bullet list ([`format`]) and
//! handed to the caller through a [`ShoppingListSession`].

pub mod aggregate;
pub mod catalog;
pub mod config;
pub mod error;
pub mod format;
pub mod logging;
pub mod model;
pub mod parse;
pub mod session;

pub use aggregate::{Aggregator, aggregate};
pub use catalog::Catalog;
pub use config::{AppConfig, CliArgs};
pub use error::{ShoppingListError, ShoppingListResult};
pub use format::{ListOptions, format_entries, messaging_format, strip_quantities};
pub use logging::{LoggingConfig, init_logging};
pub use model::{AggregateEntry, AggregateKey, ExportKind, ParsedIngredient, Recipe, RecipeId};
pub use parse::parse_ingredient;
pub use session::ShoppingListSession;

use anyhow::{Context, Result};

/// Load the catalog, build the list for the configured selection, apply
/// the optional hand edit and return the requested export.
pub fn run(config: &AppConfig) -> Result<String> {
    let catalog = Catalog::load(&config.recipes_file)?;
    catalog.validate()?;

    let selected = if config.select_all {
        catalog.all_ids()
    } else {
        Catalog::resolve_selection(&config.selection)
    };

    tracing::info!(
        recipes_file = %config.recipes_file.display(),
        catalog = catalog.recipes().len(),
        selected = selected.len(),
        export = %config.export,
        "generating shopping list",
    );

    let mut session =
        ShoppingListSession::begin_with_options(catalog.recipes(), &selected, config.list_options())
            .inspect_err(|err| {
                tracing::warn!(code = err.code(), category = err.category(), "{err}");
            })?;

    if let Some(path) = config.edit_file.as_ref() {
        let edited = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read edited list {:?}", path))?;
        session.edit(edited.trim_end());
    }

    let output = session.export(config.export);
    session.discard();
    Ok(output)
}
