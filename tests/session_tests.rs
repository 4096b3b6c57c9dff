//! Tests for the generate → edit → export cycle

use assert_matches::assert_matches;
use recipe_shopping_list::error::ShoppingListError;
use recipe_shopping_list::format::ListOptions;
use recipe_shopping_list::model::{ExportKind, Recipe, RecipeId};
use recipe_shopping_list::session::ShoppingListSession;
use std::collections::HashSet;

fn recipes() -> Vec<Recipe> {
    vec![
        Recipe::from_text("crepes", "Crêpes", "250g de farine\n4 oeufs\n\n50cl de lait\n"),
        Recipe::from_text("gaufres", "Gaufres", "200g de farine\n2 oeufs\nune pincée de sel"),
        Recipe::from_text("soupe", "Soupe", "3 poireaux"),
    ]
}

fn select(ids: &[&str]) -> HashSet<RecipeId> {
    ids.iter().map(|id| RecipeId::from(*id)).collect()
}

#[test]
fn test_begin_renders_aggregated_list() {
    let session = ShoppingListSession::begin(&recipes(), &select(&["crepes", "gaufres"])).unwrap();

    assert_eq!(
        session.text(),
        "• 450g farine (Crêpes, Gaufres)\n\
         • 6 oeufs (Crêpes, Gaufres)\n\
         • 50cl lait (Crêpes)\n\
         • une pincée de sel (Gaufres)"
    );
    assert!(!session.is_edited());
    assert_eq!(session.entries().map(|entries| entries.len()), Some(4));
}

#[test]
fn test_begin_without_selection_fails() {
    let result = ShoppingListSession::begin(&recipes(), &HashSet::new());
    assert_matches!(result, Err(ShoppingListError::NoRecipesSelected));
}

#[test]
fn test_exports_of_generated_text() {
    let session = ShoppingListSession::begin(&recipes(), &select(&["soupe"])).unwrap();

    assert_eq!(session.export(ExportKind::Plain), "• 3 poireaux (Soupe)");
    assert_eq!(session.export(ExportKind::StripQuantities), "poireaux");
    assert_eq!(
        session.export(ExportKind::Messaging),
        "Liste de courses :\n- 3 poireaux (Soupe)"
    );
}

#[test]
fn test_edit_replaces_text_and_drops_entries() {
    let mut session = ShoppingListSession::begin(&recipes(), &select(&["soupe"])).unwrap();
    session.edit("• 3 poireaux (Soupe)\n• 1 baguette");

    assert!(session.is_edited());
    assert!(session.entries().is_none());
    assert_eq!(session.text(), "• 3 poireaux (Soupe)\n• 1 baguette");
    assert_eq!(
        session.export(ExportKind::StripQuantities),
        "poireaux\nbaguette"
    );
    assert_eq!(
        session.export(ExportKind::Messaging),
        "Liste de courses :\n- 3 poireaux (Soupe)\n- 1 baguette"
    );
}

#[test]
fn test_edit_is_verbatim() {
    let mut session = ShoppingListSession::begin(&recipes(), &select(&["soupe"])).unwrap();
    session.edit("  rien du tout  \n");
    assert_eq!(session.export(ExportKind::Plain), "  rien du tout  \n");
}

#[test]
fn test_custom_messaging_header() {
    let options = ListOptions {
        messaging_header: "Pour samedi".to_string(),
    };
    let session =
        ShoppingListSession::begin_with_options(&recipes(), &select(&["soupe"]), options).unwrap();
    assert_eq!(
        session.export(ExportKind::Messaging),
        "Pour samedi\n- 3 poireaux (Soupe)"
    );
}

#[test]
fn test_session_ignores_later_recipe_changes() {
    let mut book = recipes();
    let session = ShoppingListSession::begin(&book, &select(&["soupe"])).unwrap();

    book[2].ingredient_lines.push("1 oignon".to_string());
    assert_eq!(session.text(), "• 3 poireaux (Soupe)");
}

#[test]
fn test_cancel_and_discard() {
    let session = ShoppingListSession::begin(&recipes(), &select(&["soupe"])).unwrap();
    session.cancel();

    let mut session = ShoppingListSession::begin(&recipes(), &select(&["soupe"])).unwrap();
    session.edit("x");
    session.discard();
}
