//! Rendering aggregate entries as a bullet list, and the two export
//! transforms that work on the rendered (possibly hand-edited) text.
//!
//! A rendered line looks like `• 300g farine (Crêpes, Gaufres)`. The
//! transforms treat every line on its own and never fail: a line that no
//! longer has the generated shape is passed through as well as possible.
//!
//! Quantity round trip: [`strip_quantities`] removes one leading
//! `number[unit] ` token, which is exactly what [`format_entry`] writes for a
//! positive quantity. An entry without quantity whose name itself starts
//! with such a token is written behind an invisible [`NAME_GUARD`] instead,
//! and a guarded line is never stripped.

use crate::model::AggregateEntry;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

pub const BULLET: char = '•';
pub const MESSAGING_BULLET: char = '-';
pub const DEFAULT_MESSAGING_HEADER: &str = "Liste de courses :";

/// Written by [`format_entry`] before a name that has no quantity but reads
/// like one (`2 pommes` from the line `0 2 pommes`), so that
/// [`strip_quantities`] keeps the name whole. U+2060 WORD JOINER: invisible,
/// and neither whitespace nor a digit.
pub const NAME_GUARD: char = '\u{2060}';

/// Quantity and unit prefix as rendered by [`format_entry`], or as typed
/// by hand (`1/2tasse`).
static LEADING_QUANTITY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d+(?:[.,/]\d+)?\p{L}*\s+").expect("leading quantity pattern is valid")
});

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListOptions {
    /// First line of the messaging export
    pub messaging_header: String,
}

impl Default for ListOptions {
    fn default() -> Self {
        Self {
            messaging_header: DEFAULT_MESSAGING_HEADER.to_string(),
        }
    }
}

/// Render a quantity with as few decimals as needed.
///
/// Sums are rounded to six decimals first so that `0.1 + 0.2` prints `0.3`.
/// A positive quantity too small to survive that rounding keeps its exact
/// value, it never prints as `0`.
pub fn format_quantity(quantity: f64) -> String {
    let rounded = (quantity * 1e6).round() / 1e6;
    if rounded == 0.0 && quantity > 0.0 {
        return format!("{quantity}");
    }
    format!("{rounded}")
}

/// Render one entry as a bullet line.
pub fn format_entry(entry: &AggregateEntry) -> String {
    let mut line = format!("{BULLET} ");
    if entry.quantity > 0.0 {
        line.push_str(&format_quantity(entry.quantity));
        line.push_str(&entry.unit);
        line.push(' ');
    } else if LEADING_QUANTITY.is_match(&entry.display_name) {
        line.push(NAME_GUARD);
    }
    line.push_str(&entry.display_name);
    if !entry.contributing_recipes.is_empty() {
        line.push_str(" (");
        line.push_str(&entry.contributing_recipes.join(", "));
        line.push(')');
    }
    line
}

/// Render all entries, one line each, in order.
pub fn format_entries(entries: &[AggregateEntry]) -> String {
    entries
        .iter()
        .map(format_entry)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Keep only the ingredient names: drop the bullet, the leading
/// quantity/unit and the trailing recipe credits. Blank lines are dropped.
pub fn strip_quantities(text: &str) -> String {
    text.lines()
        .filter_map(|line| {
            let name = strip_line(line);
            (!name.is_empty()).then_some(name)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn strip_line(line: &str) -> String {
    let body = line.trim();
    let body = body.strip_prefix(BULLET).unwrap_or(body).trim_start();
    let body = match credits_start(body) {
        Some(index) => &body[..index],
        None => body,
    };
    let body = body.trim();
    match body.strip_prefix(NAME_GUARD) {
        Some(name) => name.trim().to_string(),
        None => LEADING_QUANTITY.replace(body, "").trim().to_string(),
    }
}

/// Byte offset of the parenthesis opening the recipe credits.
///
/// The credits are the balanced group closing the line, so parentheses
/// inside the ingredient or recipe names survive. Without a closing
/// parenthesis at the end of the line, the first `(` is used.
fn credits_start(body: &str) -> Option<usize> {
    if body.ends_with(')') {
        let mut depth = 0usize;
        for (index, ch) in body.char_indices().rev() {
            match ch {
                ')' => depth += 1,
                '(' => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        return Some(index);
                    }
                }
                _ => {}
            }
        }
    }
    body.find('(')
}

/// Swap bullets for dashes and put `header` on the first line.
pub fn messaging_format(text: &str, header: &str) -> String {
    let body = text
        .lines()
        .map(|line| {
            let indent = line.len() - line.trim_start().len();
            let (lead, rest) = line.split_at(indent);
            match rest.strip_prefix(BULLET) {
                Some(rest) => format!("{lead}{MESSAGING_BULLET}{rest}"),
                None => line.to_string(),
            }
        })
        .collect::<Vec<_>>()
        .join("\n");

    if header.is_empty() {
        body
    } else {
        format!("{header}\n{body}")
    }
}
