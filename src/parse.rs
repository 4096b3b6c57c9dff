//! Ingredient line parsing
//!
//! Turns a free-form line such as `200g de farine` or `1/2 tasse de sucre`
//! into a quantity, a unit and a name. The grammar is a short list of rules
//! tried in a fixed order; the first rule that matches wins and anything no
//! rule recognises becomes a name-only ingredient.
//!
//! | rule                | example              | quantity | unit    | name         |
//! |---------------------|----------------------|----------|---------|--------------|
//! | fraction (+ unit)   | `1/2 tasse de sucre` | 0.5      | `tasse` | `sucre`      |
//! | decimal + unit      | `200g de farine`     | 200      | `g`     | `farine`     |
//! | decimal, no unit    | `2 courgettes`       | 2        |         | `courgettes` |
//! | fallback            | `un peu de sel`      | 0        |         | `un peu de sel` |
//!
//! Decimal commas are accepted (`1,5 kg de pommes`). A unit is the run of
//! letters right after the number, and only counts as a unit when a name
//! follows it. The connective `de` / `d'` between unit and name is dropped.

use crate::model::ParsedIngredient;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// `<int>/<int>`, optional unit, optional filler, name
static FRACTION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(\d+)\s*/\s*(\d+)\s*(\p{L}+)?\s+(?:de\s+|d['’]\s*)?(.+)$")
        .expect("fraction pattern is valid")
});

/// number, unit, optional filler, name
static DECIMAL_WITH_UNIT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(\d+(?:[.,]\d+)?)\s*(\p{L}+)\s+(?:de\s+|d['’]\s*)?(.+)$")
        .expect("decimal-with-unit pattern is valid")
});

/// number, whitespace, name
static DECIMAL_BARE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d+(?:[.,]\d+)?)\s+(.+)$").expect("bare decimal pattern is valid")
});

/// Which grammar rule produced a [`ParsedIngredient`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseRule {
    Fraction,
    DecimalWithUnit,
    DecimalBare,
    Fallback,
}

impl ParseRule {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParseRule::Fraction => "fraction",
            ParseRule::DecimalWithUnit => "decimal_with_unit",
            ParseRule::DecimalBare => "decimal_bare",
            ParseRule::Fallback => "fallback",
        }
    }
}

/// Parse one ingredient line. Never fails.
pub fn parse_ingredient(line: &str) -> ParsedIngredient {
    parse_ingredient_with_rule(line).0
}

/// Same as [`parse_ingredient`], also reporting which rule matched.
pub fn parse_ingredient_with_rule(line: &str) -> (ParsedIngredient, ParseRule) {
    let trimmed = line.trim();

    let parsed = match_fraction(trimmed, line)
        .map(|parsed| (parsed, ParseRule::Fraction))
        .or_else(|| {
            match_decimal_with_unit(trimmed, line)
                .map(|parsed| (parsed, ParseRule::DecimalWithUnit))
        })
        .or_else(|| {
            match_decimal_bare(trimmed, line).map(|parsed| (parsed, ParseRule::DecimalBare))
        });

    match parsed {
        Some((parsed, rule)) => {
            tracing::trace!(line = %line, rule = rule.as_str(), "ingredient line parsed");
            (parsed, rule)
        }
        None => {
            tracing::debug!(line = %line, "no quantity recognised, keeping line as name");
            (
                ParsedIngredient {
                    quantity: 0.0,
                    unit: String::new(),
                    name: trimmed.to_string(),
                    original_text: line.to_string(),
                },
                ParseRule::Fallback,
            )
        }
    }
}

/// Parse a number that may use a decimal comma.
pub fn parse_quantity(text: &str) -> Option<f64> {
    text.trim().replace(',', ".").parse::<f64>().ok()
}

fn match_fraction(trimmed: &str, original: &str) -> Option<ParsedIngredient> {
    let caps = FRACTION.captures(trimmed)?;
    let numerator = caps[1].parse::<u64>().ok()?;
    let denominator = caps[2].parse::<u64>().ok()?;
    if denominator == 0 {
        return None;
    }
    Some(build(
        numerator as f64 / denominator as f64,
        caps.get(3).map(|m| m.as_str()),
        &caps,
        4,
        original,
    ))
}

fn match_decimal_with_unit(trimmed: &str, original: &str) -> Option<ParsedIngredient> {
    let caps = DECIMAL_WITH_UNIT.captures(trimmed)?;
    let quantity = parse_quantity(&caps[1])?;
    Some(build(quantity, caps.get(2).map(|m| m.as_str()), &caps, 3, original))
}

fn match_decimal_bare(trimmed: &str, original: &str) -> Option<ParsedIngredient> {
    let caps = DECIMAL_BARE.captures(trimmed)?;
    let quantity = parse_quantity(&caps[1])?;
    Some(build(quantity, None, &caps, 2, original))
}

fn build(
    quantity: f64,
    unit: Option<&str>,
    caps: &Captures<'_>,
    name_group: usize,
    original: &str,
) -> ParsedIngredient {
    ParsedIngredient {
        quantity,
        unit: unit.unwrap_or_default().to_string(),
        name: caps[name_group].trim().to_string(),
        original_text: original.to_string(),
    }
}
