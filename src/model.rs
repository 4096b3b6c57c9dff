use clap::ValueEnum;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct RecipeId(pub String);

impl RecipeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RecipeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for RecipeId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for RecipeId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// A recipe as supplied by the storage layer. The core only reads it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: RecipeId,
    pub name: String,
    #[serde(rename = "ingredients", deserialize_with = "ingredient_lines::deserialize")]
    pub ingredient_lines: Vec<String>,
}

impl Recipe {
    pub fn new<I, S>(id: impl Into<RecipeId>, name: impl Into<String>, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id: id.into(),
            name: name.into(),
            ingredient_lines: lines.into_iter().map(Into::into).collect(),
        }
    }

    /// Build a recipe from the one-ingredient-per-line text of the recipe
    /// editor. Blank lines are dropped; the others are kept untouched.
    pub fn from_text(id: impl Into<RecipeId>, name: impl Into<String>, text: &str) -> Self {
        Self::new(id, name, split_ingredient_text(text))
    }

    /// Inverse of [`Recipe::from_text`], for re-editing.
    pub fn ingredients_text(&self) -> String {
        self.ingredient_lines.join("\n")
    }
}

fn split_ingredient_text(text: &str) -> Vec<String> {
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .map(str::to_string)
        .collect()
}

mod ingredient_lines {
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Lines {
        List(Vec<String>),
        Text(String),
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Lines::deserialize(deserializer)? {
            Lines::List(lines) => lines,
            Lines::Text(text) => super::split_ingredient_text(&text),
        })
    }
}

/// One ingredient line broken into quantity, unit and name.
///
/// A `quantity` of `0.0` means no quantity was detected; it does not mean the
/// ingredient is absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedIngredient {
    pub quantity: f64,
    pub unit: String,
    pub name: String,
    pub original_text: String,
}

impl ParsedIngredient {
    pub fn key(&self) -> AggregateKey {
        AggregateKey::from_name(&self.name)
    }
}

/// Case-insensitive, trimmed ingredient name. Equal keys aggregate together.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AggregateKey(String);

impl AggregateKey {
    pub fn from_name(name: &str) -> Self {
        Self(name.trim().to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateEntry {
    pub display_name: String,
    pub quantity: f64,
    pub unit: String,
    pub contributing_recipes: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExportKind {
    /// The editable text as-is
    #[default]
    Plain,
    /// Names only, one per line
    #[value(alias = "strip")]
    #[serde(alias = "strip")]
    StripQuantities,
    /// Dash list under a header line, for pasting into a chat
    #[value(alias = "sms")]
    #[serde(alias = "sms")]
    Messaging,
}

impl std::fmt::Display for ExportKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportKind::Plain => write!(f, "plain"),
            ExportKind::StripQuantities => write!(f, "strip-quantities"),
            ExportKind::Messaging => write!(f, "messaging"),
        }
    }
}
