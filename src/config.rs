use crate::format::{DEFAULT_MESSAGING_HEADER, ListOptions};
use crate::model::ExportKind;
use anyhow::{Context, Result};
use clap::Parser;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};

const DEFAULT_RECIPES_FILE: &str = "recipes.yaml";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub recipes_file: PathBuf,
    pub selection: Vec<String>,
    pub select_all: bool,
    pub export: ExportKind,
    pub messaging_header: String,
    pub edit_file: Option<PathBuf>,
}

impl AppConfig {
    pub fn from_args(args: CliArgs) -> Result<Self> {
        let CliArgs {
            config,
            recipes: cli_recipes,
            select: cli_select,
            all: cli_all,
            export: cli_export,
            header: cli_header,
            edit: cli_edit,
        } = args;

        let file_config = if let Some(path) = config.as_ref() {
            load_structured_file::<PartialConfig>(path, "config")?
        } else {
            PartialConfig::default()
        };

        let PartialConfig {
            recipes: file_recipes,
            select: file_select,
            all: file_all,
            export: file_export,
            messaging_header: file_header,
        } = file_config;

        // Relative paths in a config file resolve against its directory.
        let config_dir = config
            .as_ref()
            .and_then(|path| path.parent().map(Path::to_path_buf))
            .filter(|dir| !dir.as_os_str().is_empty());
        let file_recipes = file_recipes.map(|path| match config_dir.as_ref() {
            Some(dir) if path.is_relative() => dir.join(path),
            _ => path,
        });

        let recipes_file = cli_recipes
            .or(file_recipes)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_RECIPES_FILE));

        let selection = cli_select
            .or(file_select)
            .unwrap_or_default()
            .into_iter()
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty())
            .collect::<Vec<_>>();

        let select_all = cli_all.or(file_all).unwrap_or(false);

        let export = cli_export.or(file_export).unwrap_or_default();

        let messaging_header = cli_header
            .or(file_header)
            .unwrap_or_else(|| DEFAULT_MESSAGING_HEADER.to_string());

        Ok(Self {
            recipes_file,
            selection,
            select_all,
            export,
            messaging_header,
            edit_file: cli_edit,
        })
    }

    pub fn validate(&self) -> Result<()> {
        anyhow::ensure!(
            self.recipes_file.is_file(),
            "recipe file {:?} does not exist or is not a file",
            self.recipes_file
        );
        if let Some(edit) = self.edit_file.as_ref() {
            anyhow::ensure!(edit.is_file(), "edit file {:?} does not exist", edit);
        }
        Ok(())
    }

    pub fn list_options(&self) -> ListOptions {
        ListOptions {
            messaging_header: self.messaging_header.clone(),
        }
    }
}

#[derive(Parser, Debug, Default, Clone)]
#[command(
    name = "recipe-shopping-list",
    about = "Build a shopping list from the ingredients of selected recipes",
    version
)]
pub struct CliArgs {
    #[arg(
        long,
        value_name = "FILE",
        help = "Path to a configuration file (YAML or JSON)",
        global = true
    )]
    pub config: Option<PathBuf>,

    #[arg(
        long,
        env = "RECIPE_SHOPPING_RECIPES",
        value_name = "FILE",
        help = "Recipe catalog (YAML or JSON)"
    )]
    pub recipes: Option<PathBuf>,

    #[arg(
        long,
        env = "RECIPE_SHOPPING_SELECT",
        value_name = "ID",
        value_delimiter = ',',
        help = "Comma-separated ids of the recipes to shop for"
    )]
    pub select: Option<Vec<String>>,

    #[arg(
        long,
        env = "RECIPE_SHOPPING_ALL",
        value_name = "BOOL",
        num_args = 0..=1,
        default_missing_value = "true",
        help = "Select every recipe in the catalog (--all=false overrides the config file)"
    )]
    pub all: Option<bool>,

    #[arg(
        long,
        env = "RECIPE_SHOPPING_EXPORT",
        value_enum,
        value_name = "KIND",
        help = "Output form: plain, strip-quantities or messaging"
    )]
    pub export: Option<ExportKind>,

    #[arg(
        long,
        env = "RECIPE_SHOPPING_HEADER",
        value_name = "TEXT",
        help = "Header line of the messaging export"
    )]
    pub header: Option<String>,

    #[arg(
        long,
        value_name = "FILE",
        help = "Replace the generated list with this file's text before exporting"
    )]
    pub edit: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
struct PartialConfig {
    recipes: Option<PathBuf>,
    select: Option<Vec<String>>,
    all: Option<bool>,
    export: Option<ExportKind>,
    messaging_header: Option<String>,
}

/// Read a YAML or JSON file, picking the format from the extension.
/// `kind` names the file in error messages (`config`, `recipe`).
pub(crate) fn load_structured_file<T: DeserializeOwned>(path: &Path, kind: &str) -> Result<T> {
    if !path.exists() {
        anyhow::bail!("{kind} file {:?} does not exist", path);
    }
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read {kind} file {:?}", path))?;
    let ext = path
        .extension()
        .and_then(|os| os.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let parsed = match ext.as_str() {
        "yaml" | "yml" => serde_yaml::from_str(&contents)
            .with_context(|| format!("failed to parse YAML {kind} {:?}", path))?,
        "json" => serde_json::from_str(&contents)
            .with_context(|| format!("failed to parse JSON {kind} {:?}", path))?,
        other => anyhow::bail!("unsupported {kind} extension: {other}"),
    };
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(suffix)
            .tempfile()
            .expect("create temp file");
        file.write_all(contents.as_bytes()).expect("write temp file");
        file
    }

    #[test]
    fn test_defaults_without_file() {
        let config = AppConfig::from_args(CliArgs::default()).unwrap();
        assert_eq!(config.recipes_file, PathBuf::from(DEFAULT_RECIPES_FILE));
        assert!(config.selection.is_empty());
        assert!(!config.select_all);
        assert_eq!(config.export, ExportKind::Plain);
        assert_eq!(config.messaging_header, DEFAULT_MESSAGING_HEADER);
    }

    #[test]
    fn test_cli_overrides_file() {
        let file = write_temp(
            ".yaml",
            "recipes: /tmp/book.yaml\nselect: [a, b]\nexport: messaging\nmessaging_header: Courses\n",
        );
        let args = CliArgs {
            config: Some(file.path().to_path_buf()),
            select: Some(vec!["c".to_string(), " ".to_string()]),
            export: Some(ExportKind::StripQuantities),
            ..CliArgs::default()
        };

        let config = AppConfig::from_args(args).unwrap();
        assert_eq!(config.recipes_file, PathBuf::from("/tmp/book.yaml"));
        assert_eq!(config.selection, vec!["c".to_string()]);
        assert_eq!(config.export, ExportKind::StripQuantities);
        assert_eq!(config.messaging_header, "Courses");
    }

    #[test]
    fn test_relative_recipes_resolve_against_config_dir() {
        let file = write_temp(".json", r#"{"recipes": "book.json", "all": true}"#);
        let config = AppConfig::from_args(CliArgs {
            config: Some(file.path().to_path_buf()),
            ..CliArgs::default()
        })
        .unwrap();

        let dir = file.path().parent().unwrap();
        assert_eq!(config.recipes_file, dir.join("book.json"));
        assert!(config.select_all);
    }

    #[test]
    fn test_cli_all_false_overrides_file() {
        let file = write_temp(".yaml", "all: true\nselect: [crepes]\n");
        let config = AppConfig::from_args(CliArgs {
            config: Some(file.path().to_path_buf()),
            all: Some(false),
            ..CliArgs::default()
        })
        .unwrap();
        assert!(!config.select_all);
        assert_eq!(config.selection, vec!["crepes".to_string()]);
    }

    #[test]
    fn test_all_flag_parsing() {
        let bare = CliArgs::try_parse_from(["recipe-shopping-list", "--all"]).unwrap();
        assert_eq!(bare.all, Some(true));
        let off = CliArgs::try_parse_from(["recipe-shopping-list", "--all=false"]).unwrap();
        assert_eq!(off.all, Some(false));
    }

    #[test]
    fn test_structured_file_errors_name_the_kind() {
        let file = write_temp(".yaml", "recipes: [unclosed\n");
        let err = load_structured_file::<PartialConfig>(file.path(), "config").unwrap_err();
        assert!(err.to_string().contains("failed to parse YAML config"));

        let missing =
            load_structured_file::<PartialConfig>(Path::new("/no/such.yaml"), "recipe")
                .unwrap_err();
        assert!(missing.to_string().contains("recipe file"));
    }

    #[test]
    fn test_export_aliases_in_file() {
        let file = write_temp(".yml", "export: sms\n");
        let config = AppConfig::from_args(CliArgs {
            config: Some(file.path().to_path_buf()),
            ..CliArgs::default()
        })
        .unwrap();
        assert_eq!(config.export, ExportKind::Messaging);
    }

    #[test]
    fn test_unsupported_extension() {
        let file = write_temp(".toml", "recipes = 'x'\n");
        let err = AppConfig::from_args(CliArgs {
            config: Some(file.path().to_path_buf()),
            ..CliArgs::default()
        })
        .unwrap_err();
        assert!(err.to_string().contains("unsupported config extension"));
    }

    #[test]
    fn test_validate_missing_recipes_file() {
        let config = AppConfig::from_args(CliArgs {
            recipes: Some(PathBuf::from("/definitely/not/here.yaml")),
            ..CliArgs::default()
        })
        .unwrap();
        assert!(config.validate().is_err());
    }
}
