use clap::Parser;
use recipe_shopping_list::{AppConfig, CliArgs, LoggingConfig, ShoppingListError, init_logging, run};

fn main() -> anyhow::Result<()> {
    let _guard = init_logging(LoggingConfig::from_env())?;

    let cli = CliArgs::parse();
    let config = AppConfig::from_args(cli)?;

    // Fail fast on a missing catalog before touching anything else
    config.validate()?;

    match run(&config) {
        Ok(list) => {
            println!("{list}");
            Ok(())
        }
        Err(err) => {
            if let Some(shopping_err) = err.downcast_ref::<ShoppingListError>() {
                eprintln!("hint: {}", shopping_err.suggestion());
            }
            Err(err)
        }
    }
}
