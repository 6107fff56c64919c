//! Command routing logic for CLI

use crate::args::{Cli, Commands};
use crate::commands;
use crate::console::CliConsole;
use std::collections::HashMap;
use tabula_core::{TabulaResult, load_config};
use tracing::debug;

/// Route CLI commands to their respective handlers
pub async fn route(cli: Cli) -> TabulaResult<()> {
    let mut overrides = HashMap::new();
    if let Some(base_url) = &cli.base_url {
        overrides.insert("TABULA_BASE_URL".to_string(), base_url.clone());
    }
    let config = load_config(Some(cli.config_file.as_path()), overrides)?;
    let console = CliConsole::new(cli.verbose);
    console.info(&format!("using {}", config.collection_url()));
    debug!(command = ?cli.command, base_url = %config.base_url, "routing command");

    match cli.command {
        Commands::List => commands::table::list(&config, &console).await,
        Commands::Create => commands::table::create(&config, &console).await,
        Commands::Edit { id, name, location } => {
            commands::table::edit(&config, &console, &id, name, location).await
        }
        Commands::Delete { id, yes } => commands::table::delete(&config, &console, &id, yes).await,
        Commands::Form {
            schema,
            submit,
            topic,
            update,
            initial,
        } => {
            commands::form::run(
                &config,
                &console,
                commands::form::FormArgs {
                    schema,
                    submit,
                    topic,
                    update,
                    initial,
                },
            )
            .await
        }
    }
}
