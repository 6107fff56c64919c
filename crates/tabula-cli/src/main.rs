//! Tabula CLI
//!
//! Terminal front end for the machine table:
//!
//! - `tabula list`                      show every record
//! - `tabula create`                    fill in the creation form
//! - `tabula edit <id> --name <n>`      edit a row inline
//! - `tabula delete <id>`               delete after confirmation
//! - `tabula form --schema <url> --submit <url> --topic <t>`
//!                                      fill in a server-described form
//!
//! Set RUST_LOG=debug for verbose logging.

mod args;
mod commands;
mod console;
mod prompts;
mod router;

use clap::Parser;
use console::CliConsole;

use args::Cli;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(error) = router::route(cli).await {
        CliConsole::new(false).error(&error.to_string());
        std::process::exit(1);
    }
}
