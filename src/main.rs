use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;

#[macro_use]
mod output;

mod commands;
mod config;
mod field;
mod token_helper;
mod types;
mod ui;
mod utils;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Config file to read instead of $VAULT_CONFIG_PATH or ~/.vault
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Only print results and errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Print diagnostics to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Colorize errors (field values are then printed with a trailing newline)
    #[arg(long, global = true)]
    color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a single field of a secret response read as JSON
    Field {
        /// Field name (e.g. token, wrapping_token, refresh_interval, or a data key)
        field: String,
        /// Read the secret from this file instead of stdin ("-" is stdin)
        #[arg(short, long)]
        file: Option<String>,
    },

    /// Show which token helper is configured
    Helper,

    /// Manage the stored session token
    #[command(subcommand)]
    Token(TokenCommands),
}

#[derive(Subcommand)]
enum TokenCommands {
    /// Print the stored token to stdout
    Get,
    /// Store a token (prompts when TOKEN is omitted)
    Store { token: Option<String> },
    /// Remove the stored token
    Erase,
}

fn main() {
    let cli = Cli::parse();
    output::init(output::Verbosity::from_flags(cli.quiet, cli.verbose));

    let config_path = cli.config.as_deref();

    let result = match &cli.command {
        Commands::Field { field, file } => {
            if cli.color {
                let mut ui = ui::ColoredUi { inner: ui::BasicUi::stdio() };
                commands::field::handle_field(&mut ui, field, file.as_deref())
            } else {
                let mut ui = ui::BasicUi::stdio();
                commands::field::handle_field(&mut ui, field, file.as_deref())
            }
        }

        Commands::Helper => commands::helper::handle_helper(config_path).map(|_| 0),

        Commands::Token(cmd) => match cmd {
            TokenCommands::Get => commands::token::handle_get_token(config_path),
            TokenCommands::Store { token } => {
                commands::token::handle_store_token(config_path, token.clone())
            }
            TokenCommands::Erase => commands::token::handle_erase_token(config_path),
        }
        .map(|_| 0),
    };

    match result {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            o_error!("{}: {:#}", "Error".red().bold(), e);
            std::process::exit(1);
        }
    }
}
