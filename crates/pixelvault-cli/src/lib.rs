// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]
//! `pixelvault`: the storefront driven from a terminal.
//!
//! Every invocation resolves the config and data directory, then runs one
//! page controller against the file-backed storage, the same way a browser
//! page load re-reads local storage.

mod account_commands;
mod cart_commands;
mod catalog_commands;
mod checkout_command;
mod context;
mod errors;

use std::path::PathBuf;
use std::process::ExitCode as ProcessExitCode;

use clap::{error::ErrorKind, ArgAction, Parser, Subcommand};
use pixelvault_core::{resolve_config_path, ConfigPathScope, ExitCode, MachineError};
use serde_json::json;

use crate::account_commands::{ConsentCommand, ContactArgs, NewsletterCommand, WishlistCommand};
use crate::cart_commands::CartCommand;
use crate::catalog_commands::CatalogCommand;
use crate::checkout_command::CheckoutArgs;
use crate::context::{init_tracing, AppContext, GlobalPaths, LogFlags, OutputMode};
use crate::errors::{emit_error, CliError};

pub const CRATE_NAME: &str = "pixelvault-cli";

#[derive(Parser)]
#[command(name = "pixelvault")]
#[command(about = "PixelVault game storefront")]
#[command(
    after_help = "Environment:\n  PIXELVAULT_LOG_LEVEL   Log verbosity override\n  PIXELVAULT_DATA_DIR    Storage directory\n  PIXELVAULT_CONFIG      Config file path\n  PIXELVAULT_TAX_RATE    Tax rate override\n  PIXELVAULT_PAGE_SIZE   Catalog page size override"
)]
struct Cli {
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,
    #[arg(long, global = true, default_value_t = false)]
    json: bool,
    #[arg(long, global = true, default_value_t = false)]
    quiet: bool,
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    Catalog {
        #[command(subcommand)]
        command: CatalogCommand,
    },
    Cart {
        #[command(subcommand)]
        command: CartCommand,
    },
    /// Place an order for everything in the cart.
    Checkout(CheckoutArgs),
    Newsletter {
        #[command(subcommand)]
        command: NewsletterCommand,
    },
    Wishlist {
        #[command(subcommand)]
        command: WishlistCommand,
    },
    Consent {
        #[command(subcommand)]
        command: ConsentCommand,
    },
    /// Validate and send the contact form.
    Contact(ContactArgs),
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
    Version,
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Effective configuration and the paths it was resolved from.
    Show,
}

pub fn main_entry() -> ProcessExitCode {
    let wants_json = std::env::args().any(|arg| arg == "--json");
    match run() {
        Ok(()) => ExitCode::Success.into(),
        Err(err) => {
            emit_error(&err, wants_json);
            err.exit_code.into()
        }
    }
}

fn run() -> Result<(), CliError> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                print!("{err}");
                return Ok(());
            }
            _ => {
                return Err(CliError {
                    exit_code: ExitCode::Usage,
                    machine: MachineError::new("usage_error", "invalid command line arguments")
                        .with_detail("error", &err.to_string()),
                });
            }
        },
    };
    init_tracing(LogFlags {
        quiet: cli.quiet,
        verbose: cli.verbose,
    });
    let output = OutputMode { json: cli.json };
    let command = cli
        .command
        .ok_or_else(|| CliError::usage("missing command; see --help"))?;
    if let Commands::Version = command {
        let payload = json!({ "name": "pixelvault", "version": env!("CARGO_PKG_VERSION") });
        return output.emit(&payload, || format!("pixelvault {}", env!("CARGO_PKG_VERSION")));
    }

    let ctx = AppContext::resolve(
        GlobalPaths {
            data_dir: cli.data_dir,
            config: cli.config,
            catalog: cli.catalog,
        },
        output,
    )?;
    match command {
        Commands::Catalog { command } => catalog_commands::run(&ctx, command),
        Commands::Cart { command } => cart_commands::run(&ctx, command),
        Commands::Checkout(args) => checkout_command::run(&ctx, args),
        Commands::Newsletter { command } => account_commands::run_newsletter(&ctx, command),
        Commands::Wishlist { command } => account_commands::run_wishlist(&ctx, command),
        Commands::Consent { command } => account_commands::run_consent(&ctx, command),
        Commands::Contact(args) => account_commands::run_contact(&ctx, args),
        Commands::Config {
            command: ConfigCommand::Show,
        } => show_config(&ctx),
        Commands::Version => Ok(()),
    }
}

fn show_config(ctx: &AppContext) -> Result<(), CliError> {
    let payload = json!({
        "config": ctx.config,
        "config_path": ctx.config_path,
        "workspace_config": resolve_config_path(ConfigPathScope::Workspace),
        "data_dir": ctx.data_dir,
        "catalog_path": ctx.catalog_path,
    });
    ctx.output
        .emit(&payload, || serde_json::to_string_pretty(&payload).unwrap_or_default())
}
