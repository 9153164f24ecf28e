//! vnpkg CLI - Plugin packaging tool
//!
//! Commands:
//! - `vnpkg pack [path]` - Package a plugin project as a `.vnpkg` file
//! - `vnpkg help` - Show usage

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use vnpkg_bundle::resolve_sdk_version;

mod dispatch;
mod logging;
mod pack;

/// External command that scaffolds new plugin projects.
const SCAFFOLD_COMMAND: &str = "npm create vnite-plugin";

const AFTER_HELP: &str = "\
Examples:
  vnpkg pack ./my-plugin
  vnpkg help

Create a new plugin:
  npm create vnite-plugin [my-plugin]";

#[derive(Parser)]
#[command(name = "vnpkg")]
#[command(author, version, about = "Packaging tool for vnite plugins", long_about = None)]
#[command(after_help = AFTER_HELP)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Package a plugin as a .vnpkg file
    Pack {
        /// Path to the plugin project (default: current directory)
        path: Option<PathBuf>,
    },

    /// Build the package in this process (spawned by `pack`)
    #[command(name = dispatch::WORKER_COMMAND, hide = true)]
    PackWorker { path: Option<PathBuf> },

    #[command(external_subcommand)]
    Unknown(Vec<String>),
}

fn main() -> ExitCode {
    logging::init_logging();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => return parse_failure(e),
    };
    let sdk_version = resolve_sdk_version(option_env!("CARGO_PKG_VERSION"));

    match cli.command {
        None => match Cli::command().print_help() {
            Ok(()) => {
                println!();
                ExitCode::SUCCESS
            }
            Err(_) => ExitCode::FAILURE,
        },
        Some(Commands::Pack { path }) => match dispatch::run_pack(path.as_deref()) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("Command execution failed: {e:#}");
                dispatch::exit_code_for(&e)
            }
        },
        Some(Commands::PackWorker { path }) => match pack::run(path, &sdk_version) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("Packaging failed: {e}");
                ExitCode::FAILURE
            }
        },
        Some(Commands::Unknown(args)) => {
            unknown_command(args.first().map(String::as_str).unwrap_or_default())
        }
    }
}

/// Flag-like first tokens are rejected by clap before they reach
/// `Commands::Unknown`, so they are mapped to an unknown command here.
fn parse_failure(err: clap::Error) -> ExitCode {
    let unknown = matches!(
        err.kind(),
        ErrorKind::UnknownArgument | ErrorKind::InvalidSubcommand
    );
    if unknown
        && let Some(first) = std::env::args_os().nth(1)
        && first != "help"
        && Cli::command().find_subcommand(&first).is_none()
    {
        return unknown_command(&first.to_string_lossy());
    }
    err.exit()
}

fn unknown_command(command: &str) -> ExitCode {
    eprintln!("Unknown command: {command}");
    println!("Use \"{SCAFFOLD_COMMAND}\" to create a new plugin");
    println!("Run \"vnpkg help\" to see available commands");
    ExitCode::FAILURE
}
