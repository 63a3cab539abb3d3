//! Command line entry point for Taskpad.
//!
//! Run without arguments to open the interactive UI:
//!
//! ```bash
//! taskpad
//! # or explicitly
//! taskpad ui
//! ```
//!
//! Feed a command script instead (stdin when no file is given):
//!
//! ```bash
//! taskpad script plan.txt
//! printf 'add Buy milk --at 2025-03-05T14:30\nlist\n' | taskpad script
//! ```
//!
//! Tasks live only as long as the process. Settings are read from
//! `~/.config/taskpad/config.json`, or from the file named by `TASKPAD_CONFIG`.

use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use env_logger::Env;

use taskpad::commands::Workspace;
use taskpad::config::Config;
use taskpad::tui::run_tui;

#[derive(Parser)]
#[command(name = "taskpad", version, about = "A chronological task list", long_about = None)]
struct Cli {
    /// Read settings from this file instead of the default location
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open interactive TUI
    Ui,
    /// Run a command script
    Script {
        /// Script file; stdin when omitted
        file: Option<PathBuf>,
    },
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

fn init_logging(config: &Config, interactive: bool) {
    // Log lines would land on top of the alternate screen.
    let default_filter = if interactive { "off" } else { config.log_filter.as_str() };
    let _ = env_logger::Builder::from_env(Env::default().default_filter_or(default_filter)).try_init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };
    let config = match loaded {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match cli.command {
        Some(Commands::Script { file }) => {
            init_logging(&config, false);
            let mut workspace = Workspace::new(config);
            let stdout = io::stdout();
            let stderr = io::stderr();
            let res = match file {
                Some(path) => match File::open(&path) {
                    Ok(f) => workspace.run_script(BufReader::new(f), &mut stdout.lock(), &mut stderr.lock()),
                    Err(e) => {
                        eprintln!("Cannot open {}: {}", path.display(), e);
                        return ExitCode::FAILURE;
                    }
                },
                None => workspace.run_script(io::stdin().lock(), &mut stdout.lock(), &mut stderr.lock()),
            };
            if let Err(e) = res {
                eprintln!("Error running script: {}", e);
                return ExitCode::FAILURE;
            }
        }
        Some(Commands::Completions { shell }) => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "taskpad", &mut io::stdout());
        }
        Some(Commands::Ui) | None => {
            init_logging(&config, true);
            if let Err(e) = run_tui(config) {
                eprintln!("Error running TUI: {}", e);
                return ExitCode::FAILURE;
            }
        }
    }
    ExitCode::SUCCESS
}
