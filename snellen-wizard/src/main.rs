use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use snellen_wizard::config::load_settings;
use snellen_wizard::{run_scripted, run_tui, run_tui_smoke, ScriptedAnswers, ScriptedOutcome};

#[derive(Parser, Debug)]
#[command(
    name = "snellen-wizard",
    version,
    about = "Snellen / duochrome vision self-test in the terminal."
)]
struct Cli {
    /// Config file (TOML). Defaults to ./snellen-wizard.toml when present.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Echo log lines to stderr (ignored by the interactive wizard).
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Interactive terminal wizard (default).
    Tui,

    /// Render a single frame of one page and print it.
    Smoke {
        #[arg(long, default_value = "snellen", value_parser = ["snellen", "duochrome", "result", "invalid"])]
        page: String,
    },

    /// Run the self-test non-interactively with fixed answers.
    Run {
        #[arg(long, default_value = "")]
        right_eye: String,
        #[arg(long, default_value = "")]
        left_eye: String,
        #[arg(long, default_value = "")]
        duochrome: String,
        /// Print the result as JSON.
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match dispatch(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Self-test error: {:#}", e);
            ExitCode::from(2)
        }
    }
}

fn dispatch(cli: Cli) -> Result<ExitCode> {
    let settings = load_settings(cli.config.as_deref())?;

    match cli.command.unwrap_or(Commands::Tui) {
        Commands::Tui => {
            run_tui(&settings)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Smoke { page } => {
            let frame = run_tui_smoke(&settings, &page, cli.verbose)?;
            print!("{}", frame);
            Ok(ExitCode::SUCCESS)
        }
        Commands::Run {
            right_eye,
            left_eye,
            duochrome,
            json,
        } => {
            let answers = ScriptedAnswers {
                right_eye,
                left_eye,
                duochrome,
            };
            match run_scripted(&settings, &answers, cli.verbose)? {
                ScriptedOutcome::Completed(snapshot) => {
                    if json {
                        println!("{}", serde_json::to_string_pretty(&snapshot)?);
                    } else {
                        println!("{}", snapshot);
                    }
                    Ok(ExitCode::SUCCESS)
                }
                ScriptedOutcome::Blocked { stage, annotations } => {
                    eprintln!("Self-test stopped on the {} stage:", stage);
                    for (field, message) in annotations {
                        eprintln!("  {}: {}", field, message);
                    }
                    Ok(ExitCode::from(1))
                }
            }
        }
    }
}
