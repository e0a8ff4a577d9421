//! linkgate - Link eager-launch eligibility
//!
//! CLI entry point with global panic handler.

use std::io::{Read, Write};
use std::path::Path;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};

use linkgate::cli::config_cmd::{ConfigCommand, ConfigOptions};
use linkgate::cli::evaluate::{AttestationKind, EvaluateCommand, EvaluateOptions};
use linkgate::cli::event::{EventCommand, EventOptions};
use linkgate::config::{linkgate_home, Config};
use linkgate::core::LoginState;
use linkgate::error::exit_codes;

// =============================================================================
// CLI Definition
// =============================================================================

/// linkgate - decide whether Link launches eagerly
#[derive(Parser)]
#[command(name = "linkgate")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate the eager-launch decision
    Evaluate {
        /// Login state of the Link account
        #[arg(long, value_enum, default_value = "logged-out", conflicts_with = "no_state")]
        login_state: LoginStateArg,
        /// Evaluate with no Link state resolved
        #[arg(long)]
        no_state: bool,
        /// Result the attestation check returns if it runs
        #[arg(long, value_enum, default_value = "successful")]
        attestation: AttestationKind,
        /// Failure cause for a non-successful attestation
        #[arg(long)]
        cause: Option<String>,
        /// Force the 2FA modal suppression switch on
        #[arg(long)]
        suppressed: bool,
        /// Output as JSON
        #[arg(long, short)]
        json: bool,
        /// Suppress output
        #[arg(long, short)]
        quiet: bool,
    },

    /// Render a JSON analytics event from stdin
    Event {
        /// Output as JSON
        #[arg(long, short)]
        json: bool,
        /// Suppress output
        #[arg(long, short)]
        quiet: bool,
    },

    /// Show the effective configuration
    Config {
        /// Write a project config file with default values
        #[arg(long)]
        init: bool,
        /// Overwrite an existing project config file
        #[arg(long)]
        force: bool,
        /// Output as JSON
        #[arg(long, short)]
        json: bool,
        /// Suppress output
        #[arg(long, short)]
        quiet: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum LoginStateArg {
    LoggedOut,
    LoggedIn,
    NeedsVerification,
}

impl From<LoginStateArg> for LoginState {
    fn from(arg: LoginStateArg) -> Self {
        match arg {
            LoginStateArg::LoggedOut => LoginState::LoggedOut,
            LoginStateArg::LoggedIn => LoginState::LoggedIn,
            LoginStateArg::NeedsVerification => LoginState::NeedsVerification,
        }
    }
}

// =============================================================================
// Main Entry Point
// =============================================================================

fn main() -> ExitCode {
    setup_panic_handler();

    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("linkgate error: {}", e);
            ExitCode::from(exit_codes::ERROR as u8)
        }
    }
}

/// Set up the global panic handler.
///
/// On panic, logs to ~/.linkgate/crash.log and exits with code 3.
fn setup_panic_handler() {
    std::panic::set_hook(Box::new(|info| {
        eprintln!("linkgate panic: {}", info);

        if let Some(home) = linkgate_home() {
            let crash_log = home.join("crash.log");
            if std::fs::create_dir_all(&home).is_ok() {
                if let Ok(mut file) = std::fs::OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(&crash_log)
                {
                    let timestamp = chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC");
                    let _ = writeln!(file, "[{}] {}", timestamp, info);
                }
            }
        }

        std::process::exit(exit_codes::CRASH);
    }));
}

/// Run the CLI and return the exit code.
fn run() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let cwd = std::env::current_dir()?;

    match cli.command {
        Commands::Evaluate {
            login_state,
            no_state,
            attestation,
            cause,
            suppressed,
            json,
            quiet,
        } => {
            let options = EvaluateOptions {
                json,
                quiet,
                login_state: (!no_state).then(|| login_state.into()),
                attestation: attestation.into_result(cause)?,
                suppressed,
            };
            run_evaluate(&options, &cwd)
        }
        Commands::Event { json, quiet } => run_event(json, quiet),
        Commands::Config {
            init,
            force,
            json,
            quiet,
        } => run_config(init, force, json, quiet, &cwd),
    }
}

// =============================================================================
// Command Implementations
// =============================================================================

/// Convert a success boolean to an exit code.
fn success_to_exit_code(success: bool) -> ExitCode {
    if success {
        ExitCode::from(exit_codes::SUCCESS as u8)
    } else {
        ExitCode::from(exit_codes::ERROR as u8)
    }
}

fn print_formatted(formatted: &str) {
    if !formatted.is_empty() {
        print!("{}", formatted);
        if !formatted.ends_with('\n') {
            println!();
        }
    }
}

fn run_evaluate(
    options: &EvaluateOptions,
    cwd: &Path,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cmd = EvaluateCommand::new(Config::load_from_cwd(cwd));
    let output = cmd.run(options);
    print_formatted(&cmd.format_output(&output, options));
    Ok(success_to_exit_code(true))
}

fn run_event(json: bool, quiet: bool) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let mut input = String::new();
    std::io::stdin().read_to_string(&mut input)?;

    let cmd = EventCommand::new();
    let options = EventOptions { json, quiet };
    let output = cmd.run(&input);
    print_formatted(&cmd.format_output(&output, &options));

    Ok(success_to_exit_code(output.success))
}

fn run_config(
    init: bool,
    force: bool,
    json: bool,
    quiet: bool,
    cwd: &Path,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cmd = ConfigCommand::new(cwd);
    let options = ConfigOptions {
        json,
        quiet,
        init,
        force,
    };
    let output = cmd.run(&options);
    print_formatted(&cmd.format_output(&output, &options));

    Ok(success_to_exit_code(output.success))
}
