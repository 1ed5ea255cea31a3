//! # Context Calculator CLI
//!
//! Line-oriented terminal front end for `calc_core`. It plays the part a GUI
//! would: it turns typed keys into button presses and prints the display
//! after each line.
//!
//! ```text
//! $ calc_cli 5 + 3 + 2 =
//! 10
//!
//! $ calc_cli --mode shopping --json 120 + 4 Split
//! {
//!   "text": "30",
//!   "is_error": false,
//!   "pending": null,
//!   "hints": [
//!     "Each pays: $30.00"
//!   ]
//! }
//! ```
//!
//! Without keys on the command line it reads from stdin. Set `RUST_LOG=debug`
//! to trace every action the engine applies.

mod keys;

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use calc_core::{ContextMode, EngineSettings, Session};

use keys::{parse_line, Command};

/// Context-aware calculator for the terminal
#[derive(Parser, Debug)]
#[command(name = "calc_cli")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Starting mode (standard, homework, shopping, budgeting, cooking)
    #[arg(short, long, default_value = "standard")]
    mode: String,

    /// JSON settings file (tax rate, tip rates, ...)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the display as JSON
    #[arg(long)]
    json: bool,

    /// Keys to press, e.g. `12 + 3 =`; reads stdin when empty
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    keys: Vec<String>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let mode: ContextMode = cli.mode.parse()?;
    let settings = match &cli.config {
        Some(path) => EngineSettings::load(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => EngineSettings::default(),
    };
    let mut session = Session::with_settings(mode, settings);

    if !cli.keys.is_empty() {
        let line = cli.keys.join(" ");
        feed_line(&mut session, &line);
        return print_display(&session, cli.json);
    }

    interactive(&mut session, cli.json)
}

fn interactive(session: &mut Session, json: bool) -> anyhow::Result<()> {
    println!("Context Calculator - {} mode", session.mode());
    println!("Type keys separated by spaces (`:help` for commands).");
    println!();

    let stdin = io::stdin();
    loop {
        print!("[{}] > ", session.mode());
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        if !feed_line(session, &line) {
            break;
        }
        print_display(session, json)?;
    }
    Ok(())
}

/// Apply one line of input. Returns `false` when the user asked to quit.
fn feed_line(session: &mut Session, line: &str) -> bool {
    let commands = match parse_line(line) {
        Ok(commands) => commands,
        Err(e) => {
            eprintln!("{}", e);
            return true;
        }
    };

    for command in commands {
        match command {
            Command::Press(label) => {
                if let Err(e) = session.press(&label) {
                    warn!(%label, "ignored key");
                    eprintln!("{}", e);
                }
            }
            Command::SwitchMode(mode) => {
                session.switch_mode(mode);
                println!("{} mode: {}", mode, mode.description());
                println!("  {}", mode.default_hint());
            }
            Command::ListModes => list_modes(session.mode()),
            Command::Help => print_help(session.mode()),
            Command::Quit => return false,
        }
    }
    true
}

fn print_display(session: &Session, json: bool) -> anyhow::Result<()> {
    let display = session.display();
    if json {
        println!("{}", serde_json::to_string_pretty(&display)?);
        return Ok(());
    }

    if let Some(pending) = &display.pending {
        println!("  {}", pending);
    }
    let text = display.truncated(session.engine().settings().display_width);
    if display.is_error {
        println!("! {}", text);
    } else if text.is_empty() {
        println!("0");
    } else {
        println!("{}", text);
    }
    for hint in &display.hints {
        println!("  * {}", hint);
    }
    Ok(())
}

fn list_modes(active: ContextMode) {
    for mode in ContextMode::ALL {
        let marker = if mode == active { "*" } else { " " };
        println!("{} {:<10} {}", marker, mode.display_name(), mode.description());
    }
}

fn print_help(mode: ContextMode) {
    let labels: Vec<&str> = mode.buttons().iter().map(|b| b.label).collect();
    println!("Keys: 0-9 . = + - * /  and for {} mode: {}", mode, labels.join(" "));
    println!("Aliases: c, del, enter, sqrt, sq, pi, half, third, quarter, double, triple, temp");
    println!("Commands: :mode <name>, :modes, :help, :q");
}
