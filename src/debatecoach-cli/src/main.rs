//! DebateCoach CLI - AI Debate Coaching Tool
//!
//! An interactive command-line coach for declamation, parliamentary debate,
//! and Model United Nations practice.

mod display;

use std::env;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use colored::Colorize;
use debatecoach_core::config::{self, Config, Overrides};
use debatecoach_core::practice_mode::{self, get_mode, selector_labels};
use debatecoach_core::{
    CoachError, CoachOrchestrator, ComplexityLevel, ModeSelection, OpenAIBackend, PracticeMode,
    PracticeRequest,
};
use display::LiveDisplay;
use inquire::{InquireError, Select, Text};
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "debatecoach",
    version,
    about = "AI Debate Coach - practise declamation, parliamentary debate and MUN",
    long_about = "A CLI coach that streams guidance from OpenAI-compatible APIs. \
                  Run without a subcommand for an interactive session."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Path to a TOML config file
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Model to use (overrides config and defaults)
    #[arg(short, long, global = true, value_name = "MODEL")]
    model: Option<String>,

    /// Maximum tokens to generate per reply
    #[arg(long, global = true, value_name = "TOKENS")]
    max_tokens: Option<u32>,

    /// Sampling temperature
    #[arg(long, global = true, value_name = "TEMP")]
    temperature: Option<f32>,

    /// OpenAI-compatible API base URL
    #[arg(long, global = true, value_name = "URL")]
    api_base: Option<String>,

    /// Show debug logs on stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Get declamation guidance and a sample response for a topic
    Declamation {
        /// The topic of your declamation
        #[arg(value_name = "TOPIC")]
        topic: String,

        /// Complexity level: low, medium or high
        #[arg(short, long, default_value = "medium", value_parser = parse_level)]
        level: ComplexityLevel,
    },
    /// Get an approach for arguing your motives in a parliamentary debate
    Parliamentary {
        #[arg(value_name = "MOTIVES")]
        motives: String,
    },
    /// Get supporting points and diplomatic language for an MUN stance
    Mun {
        #[arg(value_name = "STANCE")]
        stance: String,
    },
    /// Print the rules for a practice mode
    Rules {
        #[arg(value_name = "MODE", value_parser = parse_mode)]
        mode: PracticeMode,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file if present
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let one_shot = match &cli.command {
        None => None,
        Some(Command::Rules { mode }) => {
            display::print_rules(*mode);
            return Ok(());
        }
        Some(Command::Declamation { topic, level }) => {
            Some(PracticeRequest::declamation(topic.as_str(), *level))
        }
        Some(Command::Parliamentary { motives }) => {
            Some(PracticeRequest::parliamentary(motives.as_str()))
        }
        Some(Command::Mun { stance }) => Some(PracticeRequest::mun(stance.as_str())),
    };

    let config = load_config(&cli).unwrap_or_else(|e| exit_with(&e));
    let api_key =
        config::api_key_from(|var| env::var(var).ok()).unwrap_or_else(|e| exit_with(&e));
    let backend =
        OpenAIBackend::new(&config.api.base, &api_key).unwrap_or_else(|e| exit_with(&e));
    let mut coach = CoachOrchestrator::new(Box::new(backend), config.generation);

    match one_shot {
        Some(request) => run_once(&mut coach, &request).await,
        None => run_interactive(&mut coach).await?,
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Report a startup error the way a user should read it and exit.
fn exit_with(error: &CoachError) -> ! {
    eprintln!("{}", fatal_line(error));
    std::process::exit(1);
}

fn fatal_line(error: &CoachError) -> String {
    format!("{} {}", "Error:".red().bold(), error)
}

fn load_config(cli: &Cli) -> Result<Config, CoachError> {
    let base = match &cli.config {
        Some(path) => Config::load(path)?,
        None => config::default_config(),
    };

    let overrides = Overrides {
        api_base: cli.api_base.clone(),
        model: cli.model.clone(),
        max_tokens: cli.max_tokens,
        temperature: cli.temperature,
    };

    base.resolve(&overrides, |var| env::var(var).ok())
}

/// Run a single request from the command line and print the history.
async fn run_once(coach: &mut CoachOrchestrator, request: &PracticeRequest) {
    display::print_mode_intro(request.mode());
    match submit(coach, request).await {
        Ok(Some(_)) => display::print_history(coach.transcript()),
        Ok(None) => display::print_empty_input(),
        Err(e) => {
            display::print_failure(&e);
            std::process::exit(1);
        }
    }
}

/// Interactive session: pick a mode, fill in its form, read the reply.
async fn run_interactive(coach: &mut CoachOrchestrator) -> Result<(), InquireError> {
    display::print_header();

    loop {
        let label = match Select::new("🎓 Select Debate Style", selector_labels()).prompt() {
            Ok(label) => label,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(e) => return Err(e),
        };

        let Some(mode) = ModeSelection::from_label(label).mode() else {
            display::print_history(coach.transcript());
            continue;
        };

        display::print_mode_intro(mode);

        let request = match prompt_request(mode) {
            Ok(request) => request,
            // Esc goes back to the mode menu.
            Err(InquireError::OperationCanceled) => continue,
            Err(InquireError::OperationInterrupted) => break,
            Err(e) => return Err(e),
        };

        match submit(coach, &request).await {
            Ok(Some(_)) => {}
            Ok(None) => display::print_empty_input(),
            Err(e) => display::print_failure(&e),
        }
        display::print_history(coach.transcript());
    }

    display::print_goodbye();
    Ok(())
}

fn prompt_request(mode: PracticeMode) -> Result<PracticeRequest, InquireError> {
    let input = Text::new(mode.input_prompt()).prompt()?;

    let level = match mode {
        PracticeMode::Declamation => Select::new("Select your level:", ComplexityLevel::ALL.to_vec())
            .with_starting_cursor(1)
            .prompt()?,
        _ => ComplexityLevel::default(),
    };

    Ok(PracticeRequest::for_mode(mode, input, level))
}

/// Stream one reply to stdout. Failures are logged and handed back for display.
async fn submit(
    coach: &mut CoachOrchestrator,
    request: &PracticeRequest,
) -> Result<Option<String>, CoachError> {
    let mut live = LiveDisplay::stdout();
    let result = coach
        .practice(request, |partial| live.update(partial))
        .await;
    live.finish();

    if let Err(e) = &result {
        warn!(mode = request.mode().name(), error = %e, "coaching request failed");
    }
    result
}

fn parse_level(value: &str) -> Result<ComplexityLevel, String> {
    value.parse().map_err(|e: CoachError| e.to_string())
}

fn parse_mode(value: &str) -> Result<PracticeMode, String> {
    get_mode(value).ok_or_else(|| {
        format!(
            "Unknown practice mode: '{}'. Available modes: {}",
            value,
            practice_mode::available_modes().join(", ")
        )
    })
}
