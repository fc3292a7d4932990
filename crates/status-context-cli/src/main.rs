//! status-context CLI
//!
//! Resolves the commit statuses a build would publish, for checking a
//! notification configuration without a CI host.
//!
//! ## Commands
//!
//! - `resolve`: Print the notification requests for a build as JSON
//! - `check`: Validate a settings file and print the normalized config

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::{info, Level};

use status_context::{
    classify_result, load_config, resolve_notifications, BuildContext, BuildOutcome,
    BuildProgress, HeadKind, MacroExpander, NotificationRequest, StatusState,
    TokenMacroExpander, TracingSink,
};

#[derive(Parser)]
#[command(name = "status-context")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Resolve commit-status contexts and messages for CI builds", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve the statuses to publish for a build
    Resolve {
        /// Settings file (.toml or .json)
        #[arg(short, long)]
        config: PathBuf,

        /// What is being built: branch, pr-head or pr-merge
        #[arg(long, default_value = "branch")]
        head: HeadKind,

        /// Build result (queued, pending, success, unstable, failure,
        /// not-built, aborted or any host result name)
        #[arg(short, long, default_value = "pending")]
        result: String,

        /// Build identifier used in log output
        #[arg(long, default_value = "local")]
        build_id: String,

        /// Target URL attached to every status
        #[arg(long, default_value = "")]
        target_url: String,

        /// Status state (derived from the result if omitted)
        #[arg(long)]
        state: Option<StatusState>,

        /// Ask the host to ignore delivery errors
        #[arg(long)]
        ignore_error: bool,

        /// Host's single static message, used with messageMode = hostDefault
        #[arg(long)]
        default_message: Option<String>,

        /// Build variable for macro expansion (repeatable, KEY=VALUE)
        #[arg(long = "var", value_name = "KEY=VALUE")]
        vars: Vec<String>,

        /// Leave unknown macro tokens in place instead of failing expansion
        #[arg(long)]
        lenient: bool,
    },

    /// Validate a settings file and print the resulting configuration
    Check {
        /// Settings file (.toml or .json)
        #[arg(short, long)]
        config: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    status_context::init_tracing(cli.json, level);

    match cli.command {
        Commands::Resolve {
            config,
            head,
            result,
            build_id,
            target_url,
            state,
            ignore_error,
            default_message,
            vars,
            lenient,
        } => {
            let build = build_context(BuildArgs {
                build_id,
                head,
                result: &result,
                target_url,
                state,
                ignore_error,
                default_message,
                vars: &vars,
            })?;
            let expander = if lenient {
                TokenMacroExpander::lenient()
            } else {
                TokenMacroExpander::strict()
            };
            let requests = cmd_resolve(&config, &build, &expander)?;
            print_json(&requests)
        }
        Commands::Check { config } => cmd_check(&config),
    }
}

struct BuildArgs<'a> {
    build_id: String,
    head: HeadKind,
    result: &'a str,
    target_url: String,
    state: Option<StatusState>,
    ignore_error: bool,
    default_message: Option<String>,
    vars: &'a [String],
}

/// Map a CLI result name onto build progress; `queued` and `pending` are
/// the two not-yet-terminal states.
fn parse_progress(result: &str) -> BuildProgress {
    match result.trim().to_ascii_lowercase().as_str() {
        "queued" => BuildProgress::Queued,
        "pending" | "running" => BuildProgress::Running,
        other => match other.parse::<BuildOutcome>() {
            Ok(outcome) => BuildProgress::Completed(outcome),
            Err(never) => match never {},
        },
    }
}

fn parse_var(raw: &str) -> Result<(String, String)> {
    let (key, value) = raw
        .split_once('=')
        .with_context(|| format!("Invalid --var '{}': expected KEY=VALUE", raw))?;
    let key = key.trim();
    if key.is_empty() {
        anyhow::bail!("Invalid --var '{}': empty key", raw);
    }
    Ok((key.to_string(), value.to_string()))
}

fn build_context(args: BuildArgs<'_>) -> Result<BuildContext> {
    let category = classify_result(&parse_progress(args.result));
    let variables = args
        .vars
        .iter()
        .map(|raw| parse_var(raw))
        .collect::<Result<BTreeMap<_, _>>>()?;

    let mut build = BuildContext::new(args.build_id, args.head)
        .with_result(category)
        .with_target_url(args.target_url)
        .with_state(args.state.unwrap_or_else(|| StatusState::for_category(category)))
        .with_ignore_error(args.ignore_error);
    if let Some(message) = args.default_message {
        build = build.with_default_message(message);
    }
    build.variables = variables;
    Ok(build)
}

fn cmd_resolve(
    config_path: &Path,
    build: &BuildContext,
    expander: &dyn MacroExpander,
) -> Result<Vec<NotificationRequest>> {
    let config = load_config(config_path)
        .with_context(|| format!("Failed to load settings from {}", config_path.display()))?;

    let requests = resolve_notifications(&config, build, expander, &TracingSink);
    info!(
        event = "cli.resolved",
        build_id = %build.build_id,
        count = requests.len(),
    );
    Ok(requests)
}

fn cmd_check(config_path: &Path) -> Result<()> {
    let config = load_config(config_path)
        .with_context(|| format!("Failed to load settings from {}", config_path.display()))?;
    info!(event = "cli.config_valid", path = %config_path.display());
    print_json(&config)
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
