#[cfg(target_env = "musl")]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use clap::Parser;
use jirabridge_core::config::{ActionInputs, EnvSource, Layered, MapSource};
use jirabridge_core::output::format::{notice, render_issue_info};
use jirabridge_core::output::OutputWriter;
use jirabridge_core::{CommentOutcome, IssueInfo, IssueInfoOutcome, RunOutcome, TransitionOutcome};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "jirabridge",
    version,
    about = "Jira transitions, comments and issue info for GitHub Actions"
)]
struct Cli {
    /// Log format: text or json
    #[arg(long, env = "JIRABRIDGE_LOG_FORMAT", default_value = "text", global = true)]
    log_format: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Resolve action inputs and run the selected mode
    Run(RunArgs),
}

/// Flags override action inputs; anything unset falls back to `KEY` and
/// then `INPUT_KEY` environment variables.
#[derive(clap::Args)]
struct RunArgs {
    /// Mode: Transition, IssueInfo or Comment
    #[arg(long)]
    mode: Option<String>,

    /// Jira site URL
    #[arg(long)]
    base_url: Option<String>,

    /// Jira account email
    #[arg(long)]
    user_email: Option<String>,

    /// Issue key or text containing one
    #[arg(long)]
    issue_key: Option<String>,

    /// Regex with two groups: project and number
    #[arg(long)]
    issue_key_pattern: Option<String>,

    /// Issue type to transition map, e.g. "Story:Code Review;Bug:Done"
    #[arg(long)]
    transitions: Option<String>,

    /// Comment text, or an ADF document as JSON
    #[arg(long)]
    comment_body: Option<String>,

    /// Environment table column labels (comma-separated)
    #[arg(long)]
    env_columns: Option<String>,

    /// Environment table schema: fixed or open
    #[arg(long)]
    env_schema: Option<String>,

    /// Name of the action output for issue info
    #[arg(long)]
    output_key: Option<String>,

    /// Output format: gha, json, text (default: auto-detect)
    #[arg(long, env = "JIRABRIDGE_OUTPUT_FORMAT")]
    output_format: Option<String>,

    /// Also write the issue info JSON to this file
    #[arg(long, env = "JIRABRIDGE_OUTPUT_FILE")]
    output_file: Option<PathBuf>,

    /// Also export the issue info JSON as `OUTPUT_KEY` through $GITHUB_ENV
    #[arg(long, env = "JIRABRIDGE_EXPORT_ENV")]
    export_env: bool,
}

impl RunArgs {
    fn overrides(&self) -> MapSource {
        let mut source = MapSource::new();
        for (key, value) in [
            ("ACTIONS_MODE", &self.mode),
            ("JIRA_BASE_URL", &self.base_url),
            ("JIRA_USER_EMAIL", &self.user_email),
            ("JIRA_ISSUE_KEY", &self.issue_key),
            ("JIRA_ISSUE_KEY_PATTERN", &self.issue_key_pattern),
            ("JIRA_ISSUE_TYPE_TRANSITION", &self.transitions),
            ("JIRA_COMMENT_BODY", &self.comment_body),
            ("JIRA_ENV_COLUMNS", &self.env_columns),
            ("JIRA_ENV_SCHEMA", &self.env_schema),
            ("OUTPUT_KEY", &self.output_key),
        ] {
            if let Some(value) = value {
                source.insert(key, value.clone());
            }
        }
        source
    }
}

/// Output format for the CLI
enum OutputFormat {
    /// GitHub Actions: write to $GITHUB_OUTPUT + summary to stdout
    Gha,
    /// Full JSON to stdout
    Json,
    /// Human-readable text to stdout
    Text,
}

impl OutputFormat {
    fn detect(explicit: Option<&str>) -> Self {
        match explicit {
            Some("gha") => OutputFormat::Gha,
            Some("json") => OutputFormat::Json,
            Some("text") => OutputFormat::Text,
            _ => {
                if std::env::var("GITHUB_ACTIONS").is_ok() {
                    OutputFormat::Gha
                } else {
                    OutputFormat::Text
                }
            }
        }
    }
}

fn init_tracing(format: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if format == "json" {
        builder.json().init();
    } else {
        builder.with_target(false).init();
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(&cli.log_format);

    let code = match cli.command {
        Commands::Run(args) => run_action(args),
    };
    std::process::exit(code);
}

fn run_action(args: RunArgs) -> i32 {
    let source = Layered::new(args.overrides(), EnvSource);
    let inputs = match ActionInputs::from_source(&source) {
        Ok(inputs) => inputs,
        Err(e) => {
            tracing::error!("{e}");
            return 1;
        }
    };

    tracing::info!(
        mode = %inputs.mode,
        base_url = %inputs.base_url,
        user_email = %inputs.user_email,
        issue_key = %inputs.issue_key,
        transitions = ?inputs.transitions,
        "resolved inputs"
    );

    let rt = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build();
    let rt = match rt {
        Ok(rt) => rt,
        Err(e) => {
            tracing::error!("failed to create runtime: {e}");
            return 1;
        }
    };

    let outcome = match rt.block_on(jirabridge_core::run(&inputs)) {
        Ok(outcome) => outcome,
        Err(e) => {
            tracing::error!("{e}");
            return 1;
        }
    };

    let output_format = OutputFormat::detect(args.output_format.as_deref());

    match outcome {
        RunOutcome::Unconfigured => 0,
        RunOutcome::Transition(outcome) => {
            report(&output_format, &describe_transition(&outcome));
            0
        }
        RunOutcome::Comment(outcome) => {
            report(&output_format, &describe_comment(&outcome, &inputs.issue_key));
            0
        }
        RunOutcome::IssueInfo(IssueInfoOutcome::Found(info)) => {
            let sinks = Sinks {
                format: output_format,
                output_file: args.output_file,
                export_env: args.export_env,
            };
            write_issue_info(&info, &inputs.output_key, &sinks)
        }
        RunOutcome::IssueInfo(IssueInfoOutcome::NoEnvironment { key }) => {
            report(
                &output_format,
                &format!("No environment information found for issue {key}"),
            );
            0
        }
        RunOutcome::IssueInfo(IssueInfoOutcome::IssueNotFound) => {
            report(&output_format, &format!("Jira issue {} not found", inputs.issue_key));
            0
        }
    }
}

fn describe_transition(outcome: &TransitionOutcome) -> String {
    match outcome {
        TransitionOutcome::IssueNotFound => "Jira issue not found".to_string(),
        TransitionOutcome::NoTransitionConfigured { issue_type } => {
            format!("No transition configured for issue type \"{issue_type}\"")
        }
        TransitionOutcome::TransitionUnavailable { wanted, available } => format!(
            "Transition \"{wanted}\" not available. Available transitions: {}",
            available.join(", ")
        ),
        TransitionOutcome::Transitioned { transition } => {
            format!("Jira issue transitioned to \"{}\"", transition.name)
        }
    }
}

fn describe_comment(outcome: &CommentOutcome, key: &str) -> String {
    match outcome {
        CommentOutcome::IssueNotFound => format!("Jira issue {key} not found"),
        CommentOutcome::Posted { id: Some(id) } => format!("Comment {id} added to {key}"),
        CommentOutcome::Posted { id: None } => format!("Comment added to {key}"),
    }
}

/// Status line: an annotation under Actions, plain text otherwise
fn report(format: &OutputFormat, line: &str) {
    match format {
        OutputFormat::Gha => print_line(&notice(line)),
        OutputFormat::Json | OutputFormat::Text => print_line(line),
    }
}

fn print_line(line: &str) {
    let stdout = std::io::stdout();
    let mut w = stdout.lock();
    let _ = writeln!(w, "{line}");
}

/// Where a found issue info result goes
struct Sinks {
    format: OutputFormat,
    output_file: Option<PathBuf>,
    export_env: bool,
}

fn write_issue_info(info: &IssueInfo, output_key: &str, sinks: &Sinks) -> i32 {
    let json = match serde_json::to_string(info) {
        Ok(json) => json,
        Err(e) => {
            tracing::error!("failed to serialize issue info: {e}");
            return 1;
        }
    };

    if let Some(path) = &sinks.output_file {
        if let Err(e) = OutputWriter::write_json(path, info) {
            tracing::error!("{e}");
            return 1;
        }
    }

    if sinks.export_env {
        match std::env::var("GITHUB_ENV") {
            Ok(path) => {
                let path = Path::new(&path);
                if let Err(e) = OutputWriter::append_github_env(path, output_key, &json) {
                    tracing::error!("{e}");
                    return 1;
                }
                tracing::info!(key = output_key, "issue info exported to GITHUB_ENV");
            }
            Err(_) => tracing::warn!("GITHUB_ENV not set, skipping environment export"),
        }
    }

    match sinks.format {
        OutputFormat::Gha => match std::env::var("GITHUB_OUTPUT") {
            Ok(path) => {
                let path = Path::new(&path);
                if let Err(e) = OutputWriter::append_github_output(path, output_key, &json) {
                    tracing::error!("{e}");
                    return 1;
                }
                print_line(&render_issue_info(info));
            }
            Err(_) => {
                tracing::warn!("GITHUB_OUTPUT not set, falling back to stdout");
                print_line(&json);
            }
        },
        OutputFormat::Json => print_line(&json),
        OutputFormat::Text => {
            let stdout = std::io::stdout();
            let mut w = stdout.lock();
            let _ = write!(w, "{}", render_issue_info(info));
        }
    }

    0
}
