//! # jirabridge Core
//!
//! Jira integration for GitHub Actions:
//! - **Transition** an issue according to its issue type
//! - **IssueInfo**: fetch issue metadata and parse the environment table
//!   embedded in the issue's rich-text environment field
//! - **Comment**: post plain or pre-formatted comments
//!
//! ## Example
//!
//! ```no_run
//! use jirabridge_core::config::{ActionInputs, EnvSource};
//! use jirabridge_core::{run, RunOutcome};
//!
//! # async fn example() -> jirabridge_core::Result<()> {
//! let inputs = ActionInputs::from_source(&EnvSource)?;
//! if let RunOutcome::IssueInfo(outcome) = run(&inputs).await? {
//!     println!("{:?}", outcome);
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs, rust_2018_idioms)]

pub mod config;
pub mod document;
pub mod error;
pub mod http;
pub mod jira;
pub mod output;
pub mod traits;

pub use error::{Error, ErrorKind, Result};
pub use http::{ClientConfig, JiraClient};
pub use jira::{CommentOutcome, IssueInfo, IssueInfoOutcome, TransitionOutcome};
pub use traits::IssueTracker;

use config::{ActionInputs, ActionsMode};
use jira::CommentBody;

/// Result of one action run
#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    /// No Jira inputs were supplied at all; nothing was done
    Unconfigured,
    /// Transition mode result
    Transition(TransitionOutcome),
    /// Issue info mode result
    IssueInfo(IssueInfoOutcome),
    /// Comment mode result
    Comment(CommentOutcome),
}

/// Run the configured mode against Jira.
pub async fn run(inputs: &ActionInputs) -> Result<RunOutcome> {
    if inputs.is_unconfigured() {
        tracing::info!("no Jira configuration provided, exiting");
        return Ok(RunOutcome::Unconfigured);
    }

    let client = JiraClient::new(inputs.require_connection()?);
    run_with(&client, inputs).await
}

/// Run the configured mode against any [`IssueTracker`].
///
/// Connection inputs are not checked here; `inputs.issue_key` must be set.
pub async fn run_with<T: IssueTracker>(tracker: &T, inputs: &ActionInputs) -> Result<RunOutcome> {
    if inputs.issue_key.is_empty() {
        return Err(Error::Config("no Jira issue key could be resolved".to_string()));
    }

    let key = inputs.issue_key.as_str();
    tracing::info!(mode = %inputs.mode, key, "running");

    match inputs.mode {
        ActionsMode::Transition => {
            jira::transition_issue(tracker, key, &inputs.transitions)
                .await
                .map(RunOutcome::Transition)
        }
        ActionsMode::IssueInfo => {
            jira::issue_info(tracker, &inputs.base_url, key, &inputs.column_policy)
                .await
                .map(RunOutcome::IssueInfo)
        }
        ActionsMode::Comment => {
            let body = CommentBody::from_input(inputs.comment_body.as_deref().unwrap_or_default())?;
            jira::add_comment(tracker, key, &body)
                .await
                .map(RunOutcome::Comment)
        }
    }
}

/// Synchronous variant of [`run`]
///
/// This creates a new Tokio runtime and blocks on the async version.
pub fn run_sync(inputs: &ActionInputs) -> Result<RunOutcome> {
    tokio::runtime::Runtime::new()
        .map_err(|e| Error::Runtime(e.to_string()))?
        .block_on(run(inputs))
}
