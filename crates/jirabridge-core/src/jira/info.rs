//! Issue metadata plus the parsed environment table

use crate::document::{extract_environments, ColumnPolicy, ParsedRow};
use crate::error::Result;
use crate::http::browse_url;
use crate::traits::IssueTracker;
use serde::Serialize;

/// Issue summary handed to downstream workflow steps
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IssueInfo {
    /// Issue key
    pub key: String,
    /// Browse URL
    pub url: String,
    /// Summary line
    pub summary: String,
    /// Workflow status name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Rows from every accepted environment table, in block order
    pub environments: Vec<ParsedRow>,
}

/// Result of an issue info request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IssueInfoOutcome {
    /// The issue does not exist
    IssueNotFound,
    /// The environment field is absent or has no content
    NoEnvironment {
        /// Issue key
        key: String,
    },
    /// Environment content was present (it may still have produced zero rows)
    Found(IssueInfo),
}

/// Fetch `key` and extract its environment table.
pub async fn issue_info<T: IssueTracker>(
    tracker: &T,
    base_url: &str,
    key: &str,
    policy: &ColumnPolicy,
) -> Result<IssueInfoOutcome> {
    let issue = match tracker.get_issue(key).await {
        Ok(issue) => issue,
        Err(e) if e.is_not_found() => {
            tracing::info!(key, "jira issue not found");
            return Ok(IssueInfoOutcome::IssueNotFound);
        }
        Err(e) => return Err(e),
    };

    let blocks = match issue.environment {
        Some(blocks) if !blocks.is_empty() => blocks,
        _ => {
            tracing::info!(key, "no environment information found");
            return Ok(IssueInfoOutcome::NoEnvironment { key: issue.key });
        }
    };

    let environments = extract_environments(&blocks, policy);
    tracing::info!(key, rows = environments.len(), "environment table parsed");

    Ok(IssueInfoOutcome::Found(IssueInfo {
        url: browse_url(base_url, &issue.key),
        key: issue.key,
        summary: issue.summary,
        status: issue.status,
        environments,
    }))
}
