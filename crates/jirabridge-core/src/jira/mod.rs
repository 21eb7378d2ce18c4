//! Issue operations: transition, issue info, comment

pub mod comment;
pub mod info;
pub mod transition;

#[cfg(test)]
pub(crate) mod fake;

pub use comment::{add_comment, CommentBody, CommentOutcome};
pub use info::{issue_info, IssueInfo, IssueInfoOutcome};
pub use transition::{transition_issue, TransitionOutcome};

use crate::document::ContentNode;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A workflow transition offered for an issue
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Transition {
    /// Transition id
    pub id: String,
    /// Display name, e.g. "Code Review"
    pub name: String,
}

/// The parts of a fetched issue the action uses
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    /// Issue key, e.g. `PROJ-123`
    pub key: String,
    /// Summary line
    pub summary: String,
    /// Workflow status name
    pub status: Option<String>,
    /// Issue type name, e.g. `Story`
    pub issue_type: Option<String>,
    /// Blocks of the rich-text environment field; `None` when the field is absent
    pub environment: Option<Vec<ContentNode>>,
}

#[derive(Debug, Deserialize)]
struct RawIssue {
    key: String,
    #[serde(default)]
    fields: RawFields,
}

#[derive(Debug, Default, Deserialize)]
struct RawFields {
    summary: Option<String>,
    status: Option<Named>,
    issuetype: Option<Named>,
    environment: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct Named {
    #[serde(default)]
    name: Option<String>,
}

impl Issue {
    /// Decode an issue from the REST response.
    ///
    /// Only `key` is mandatory; the environment document is converted
    /// leniently.
    pub fn from_value(value: &Value) -> Result<Self> {
        let raw = RawIssue::deserialize(value)?;
        let environment = raw
            .fields
            .environment
            .filter(|env| !env.is_null())
            .map(|env| {
                env.get("content")
                    .map(ContentNode::list_from_value)
                    .unwrap_or_default()
            });

        Ok(Self {
            key: raw.key,
            summary: raw.fields.summary.unwrap_or_default(),
            status: raw.fields.status.and_then(|s| s.name),
            issue_type: raw.fields.issuetype.and_then(|t| t.name),
            environment,
        })
    }
}
