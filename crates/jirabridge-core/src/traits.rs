//! Trait seam between issue operations and the REST transport

use crate::error::Result;
use crate::jira::{Issue, Transition};
use serde_json::Value;
use std::future::Future;

/// Issue tracker operations used by the action modes
///
/// Static dispatch only: implementors return `impl Future + Send`, so
/// callers stay generic over the tracker with no boxing.
pub trait IssueTracker {
    /// Fetch one issue. A missing issue is [`crate::Error::NotFound`].
    fn get_issue(&self, key: &str) -> impl Future<Output = Result<Issue>> + Send;

    /// Transitions currently available for the issue
    fn get_transitions(&self, key: &str) -> impl Future<Output = Result<Vec<Transition>>> + Send;

    /// Apply a transition by id
    fn do_transition(
        &self,
        key: &str,
        transition_id: &str,
    ) -> impl Future<Output = Result<()>> + Send;

    /// Post a comment with an ADF document body; returns the new comment id
    /// when the server reports one
    fn add_comment(
        &self,
        key: &str,
        document: &Value,
    ) -> impl Future<Output = Result<Option<String>>> + Send;
}
