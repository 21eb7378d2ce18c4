//! In-memory tracker for unit tests

use super::{Issue, Transition};
use crate::error::{Error, Result};
use crate::traits::IssueTracker;
use parking_lot::Mutex;
use serde_json::Value;
use std::collections::HashMap;

#[derive(Default)]
pub(crate) struct FakeTracker {
    pub issues: HashMap<String, Issue>,
    pub transitions: HashMap<String, Vec<Transition>>,
    pub applied: Mutex<Vec<(String, String)>>,
    pub comments: Mutex<Vec<(String, Value)>>,
}

impl FakeTracker {
    pub fn with_issue(mut self, issue: Issue) -> Self {
        self.issues.insert(issue.key.clone(), issue);
        self
    }

    pub fn with_transitions(mut self, key: &str, transitions: &[(&str, &str)]) -> Self {
        self.transitions.insert(
            key.to_string(),
            transitions
                .iter()
                .map(|(id, name)| Transition {
                    id: id.to_string(),
                    name: name.to_string(),
                })
                .collect(),
        );
        self
    }

    fn ensure_exists(&self, key: &str) -> Result<()> {
        if self.issues.contains_key(key) {
            Ok(())
        } else {
            Err(Error::NotFound(format!("issue {}", key)))
        }
    }
}

impl IssueTracker for FakeTracker {
    async fn get_issue(&self, key: &str) -> Result<Issue> {
        self.issues
            .get(key)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("issue {}", key)))
    }

    async fn get_transitions(&self, key: &str) -> Result<Vec<Transition>> {
        self.ensure_exists(key)?;
        Ok(self.transitions.get(key).cloned().unwrap_or_default())
    }

    async fn do_transition(&self, key: &str, transition_id: &str) -> Result<()> {
        self.ensure_exists(key)?;
        self.applied
            .lock()
            .push((key.to_string(), transition_id.to_string()));
        Ok(())
    }

    async fn add_comment(&self, key: &str, document: &Value) -> Result<Option<String>> {
        self.ensure_exists(key)?;
        let mut comments = self.comments.lock();
        comments.push((key.to_string(), document.clone()));
        Ok(Some(comments.len().to_string()))
    }
}

pub(crate) fn issue(key: &str, issue_type: &str) -> Issue {
    Issue {
        key: key.to_string(),
        summary: format!("Summary of {}", key),
        status: Some("To Do".to_string()),
        issue_type: Some(issue_type.to_string()),
        environment: None,
    }
}
