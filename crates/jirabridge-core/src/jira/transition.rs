//! Transition an issue based on its type

use super::Transition;
use crate::config::TransitionMap;
use crate::error::Result;
use crate::traits::IssueTracker;

/// What happened when transitioning
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransitionOutcome {
    /// The issue does not exist
    IssueNotFound,
    /// No transition is mapped for this issue type
    NoTransitionConfigured {
        /// Issue type of the fetched issue
        issue_type: String,
    },
    /// The mapped transition is not currently offered
    TransitionUnavailable {
        /// Configured transition name
        wanted: String,
        /// Names the issue does offer
        available: Vec<String>,
    },
    /// The transition was applied
    Transitioned {
        /// Applied transition
        transition: Transition,
    },
}

/// Move `key` to the transition mapped for its issue type.
///
/// Transition names match case-insensitively.
pub async fn transition_issue<T: IssueTracker>(
    tracker: &T,
    key: &str,
    transitions: &TransitionMap,
) -> Result<TransitionOutcome> {
    let issue = match tracker.get_issue(key).await {
        Ok(issue) => issue,
        Err(e) if e.is_not_found() => {
            tracing::info!(key, "jira issue not found");
            return Ok(TransitionOutcome::IssueNotFound);
        }
        Err(e) => return Err(e),
    };

    let issue_type = issue.issue_type.unwrap_or_default();
    let Some(wanted) = transitions.get(&issue_type) else {
        tracing::info!(key, issue_type = %issue_type, "no transition configured for issue type");
        return Ok(TransitionOutcome::NoTransitionConfigured { issue_type });
    };

    let offered = tracker.get_transitions(key).await?;
    let wanted_lower = wanted.to_lowercase();
    let Some(transition) = offered
        .iter()
        .find(|t| t.name.to_lowercase() == wanted_lower)
        .cloned()
    else {
        let available: Vec<String> = offered.into_iter().map(|t| t.name).collect();
        tracing::info!(
            key,
            wanted,
            available = %available.join(", "),
            "transition not available"
        );
        return Ok(TransitionOutcome::TransitionUnavailable {
            wanted: wanted.to_string(),
            available,
        });
    };

    tracker.do_transition(key, &transition.id).await?;
    tracing::info!(key, transition = %transition.name, "issue transitioned");

    Ok(TransitionOutcome::Transitioned { transition })
}
