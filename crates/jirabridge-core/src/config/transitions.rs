//! Issue type to transition name mapping

use std::collections::HashMap;

/// Which transition to apply for each issue type
///
/// Parsed from `"Story:Code Review;Bug:Code Review"`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransitionMap(HashMap<String, String>);

impl TransitionMap {
    /// Default mapping used when no input is given
    pub const DEFAULT: &'static str = "Story:Code Review;Bug:Code Review";

    /// Parse `Type:Transition` pairs separated by `;`.
    ///
    /// Malformed entries are skipped with a warning.
    pub fn parse(config: &str) -> Self {
        let mut map = HashMap::new();

        for entry in config.split(';').filter(|e| !e.is_empty()) {
            let mut parts = entry.split(':').map(str::trim);
            let issue_type = parts.next().unwrap_or_default();
            let transition = parts.next().unwrap_or_default();

            if issue_type.is_empty() || transition.is_empty() {
                tracing::warn!(
                    entry,
                    "invalid transition config, expected \"IssueType:TransitionName\""
                );
                continue;
            }
            map.insert(issue_type.to_string(), transition.to_string());
        }

        Self(map)
    }

    /// Transition configured for `issue_type` (exact match)
    pub fn get(&self, issue_type: &str) -> Option<&str> {
        self.0.get(issue_type).map(String::as_str)
    }

    /// Number of configured issue types
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when nothing is configured
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for TransitionMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}
