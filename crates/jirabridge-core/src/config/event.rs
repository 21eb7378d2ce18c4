//! GitHub event payload (only the titles we search for issue keys)

use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
struct Titled {
    #[serde(default)]
    title: Option<String>,
}

/// Subset of a GitHub webhook event payload
#[derive(Debug, Default, Deserialize)]
pub struct GitHubEvent {
    #[serde(default)]
    pull_request: Option<Titled>,
    #[serde(default)]
    issue: Option<Titled>,
}

impl GitHubEvent {
    /// Parse an event payload. Invalid JSON logs a warning and yields an
    /// empty event.
    pub fn parse(raw: &str) -> Self {
        match serde_json::from_str(raw) {
            Ok(event) => event,
            Err(e) => {
                tracing::warn!(error = %e, "failed to parse event input");
                Self::default()
            }
        }
    }

    /// Read the payload file the runner points `GITHUB_EVENT_PATH` at.
    pub fn from_file(path: &str) -> Self {
        match std::fs::read_to_string(path) {
            Ok(raw) => Self::parse(&raw),
            Err(e) => {
                tracing::debug!(path, error = %e, "no readable event payload");
                Self::default()
            }
        }
    }

    /// Pull request title, falling back to the issue title
    pub fn title(&self) -> Option<&str> {
        fn pick(t: &Option<Titled>) -> Option<&str> {
            t.as_ref()
                .and_then(|t| t.title.as_deref())
                .filter(|s| !s.is_empty())
        }
        pick(&self.pull_request).or_else(|| pick(&self.issue))
    }
}
