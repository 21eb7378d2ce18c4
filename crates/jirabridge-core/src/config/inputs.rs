//! Resolved action inputs

use super::event::GitHubEvent;
use super::issue_key::IssueKeyExtractor;
use super::transitions::TransitionMap;
use super::InputSource;
use crate::document::{ColumnPolicy, FixedSchema};
use crate::error::{Error, Result};
use crate::http::ClientConfig;
use std::fmt;
use std::str::FromStr;

/// Output name used when `OUTPUT_KEY` is not set
pub const DEFAULT_OUTPUT_KEY: &str = "JIRA_ISSUE_INFO";

/// What the action should do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionsMode {
    /// Move the issue along its workflow
    Transition,
    /// Fetch issue metadata and environment table
    IssueInfo,
    /// Post a comment
    Comment,
}

impl ActionsMode {
    /// Canonical name
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Transition => "Transition",
            Self::IssueInfo => "IssueInfo",
            Self::Comment => "Comment",
        }
    }
}

impl FromStr for ActionsMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "transition" => Ok(Self::Transition),
            "issueinfo" | "issue-info" | "issue_info" => Ok(Self::IssueInfo),
            "comment" | "newcomment" => Ok(Self::Comment),
            other => Err(Error::Config(format!(
                "unknown ACTIONS_MODE '{}' (expected Transition, IssueInfo or Comment)",
                other
            ))),
        }
    }
}

impl fmt::Display for ActionsMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which column policy to use for environment tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SchemaMode {
    /// Known labels from `JIRA_ENV_COLUMNS`
    #[default]
    Fixed,
    /// Every header becomes a key
    Open,
}

impl FromStr for SchemaMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fixed" => Ok(Self::Fixed),
            "open" => Ok(Self::Open),
            other => Err(Error::Config(format!(
                "unknown JIRA_ENV_SCHEMA '{}' (expected fixed or open)",
                other
            ))),
        }
    }
}

/// Everything the action needs, resolved once at startup
#[derive(Clone)]
pub struct ActionInputs {
    /// Selected mode
    pub mode: ActionsMode,
    /// Jira site, e.g. `https://example.atlassian.net`
    pub base_url: String,
    /// Account email used for basic auth
    pub user_email: String,
    /// API token used for basic auth
    pub api_token: String,
    /// Name of the action output
    pub output_key: String,
    /// Resolved issue key, empty when none was found
    pub issue_key: String,
    /// Issue type to transition name
    pub transitions: TransitionMap,
    /// Comment body for [`ActionsMode::Comment`]
    pub comment_body: Option<String>,
    /// Environment table policy
    pub column_policy: ColumnPolicy,
}

impl fmt::Debug for ActionInputs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionInputs")
            .field("mode", &self.mode)
            .field("base_url", &self.base_url)
            .field("user_email", &self.user_email)
            .field("api_token", &redacted(&self.api_token))
            .field("output_key", &self.output_key)
            .field("issue_key", &self.issue_key)
            .field("transitions", &self.transitions)
            .field("comment_body", &self.comment_body)
            .field("column_policy", &self.column_policy)
            .finish()
    }
}

fn redacted(value: &str) -> &'static str {
    if value.is_empty() {
        ""
    } else {
        "<redacted>"
    }
}

impl ActionInputs {
    /// Resolve every input from `source`.
    pub fn from_source(source: &impl InputSource) -> Result<Self> {
        let direct_key = source.get("JIRA_ISSUE_KEY");

        let mode = match source.get("ACTIONS_MODE") {
            Some(explicit) => explicit.parse()?,
            None if direct_key.is_some() => ActionsMode::IssueInfo,
            None => ActionsMode::Transition,
        };

        let extractor = IssueKeyExtractor::new(&source.get_or(
            "JIRA_ISSUE_KEY_PATTERN",
            IssueKeyExtractor::DEFAULT_PATTERN,
        ))?;
        let issue_key = resolve_issue_key(source, &extractor, direct_key.as_deref());

        let schema: SchemaMode = source.get_or("JIRA_ENV_SCHEMA", "fixed").parse()?;
        let column_policy = match schema {
            SchemaMode::Fixed => ColumnPolicy::Fixed(FixedSchema::parse(
                &source.get_or("JIRA_ENV_COLUMNS", FixedSchema::DEFAULT_COLUMNS),
            )?),
            SchemaMode::Open => ColumnPolicy::open(),
        };

        Ok(Self {
            mode,
            base_url: source
                .get("JIRA_BASE_URL")
                .map(|u| u.trim_end_matches('/').to_string())
                .unwrap_or_default(),
            user_email: source.get("JIRA_USER_EMAIL").unwrap_or_default(),
            api_token: source.get("JIRA_API_TOKEN").unwrap_or_default(),
            output_key: source.get_or("OUTPUT_KEY", DEFAULT_OUTPUT_KEY),
            issue_key,
            transitions: TransitionMap::parse(
                &source.get_or("JIRA_ISSUE_TYPE_TRANSITION", TransitionMap::DEFAULT),
            ),
            comment_body: source.get("JIRA_COMMENT_BODY"),
            column_policy,
        })
    }

    /// True when no connection input and no issue key were supplied at all.
    pub fn is_unconfigured(&self) -> bool {
        self.base_url.is_empty()
            && self.user_email.is_empty()
            && self.api_token.is_empty()
            && self.issue_key.is_empty()
    }

    /// Connection settings, or a config error naming what is missing.
    pub fn require_connection(&self) -> Result<ClientConfig> {
        let missing: Vec<&str> = [
            ("JIRA_BASE_URL", &self.base_url),
            ("JIRA_USER_EMAIL", &self.user_email),
            ("JIRA_API_TOKEN", &self.api_token),
            ("JIRA_ISSUE_KEY", &self.issue_key),
        ]
        .iter()
        .filter(|(_, v)| v.is_empty())
        .map(|(name, _)| *name)
        .collect();

        if !missing.is_empty() {
            return Err(Error::Config(format!(
                "missing required inputs: {}",
                missing.join(", ")
            )));
        }

        Ok(ClientConfig::new(
            self.base_url.clone(),
            self.user_email.clone(),
            self.api_token.clone(),
        ))
    }
}

fn resolve_issue_key(
    source: &impl InputSource,
    extractor: &IssueKeyExtractor,
    direct_key: Option<&str>,
) -> String {
    if let Some(key) = direct_key {
        return extractor.resolve_direct(key);
    }

    let event = match source.get("event") {
        Some(raw) => GitHubEvent::parse(&raw),
        None => source
            .get("GITHUB_EVENT_PATH")
            .map(|path| GitHubEvent::from_file(&path))
            .unwrap_or_default(),
    };

    if let Some(key) = event.title().and_then(|t| extractor.extract(t)) {
        return key;
    }

    source
        .get("pull-open-message")
        .and_then(|msg| extractor.extract(&msg))
        .unwrap_or_default()
}
