//! Issue key extraction from free text (PR titles, messages)

use crate::error::Result;
use regex::{Regex, RegexBuilder};

/// Compiled issue key patterns
#[derive(Debug, Clone)]
pub struct IssueKeyExtractor {
    spaced: Regex,
    glued: Regex,
    pattern: Regex,
}

impl IssueKeyExtractor {
    /// Pattern used when none is configured
    pub const DEFAULT_PATTERN: &'static str = r"([A-Z0-9]+)[\s-]?(\d+)";

    /// Compile `pattern` (case-insensitive). It must capture the project and
    /// the number as groups 1 and 2.
    pub fn new(pattern: &str) -> Result<Self> {
        Ok(Self {
            spaced: case_insensitive(r"([a-z0-9]+)[\s-]([0-9]+)")?,
            glued: case_insensitive(r"([a-z]+)([0-9]+)")?,
            pattern: case_insensitive(pattern)?,
        })
    }

    /// Rewrite the first `ABC 5606` / `abc5606` style key to `ABC-5606` / `abc-5606`.
    pub fn normalize(&self, text: &str) -> String {
        let spaced = self.spaced.replacen(text, 1, "${1}-${2}");
        self.glued.replacen(&spaced, 1, "${1}-${2}").into_owned()
    }

    /// Extract an upper-cased `PROJECT-123` key from `text`.
    pub fn extract(&self, text: &str) -> Option<String> {
        if text.is_empty() {
            return None;
        }

        let normalized = self.normalize(text);
        let caps = self.pattern.captures(&normalized)?;
        let project = caps.get(1)?.as_str();
        let number = caps.get(2)?.as_str();

        Some(format!("{}-{}", project.to_uppercase(), number))
    }

    /// Resolve a directly supplied key: extract when the pattern matches,
    /// otherwise upper-case the normalized text.
    pub fn resolve_direct(&self, key: &str) -> String {
        self.extract(key)
            .unwrap_or_else(|| self.normalize(key).to_uppercase())
    }
}

fn case_insensitive(pattern: &str) -> Result<Regex> {
    Ok(RegexBuilder::new(pattern).case_insensitive(true).build()?)
}
