//! File output writers for action results

use super::format::heredoc_entry;
use crate::error::{Error, Result};
use serde::Serialize;
use std::io::Write;
use std::path::Path;

/// Output file writer
pub struct OutputWriter;

impl OutputWriter {
    /// Append `name` to a `$GITHUB_OUTPUT`-style file using heredoc syntax.
    pub fn append_github_output(path: &Path, name: &str, value: &str) -> Result<()> {
        append_heredoc(path, name, value)
    }

    /// Export `name` to later steps through a `$GITHUB_ENV`-style file.
    ///
    /// The name must be usable as an environment variable.
    pub fn append_github_env(path: &Path, name: &str, value: &str) -> Result<()> {
        if name.is_empty() || name.contains(&['=', '\n', '\r', '\0'][..]) {
            return Err(Error::Output(format!(
                "invalid environment variable name {:?}",
                name
            )));
        }
        append_heredoc(path, name, value)
    }

    /// Write `value` as JSON to `path`, replacing any existing file.
    pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
        let content = serde_json::to_string(value)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

fn append_heredoc(path: &Path, name: &str, value: &str) -> Result<()> {
    let mut file = std::fs::OpenOptions::new()
        .append(true)
        .create(true)
        .open(path)
        .map_err(|e| Error::Output(format!("cannot open {}: {}", path.display(), e)))?;
    file.write_all(heredoc_entry(name, value).as_bytes())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_append_github_output() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("github_output");
        std::fs::write(&path, "existing=1\n").unwrap();

        OutputWriter::append_github_output(&path, "JIRA_ISSUE_INFO", r#"{"key":"A-1"}"#)
            .unwrap();
        OutputWriter::append_github_output(&path, "other", "x").unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            content,
            concat!(
                "existing=1\n",
                "JIRA_ISSUE_INFO<<JIRABRIDGE_EOF\n{\"key\":\"A-1\"}\nJIRABRIDGE_EOF\n",
                "other<<JIRABRIDGE_EOF\nx\nJIRABRIDGE_EOF\n",
            )
        );
    }

    #[test]
    fn test_append_github_env() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("github_env");

        OutputWriter::append_github_env(&path, "JIRA_ISSUE_INFO", "{\"key\":\"A-1\"}\nmore")
            .unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            content,
            "JIRA_ISSUE_INFO<<JIRABRIDGE_EOF\n{\"key\":\"A-1\"}\nmore\nJIRABRIDGE_EOF\n"
        );

        let err = OutputWriter::append_github_env(&path, "BAD=NAME", "x").unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::Output);
        assert!(OutputWriter::append_github_env(&path, "", "x").is_err());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), content);
    }

    #[test]
    fn test_append_to_missing_dir_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nope").join("out");
        let err = OutputWriter::append_github_output(&path, "a", "b").unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::Output);
    }

    #[test]
    fn test_write_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("info.json");
        OutputWriter::write_json(&path, &serde_json::json!({"key": "A-1"})).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, r#"{"key":"A-1"}"#);
    }
}
