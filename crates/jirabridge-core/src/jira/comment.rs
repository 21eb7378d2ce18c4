//! Post plain or pre-formatted comments

use crate::error::{Error, Result};
use crate::traits::IssueTracker;
use serde_json::{json, Value};

/// Comment content
#[derive(Debug, Clone, PartialEq)]
pub enum CommentBody {
    /// Plain text; blank lines separate paragraphs, newlines become hard breaks
    Plain(String),
    /// A complete ADF document, posted verbatim
    Document(Value),
}

impl CommentBody {
    /// Interpret an action input: a JSON object with `"type": "doc"` is a
    /// formatted document, anything else is plain text.
    pub fn from_input(text: &str) -> Result<Self> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(Error::Config("JIRA_COMMENT_BODY is empty".to_string()));
        }

        if trimmed.starts_with('{') {
            if let Ok(value) = serde_json::from_str::<Value>(trimmed) {
                if value.get("type").and_then(Value::as_str) == Some("doc") {
                    return Ok(CommentBody::Document(value));
                }
            }
        }

        Ok(CommentBody::Plain(trimmed.to_string()))
    }

    /// ADF document for the REST API
    pub fn to_document(&self) -> Value {
        match self {
            CommentBody::Plain(text) => plain_document(text),
            CommentBody::Document(doc) => doc.clone(),
        }
    }
}

/// What happened when commenting
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommentOutcome {
    /// The issue does not exist
    IssueNotFound,
    /// Comment created
    Posted {
        /// Id of the new comment, when reported
        id: Option<String>,
    },
}

/// Post `body` as a comment on `key`.
pub async fn add_comment<T: IssueTracker>(
    tracker: &T,
    key: &str,
    body: &CommentBody,
) -> Result<CommentOutcome> {
    match tracker.add_comment(key, &body.to_document()).await {
        Ok(id) => {
            tracing::info!(key, id = ?id, "comment posted");
            Ok(CommentOutcome::Posted { id })
        }
        Err(e) if e.is_not_found() => {
            tracing::info!(key, "jira issue not found");
            Ok(CommentOutcome::IssueNotFound)
        }
        Err(e) => Err(e),
    }
}

fn plain_document(text: &str) -> Value {
    let mut paragraphs = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for line in text.lines() {
        if line.trim().is_empty() {
            flush_paragraph(&mut paragraphs, &mut current);
        } else {
            current.push(line.trim_end());
        }
    }
    flush_paragraph(&mut paragraphs, &mut current);

    json!({
        "type": "doc",
        "version": 1,
        "content": paragraphs,
    })
}

fn flush_paragraph(paragraphs: &mut Vec<Value>, lines: &mut Vec<&str>) {
    if lines.is_empty() {
        return;
    }

    let mut inline = Vec::with_capacity(lines.len() * 2);
    for (i, line) in lines.drain(..).enumerate() {
        if i > 0 {
            inline.push(json!({"type": "hardBreak"}));
        }
        inline.push(json!({"type": "text", "text": line}));
    }

    paragraphs.push(json!({"type": "paragraph", "content": inline}));
}
