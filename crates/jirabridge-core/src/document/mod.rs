//! Rich-text content tree (Atlassian Document Format subset)
//!
//! Only the node kinds that matter for table extraction get their own
//! variant. Everything else is kept as [`ContentNode::Other`] so traversal
//! never has to care about shapes it does not understand.

pub mod table;
pub mod text;

pub use table::{
    camel_case_key, extract_environments, extract_table, ColumnPolicy, EnvironmentRow,
    FixedSchema, KeyNormalizer, ParsedRow, TableExtraction,
};
pub use text::extract_lines;

use serde_json::Value;

/// A node in a rich-text document tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentNode {
    /// Document root
    Doc {
        /// Top-level blocks
        content: Vec<ContentNode>,
    },
    /// Table block; children are rows, row 0 is the header
    Table {
        /// Rows
        content: Vec<ContentNode>,
    },
    /// Table row; children are cells
    TableRow {
        /// Cells
        content: Vec<ContentNode>,
    },
    /// Header cell
    TableHeader {
        /// Block children (paragraphs)
        content: Vec<ContentNode>,
    },
    /// Data cell
    TableCell {
        /// Block children (paragraphs)
        content: Vec<ContentNode>,
    },
    /// Paragraph with either direct text or inline children
    Paragraph {
        /// Direct text value, when the paragraph carries one
        text: Option<String>,
        /// Inline children
        content: Vec<ContentNode>,
    },
    /// Inline text run
    Text {
        /// Literal value
        text: String,
    },
    /// Inline line break
    HardBreak,
    /// Any other node kind
    Other {
        /// Wire tag, empty when the node had none
        kind: String,
        /// Children, if any
        content: Vec<ContentNode>,
    },
}

impl ContentNode {
    /// Build a node tree from fetched JSON.
    ///
    /// Never fails: missing `type` or `content` and non-string `text` values
    /// degrade to [`ContentNode::Other`] / empty children / absent text.
    pub fn from_value(value: &Value) -> Self {
        let kind = value.get("type").and_then(Value::as_str).unwrap_or("");
        let content = children(value);

        match kind {
            "doc" => ContentNode::Doc { content },
            "table" => ContentNode::Table { content },
            "tableRow" => ContentNode::TableRow { content },
            "tableHeader" => ContentNode::TableHeader { content },
            "tableCell" => ContentNode::TableCell { content },
            "paragraph" => ContentNode::Paragraph {
                text: string_field(value, "text"),
                content,
            },
            "text" => ContentNode::Text {
                text: string_field(value, "text").unwrap_or_default(),
            },
            "hardBreak" => ContentNode::HardBreak,
            other => ContentNode::Other {
                kind: other.to_string(),
                content,
            },
        }
    }

    /// Build a list of blocks from a JSON array; anything else yields no blocks.
    pub fn list_from_value(value: &Value) -> Vec<Self> {
        value
            .as_array()
            .map(|items| items.iter().map(Self::from_value).collect())
            .unwrap_or_default()
    }

    /// Wire tag of this node
    pub fn kind(&self) -> &str {
        match self {
            ContentNode::Doc { .. } => "doc",
            ContentNode::Table { .. } => "table",
            ContentNode::TableRow { .. } => "tableRow",
            ContentNode::TableHeader { .. } => "tableHeader",
            ContentNode::TableCell { .. } => "tableCell",
            ContentNode::Paragraph { .. } => "paragraph",
            ContentNode::Text { .. } => "text",
            ContentNode::HardBreak => "hardBreak",
            ContentNode::Other { kind, .. } => kind,
        }
    }

    /// Ordered children; leaf nodes have none
    pub fn children(&self) -> &[ContentNode] {
        match self {
            ContentNode::Doc { content }
            | ContentNode::Table { content }
            | ContentNode::TableRow { content }
            | ContentNode::TableHeader { content }
            | ContentNode::TableCell { content }
            | ContentNode::Paragraph { content, .. }
            | ContentNode::Other { content, .. } => content,
            ContentNode::Text { .. } | ContentNode::HardBreak => &[],
        }
    }
}

fn children(value: &Value) -> Vec<ContentNode> {
    value
        .get("content")
        .map(ContentNode::list_from_value)
        .unwrap_or_default()
}

fn string_field(value: &Value, field: &str) -> Option<String> {
    value.get(field).and_then(Value::as_str).map(str::to_string)
}
