//! Environment table extraction
//!
//! Turns `table` blocks into column-indexed rows. Header cells are matched
//! positionally against data cells; there is no explicit column id.
//!
//! Two column policies are supported:
//! - [`ColumnPolicy::Fixed`] resolves a known set of labels (environment,
//!   branch, build paths, upsert paths) by exact trimmed match.
//! - [`ColumnPolicy::Open`] turns every header into a key via a
//!   [`KeyNormalizer`]; duplicate keys resolve last-wins.
//!
//! A table holding only a header row yields zero rows, not "not a table".

use super::text::{extract_lines, first_line};
use super::ContentNode;
use crate::error::{Error, Result};
use serde::Serialize;
use std::collections::BTreeMap;

/// Derives a row key from a header label
pub type KeyNormalizer = fn(&str) -> String;

/// Labels for the fixed four-role environment table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedSchema {
    /// Environment column label (required)
    pub environment: String,
    /// Branch column label (required)
    pub branch: String,
    /// Build paths column label
    pub build_paths: Option<String>,
    /// Upsert paths column label
    pub upsert_paths: Option<String>,
}

impl FixedSchema {
    /// Column labels used when none are configured
    pub const DEFAULT_COLUMNS: &'static str = "Environment,Branch,Path to Build,Path to Upsert";

    /// Parse a comma-separated label list, e.g. `"Environment,Branch,Path to Build"`.
    pub fn parse(columns: &str) -> Result<Self> {
        let labels: Vec<String> = columns.split(',').map(|c| c.trim().to_string()).collect();
        Self::from_columns(&labels)
    }

    /// Map labels to roles by position: environment, branch, build, upsert.
    ///
    /// Environment and branch must be non-empty, and at least one of the two
    /// path columns must be given.
    pub fn from_columns(columns: &[String]) -> Result<Self> {
        let label = |i: usize| {
            columns
                .get(i)
                .map(|c| c.trim())
                .filter(|c| !c.is_empty())
                .map(str::to_string)
        };

        let environment = label(0)
            .ok_or_else(|| Error::Config("environment column label is empty".to_string()))?;
        let branch =
            label(1).ok_or_else(|| Error::Config("branch column label is empty".to_string()))?;
        let build_paths = label(2);
        let upsert_paths = label(3);

        if build_paths.is_none() && upsert_paths.is_none() {
            return Err(Error::Config(format!(
                "expected a build paths or upsert paths column label in {:?}",
                columns
            )));
        }

        Ok(Self {
            environment,
            branch,
            build_paths,
            upsert_paths,
        })
    }

    fn paths_description(&self) -> String {
        match (&self.build_paths, &self.upsert_paths) {
            (Some(b), Some(u)) => format!("{} or {}", b, u),
            (Some(p), None) | (None, Some(p)) => p.clone(),
            (None, None) => String::new(),
        }
    }
}

impl Default for FixedSchema {
    fn default() -> Self {
        Self {
            environment: "Environment".to_string(),
            branch: "Branch".to_string(),
            build_paths: Some("Path to Build".to_string()),
            upsert_paths: Some("Path to Upsert".to_string()),
        }
    }
}

/// How header cells are turned into row fields
#[derive(Debug, Clone)]
pub enum ColumnPolicy {
    /// Known labels, fixed output record
    Fixed(FixedSchema),
    /// Every header becomes a key
    Open(KeyNormalizer),
}

impl ColumnPolicy {
    /// Open policy with camel-case keys
    pub fn open() -> Self {
        ColumnPolicy::Open(camel_case_key)
    }
}

impl Default for ColumnPolicy {
    fn default() -> Self {
        ColumnPolicy::Fixed(FixedSchema::default())
    }
}

/// One row of the fixed environment table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentRow {
    /// First line of the environment cell
    pub env: String,
    /// First line of the branch cell
    pub branch: String,
    /// Every line of the build paths cell
    pub build_paths: Vec<String>,
    /// Every line of the upsert paths cell
    pub upsert_paths: Vec<String>,
}

/// A materialized data row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ParsedRow {
    /// Row under [`ColumnPolicy::Fixed`]
    Fixed(EnvironmentRow),
    /// Row under [`ColumnPolicy::Open`]
    Open(BTreeMap<String, Vec<String>>),
}

/// Result of running the extractor over one block
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableExtraction {
    /// Not a table, or a table without rows
    NotATable,
    /// Fixed policy could not resolve a mandatory column
    MissingColumns {
        /// Required labels absent from the header
        missing: Vec<String>,
        /// Header labels actually present
        found: Vec<String>,
    },
    /// Data rows in table order (possibly empty)
    Rows(Vec<ParsedRow>),
}

impl TableExtraction {
    /// Rows when the block was accepted
    pub fn into_rows(self) -> Option<Vec<ParsedRow>> {
        match self {
            TableExtraction::Rows(rows) => Some(rows),
            _ => None,
        }
    }
}

/// Lower camel-case key: `"Path to Build"` becomes `"pathToBuild"`.
///
/// Words are runs of alphanumeric characters; case inside a word is folded.
pub fn camel_case_key(label: &str) -> String {
    let mut key = String::with_capacity(label.len());
    for (i, word) in label
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .enumerate()
    {
        let lower = word.to_lowercase();
        if i == 0 {
            key.push_str(&lower);
            continue;
        }
        let mut chars = lower.chars();
        if let Some(first) = chars.next() {
            key.extend(first.to_uppercase());
            key.push_str(chars.as_str());
        }
    }
    key
}

/// Extract data rows from a single content block.
pub fn extract_table(block: &ContentNode, policy: &ColumnPolicy) -> TableExtraction {
    let ContentNode::Table { content } = block else {
        return TableExtraction::NotATable;
    };

    let rows: Vec<&[ContentNode]> = content
        .iter()
        .filter_map(|row| match row {
            ContentNode::TableRow { content } => Some(content.as_slice()),
            _ => None,
        })
        .collect();

    let Some((header, data)) = rows.split_first() else {
        return TableExtraction::NotATable;
    };

    let headers: Vec<String> = header.iter().map(|cell| first_line(cell.children())).collect();

    match policy {
        ColumnPolicy::Fixed(schema) => fixed_rows(schema, headers, data),
        ColumnPolicy::Open(normalize) => open_rows(*normalize, &headers, data),
    }
}

/// Run the extractor over every block and concatenate accepted rows.
///
/// Blocks that are not tables are skipped silently; tables missing a
/// mandatory column are skipped with a warning.
pub fn extract_environments(blocks: &[ContentNode], policy: &ColumnPolicy) -> Vec<ParsedRow> {
    let mut all = Vec::new();

    for (index, block) in blocks.iter().enumerate() {
        match extract_table(block, policy) {
            TableExtraction::Rows(rows) => {
                tracing::debug!(block = index, rows = rows.len(), "parsed environment table");
                all.extend(rows);
            }
            TableExtraction::MissingColumns { missing, found } => {
                tracing::warn!(
                    block = index,
                    missing = ?missing,
                    found = ?found,
                    "missing required columns, skipping table"
                );
            }
            TableExtraction::NotATable => {
                tracing::trace!(block = index, kind = block.kind(), "skipping non-table block");
            }
        }
    }

    all
}

fn fixed_rows(
    schema: &FixedSchema,
    headers: Vec<String>,
    data: &[&[ContentNode]],
) -> TableExtraction {
    let position = |label: Option<&String>| label.and_then(|l| headers.iter().position(|h| h == l));

    let env_idx = position(Some(&schema.environment));
    let branch_idx = position(Some(&schema.branch));
    let build_idx = position(schema.build_paths.as_ref());
    let upsert_idx = position(schema.upsert_paths.as_ref());

    let mut missing = Vec::new();
    if env_idx.is_none() {
        missing.push(schema.environment.clone());
    }
    if branch_idx.is_none() {
        missing.push(schema.branch.clone());
    }
    if build_idx.is_none() && upsert_idx.is_none() {
        missing.push(schema.paths_description());
    }

    let (env_idx, branch_idx) = match (env_idx, branch_idx) {
        (Some(env), Some(branch)) if missing.is_empty() => (env, branch),
        _ => {
            return TableExtraction::MissingColumns {
                missing,
                found: headers,
            }
        }
    };

    let rows = data
        .iter()
        .map(|cells| {
            ParsedRow::Fixed(EnvironmentRow {
                env: cell_first_line(cells, env_idx),
                branch: cell_first_line(cells, branch_idx),
                build_paths: build_idx.map(|i| cell_lines(cells, i)).unwrap_or_default(),
                upsert_paths: upsert_idx.map(|i| cell_lines(cells, i)).unwrap_or_default(),
            })
        })
        .collect();

    TableExtraction::Rows(rows)
}

fn open_rows(
    normalize: KeyNormalizer,
    headers: &[String],
    data: &[&[ContentNode]],
) -> TableExtraction {
    let keys: Vec<String> = headers.iter().map(|h| normalize(h)).collect();

    let rows = data
        .iter()
        .map(|cells| {
            let mut row = BTreeMap::new();
            for (idx, key) in keys.iter().enumerate() {
                // later duplicate keys overwrite earlier ones
                row.insert(key.clone(), cell_lines(cells, idx));
            }
            ParsedRow::Open(row)
        })
        .collect();

    TableExtraction::Rows(rows)
}

#[inline]
fn cell_lines(cells: &[ContentNode], idx: usize) -> Vec<String> {
    cells
        .get(idx)
        .map(|cell| extract_lines(cell.children()))
        .unwrap_or_default()
}

#[inline]
fn cell_first_line(cells: &[ContentNode], idx: usize) -> String {
    cells
        .get(idx)
        .map(|cell| first_line(cell.children()))
        .unwrap_or_default()
}
