//! Text rendering and GitHub Actions output formatting

use crate::document::ParsedRow;
use crate::jira::IssueInfo;
use std::fmt::Write;

const DELIMITER_BASE: &str = "JIRABRIDGE_EOF";

/// Heredoc delimiter that does not occur anywhere in `value`
pub fn heredoc_delimiter(value: &str) -> String {
    let mut delimiter = DELIMITER_BASE.to_string();
    let mut n = 0u32;
    while value.contains(&delimiter) {
        n += 1;
        delimiter = format!("{}_{}", DELIMITER_BASE, n);
    }
    delimiter
}

/// `name<<DELIM\nvalue\nDELIM\n`, the multiline form accepted by
/// `$GITHUB_OUTPUT` and `$GITHUB_ENV`
pub fn heredoc_entry(name: &str, value: &str) -> String {
    let delimiter = heredoc_delimiter(value);
    format!("{name}<<{delimiter}\n{value}\n{delimiter}\n")
}

/// Escape workflow command data (`%`, CR, LF)
pub fn escape_command_data(s: &str) -> String {
    s.replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

/// `::notice::message` workflow command, shown as an annotation on the run
pub fn notice(message: &str) -> String {
    format!("::notice title=jirabridge::{}", escape_command_data(message))
}

/// Human-readable summary of an issue info result
pub fn render_issue_info(info: &IssueInfo) -> String {
    let mut buf = String::with_capacity(256);
    let _ = writeln!(buf, "{} {}", info.key, info.summary);
    let _ = writeln!(buf, "  url: {}", info.url);
    if let Some(status) = &info.status {
        let _ = writeln!(buf, "  status: {}", status);
    }
    let _ = writeln!(buf, "  environments: {}", info.environments.len());

    for row in &info.environments {
        match row {
            ParsedRow::Fixed(env) => {
                let _ = writeln!(buf, "  - {} ({})", env.env, env.branch);
                for path in &env.build_paths {
                    let _ = writeln!(buf, "      build: {}", path);
                }
                for path in &env.upsert_paths {
                    let _ = writeln!(buf, "      upsert: {}", path);
                }
            }
            ParsedRow::Open(map) => {
                let _ = writeln!(buf, "  -");
                for (key, values) in map {
                    let _ = writeln!(buf, "      {}: {}", key, values.join(", "));
                }
            }
        }
    }

    buf
}
