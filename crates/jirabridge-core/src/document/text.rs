//! Paragraph text reconstruction

use super::ContentNode;

/// Convert paragraph-like nodes into trimmed, non-empty lines.
///
/// A paragraph with direct text contributes that text as one line. Otherwise
/// its inline children are joined, with every hard break becoming a line
/// boundary and any inline node that is neither text nor a break
/// contributing nothing. Order is preserved across and within paragraphs.
pub fn extract_lines(paragraphs: &[ContentNode]) -> Vec<String> {
    let mut lines = Vec::new();

    for paragraph in paragraphs {
        match paragraph {
            ContentNode::Paragraph {
                text: Some(text), ..
            } if !text.is_empty() => push_line(&mut lines, text),
            ContentNode::Text { text } => push_line(&mut lines, text),
            other => {
                let joined = join_inline(other.children());
                for line in joined.split('\n') {
                    push_line(&mut lines, line);
                }
            }
        }
    }

    lines
}

/// First extracted line, or an empty string
pub(crate) fn first_line(paragraphs: &[ContentNode]) -> String {
    extract_lines(paragraphs).into_iter().next().unwrap_or_default()
}

fn join_inline(nodes: &[ContentNode]) -> String {
    let mut joined = String::new();
    for node in nodes {
        match node {
            ContentNode::Text { text } => joined.push_str(text),
            ContentNode::HardBreak => joined.push('\n'),
            _ => {}
        }
    }
    joined
}

#[inline]
fn push_line(lines: &mut Vec<String>, candidate: &str) {
    let trimmed = candidate.trim();
    if !trimmed.is_empty() {
        lines.push(trimmed.to_string());
    }
}
