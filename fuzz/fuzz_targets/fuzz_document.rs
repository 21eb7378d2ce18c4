#![no_main]

use jirabridge_core::document::{
    extract_environments, extract_lines, extract_table, ColumnPolicy, ContentNode,
};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(value) = serde_json::from_slice::<serde_json::Value>(data) else {
        return;
    };

    // Any JSON shape must parse into a tree without panicking
    let node = ContentNode::from_value(&value);
    let nodes = ContentNode::list_from_value(&value);

    let fixed = ColumnPolicy::default();
    let open = ColumnPolicy::open();
    let _ = extract_table(&node, &fixed);
    let _ = extract_table(&node, &open);
    let _ = extract_environments(&nodes, &fixed);
    let _ = extract_environments(&nodes, &open);

    for line in extract_lines(node.children()) {
        assert!(!line.is_empty());
        assert_eq!(line.trim(), line);
    }
});
