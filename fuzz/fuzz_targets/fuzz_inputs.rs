#![no_main]

use jirabridge_core::config::{IssueKeyExtractor, TransitionMap};
use jirabridge_core::document::FixedSchema;
use jirabridge_core::jira::CommentBody;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let text = String::from_utf8_lossy(data);

    let map = TransitionMap::parse(&text);
    assert!(map.len() <= text.matches(';').count() + 1);

    let _ = FixedSchema::parse(&text);

    if let Ok(body) = CommentBody::from_input(&text) {
        let _ = body.to_document();
    }

    let extractor = match IssueKeyExtractor::new(IssueKeyExtractor::DEFAULT_PATTERN) {
        Ok(extractor) => extractor,
        Err(_) => return,
    };
    if let Some(key) = extractor.extract(&text) {
        assert!(key.contains('-'));
    }
    let _ = extractor.resolve_direct(&text);

    // User-supplied patterns must fail cleanly, not panic
    if let Some(first) = text.lines().next() {
        let _ = IssueKeyExtractor::new(first);
    }
});
