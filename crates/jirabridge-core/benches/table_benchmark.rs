use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use jirabridge_core::document::{extract_environments, ColumnPolicy, ContentNode};
use serde_json::{json, Value};

fn cell(text: &str) -> Value {
    json!({
        "type": "tableCell",
        "content": [{
            "type": "paragraph",
            "content": [
                {"type": "text", "text": text},
                {"type": "hardBreak"},
                {"type": "text", "text": format!("{}/extra", text)}
            ]
        }]
    })
}

fn generate_table(rows: usize) -> Value {
    let mut content = vec![json!({
        "type": "tableRow",
        "content": [
            cell("Environment"),
            cell("Branch"),
            cell("Path to Build"),
            cell("Path to Upsert"),
        ]
    })];
    for i in 0..rows {
        content.push(json!({
            "type": "tableRow",
            "content": [
                cell(&format!("env-{}", i)),
                cell("main"),
                cell(&format!("/builds/{}", i)),
                cell(&format!("/upserts/{}", i)),
            ]
        }));
    }
    json!({"type": "table", "content": content})
}

fn bench_from_value(c: &mut Criterion) {
    let mut group = c.benchmark_group("content_node_from_value");

    for rows in [10, 100, 1000] {
        let value = generate_table(rows);
        group.throughput(Throughput::Elements(rows as u64));
        group.bench_with_input(BenchmarkId::from_parameter(rows), &value, |b, value| {
            b.iter(|| ContentNode::from_value(black_box(value)));
        });
    }

    group.finish();
}

fn bench_extract(c: &mut Criterion) {
    let mut group = c.benchmark_group("extract_environments");

    for rows in [10, 100, 1000] {
        let blocks = vec![ContentNode::from_value(&generate_table(rows))];
        group.throughput(Throughput::Elements(rows as u64));

        group.bench_with_input(BenchmarkId::new("fixed", rows), &blocks, |b, blocks| {
            let policy = ColumnPolicy::default();
            b.iter(|| extract_environments(black_box(blocks), &policy));
        });

        group.bench_with_input(BenchmarkId::new("open", rows), &blocks, |b, blocks| {
            let policy = ColumnPolicy::open();
            b.iter(|| extract_environments(black_box(blocks), &policy));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_from_value, bench_extract);
criterion_main!(benches);
