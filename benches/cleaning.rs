//! Benchmarks for the chatdigest cleaning pipeline.
//!
//! Run with: `cargo bench`
//! Run specific group: `cargo bench --bench cleaning -- normalize`

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use chatdigest::core::{DateRange, FilterRules, clean_text, filter_by_date, last_date, normalize};

// =============================================================================
// Test Data Generators
// =============================================================================

/// A QQ-style export with `count` message groups spread over ten days.
fn generate_transcript(count: usize) -> String {
    let mut lines = Vec::with_capacity(count * 3 + 2);
    lines.push("消息记录（此消息记录为文本格式，不支持重新导入）".to_string());
    lines.push(String::new());
    for i in 0..count {
        let day = 10 + (i * 10 / count.max(1));
        let (sender, id) = if i % 2 == 0 { ("Alice", 10001) } else { ("Bob", 10002) };
        lines.push(format!(
            "2025-03-{:02} {:02}:{:02}:00 {}({})",
            day,
            i % 24,
            i % 60,
            sender,
            id
        ));
        lines.push(format!("@Carol(20003) message number {} [图片]", i));
        if i % 5 == 0 {
            lines.push("收到[表情] ADVERTISEMENT 300px".to_string());
        }
    }
    lines.join("\n")
}

fn bench_rules() -> FilterRules {
    FilterRules::parse("# sizes\n\\d+px\nADVERTISEMENT\n")
}

// =============================================================================
// Pipeline Benchmarks
// =============================================================================

fn bench_filter_by_date(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter_by_date");
    let range = DateRange::parse("2025-03-14=2025-03-16").unwrap();

    for size in [100_usize, 1_000, 10_000, 50_000] {
        let text = generate_transcript(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &text, |b, text| {
            b.iter(|| black_box(filter_by_date(black_box(text), &range)));
        });
    }
    group.finish();
}

fn bench_last_date(c: &mut Criterion) {
    let mut group = c.benchmark_group("last_date");

    for size in [1_000_usize, 50_000] {
        let text = generate_transcript(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &text, |b, text| {
            b.iter(|| black_box(last_date(black_box(text))));
        });
    }
    group.finish();
}

fn bench_normalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize");
    let rules = bench_rules();

    for size in [100_usize, 1_000, 10_000, 50_000] {
        let text = generate_transcript(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &text, |b, text| {
            b.iter(|| black_box(normalize(black_box(text), &rules)));
        });
    }
    group.finish();
}

fn bench_full_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_pipeline");
    let rules = bench_rules();

    for size in [1_000_usize, 10_000] {
        let text = generate_transcript(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &text, |b, text| {
            b.iter(|| {
                let cleaned = clean_text(black_box(text), None, &rules).unwrap();
                black_box(cleaned)
            });
        });
    }
    group.finish();
}

// =============================================================================
// Criterion Configuration
// =============================================================================

criterion_group!(
    benches,
    bench_filter_by_date,
    bench_last_date,
    bench_normalize,
    bench_full_pipeline,
);

criterion_main!(benches);
