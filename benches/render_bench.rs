use criterion::{black_box, criterion_group, criterion_main, Criterion};

use colortest::core::config::ReporterConfig;
use colortest::core::test::{Outcome, TestId};
use colortest::reporters::palette::Palette;
use colortest::reporters::summary::format_summary;
use colortest::reporters::text::{fit_title, TextReporter};
use colortest::reporters::Reporter;

fn outcome_for(i: usize) -> Outcome {
    match i % 6 {
        0 => Outcome::failure(format!("AssertionError: {} != {}", i, i + 1)),
        1 => Outcome::error("ValueError: boom"),
        2 => Outcome::skip("requires network"),
        _ => Outcome::Success,
    }
}

fn streaming_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("streaming");

    for verbosity in [1u8, 2] {
        let config = ReporterConfig { verbosity, ..ReporterConfig::default() };
        group.bench_function(format!("verbosity_{}", verbosity), |b| {
            b.iter(|| {
                let mut reporter = TextReporter::with_palette(Vec::new(), &config, Palette::ansi());
                reporter.start_run().unwrap();
                for i in 0..1000 {
                    let id = TestId::new(format!("test_case_number_{}", i));
                    reporter.add_outcome(&id, outcome_for(i)).unwrap();
                }
                black_box(reporter.finish().unwrap())
            });
        });
    }

    group.bench_function("fit_title", |b| {
        let long = "test_".repeat(30);
        b.iter(|| black_box(fit_title(black_box(&long))));
    });

    group.finish();
}

fn summary_benchmark(c: &mut Criterion) {
    let config = ReporterConfig::quiet();
    let mut reporter = TextReporter::with_palette(Vec::new(), &config, Palette::ansi());
    reporter.start_run().unwrap();
    for i in 0..1000 {
        reporter.add_outcome(&TestId::new(format!("t{}", i)), outcome_for(i)).unwrap();
    }
    let options = reporter.summary_options();
    let state = reporter.finish().unwrap();

    c.bench_function("format_summary", |b| {
        b.iter(|| black_box(format_summary(black_box(&state), &options)));
    });
}

criterion_group!(benches, streaming_benchmark, summary_benchmark);
criterion_main!(benches);
