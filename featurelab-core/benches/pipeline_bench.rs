//! Criterion benchmarks for FeatureLab hot paths.
//!
//! Benchmarks:
//! 1. Full pipeline (all stages plus completion filter) at several lengths
//! 2. Windowed kernels (rolling mean/std, EMA, RSI, Bollinger) in isolation
//! 3. Completion filter on an unfiltered table

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use featurelab_core::features::drop_incomplete;
use featurelab_core::indicators::{ewm_mean, rolling_mean, rolling_std, rsi, BollingerBands};
use featurelab_core::{FeatureConfig, FeaturePipeline, PriceSeries};

// ── Helpers ──────────────────────────────────────────────────────────

fn make_prices(n: usize) -> Vec<f64> {
    (0..n)
        .map(|i| 100.0 + (i as f64 * 0.1).sin() * 10.0 + i as f64 * 0.01)
        .collect()
}

fn make_series(n: usize) -> PriceSeries {
    let base_date = chrono::NaiveDate::from_ymd_opt(2000, 1, 3).unwrap();
    let dates = (0..n)
        .map(|i| base_date + chrono::Duration::days(i as i64))
        .collect();
    PriceSeries::from_parts(dates, make_prices(n)).unwrap()
}

// ── 1. Full pipeline ─────────────────────────────────────────────────

fn bench_pipeline(c: &mut Criterion) {
    let pipeline = FeaturePipeline::new(&FeatureConfig::default()).unwrap();
    let mut group = c.benchmark_group("pipeline");

    for &n in &[252usize, 1_260, 6_300] {
        let series = make_series(n);
        group.bench_with_input(BenchmarkId::new("run", n), &series, |b, series| {
            b.iter(|| pipeline.run(black_box(series)).unwrap())
        });
    }
    group.finish();
}

// ── 2. Kernels ───────────────────────────────────────────────────────

fn bench_kernels(c: &mut Criterion) {
    let prices = make_prices(5_000);
    let mut group = c.benchmark_group("kernels");

    group.bench_function("rolling_mean_21", |b| {
        b.iter(|| rolling_mean(black_box(&prices), 21))
    });
    group.bench_function("rolling_std_21", |b| {
        b.iter(|| rolling_std(black_box(&prices), 21))
    });
    group.bench_function("ewm_mean_26", |b| b.iter(|| ewm_mean(black_box(&prices), 26)));
    group.bench_function("rsi_14", |b| b.iter(|| rsi(black_box(&prices), 14, 1e-10)));
    group.bench_function("bollinger_20", |b| {
        b.iter(|| BollingerBands::compute(black_box(&prices), 20, 2.0).width())
    });
    group.finish();
}

// ── 3. Completion filter ─────────────────────────────────────────────

fn bench_completion(c: &mut Criterion) {
    let pipeline = FeaturePipeline::new(&FeatureConfig::default()).unwrap();
    let table = pipeline.compute(&make_series(5_000)).unwrap();

    c.bench_function("drop_incomplete_5000", |b| {
        b.iter(|| drop_incomplete(black_box(&table)))
    });
}

criterion_group!(benches, bench_pipeline, bench_kernels, bench_completion);
criterion_main!(benches);
