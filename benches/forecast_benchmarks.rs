use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use budget_forecast::prelude::*;
use budget_forecast::analytics::statistics::std_dev;
use budget_forecast::SyntheticHistory;
use std::hint::black_box;

fn history(len: usize) -> Vec<HistoricalPeriodRecord> {
    SyntheticHistory::default().generate(PeriodKey::Month { year: 2020, month: 1 }, len, 42)
        .unwrap()
}

fn benchmark_ensemble(c: &mut Criterion) {
    let mut group = c.benchmark_group("ensemble");
    let model = EnsembleForecastModel::new();

    for &len in &[3, 12, 24] {
        let history = history(len);
        group.throughput(Throughput::Elements(len as u64));
        group.bench_with_input(BenchmarkId::new("predict", len), &history, |b, history| {
            b.iter(|| black_box(model.predict(black_box(history))))
        });
    }

    group.finish();
}

fn benchmark_forecast_budget(c: &mut Criterion) {
    let mut group = c.benchmark_group("forecast_budget");
    let history = history(24);
    let parallel = BudgetForecastEngine::new();
    let sequential = BudgetForecastEngine::with_config(EngineConfig {
        parallel_forecasts: false,
        ..EngineConfig::default()
    })
    .unwrap();

    for &periods in &[1u32, 6, 24] {
        group.throughput(Throughput::Elements(periods as u64));
        group.bench_with_input(BenchmarkId::new("parallel", periods), &periods, |b, &periods| {
            b.iter(|| black_box(parallel.forecast_budget(&history, PeriodType::Monthly, periods)))
        });
        group.bench_with_input(BenchmarkId::new("sequential", periods), &periods, |b, &periods| {
            b.iter(|| black_box(sequential.forecast_budget(&history, PeriodType::Monthly, periods)))
        });
    }

    group.finish();
}

fn benchmark_surges(c: &mut Criterion) {
    let engine = BudgetForecastEngine::new();
    let history = history(24);
    let counts: Vec<f64> = history.iter().map(|r| r.complaint_count as f64).collect();

    c.bench_function("predict_surges", |b| b.iter(|| black_box(engine.predict_surges(&history))));
    c.bench_function("complaint_std_dev", |b| b.iter(|| black_box(std_dev(black_box(&counts)))));
}

fn benchmark_scenario(c: &mut Criterion) {
    let engine = BudgetForecastEngine::new();
    let baseline = engine.forecast_budget(&history(24), PeriodType::Monthly, 12).unwrap();
    let parameters = ScenarioParameters {
        complaint_volume_change: 25.0,
        emergency_events_change: 10.0,
        efficiency_improvement: 5.0,
        ..ScenarioParameters::default()
    };

    c.bench_function("simulate_scenario", |b| {
        b.iter(|| black_box(engine.simulate_scenario(&baseline, black_box(&parameters))))
    });
}

criterion_group!(
    benches,
    benchmark_ensemble,
    benchmark_forecast_budget,
    benchmark_surges,
    benchmark_scenario
);
criterion_main!(benches);
