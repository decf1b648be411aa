use budget_forecast::prelude::*;
use budget_forecast::SyntheticHistory;
use std::time::{Duration, Instant};

const WARMUP_ITERATIONS: usize = 3;
const MEASUREMENT_ITERATIONS: usize = 20;

struct BenchResult {
    name: String,
    avg_duration: Duration,
    min_duration: Duration,
    max_duration: Duration,
    throughput_ops_per_sec: f64,
}

fn bench<F: FnMut() -> budget_forecast::Result<usize>>(name: &str, mut op: F) -> budget_forecast::Result<BenchResult> {
    for _ in 0..WARMUP_ITERATIONS {
        op()?;
    }

    let mut durations = Vec::with_capacity(MEASUREMENT_ITERATIONS);
    let mut items = 0;
    for _ in 0..MEASUREMENT_ITERATIONS {
        let start = Instant::now();
        items += op()?;
        durations.push(start.elapsed());
    }

    let total: Duration = durations.iter().sum();
    Ok(BenchResult {
        name: name.to_string(),
        avg_duration: total / MEASUREMENT_ITERATIONS as u32,
        min_duration: durations.iter().min().copied().unwrap_or_default(),
        max_duration: durations.iter().max().copied().unwrap_or_default(),
        throughput_ops_per_sec: items as f64 / total.as_secs_f64().max(f64::EPSILON),
    })
}

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    println!("Budget Forecast v{} Benchmark Suite", MODEL_VERSION);
    println!("===================================");

    let start = Instant::now();
    let history = SyntheticHistory::default().generate(
        PeriodKey::Month { year: 2023, month: 1 },
        24,
        42,
    )?;
    println!("Generated {} synthetic periods in {:?}", history.len(), start.elapsed());
    println!();

    let parallel = BudgetForecastEngine::new();
    let sequential = BudgetForecastEngine::with_config(EngineConfig {
        parallel_forecasts: false,
        ..EngineConfig::default()
    })?;

    let results = vec![
        bench("forecast 1 period", || {
            Ok(parallel.forecast_budget(&history, PeriodType::Monthly, 1)?.len())
        })?,
        bench("forecast 24 parallel", || {
            Ok(parallel.forecast_budget(&history, PeriodType::Monthly, 24)?.len())
        })?,
        bench("forecast 24 sequential", || {
            Ok(sequential.forecast_budget(&history, PeriodType::Monthly, 24)?.len())
        })?,
        bench("surge detection", || Ok(parallel.predict_surges(&history)?.len().max(1)))?,
        bench("scenario 12 periods", || {
            let baseline = parallel.forecast_budget(&history, PeriodType::Monthly, 12)?;
            let parameters = ScenarioParameters {
                complaint_volume_change: 20.0,
                personnel_cost_change: 5.0,
                efficiency_improvement: 10.0,
                ..ScenarioParameters::default()
            };
            Ok(parallel.simulate_scenario(&baseline, &parameters)?.adjusted_forecast.len())
        })?,
    ];

    println!("{:-<80}", "");
    println!("{:<25} {:>12} {:>12} {:>12} {:>15}",
             "Benchmark", "Avg (us)", "Min (us)", "Max (us)", "Throughput (ops/s)");
    println!("{:-<80}", "");
    for result in &results {
        println!("{:<25} {:>12} {:>12} {:>12} {:>15.0}",
                 result.name,
                 result.avg_duration.as_micros(),
                 result.min_duration.as_micros(),
                 result.max_duration.as_micros(),
                 result.throughput_ops_per_sec);
    }
    println!("{:-<80}", "");

    let total_avg_time: f64 = results.iter().map(|r| r.avg_duration.as_secs_f64()).sum();
    println!("\nSUMMARY:");
    println!("Total average benchmark time: {:.6}s", total_avg_time);

    Ok(())
}
