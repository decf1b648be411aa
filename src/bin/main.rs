use anyhow::{bail, Context};
use budget_forecast::prelude::*;
use clap::{Parser, Subcommand};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "budget-forecast")]
#[command(about = "Budget forecasting and scenario planning CLI")]
#[command(version)]
struct Cli {
    /// Engine configuration JSON file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Forecast the periods following a history file
    Forecast {
        #[arg(long)]
        history: PathBuf,
        /// MONTHLY, QUARTERLY or ANNUAL; defaults to the configured type
        #[arg(short, long)]
        period_type: Option<PeriodType>,
        #[arg(short = 'n', long, default_value_t = 1)]
        periods: u32,
    },
    /// Scan a history file for complaint-volume surges
    Surges {
        #[arg(long)]
        history: PathBuf,
    },
    /// List cost optimization suggestions
    Optimize {
        #[arg(long)]
        department: Option<String>,
        #[arg(long)]
        state: Option<String>,
        #[arg(long)]
        district: Option<String>,
    },
    /// Apply what-if deltas to a baseline forecast
    Scenario {
        /// Baseline forecasts produced by `forecast`
        #[arg(long, conflicts_with = "history")]
        baseline: Option<PathBuf>,
        /// History to forecast the baseline from
        #[arg(long)]
        history: Option<PathBuf>,
        #[arg(short = 'n', long, default_value_t = 1)]
        periods: u32,
        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        complaint_volume_change: f64,
        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        emergency_events_change: f64,
        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        personnel_cost_change: f64,
        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        infrastructure_cost_change: f64,
        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        operational_cost_change: f64,
        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        efficiency_improvement: f64,
    },
    /// Print the period key `offset` periods after `last`
    NextPeriod {
        last: String,
        #[arg(short, long)]
        period_type: PeriodType,
        #[arg(short, long, default_value_t = 1)]
        offset: u32,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    let engine = match &cli.config {
        Some(path) => {
            let config = EngineConfig::from_file(path)
                .with_context(|| format!("loading engine config from {}", path.display()))?;
            BudgetForecastEngine::with_config(config)?
        }
        None => BudgetForecastEngine::new(),
    };

    match cli.command {
        Commands::Forecast { history, period_type, periods } => {
            let history: Vec<HistoricalPeriodRecord> = read_json(&history)?;
            let period_type = period_type.unwrap_or(engine.config().default_period_type);
            let forecasts = engine.forecast_budget(&history, period_type, periods)?;
            print_json(&forecasts)?;
        }
        Commands::Surges { history } => {
            let history: Vec<HistoricalPeriodRecord> = read_json(&history)?;
            print_json(&engine.predict_surges(&history)?)?;
        }
        Commands::Optimize { department, state, district } => {
            let scope = OptimizationScope {
                department_id: department,
                state_id: state,
                district_id: district,
            };
            print_json(&engine.optimization_suggestions(&scope))?;
        }
        Commands::Scenario {
            baseline,
            history,
            periods,
            complaint_volume_change,
            emergency_events_change,
            personnel_cost_change,
            infrastructure_cost_change,
            operational_cost_change,
            efficiency_improvement,
        } => {
            let baseline: Vec<ForecastResult> = match (baseline, history) {
                (Some(path), _) => read_json(&path)?,
                (None, Some(path)) => {
                    let history: Vec<HistoricalPeriodRecord> = read_json(&path)?;
                    engine.forecast_default(&history, periods)?
                }
                (None, None) => bail!("scenario needs either --baseline or --history"),
            };

            let parameters = ScenarioParameters {
                complaint_volume_change,
                emergency_events_change,
                personnel_cost_change,
                infrastructure_cost_change,
                operational_cost_change,
                efficiency_improvement,
            };
            print_json(&engine.simulate_scenario(&baseline, &parameters)?)?;
        }
        Commands::NextPeriod { last, period_type, offset } => {
            println!("{}", next_period(&last, period_type, offset)?);
        }
    }

    Ok(())
}

fn read_json<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
