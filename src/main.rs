use planetsim::{ScenarioConfig, SimulationEngine};
use planetsim::{run_2d, run_headless};
use planetsim::bench_step_curve;

use anyhow::{Context, Result};
use clap::Parser;

use std::fs;
use std::path::PathBuf;

#[derive(Parser, Debug)]
struct Args {
    /// Scenario file; looked up under scenarios/ unless the path exists as given
    #[arg(short, default_value = "default.yaml")]
    file_name: String,

    /// Override the scenario seed
    #[arg(long)]
    seed: Option<u64>,

    /// Run without a window, logging positions every tick
    #[arg(long)]
    headless: bool,

    /// Ticks to run in headless mode
    #[arg(long, default_value_t = 100)]
    steps: u64,

    /// Print the per-step cost curve and exit
    #[arg(long)]
    bench: bool,
}

fn scenario_path(file_name: &str) -> PathBuf {
    let direct = PathBuf::from(file_name);
    if direct.exists() {
        return direct;
    }
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(file_name)
}

// load here to keep main clean
fn load_scenario_from_yaml(args: &Args) -> Result<ScenarioConfig> {
    let config_path = scenario_path(&args.file_name);
    let text = fs::read_to_string(&config_path)
        .with_context(|| format!("reading scenario {}", config_path.display()))?;
    let mut scenario_cfg = ScenarioConfig::from_yaml_str(&text)
        .with_context(|| format!("parsing scenario {}", config_path.display()))?;

    if args.seed.is_some() {
        scenario_cfg.simulation.seed = args.seed;
    }
    Ok(scenario_cfg)
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.bench {
        bench_step_curve()?;
        return Ok(());
    }

    let scenario_cfg = load_scenario_from_yaml(&args)?;
    let mut engine = SimulationEngine::new(scenario_cfg).context("invalid scenario")?;
    engine.initialize().context("initializing bodies")?;

    if args.headless {
        let exit = run_headless(engine, args.steps);
        anyhow::ensure!(exit.is_success(), "headless run stopped early");
    } else {
        run_2d(engine);
    }

    Ok(())
}
