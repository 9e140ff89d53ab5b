use std::time::Instant;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::configuration::config::{ScenarioConfig, SimulationConfig};
use crate::error::Result;
use crate::simulation::engine::SimulationEngine;

/// Engine with `n` random bodies, fixed seed. The region grows with n so the
/// density (and the share of clamped accelerations) stays comparable.
fn make_engine(n: usize) -> Result<SimulationEngine> {
    let side = 500.0 * ((n as f64) / 10.0).sqrt().max(1.0);
    let config = ScenarioConfig {
        simulation: SimulationConfig {
            particle_count: n,
            spatial_extent: [side, side],
            ..SimulationConfig::default()
        },
        ..ScenarioConfig::default()
    };
    let mut engine = SimulationEngine::with_rng(config, StdRng::seed_from_u64(42))?;
    engine.initialize()?;
    Ok(engine)
}

/// Wall-clock cost of one `step` for a range of n
/// Paste output directly into a spreadsheet to graph the O(n^2) curve
pub fn bench_step_curve() -> Result<()> {
    println!("N,step_ms");

    for n in [10, 50, 100, 200, 400, 800, 1600] {
        // Small n: average over many steps to smooth noise
        let steps = if n <= 200 { 200 } else { 10 };

        let mut engine = make_engine(n)?;

        // Warm-up
        engine.step()?;

        let t0 = Instant::now();
        for _ in 0..steps {
            engine.step()?;
        }
        let ms = t0.elapsed().as_secs_f64() * 1000.0 / steps as f64;

        println!("{},{:.6}", n, ms);
    }
    Ok(())
}
