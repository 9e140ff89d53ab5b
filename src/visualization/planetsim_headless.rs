//! Windowless driver: the same engine resource stepped by bevy's schedule
//! runner at the configured cadence, logging positions after every tick.

use std::time::Duration;

use bevy::app::ScheduleRunnerPlugin;
use bevy::log::LogPlugin;
use bevy::prelude::*;

use super::planetsim_vis2d::Simulation;
use crate::simulation::engine::SimulationEngine;
use crate::simulation::states::SimulationState;

/// Number of ticks to run before exiting
#[derive(Resource)]
struct StepBudget(pub u64);

pub fn run_headless(engine: SimulationEngine, steps: u64) -> AppExit {
    let period = Duration::from_secs_f64(1.0 / engine.config().driver.fps);

    App::new()
        .add_plugins(MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(period)))
        .add_plugins(LogPlugin::default())
        .insert_resource(Simulation { engine, halted: false })
        .insert_resource(StepBudget(steps))
        .add_systems(Update, headless_step_system)
        .run()
}

/// One line per tick: `x,y` pairs in stable index order
pub fn format_positions(state: &SimulationState) -> String {
    state
        .positions()
        .iter()
        .map(|x| format!("({:.3}, {:.3})", x.x, x.y))
        .collect::<Vec<_>>()
        .join(" ")
}

fn headless_step_system(mut sim: ResMut<Simulation>, budget: Res<StepBudget>, mut exit: EventWriter<AppExit>) {
    match sim.engine.step() {
        Ok(state) => {
            info!("tick {}: {}", state.tick(), format_positions(state));
            if state.tick() >= budget.0 {
                info!("kinetic energy after {} ticks: {:.6}", state.tick(), state.kinetic_energy());
                exit.send(AppExit::Success);
            }
        }
        Err(e) => {
            error!("simulation halted: {e}");
            exit.send(AppExit::error());
        }
    }
}
