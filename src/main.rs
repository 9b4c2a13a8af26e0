use std::{process::ExitCode, time::Duration};

use bevy::{app::ScheduleRunnerPlugin, log::LogPlugin, prelude::*};

use rover_sim::{
    controller::Controller,
    facade::SimulatedRobot,
    resource::RobotRes,
    simulation::{Simulation, SimulationError},
    simulator::Simulator,
};

const UPDATE_RATE: f64 = 50.0;

fn main() -> ExitCode {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(
        Duration::from_secs_f64(1.0 / UPDATE_RATE),
    )))
    .add_plugins(LogPlugin::default());

    match simulation_from_args(std::env::args()) {
        Ok(sim) => {
            app.insert_resource(RobotRes::from(SimulatedRobot::new(sim)))
                .add_plugins((Simulator, Controller))
                .run();
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("cannot start simulation: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Builds the simulation for the scenario named by the first argument, `simple_gate` by default.
fn simulation_from_args(
    args: impl IntoIterator<Item = String>,
) -> Result<Simulation, SimulationError> {
    let scenario = args
        .into_iter()
        .nth(1)
        .unwrap_or_else(|| "simple_gate".to_owned());
    Simulation::from_scenario(&scenario)
}
