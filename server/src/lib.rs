// © 2023-2024 ETH Zurich
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// any later version.
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.
// You should have received a copy of the GNU General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

pub mod dummy_data;

use gethostname::gethostname;
use thiserror::Error;

use model::error::InputError;
use model::json_serialisation::load_fleet_planning_problem_from_json;
use solution::json_serialisation::schedule_to_json;
use solution::Schedule;
use solver::{Planner, SolveError};

/// Anything that can go wrong with one planning request.
#[derive(Error, Debug)]
pub enum PlanningError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Solve(#[from] SolveError),
}

pub fn solve_instance(input_data: serde_json::Value) -> Result<serde_json::Value, PlanningError> {
    let (dataset, config) = load_fleet_planning_problem_from_json(input_data)?;
    let planner = Planner::initialize(dataset, config);
    let schedule = planner.solve()?;

    println!("\n*** Solved ***");
    println!("status: {}", schedule.status);
    if let Some(objective_value) = schedule.objective_value {
        println!("objective value: {}", objective_value);
    }
    println!("running time: {:0.2}sec", schedule.wall_time_seconds);

    Ok(create_output_json(&schedule))
}

pub fn create_output_json(schedule: &Schedule) -> serde_json::Value {
    serde_json::json!({
        "info:": {
            "runningTime": format!("{:0.2}sec", schedule.wall_time_seconds),
            "hostname": gethostname().into_string().unwrap_or("unknown".to_string()),
        },
        "schedule": schedule_to_json(schedule),
    })
}
