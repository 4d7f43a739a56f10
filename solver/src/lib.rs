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

mod model_builder;
mod result_extraction;

use std::collections::BTreeMap;
use std::time::Instant;

use good_lp::{default_solver, ProblemVariables, ResolutionError, SolverModel};
use thiserror::Error;

use model::config::Config;
use model::dataset::Dataset;
use solution::{Schedule, SolverStatus};

/// Violation of an invariant the result extractor relies on (e.g. a route
/// covered by two vehicles). Indicates a bug in the model formulation and is
/// fatal to the request, never to the process.
#[derive(Error, Debug)]
pub enum SolveError {
    #[error("schedule extraction failed: {0}")]
    Extraction(String),
}

/// One-shot planning pipeline: build the model, solve it, extract the
/// schedule. A fresh model is constructed on every `solve` call and dropped
/// afterwards, so a single `Planner` may solve repeatedly.
pub struct Planner {
    dataset: Dataset,
    config: Config,
}

impl Planner {
    pub fn initialize(dataset: Dataset, config: Config) -> Planner {
        Planner { dataset, config }
    }

    pub fn solve(&self) -> Result<Schedule, SolveError> {
        let start_time = Instant::now();

        if self.dataset.fleet().is_empty() {
            // the model would be empty; answer directly
            return Ok(if self.dataset.routes().is_empty() {
                Schedule::solved(
                    SolverStatus::Optimal,
                    0,
                    start_time.elapsed().as_secs_f64(),
                    BTreeMap::new(),
                )
            } else {
                Schedule::envelope(
                    SolverStatus::Infeasible,
                    "there are routes to cover but no vehicles".to_string(),
                    start_time.elapsed().as_secs_f64(),
                )
            });
        }

        let mut problem = ProblemVariables::new();
        let vars = model_builder::setup_variables(&mut problem, &self.dataset, &self.config);
        let objective = model_builder::objective_expression(&vars);
        let mut milp = problem.minimise(objective).using(default_solver);
        model_builder::setup_constraints(&mut milp, &vars, &self.dataset, &self.config);

        match milp.solve() {
            Ok(solved) => {
                let (vehicles, objective_value) =
                    result_extraction::extract_vehicle_plans(&solved, &vars, &self.dataset)?;
                Ok(Schedule::solved(
                    SolverStatus::Optimal,
                    objective_value,
                    start_time.elapsed().as_secs_f64(),
                    vehicles,
                ))
            }
            Err(ResolutionError::Infeasible) => Ok(Schedule::envelope(
                SolverStatus::Infeasible,
                "no feasible plan exists for this input".to_string(),
                start_time.elapsed().as_secs_f64(),
            )),
            Err(ResolutionError::Unbounded) => Ok(Schedule::envelope(
                SolverStatus::ModelInvalid,
                "the constructed model is unbounded".to_string(),
                start_time.elapsed().as_secs_f64(),
            )),
            Err(error) => Ok(Schedule::envelope(
                SolverStatus::Unknown,
                format!("the backend returned no verdict: {:?}", error),
                start_time.elapsed().as_secs_f64(),
            )),
        }
    }
}
