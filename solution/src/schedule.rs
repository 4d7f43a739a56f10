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

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Outcome of a solver run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SolverStatus {
    /// The returned plan is proven cost-minimal.
    Optimal,
    /// A plan was found but optimality was not proven within the limits.
    Feasible,
    /// No plan exists for the given input.
    Infeasible,
    /// The constructed model was rejected by the backend.
    ModelInvalid,
    /// The backend gave up without a verdict.
    Unknown,
}

impl SolverStatus {
    pub fn is_solution(&self) -> bool {
        matches!(self, SolverStatus::Optimal | SolverStatus::Feasible)
    }
}

impl fmt::Display for SolverStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            SolverStatus::Optimal => "OPTIMAL",
            SolverStatus::Feasible => "FEASIBLE",
            SolverStatus::Infeasible => "INFEASIBLE",
            SolverStatus::ModelInvalid => "MODEL_INVALID",
            SolverStatus::Unknown => "UNKNOWN",
        };
        write!(f, "{}", name)
    }
}

/// The result of one planning run. For solved statuses it carries the full
/// per-vehicle plan; otherwise it is an envelope of status and message.
/// Maps are ordered so that repeated runs serialise identically.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schedule {
    pub status: SolverStatus,
    pub objective_value: Option<i64>,
    pub wall_time_seconds: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub total_routes: usize,
    pub total_maintenance: usize,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub vehicles: BTreeMap<String, VehiclePlan>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehiclePlan {
    pub routes: BTreeMap<String, RouteRecord>,
    pub maintenance: BTreeMap<String, MaintenanceRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteRecord {
    pub shift: usize,
    pub route_id: String,
    pub start_location: String,
    pub end_location: String,
    pub km: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceRecord {
    pub maintenance_type: String,
    pub start_shift: usize,
    pub end_shift: usize,
    pub depot: String,
    pub km: u64,
}

impl Schedule {
    /// A schedule carrying a solved plan.
    pub fn solved(
        status: SolverStatus,
        objective_value: i64,
        wall_time_seconds: f64,
        vehicles: BTreeMap<String, VehiclePlan>,
    ) -> Schedule {
        let total_routes = vehicles.values().map(|plan| plan.routes.len()).sum();
        let total_maintenance = vehicles.values().map(|plan| plan.maintenance.len()).sum();
        Schedule {
            status,
            objective_value: Some(objective_value),
            wall_time_seconds,
            message: None,
            total_routes,
            total_maintenance,
            vehicles,
        }
    }

    /// An envelope without a plan, for all non-solution statuses.
    pub fn envelope(status: SolverStatus, message: String, wall_time_seconds: f64) -> Schedule {
        Schedule {
            status,
            objective_value: None,
            wall_time_seconds,
            message: Some(message),
            total_routes: 0,
            total_maintenance: 0,
            vehicles: BTreeMap::new(),
        }
    }
}
