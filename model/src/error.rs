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

use thiserror::Error;

/// Validation failure of an input dataset. Raised before any solver model is
/// constructed; fatal to the request but never to the process.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("input is not a valid planning problem: {0}")]
    Malformed(String),

    #[error("duplicate id `{0}`")]
    DuplicateId(String),

    #[error("unknown location id `{0}` referenced by `{1}`")]
    UnknownLocation(String, String),

    #[error("unknown maintenance type id `{0}` referenced by vehicle `{1}`")]
    UnknownMaintenanceType(String, String),

    #[error("route `{0}` is not a day-shift route")]
    NightRoute(String),

    #[error("route `{id}` lies on day {day} but the planning horizon has only {days} days")]
    RouteOutsideHorizon { id: String, day: usize, days: usize },

    #[error("at least two depots are required, found {0}")]
    TooFewDepots(usize),

    #[error("no depot can perform maintenance type `{0}`")]
    NoCapableDepot(String),

    #[error(
        "preventive maintenance type `{id}` has optimal_km {optimal_km} beyond max_km {max_km}"
    )]
    OptimalBeyondMax {
        id: String,
        optimal_km: u64,
        max_km: u64,
    },
}

impl From<serde_json::Error> for InputError {
    fn from(error: serde_json::Error) -> InputError {
        InputError::Malformed(error.to_string())
    }
}
