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

use crate::base_types::ShiftIdx;

#[derive(Clone, Debug)]
pub struct Config {
    pub planning: PlanningConfig,
    pub solver: SolverConfig,
}

#[derive(Clone, Debug)]
pub struct PlanningConfig {
    pub days: usize,
}

#[derive(Clone, Debug)]
pub struct SolverConfig {
    /// Hard wall-clock cap in seconds, honoured where the backend supports
    /// one. The bundled exact backend runs to completion.
    pub time_limit_seconds: u64,
    /// Number of parallel search workers, honoured where the backend supports
    /// them. The bundled exact backend is single-threaded.
    pub num_workers: u32,
    /// If set, every derived preventive instance must be executed within the
    /// horizon. If unset, preventive execution is pressured only by the
    /// objective, which never schedules it on its own.
    pub force_preventive: bool,
}

impl Config {
    pub fn new(
        planning_days: usize,
        time_limit_seconds: u64,
        num_workers: u32,
        force_preventive: bool,
    ) -> Config {
        Config {
            planning: PlanningConfig {
                days: planning_days,
            },
            solver: SolverConfig {
                time_limit_seconds,
                num_workers,
                force_preventive,
            },
        }
    }

    /// Number of shifts in the horizon (two per planning day).
    pub fn number_of_shifts(&self) -> ShiftIdx {
        2 * self.planning.days
    }
}

impl Default for Config {
    fn default() -> Config {
        Config::new(14, 60, 1, true)
    }
}
