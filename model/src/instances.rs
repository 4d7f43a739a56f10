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

use std::collections::HashMap;

use crate::base_types::{
    InstanceIdx, Kilometer, LocationIdx, MaintenanceTypeIdx, Manhours, VehicleIdx,
};
use crate::config::Config;
use crate::error::InputError;
use crate::fleet::Fleet;
use crate::locations::Locations;
use crate::maintenance::{MaintenanceType, MaintenanceTypes};
use crate::routes::Routes;

/// One concrete execution of a maintenance type on one vehicle, derived from
/// the vehicle's pending tasks. Corrective instances must be executed within
/// the horizon; preventive instances are derived only if their due point is
/// reachable within the horizon.
#[derive(Debug)]
pub struct MaintenanceInstance {
    idx: InstanceIdx,
    id: String,
    vehicle: VehicleIdx,
    maintenance_type: MaintenanceTypeIdx,
    /// Absolute odometer bound at the start of the execution.
    max_km: Kilometer,
    /// Absolute odometer target; present for preventive instances only.
    optimal_km: Option<Kilometer>,
    /// Number of consecutive shifts the execution occupies.
    duration: usize,
    /// Manhour demand drawn from the depot budget in every occupied shift.
    manhours_per_shift: Manhours,
    /// Depots at which this instance may be executed.
    capable_depots: Vec<LocationIdx>,
}

impl MaintenanceInstance {
    pub fn idx(&self) -> InstanceIdx {
        self.idx
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn vehicle(&self) -> VehicleIdx {
        self.vehicle
    }

    pub fn maintenance_type(&self) -> MaintenanceTypeIdx {
        self.maintenance_type
    }

    pub fn max_km(&self) -> Kilometer {
        self.max_km
    }

    pub fn optimal_km(&self) -> Option<Kilometer> {
        self.optimal_km
    }

    pub fn is_preventive(&self) -> bool {
        self.optimal_km.is_some()
    }

    pub fn duration(&self) -> usize {
        self.duration
    }

    pub fn manhours_per_shift(&self) -> Manhours {
        self.manhours_per_shift
    }

    pub fn capable_depots(&self) -> &[LocationIdx] {
        &self.capable_depots
    }
}

/// Turns the pending tasks of all vehicles into maintenance instances.
///
/// Every pending corrective task yields one instance with the odometer bound
/// `initial_km + remaining_km`. A pending preventive task yields an instance
/// only if its `remaining_km` lies within the worst-case kilometers of the
/// horizon; later due points cannot be meaningfully served by this plan.
pub fn derive_instances(
    fleet: &Fleet,
    maintenance_types: &MaintenanceTypes,
    locations: &Locations,
    routes: &Routes,
    config: &Config,
) -> Result<Vec<MaintenanceInstance>, InputError> {
    let horizon_km = routes.worst_case_km(config.planning.days);
    let mut instances = Vec::new();
    let mut occurrence_counter: HashMap<(VehicleIdx, MaintenanceTypeIdx), usize> = HashMap::new();

    for vehicle_idx in fleet.iter() {
        let vehicle = fleet.get(vehicle_idx);

        for task in vehicle.pending_corrective_tasks() {
            let maintenance_type = maintenance_types.get(task.maintenance_type());
            if maintenance_type.is_preventive() {
                return Err(InputError::Malformed(format!(
                    "pending corrective task of vehicle `{}` references preventive type `{}`",
                    vehicle.id(),
                    maintenance_type.id()
                )));
            }
            instances.push(new_instance(
                InstanceIdx::from(instances.len()),
                vehicle.id(),
                vehicle_idx,
                maintenance_type,
                vehicle.initial_km() + task.remaining_km(),
                None,
                locations,
                &mut occurrence_counter,
            )?);
        }

        for task in vehicle.pending_preventive_tasks() {
            let maintenance_type = maintenance_types.get(task.maintenance_type());
            if !maintenance_type.is_preventive() {
                return Err(InputError::Malformed(format!(
                    "pending preventive task of vehicle `{}` references corrective type `{}`",
                    vehicle.id(),
                    maintenance_type.id()
                )));
            }
            if task.remaining_km() > horizon_km {
                continue; // due point is beyond the horizon
            }
            let preventive = maintenance_type.as_preventive();
            instances.push(new_instance(
                InstanceIdx::from(instances.len()),
                vehicle.id(),
                vehicle_idx,
                maintenance_type,
                preventive.max_km(),
                Some(preventive.optimal_km()),
                locations,
                &mut occurrence_counter,
            )?);
        }
    }

    Ok(instances)
}

#[allow(clippy::too_many_arguments)]
fn new_instance(
    idx: InstanceIdx,
    vehicle_id: &str,
    vehicle: VehicleIdx,
    maintenance_type: &MaintenanceType,
    max_km: Kilometer,
    optimal_km: Option<Kilometer>,
    locations: &Locations,
    occurrence_counter: &mut HashMap<(VehicleIdx, MaintenanceTypeIdx), usize>,
) -> Result<MaintenanceInstance, InputError> {
    let capable_depots = locations.capable_depots(maintenance_type.specialization());
    let (duration, manhours_per_shift) =
        duration_and_demand(maintenance_type, &capable_depots, locations)?;

    let occurrence = occurrence_counter
        .entry((vehicle, maintenance_type.idx()))
        .or_insert(0);
    let id = format!("{}_{}_{}", vehicle_id, maintenance_type.id(), occurrence);
    *occurrence += 1;

    Ok(MaintenanceInstance {
        idx,
        id,
        vehicle,
        maintenance_type: maintenance_type.idx(),
        max_km,
        optimal_km,
        duration,
        manhours_per_shift,
        capable_depots,
    })
}

/// Fixed execution length and the resulting per-shift manhour demand.
///
/// The length is taken against the smallest capable depot, so the instance
/// fits into every capable depot's budget. Trading a longer stay at a small
/// depot against a shorter stay at a large one would need a per-depot
/// duration; see DESIGN.md.
fn duration_and_demand(
    maintenance_type: &MaintenanceType,
    capable_depots: &[LocationIdx],
    locations: &Locations,
) -> Result<(usize, Manhours), InputError> {
    let manhours = maintenance_type.manhours();
    if manhours == 0 {
        return Ok((1, 0));
    }
    let smallest_budget = capable_depots
        .iter()
        .map(|&idx| locations.get(idx).as_depot().manhours_per_shift())
        .filter(|&budget| budget > 0)
        .min()
        .ok_or_else(|| InputError::NoCapableDepot(maintenance_type.id().to_string()))?;
    let duration = manhours.div_ceil(smallest_budget) as usize;
    Ok((duration, manhours.div_ceil(duration as Manhours)))
}
