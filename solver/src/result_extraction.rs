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

//! Materialises the per-vehicle schedule from a solved model. A pure
//! function of the solved values and the input dataset; the backend is never
//! consulted again.

use std::collections::BTreeMap;

use good_lp::{Solution, Variable};
use itertools::Itertools;

use model::dataset::Dataset;
use solution::{MaintenanceRecord, RouteRecord, VehiclePlan};

use crate::model_builder::PlanVars;
use crate::SolveError;

pub(crate) fn extract_vehicle_plans(
    solved: &impl Solution,
    vars: &PlanVars,
    dataset: &Dataset,
) -> Result<(BTreeMap<String, VehiclePlan>, i64), SolveError> {
    let fleet = dataset.fleet();
    let locations = dataset.locations();

    let mut plans: BTreeMap<String, VehiclePlan> = fleet
        .iter()
        .map(|vehicle| (fleet.get(vehicle).id().to_string(), VehiclePlan::default()))
        .collect();

    for route in dataset.routes().iter() {
        let covering_vehicle = fleet
            .iter()
            .filter(|vehicle| is_set(solved, vars.assign[vehicle.get()][route.idx().get()]))
            .exactly_one()
            .map_err(|_| {
                SolveError::Extraction(format!(
                    "route `{}` is not covered by exactly one vehicle",
                    route.id()
                ))
            })?;
        let record = RouteRecord {
            shift: route.shift(),
            route_id: route.id().to_string(),
            start_location: locations.get(route.start_location()).id().to_string(),
            end_location: locations.get(route.end_location()).id().to_string(),
            km: route.distance_km(),
        };
        plans
            .get_mut(fleet.get(covering_vehicle).id())
            .unwrap()
            .routes
            .insert(route.id().to_string(), record);
    }

    let mut objective_value = 0i64;
    for instance in dataset.instances() {
        let i = instance.idx().get();
        if !is_set(solved, vars.done[i]) {
            if !instance.is_preventive() {
                return Err(SolveError::Extraction(format!(
                    "corrective instance `{}` is missing from the plan",
                    instance.id()
                )));
            }
            continue;
        }

        let start_shift = vars.start[i]
            .iter()
            .enumerate()
            .filter(|(_, start)| start.map_or(false, |start| is_set(solved, start)))
            .map(|(shift, _)| shift)
            .exactly_one()
            .map_err(|_| {
                SolveError::Extraction(format!(
                    "instance `{}` does not have exactly one start shift",
                    instance.id()
                ))
            })?;

        let depot = instance
            .capable_depots()
            .iter()
            .enumerate()
            .filter(|(position, _)| is_set(solved, vars.chosen_depot[i][*position]))
            .map(|(_, &depot)| depot)
            .exactly_one()
            .map_err(|_| {
                SolveError::Extraction(format!(
                    "instance `{}` is not executed at exactly one depot",
                    instance.id()
                ))
            })?;

        let km = solved
            .value(vars.km[instance.vehicle().get()][start_shift])
            .round() as i64;
        if km < 0 || km as u64 > instance.max_km() {
            return Err(SolveError::Extraction(format!(
                "instance `{}` is executed at {}km, beyond its bound of {}km",
                instance.id(),
                km,
                instance.max_km()
            )));
        }

        let record = MaintenanceRecord {
            maintenance_type: dataset
                .maintenance_types()
                .get(instance.maintenance_type())
                .id()
                .to_string(),
            start_shift,
            end_shift: start_shift + instance.duration() - 1,
            depot: locations.get(depot).id().to_string(),
            km: km as u64,
        };
        plans
            .get_mut(fleet.get(instance.vehicle()).id())
            .unwrap()
            .maintenance
            .insert(instance.id().to_string(), record);

        if let Some(optimal) = instance.optimal_km() {
            objective_value += (km - optimal as i64).abs();
        }
    }

    Ok((plans, objective_value))
}

fn is_set(solved: &impl Solution, variable: Variable) -> bool {
    solved.value(variable) > 0.5
}
