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

#[cfg(test)]
#[path = "json_serialisation_tests.rs"]
mod json_serialisation_tests;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::base_types::{
    Kilometer, LocationIdx, MaintenanceTypeIdx, Manhours, RouteIdx, VehicleCount, VehicleIdx,
};
use crate::config::Config;
use crate::dataset::Dataset;
use crate::error::InputError;
use crate::fleet::{Fleet, PendingTask, Vehicle};
use crate::locations::{Depot, Location, Locations, Parking};
use crate::maintenance::{CorrectiveType, MaintenanceType, MaintenanceTypes, PreventiveType};
use crate::routes::{Route, Routes};

type Integer = u64;

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct JsonInput {
    locations: Vec<JsonLocation>,
    vehicles: Vec<JsonVehicle>,
    maintenance_types: Vec<JsonMaintenanceType>,
    routes: Vec<JsonRoute>,
    #[serde(default)]
    parameters: Option<JsonParameters>,
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(tag = "type", rename_all = "camelCase")]
enum JsonLocation {
    #[serde(rename_all = "camelCase")]
    Depot {
        id: String,
        capacity: Integer,
        manhours_per_shift: Integer,
        #[serde(default)]
        specialized_maintenance: Vec<String>,
    },
    #[serde(rename_all = "camelCase")]
    Parking { id: String, capacity: Integer },
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct JsonVehicle {
    id: String,
    initial_location: String,
    initial_km: Integer,
    #[serde(default)]
    pending_corrective_tasks: Vec<JsonPendingTask>,
    #[serde(default)]
    pending_preventive_tasks: Vec<JsonPendingTask>,
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct JsonPendingTask {
    maintenance_type: String,
    remaining_km: Integer,
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(tag = "kind", rename_all = "camelCase")]
enum JsonMaintenanceType {
    #[serde(rename_all = "camelCase")]
    Preventive {
        id: String,
        optimal_km: Integer,
        max_km: Integer,
        manhours: Integer,
        #[serde(default)]
        specialization: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    Corrective {
        id: String,
        max_km_window: Integer,
        manhours: Integer,
        #[serde(default)]
        specialization: Option<String>,
        #[serde(default)]
        safety_critical: bool,
    },
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct JsonRoute {
    id: String,
    day: Integer,
    #[serde(default)]
    shift: Option<String>,
    start_location: String,
    end_location: String,
    distance_km: Integer,
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct JsonParameters {
    #[serde(default)]
    time_limit_seconds: Option<Integer>,
    #[serde(default)]
    num_workers: Option<Integer>,
    #[serde(default)]
    planning_days: Option<Integer>,
    #[serde(default)]
    force_preventive: Option<bool>,
}

/// Reads a planning problem from its JSON wire form, validates it and derives
/// the maintenance instances. Missing `parameters` fall back to the defaults.
pub fn load_fleet_planning_problem_from_json(
    input_data: serde_json::Value,
) -> Result<(Dataset, Config), InputError> {
    let json_input: JsonInput = serde_json::from_value(input_data)?;
    let config = create_config(&json_input);
    let (locations, location_indices) = create_locations(&json_input)?;
    let (maintenance_types, type_indices) = create_maintenance_types(&json_input)?;
    let fleet = create_fleet(&json_input, &location_indices, &type_indices)?;
    let routes = create_routes(&json_input, &location_indices)?;
    let dataset = Dataset::new(locations, fleet, maintenance_types, routes, &config)?;
    Ok((dataset, config))
}

fn create_config(json_input: &JsonInput) -> Config {
    let defaults = Config::default();
    match &json_input.parameters {
        None => defaults,
        Some(parameters) => Config::new(
            parameters
                .planning_days
                .map(|days| days as usize)
                .unwrap_or(defaults.planning.days),
            parameters
                .time_limit_seconds
                .unwrap_or(defaults.solver.time_limit_seconds),
            parameters
                .num_workers
                .map(|workers| workers as u32)
                .unwrap_or(defaults.solver.num_workers),
            parameters
                .force_preventive
                .unwrap_or(defaults.solver.force_preventive),
        ),
    }
}

fn create_locations(
    json_input: &JsonInput,
) -> Result<(Locations, HashMap<String, LocationIdx>), InputError> {
    let mut locations = Vec::new();
    let mut indices: HashMap<String, LocationIdx> = HashMap::new();

    for json_location in &json_input.locations {
        let idx = LocationIdx::from(locations.len());
        let location = match json_location {
            JsonLocation::Depot {
                id,
                capacity,
                manhours_per_shift,
                specialized_maintenance,
            } => Location::Depot(Depot::new(
                idx,
                id.clone(),
                *capacity as VehicleCount,
                *manhours_per_shift as Manhours,
                specialized_maintenance.clone(),
            )),
            JsonLocation::Parking { id, capacity } => {
                Location::Parking(Parking::new(idx, id.clone(), *capacity as VehicleCount))
            }
        };
        if indices
            .insert(location.id().to_string(), idx)
            .is_some()
        {
            return Err(InputError::DuplicateId(location.id().to_string()));
        }
        locations.push(location);
    }

    Ok((Locations::new(locations), indices))
}

fn create_maintenance_types(
    json_input: &JsonInput,
) -> Result<(MaintenanceTypes, HashMap<String, MaintenanceTypeIdx>), InputError> {
    let mut types = Vec::new();
    let mut indices: HashMap<String, MaintenanceTypeIdx> = HashMap::new();

    for json_type in &json_input.maintenance_types {
        let idx = MaintenanceTypeIdx::from(types.len());
        let maintenance_type = match json_type {
            JsonMaintenanceType::Preventive {
                id,
                optimal_km,
                max_km,
                manhours,
                specialization,
            } => MaintenanceType::Preventive(PreventiveType::new(
                idx,
                id.clone(),
                *optimal_km as Kilometer,
                *max_km as Kilometer,
                *manhours as Manhours,
                specialization.clone(),
            )),
            JsonMaintenanceType::Corrective {
                id,
                max_km_window,
                manhours,
                specialization,
                safety_critical,
            } => MaintenanceType::Corrective(CorrectiveType::new(
                idx,
                id.clone(),
                *max_km_window as Kilometer,
                *manhours as Manhours,
                specialization.clone(),
                *safety_critical,
            )),
        };
        if indices
            .insert(maintenance_type.id().to_string(), idx)
            .is_some()
        {
            return Err(InputError::DuplicateId(maintenance_type.id().to_string()));
        }
        types.push(maintenance_type);
    }

    Ok((MaintenanceTypes::new(types), indices))
}

fn create_fleet(
    json_input: &JsonInput,
    location_indices: &HashMap<String, LocationIdx>,
    type_indices: &HashMap<String, MaintenanceTypeIdx>,
) -> Result<Fleet, InputError> {
    let mut vehicles = Vec::new();
    let mut seen: HashMap<String, VehicleIdx> = HashMap::new();

    for json_vehicle in &json_input.vehicles {
        let idx = VehicleIdx::from(vehicles.len());
        if seen.insert(json_vehicle.id.clone(), idx).is_some() {
            return Err(InputError::DuplicateId(json_vehicle.id.clone()));
        }
        let initial_location = *location_indices
            .get(&json_vehicle.initial_location)
            .ok_or_else(|| {
                InputError::UnknownLocation(
                    json_vehicle.initial_location.clone(),
                    json_vehicle.id.clone(),
                )
            })?;
        let pending_corrective_tasks =
            create_pending_tasks(&json_vehicle.pending_corrective_tasks, json_vehicle, type_indices)?;
        let pending_preventive_tasks =
            create_pending_tasks(&json_vehicle.pending_preventive_tasks, json_vehicle, type_indices)?;
        vehicles.push(Vehicle::new(
            idx,
            json_vehicle.id.clone(),
            initial_location,
            json_vehicle.initial_km as Kilometer,
            pending_corrective_tasks,
            pending_preventive_tasks,
        ));
    }

    Ok(Fleet::new(vehicles))
}

fn create_pending_tasks(
    json_tasks: &[JsonPendingTask],
    json_vehicle: &JsonVehicle,
    type_indices: &HashMap<String, MaintenanceTypeIdx>,
) -> Result<Vec<PendingTask>, InputError> {
    json_tasks
        .iter()
        .map(|json_task| {
            let maintenance_type = *type_indices
                .get(&json_task.maintenance_type)
                .ok_or_else(|| {
                    InputError::UnknownMaintenanceType(
                        json_task.maintenance_type.clone(),
                        json_vehicle.id.clone(),
                    )
                })?;
            Ok(PendingTask::new(
                maintenance_type,
                json_task.remaining_km as Kilometer,
            ))
        })
        .collect()
}

fn create_routes(
    json_input: &JsonInput,
    location_indices: &HashMap<String, LocationIdx>,
) -> Result<Routes, InputError> {
    let mut routes = Vec::new();
    let mut seen: HashMap<String, RouteIdx> = HashMap::new();

    for json_route in &json_input.routes {
        let idx = RouteIdx::from(routes.len());
        if seen.insert(json_route.id.clone(), idx).is_some() {
            return Err(InputError::DuplicateId(json_route.id.clone()));
        }
        if let Some(shift) = &json_route.shift {
            if shift != "day" {
                return Err(InputError::NightRoute(json_route.id.clone()));
            }
        }
        let start_location = *location_indices
            .get(&json_route.start_location)
            .ok_or_else(|| {
                InputError::UnknownLocation(json_route.start_location.clone(), json_route.id.clone())
            })?;
        let end_location = *location_indices.get(&json_route.end_location).ok_or_else(|| {
            InputError::UnknownLocation(json_route.end_location.clone(), json_route.id.clone())
        })?;
        routes.push(Route::new(
            idx,
            json_route.id.clone(),
            json_route.day as usize,
            start_location,
            end_location,
            json_route.distance_km as Kilometer,
        ));
    }

    Ok(Routes::new(routes))
}
