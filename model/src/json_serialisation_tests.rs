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

use serde_json::json;

use crate::base_types::{LocationIdx, MaintenanceTypeIdx, VehicleIdx};
use crate::error::InputError;
use crate::json_serialisation::load_fleet_planning_problem_from_json;

fn small_test_input() -> serde_json::Value {
    json!({
        "locations": [
            {"id": "depot_1", "type": "depot", "capacity": 2,
             "manhoursPerShift": 8, "specializedMaintenance": ["electrical"]},
            {"id": "depot_2", "type": "depot", "capacity": 2,
             "manhoursPerShift": 4},
            {"id": "parking_1", "type": "parking", "capacity": 3}
        ],
        "vehicles": [
            {"id": "vehicle_1", "initialLocation": "depot_1", "initialKm": 9500,
             "pendingCorrectiveTasks": [
                {"maintenanceType": "brake_repair", "remainingKm": 120}
             ],
             "pendingPreventiveTasks": [
                {"maintenanceType": "overhaul", "remainingKm": 120}
             ]},
            {"id": "vehicle_2", "initialLocation": "parking_1", "initialKm": 300,
             "pendingPreventiveTasks": [
                {"maintenanceType": "overhaul", "remainingKm": 10000}
             ]}
        ],
        "maintenanceTypes": [
            {"id": "overhaul", "kind": "preventive", "optimalKm": 9600,
             "maxKm": 11000, "manhours": 10, "specialization": null},
            {"id": "brake_repair", "kind": "corrective", "maxKmWindow": 500,
             "manhours": 6, "specialization": "electrical", "safetyCritical": true}
        ],
        "routes": [
            {"id": "route_0", "day": 0, "shift": "day",
             "startLocation": "depot_1", "endLocation": "depot_2", "distanceKm": 100},
            {"id": "route_1", "day": 0,
             "startLocation": "depot_2", "endLocation": "depot_1", "distanceKm": 80},
            {"id": "route_2", "day": 1,
             "startLocation": "depot_1", "endLocation": "depot_2", "distanceKm": 50}
        ],
        "parameters": {
            "timeLimitSeconds": 10, "numWorkers": 2, "planningDays": 2,
            "forcePreventive": false
        }
    })
}

#[test]
fn test_load_from_json() {
    // ACT
    let (dataset, config) = load_fleet_planning_problem_from_json(small_test_input()).unwrap();

    // ASSERT
    assert_eq!(config.planning.days, 2);
    assert_eq!(config.number_of_shifts(), 4);
    assert_eq!(config.solver.time_limit_seconds, 10);
    assert_eq!(config.solver.num_workers, 2);
    assert!(!config.solver.force_preventive);

    let locations = dataset.locations();
    assert_eq!(locations.len(), 3);
    let depot_1 = locations.get(LocationIdx::from(0));
    assert_eq!(depot_1.id(), "depot_1");
    assert!(depot_1.is_depot());
    assert_eq!(depot_1.capacity(), 2);
    assert_eq!(depot_1.as_depot().manhours_per_shift(), 8);
    assert!(depot_1.as_depot().can_perform(Some("electrical")));
    assert!(depot_1.as_depot().can_perform(None));
    let depot_2 = locations.get(LocationIdx::from(1));
    assert!(!depot_2.as_depot().can_perform(Some("electrical")));
    let parking = locations.get(LocationIdx::from(2));
    assert!(!parking.is_depot());
    assert_eq!(parking.capacity(), 3);

    let fleet = dataset.fleet();
    assert_eq!(fleet.len(), 2);
    let vehicle_1 = fleet.get(VehicleIdx::from(0));
    assert_eq!(vehicle_1.id(), "vehicle_1");
    assert_eq!(vehicle_1.initial_location(), LocationIdx::from(0));
    assert_eq!(vehicle_1.initial_km(), 9500);
    assert_eq!(vehicle_1.pending_corrective_tasks().len(), 1);
    assert_eq!(
        vehicle_1.pending_corrective_tasks()[0].maintenance_type(),
        MaintenanceTypeIdx::from(1)
    );
    assert_eq!(vehicle_1.pending_corrective_tasks()[0].remaining_km(), 120);

    let maintenance_types = dataset.maintenance_types();
    assert_eq!(maintenance_types.len(), 2);
    let overhaul = maintenance_types.get(MaintenanceTypeIdx::from(0));
    assert!(overhaul.is_preventive());
    assert_eq!(overhaul.as_preventive().optimal_km(), 9600);
    assert_eq!(overhaul.as_preventive().max_km(), 11000);
    let brake_repair = maintenance_types.get(MaintenanceTypeIdx::from(1));
    assert!(!brake_repair.is_preventive());
    assert!(brake_repair.as_corrective().is_safety_critical());
    assert_eq!(brake_repair.specialization(), Some("electrical"));

    let routes = dataset.routes();
    assert_eq!(routes.len(), 3);
    let route_0 = routes.iter().next().unwrap();
    assert_eq!(route_0.id(), "route_0");
    assert_eq!(route_0.shift(), 0);
    assert_eq!(route_0.start_location(), LocationIdx::from(0));
    assert_eq!(route_0.end_location(), LocationIdx::from(1));
    assert_eq!(route_0.distance_km(), 100);
    assert_eq!(routes.routes_of_shift(0).count(), 2);
    assert_eq!(routes.routes_of_shift(1).count(), 0);
    assert_eq!(routes.routes_of_shift(2).count(), 1);
    // longest route of day 0 plus longest route of day 1
    assert_eq!(routes.worst_case_km(2), 150);
}

#[test]
fn test_instance_derivation() {
    let (dataset, _) = load_fleet_planning_problem_from_json(small_test_input()).unwrap();

    // the corrective task always derives an instance; vehicle_1's preventive
    // task is due within the horizon; vehicle_2's is 10000km away and is not.
    let instances = dataset.instances();
    assert_eq!(instances.len(), 2);

    let corrective = &instances[0];
    assert_eq!(corrective.id(), "vehicle_1_brake_repair_0");
    assert_eq!(corrective.vehicle(), VehicleIdx::from(0));
    assert!(!corrective.is_preventive());
    assert_eq!(corrective.max_km(), 9500 + 120);
    // specialized to electrical, hence only depot_1 qualifies
    assert_eq!(corrective.capable_depots(), &[LocationIdx::from(0)]);
    // 6 manhours against depot_1's budget of 8
    assert_eq!(corrective.duration(), 1);
    assert_eq!(corrective.manhours_per_shift(), 6);

    let preventive = &instances[1];
    assert_eq!(preventive.id(), "vehicle_1_overhaul_0");
    assert!(preventive.is_preventive());
    assert_eq!(preventive.optimal_km(), Some(9600));
    assert_eq!(preventive.max_km(), 11000);
    assert_eq!(
        preventive.capable_depots(),
        &[LocationIdx::from(0), LocationIdx::from(1)]
    );
    // 10 manhours against the smallest capable budget of 4: three shifts at
    // ceil(10 / 3) = 4 manhours each
    assert_eq!(preventive.duration(), 3);
    assert_eq!(preventive.manhours_per_shift(), 4);
}

#[test]
fn test_missing_parameters_fall_back_to_defaults() {
    let mut input = small_test_input();
    input.as_object_mut().unwrap().remove("parameters");
    // day 1 route is fine within the default horizon of 14 days
    let (_, config) = load_fleet_planning_problem_from_json(input).unwrap();
    assert_eq!(config.planning.days, 14);
    assert_eq!(config.solver.time_limit_seconds, 60);
    assert_eq!(config.solver.num_workers, 1);
    assert!(config.solver.force_preventive);
}

#[test]
fn test_unknown_location_is_rejected() {
    let mut input = small_test_input();
    input["vehicles"][0]["initialLocation"] = json!("depot_9");
    let error = load_fleet_planning_problem_from_json(input).unwrap_err();
    assert_eq!(
        error,
        InputError::UnknownLocation("depot_9".to_string(), "vehicle_1".to_string())
    );
}

#[test]
fn test_unknown_maintenance_type_is_rejected() {
    let mut input = small_test_input();
    input["vehicles"][0]["pendingCorrectiveTasks"][0]["maintenanceType"] = json!("wheel_swap");
    let error = load_fleet_planning_problem_from_json(input).unwrap_err();
    assert_eq!(
        error,
        InputError::UnknownMaintenanceType("wheel_swap".to_string(), "vehicle_1".to_string())
    );
}

#[test]
fn test_duplicate_route_id_is_rejected() {
    let mut input = small_test_input();
    input["routes"][1]["id"] = json!("route_0");
    let error = load_fleet_planning_problem_from_json(input).unwrap_err();
    assert_eq!(error, InputError::DuplicateId("route_0".to_string()));
}

#[test]
fn test_night_route_is_rejected() {
    let mut input = small_test_input();
    input["routes"][0]["shift"] = json!("night");
    let error = load_fleet_planning_problem_from_json(input).unwrap_err();
    assert_eq!(error, InputError::NightRoute("route_0".to_string()));
}

#[test]
fn test_route_outside_horizon_is_rejected() {
    let mut input = small_test_input();
    input["routes"][2]["day"] = json!(2);
    let error = load_fleet_planning_problem_from_json(input).unwrap_err();
    assert_eq!(
        error,
        InputError::RouteOutsideHorizon {
            id: "route_2".to_string(),
            day: 2,
            days: 2,
        }
    );
}

#[test]
fn test_single_depot_is_rejected() {
    let mut input = small_test_input();
    input["locations"][1]["type"] = json!("parking");
    input["locations"][1]
        .as_object_mut()
        .unwrap()
        .remove("manhoursPerShift");
    let error = load_fleet_planning_problem_from_json(input).unwrap_err();
    assert_eq!(error, InputError::TooFewDepots(1));
}

#[test]
fn test_specialization_without_capable_depot_is_rejected() {
    let mut input = small_test_input();
    input["locations"][0]["specializedMaintenance"] = json!([]);
    let error = load_fleet_planning_problem_from_json(input).unwrap_err();
    assert_eq!(
        error,
        InputError::NoCapableDepot("brake_repair".to_string())
    );
}

#[test]
fn test_optimal_beyond_max_is_rejected() {
    let mut input = small_test_input();
    input["maintenanceTypes"][0]["maxKm"] = json!(9000);
    let error = load_fleet_planning_problem_from_json(input).unwrap_err();
    assert_eq!(
        error,
        InputError::OptimalBeyondMax {
            id: "overhaul".to_string(),
            optimal_km: 9600,
            max_km: 9000,
        }
    );
}

#[test]
fn test_corrective_task_referencing_preventive_type_is_rejected() {
    let mut input = small_test_input();
    input["vehicles"][0]["pendingCorrectiveTasks"][0]["maintenanceType"] = json!("overhaul");
    let error = load_fleet_planning_problem_from_json(input).unwrap_err();
    assert!(matches!(error, InputError::Malformed(_)));
}
