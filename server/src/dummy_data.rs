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

//! A seeded stand-in for a real data provider. Useful for demos and smoke
//! tests; the same seed always yields the identical instance.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde_json::json;

pub fn dummy_instance() -> serde_json::Value {
    dummy_instance_with_seed(42)
}

/// A two-day instance: two depots and a parking, two vehicles, one electrical
/// repair that must route to the specialized depot and one preventive check.
pub fn dummy_instance_with_seed(seed: u64) -> serde_json::Value {
    let mut rng = StdRng::seed_from_u64(seed);

    let out_distance: u64 = rng.gen_range(40..=80);
    let return_distance: u64 = rng.gen_range(40..=80);
    let repair_window: u64 = rng.gen_range(100..=150);
    let checked_km: u64 = rng.gen_range(5000..=6000);
    let check_due_in: u64 = rng.gen_range(50..=150);

    let mut routes = Vec::new();
    for day in 0..2 {
        routes.push(json!({
            "id": format!("out_{}", day),
            "day": day,
            "startLocation": "depot_1",
            "endLocation": "depot_2",
            "distanceKm": out_distance,
        }));
        routes.push(json!({
            "id": format!("return_{}", day),
            "day": day,
            "startLocation": "depot_2",
            "endLocation": "depot_1",
            "distanceKm": return_distance,
        }));
    }

    json!({
        "locations": [
            {"id": "depot_1", "type": "depot", "capacity": 2, "manhoursPerShift": 8},
            {"id": "depot_2", "type": "depot", "capacity": 2, "manhoursPerShift": 8,
             "specializedMaintenance": ["electrical"]},
            {"id": "parking_1", "type": "parking", "capacity": 1}
        ],
        "vehicles": [
            {"id": "vehicle_1", "initialLocation": "depot_1", "initialKm": 12000,
             "pendingCorrectiveTasks": [
                {"maintenanceType": "pantograph_fix", "remainingKm": repair_window}
             ]},
            {"id": "vehicle_2", "initialLocation": "parking_1", "initialKm": checked_km,
             "pendingPreventiveTasks": [
                {"maintenanceType": "brake_check", "remainingKm": check_due_in}
             ]}
        ],
        "maintenanceTypes": [
            {"id": "pantograph_fix", "kind": "corrective", "maxKmWindow": repair_window,
             "manhours": 4, "specialization": "electrical", "safetyCritical": true},
            {"id": "brake_check", "kind": "preventive",
             "optimalKm": checked_km + check_due_in,
             "maxKm": checked_km + check_due_in + 200,
             "manhours": 4}
        ],
        "routes": routes,
        "parameters": {"planningDays": 2}
    })
}
