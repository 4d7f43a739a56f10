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

use std::sync::Arc;

use crate::config::Config;
use crate::error::InputError;
use crate::fleet::Fleet;
use crate::instances::{derive_instances, MaintenanceInstance};
use crate::locations::Locations;
use crate::maintenance::{MaintenanceType, MaintenanceTypes};
use crate::routes::Routes;

/// The validated input of one planning run, together with the maintenance
/// instances derived from the pending tasks. Read-only once constructed.
#[derive(Clone, Debug)]
pub struct Dataset {
    locations: Arc<Locations>,
    fleet: Arc<Fleet>,
    maintenance_types: Arc<MaintenanceTypes>,
    routes: Arc<Routes>,
    instances: Arc<Vec<MaintenanceInstance>>,
}

impl Dataset {
    /// Validates the cross-entity rules and derives the maintenance
    /// instances. Fails fast with a descriptive error; no partially valid
    /// dataset ever escapes.
    pub fn new(
        locations: Locations,
        fleet: Fleet,
        maintenance_types: MaintenanceTypes,
        routes: Routes,
        config: &Config,
    ) -> Result<Dataset, InputError> {
        let depot_count = locations.depots_iter().count();
        if depot_count < 2 {
            return Err(InputError::TooFewDepots(depot_count));
        }

        for maintenance_type in maintenance_types.iter() {
            if maintenance_type.specialization().is_some()
                && locations
                    .capable_depots(maintenance_type.specialization())
                    .is_empty()
            {
                return Err(InputError::NoCapableDepot(
                    maintenance_type.id().to_string(),
                ));
            }
            if let MaintenanceType::Preventive(preventive) = maintenance_type {
                if preventive.optimal_km() > preventive.max_km() {
                    return Err(InputError::OptimalBeyondMax {
                        id: maintenance_type.id().to_string(),
                        optimal_km: preventive.optimal_km(),
                        max_km: preventive.max_km(),
                    });
                }
            }
        }

        for route in routes.iter() {
            if route.day() >= config.planning.days {
                return Err(InputError::RouteOutsideHorizon {
                    id: route.id().to_string(),
                    day: route.day(),
                    days: config.planning.days,
                });
            }
        }

        let instances = derive_instances(&fleet, &maintenance_types, &locations, &routes, config)?;

        Ok(Dataset {
            locations: Arc::new(locations),
            fleet: Arc::new(fleet),
            maintenance_types: Arc::new(maintenance_types),
            routes: Arc::new(routes),
            instances: Arc::new(instances),
        })
    }

    pub fn locations(&self) -> &Locations {
        &self.locations
    }

    pub fn fleet(&self) -> &Fleet {
        &self.fleet
    }

    pub fn maintenance_types(&self) -> &MaintenanceTypes {
        &self.maintenance_types
    }

    pub fn routes(&self) -> &Routes {
        &self.routes
    }

    pub fn instances(&self) -> &[MaintenanceInstance] {
        &self.instances
    }
}
