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

use std::fmt;

use crate::base_types::{Kilometer, LocationIdx, MaintenanceTypeIdx, VehicleIdx};

/// The homogeneous fleet, indexed by [`VehicleIdx`].
/// The index stored in each vehicle equals its position in the vector.
#[derive(Debug)]
pub struct Fleet {
    vehicles: Vec<Vehicle>,
}

#[derive(Debug)]
pub struct Vehicle {
    idx: VehicleIdx,
    id: String,
    initial_location: LocationIdx,
    initial_km: Kilometer, // odometer reading at the start of the horizon
    pending_corrective_tasks: Vec<PendingTask>,
    pending_preventive_tasks: Vec<PendingTask>,
}

/// A maintenance obligation recorded against a vehicle. `remaining_km` is the
/// number of kilometers the vehicle may still accumulate before the referenced
/// maintenance type is due.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PendingTask {
    maintenance_type: MaintenanceTypeIdx,
    remaining_km: Kilometer,
}

/////////////////////////////////////////////////////////////////////
/////////////////////////////// Fleet ///////////////////////////////
/////////////////////////////////////////////////////////////////////

impl Fleet {
    pub fn new(vehicles: Vec<Vehicle>) -> Fleet {
        Fleet { vehicles }
    }

    pub fn get(&self, idx: VehicleIdx) -> &Vehicle {
        &self.vehicles[idx.get()]
    }

    pub fn len(&self) -> usize {
        self.vehicles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = VehicleIdx> + '_ {
        (0..self.vehicles.len()).map(VehicleIdx::from)
    }
}

/////////////////////////////////////////////////////////////////////
////////////////////////////// Vehicle //////////////////////////////
/////////////////////////////////////////////////////////////////////

impl Vehicle {
    pub fn new(
        idx: VehicleIdx,
        id: String,
        initial_location: LocationIdx,
        initial_km: Kilometer,
        pending_corrective_tasks: Vec<PendingTask>,
        pending_preventive_tasks: Vec<PendingTask>,
    ) -> Vehicle {
        Vehicle {
            idx,
            id,
            initial_location,
            initial_km,
            pending_corrective_tasks,
            pending_preventive_tasks,
        }
    }

    pub fn idx(&self) -> VehicleIdx {
        self.idx
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn initial_location(&self) -> LocationIdx {
        self.initial_location
    }

    pub fn initial_km(&self) -> Kilometer {
        self.initial_km
    }

    pub fn pending_corrective_tasks(&self) -> &[PendingTask] {
        &self.pending_corrective_tasks
    }

    pub fn pending_preventive_tasks(&self) -> &[PendingTask] {
        &self.pending_preventive_tasks
    }
}

impl fmt::Display for Vehicle {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "vehicle {} ({}km)", self.id, self.initial_km)
    }
}

impl PendingTask {
    pub fn new(maintenance_type: MaintenanceTypeIdx, remaining_km: Kilometer) -> PendingTask {
        PendingTask {
            maintenance_type,
            remaining_km,
        }
    }

    pub fn maintenance_type(&self) -> MaintenanceTypeIdx {
        self.maintenance_type
    }

    pub fn remaining_km(&self) -> Kilometer {
        self.remaining_km
    }
}
