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

use crate::base_types::{LocationIdx, Manhours, VehicleCount};

/// All locations of the planning instance, indexed by [`LocationIdx`].
/// The index stored in each location equals its position in the vector.
#[derive(Debug)]
pub struct Locations {
    locations: Vec<Location>,
}

/// A location is either a depot (maintenance-capable, with a per-shift
/// manhour budget) or a plain parking. Capacity is a hard upper bound on the
/// number of vehicles residing at the location at the start of any shift.
#[derive(Debug)]
pub enum Location {
    Depot(Depot),
    Parking(Parking),
}

#[derive(Debug)]
pub struct Depot {
    idx: LocationIdx,
    id: String,
    capacity: VehicleCount,
    manhours_per_shift: Manhours, // replenished every shift, not cumulative
    specialized_maintenance: Vec<String>,
}

#[derive(Debug)]
pub struct Parking {
    idx: LocationIdx,
    id: String,
    capacity: VehicleCount,
}

/////////////////////////////////////////////////////////////////////
////////////////////////////// Locations ////////////////////////////
/////////////////////////////////////////////////////////////////////

impl Locations {
    pub fn new(locations: Vec<Location>) -> Locations {
        Locations { locations }
    }

    pub fn get(&self, idx: LocationIdx) -> &Location {
        &self.locations[idx.get()]
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = LocationIdx> + '_ {
        (0..self.locations.len()).map(LocationIdx::from)
    }

    pub fn depots_iter(&self) -> impl Iterator<Item = &Depot> + '_ {
        self.locations.iter().filter_map(|location| match location {
            Location::Depot(depot) => Some(depot),
            Location::Parking(_) => None,
        })
    }

    /// All depots at which a maintenance with the given specialization may be
    /// executed. Unspecialized maintenance can go to any depot.
    pub fn capable_depots(&self, specialization: Option<&str>) -> Vec<LocationIdx> {
        self.depots_iter()
            .filter(|depot| depot.can_perform(specialization))
            .map(|depot| depot.idx())
            .collect()
    }
}

/////////////////////////////////////////////////////////////////////
////////////////////////////// Location /////////////////////////////
/////////////////////////////////////////////////////////////////////

impl Location {
    pub fn idx(&self) -> LocationIdx {
        match self {
            Location::Depot(depot) => depot.idx,
            Location::Parking(parking) => parking.idx,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Location::Depot(depot) => &depot.id,
            Location::Parking(parking) => &parking.id,
        }
    }

    pub fn capacity(&self) -> VehicleCount {
        match self {
            Location::Depot(depot) => depot.capacity,
            Location::Parking(parking) => parking.capacity,
        }
    }

    pub fn is_depot(&self) -> bool {
        matches!(self, Location::Depot(_))
    }

    pub fn as_depot(&self) -> &Depot {
        match self {
            Location::Depot(depot) => depot,
            Location::Parking(parking) => panic!("location {} is not a depot", parking.id),
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

impl Depot {
    pub fn new(
        idx: LocationIdx,
        id: String,
        capacity: VehicleCount,
        manhours_per_shift: Manhours,
        specialized_maintenance: Vec<String>,
    ) -> Depot {
        Depot {
            idx,
            id,
            capacity,
            manhours_per_shift,
            specialized_maintenance,
        }
    }

    pub fn idx(&self) -> LocationIdx {
        self.idx
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn capacity(&self) -> VehicleCount {
        self.capacity
    }

    pub fn manhours_per_shift(&self) -> Manhours {
        self.manhours_per_shift
    }

    pub fn specialized_maintenance(&self) -> &[String] {
        &self.specialized_maintenance
    }

    pub fn can_perform(&self, specialization: Option<&str>) -> bool {
        match specialization {
            None => true,
            Some(needed) => self
                .specialized_maintenance
                .iter()
                .any(|provided| provided == needed),
        }
    }
}

impl Parking {
    pub fn new(idx: LocationIdx, id: String, capacity: VehicleCount) -> Parking {
        Parking { idx, id, capacity }
    }

    pub fn idx(&self) -> LocationIdx {
        self.idx
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn capacity(&self) -> VehicleCount {
        self.capacity
    }
}
