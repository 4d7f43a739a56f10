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

use crate::base_types::{Kilometer, Manhours, MaintenanceTypeIdx};

/// The maintenance catalog, indexed by [`MaintenanceTypeIdx`].
/// The index stored in each type equals its position in the vector.
#[derive(Debug)]
pub struct MaintenanceTypes {
    types: Vec<MaintenanceType>,
}

/// Preventive maintenance is scheduled around an optimal odometer reading and
/// must happen before `max_km`. Corrective maintenance repairs a known defect
/// within a kilometer window counted from the moment the defect was recorded.
#[derive(Debug)]
pub enum MaintenanceType {
    Preventive(PreventiveType),
    Corrective(CorrectiveType),
}

#[derive(Debug)]
pub struct PreventiveType {
    idx: MaintenanceTypeIdx,
    id: String,
    optimal_km: Kilometer,
    max_km: Kilometer,
    manhours: Manhours,
    specialization: Option<String>,
}

#[derive(Debug)]
pub struct CorrectiveType {
    idx: MaintenanceTypeIdx,
    id: String,
    max_km_window: Kilometer,
    manhours: Manhours,
    specialization: Option<String>,
    safety_critical: bool,
}

/////////////////////////////////////////////////////////////////////
////////////////////////// MaintenanceTypes /////////////////////////
/////////////////////////////////////////////////////////////////////

impl MaintenanceTypes {
    pub fn new(types: Vec<MaintenanceType>) -> MaintenanceTypes {
        MaintenanceTypes { types }
    }

    pub fn get(&self, idx: MaintenanceTypeIdx) -> &MaintenanceType {
        &self.types[idx.get()]
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &MaintenanceType> + '_ {
        self.types.iter()
    }
}

/////////////////////////////////////////////////////////////////////
////////////////////////// MaintenanceType //////////////////////////
/////////////////////////////////////////////////////////////////////

impl MaintenanceType {
    pub fn idx(&self) -> MaintenanceTypeIdx {
        match self {
            MaintenanceType::Preventive(preventive) => preventive.idx,
            MaintenanceType::Corrective(corrective) => corrective.idx,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            MaintenanceType::Preventive(preventive) => &preventive.id,
            MaintenanceType::Corrective(corrective) => &corrective.id,
        }
    }

    pub fn manhours(&self) -> Manhours {
        match self {
            MaintenanceType::Preventive(preventive) => preventive.manhours,
            MaintenanceType::Corrective(corrective) => corrective.manhours,
        }
    }

    pub fn specialization(&self) -> Option<&str> {
        match self {
            MaintenanceType::Preventive(preventive) => preventive.specialization.as_deref(),
            MaintenanceType::Corrective(corrective) => corrective.specialization.as_deref(),
        }
    }

    pub fn is_preventive(&self) -> bool {
        matches!(self, MaintenanceType::Preventive(_))
    }

    pub fn as_preventive(&self) -> &PreventiveType {
        match self {
            MaintenanceType::Preventive(preventive) => preventive,
            MaintenanceType::Corrective(corrective) => {
                panic!("maintenance type {} is not preventive", corrective.id)
            }
        }
    }

    pub fn as_corrective(&self) -> &CorrectiveType {
        match self {
            MaintenanceType::Corrective(corrective) => corrective,
            MaintenanceType::Preventive(preventive) => {
                panic!("maintenance type {} is not corrective", preventive.id)
            }
        }
    }
}

impl fmt::Display for MaintenanceType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

impl PreventiveType {
    pub fn new(
        idx: MaintenanceTypeIdx,
        id: String,
        optimal_km: Kilometer,
        max_km: Kilometer,
        manhours: Manhours,
        specialization: Option<String>,
    ) -> PreventiveType {
        PreventiveType {
            idx,
            id,
            optimal_km,
            max_km,
            manhours,
            specialization,
        }
    }

    pub fn optimal_km(&self) -> Kilometer {
        self.optimal_km
    }

    pub fn max_km(&self) -> Kilometer {
        self.max_km
    }
}

impl CorrectiveType {
    pub fn new(
        idx: MaintenanceTypeIdx,
        id: String,
        max_km_window: Kilometer,
        manhours: Manhours,
        specialization: Option<String>,
        safety_critical: bool,
    ) -> CorrectiveType {
        CorrectiveType {
            idx,
            id,
            max_km_window,
            manhours,
            specialization,
            safety_critical,
        }
    }

    pub fn max_km_window(&self) -> Kilometer {
        self.max_km_window
    }

    pub fn is_safety_critical(&self) -> bool {
        self.safety_critical
    }
}
