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

use derive_more::{Display, From};

pub type Kilometer = u64;
pub type Manhours = u64;
pub type VehicleCount = u32;

/// Atomic time unit of the planning horizon. A horizon of `d` days has `2 * d`
/// shifts; even shifts are day shifts, odd shifts are night shifts.
pub type ShiftIdx = usize;
pub type DayIdx = usize;

pub fn is_day_shift(shift: ShiftIdx) -> bool {
    shift % 2 == 0
}

pub fn day_shift_of(day: DayIdx) -> ShiftIdx {
    2 * day
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, From, Display)]
pub struct LocationIdx(usize);

impl LocationIdx {
    pub fn get(self) -> usize {
        self.0
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, From, Display)]
pub struct VehicleIdx(usize);

impl VehicleIdx {
    pub fn get(self) -> usize {
        self.0
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, From, Display)]
pub struct MaintenanceTypeIdx(usize);

impl MaintenanceTypeIdx {
    pub fn get(self) -> usize {
        self.0
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, From, Display)]
pub struct RouteIdx(usize);

impl RouteIdx {
    pub fn get(self) -> usize {
        self.0
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, From, Display)]
pub struct InstanceIdx(usize);

impl InstanceIdx {
    pub fn get(self) -> usize {
        self.0
    }
}
