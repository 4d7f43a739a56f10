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

use crate::base_types::{day_shift_of, DayIdx, Kilometer, LocationIdx, RouteIdx, ShiftIdx};

/// The predefined daily routes, indexed by [`RouteIdx`].
/// The index stored in each route equals its position in the vector.
/// Routes live on day shifts only; every route must be covered by exactly one
/// vehicle.
#[derive(Debug)]
pub struct Routes {
    routes: Vec<Route>,
}

#[derive(Debug)]
pub struct Route {
    idx: RouteIdx,
    id: String,
    day: DayIdx,
    start_location: LocationIdx,
    end_location: LocationIdx,
    distance_km: Kilometer,
}

/////////////////////////////////////////////////////////////////////
////////////////////////////// Routes ///////////////////////////////
/////////////////////////////////////////////////////////////////////

impl Routes {
    pub fn new(routes: Vec<Route>) -> Routes {
        Routes { routes }
    }

    pub fn get(&self, idx: RouteIdx) -> &Route {
        &self.routes[idx.get()]
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Route> + '_ {
        self.routes.iter()
    }

    pub fn routes_of_shift(&self, shift: ShiftIdx) -> impl Iterator<Item = &Route> + '_ {
        self.routes.iter().filter(move |route| route.shift() == shift)
    }

    /// Upper bound on the kilometers a single vehicle can accumulate within
    /// the given horizon: per day, the longest route of that day.
    pub fn worst_case_km(&self, days: usize) -> Kilometer {
        (0..days)
            .map(|day| {
                self.routes
                    .iter()
                    .filter(|route| route.day == day)
                    .map(|route| route.distance_km)
                    .max()
                    .unwrap_or(0)
            })
            .sum()
    }
}

/////////////////////////////////////////////////////////////////////
/////////////////////////////// Route ///////////////////////////////
/////////////////////////////////////////////////////////////////////

impl Route {
    pub fn new(
        idx: RouteIdx,
        id: String,
        day: DayIdx,
        start_location: LocationIdx,
        end_location: LocationIdx,
        distance_km: Kilometer,
    ) -> Route {
        Route {
            idx,
            id,
            day,
            start_location,
            end_location,
            distance_km,
        }
    }

    pub fn idx(&self) -> RouteIdx {
        self.idx
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn day(&self) -> DayIdx {
        self.day
    }

    /// The day shift on which this route runs.
    pub fn shift(&self) -> ShiftIdx {
        day_shift_of(self.day)
    }

    pub fn start_location(&self) -> LocationIdx {
        self.start_location
    }

    pub fn end_location(&self) -> LocationIdx {
        self.end_location
    }

    pub fn distance_km(&self) -> Kilometer {
        self.distance_km
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "route {} (day {}; {} -> {}; {}km)",
            self.id, self.day, self.start_location, self.end_location, self.distance_km
        )
    }
}
