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

//! Translation of a planning instance into a mixed integer program.
//!
//! The shift-discrete constraint formulation is linearised: the per-shift
//! location and the maintenance start shift / depot become one-hot boolean
//! families, the odometer lookup at the maintenance start becomes a pair of
//! index-guarded inequalities, and the per-shift depot budgets become linear
//! demands over guard variables.

use std::collections::HashMap;

use good_lp::{constraint, variable, Expression, ProblemVariables, SolverModel, Variable};

use model::base_types::ShiftIdx;
use model::config::Config;
use model::dataset::Dataset;
use model::instances::MaintenanceInstance;

pub(crate) struct PlanVars {
    /// Number of shifts in the horizon. Location and odometer variables carry
    /// one extra entry for the state after the last shift.
    pub shifts: usize,
    /// `assign[v][r]`: vehicle `v` covers route `r`.
    pub assign: Vec<Vec<Variable>>,
    /// `at_location[v][s][l]`: vehicle `v` is at location `l` at the start of
    /// shift `s`.
    pub at_location: Vec<Vec<Vec<Variable>>>,
    /// `km[v][s]`: odometer of vehicle `v` at the start of shift `s`. Not
    /// declared integer; it is an integral function of the assignments.
    pub km: Vec<Vec<Variable>>,
    /// `done[i]`: maintenance instance `i` is executed within the horizon.
    pub done: Vec<Variable>,
    /// `start[i][s]`: instance `i` starts at shift `s`. Absent where the
    /// execution would not fit into the horizon.
    pub start: Vec<Vec<Option<Variable>>>,
    /// `chosen_depot[i][d]`: instance `i` is executed at its `d`-th capable
    /// depot. Positions follow `MaintenanceInstance::capable_depots`.
    pub chosen_depot: Vec<Vec<Variable>>,
    /// `active_at_depot[i][d][s]`: instance `i` occupies its `d`-th capable
    /// depot in shift `s`. Relaxed to `[0, 1]`; forced up by its lower bound
    /// and consumed only by the budget constraints.
    pub active_at_depot: Vec<Vec<Vec<Variable>>>,
    /// `maintenance_km[i]`: odometer of the owner at the start shift of `i`.
    pub maintenance_km: Vec<Variable>,
    /// `deviation[i]`: distance of `maintenance_km[i]` from the optimal
    /// odometer reading; preventive instances only.
    pub deviation: Vec<Option<Variable>>,
    /// Upper bound on any odometer value, used to relax guarded constraints.
    pub km_bound: f64,
}

pub(crate) fn setup_variables(
    problem: &mut ProblemVariables,
    dataset: &Dataset,
    config: &Config,
) -> PlanVars {
    let shifts = config.number_of_shifts();
    let fleet = dataset.fleet();
    let locations = dataset.locations();
    let routes = dataset.routes();
    let instances = dataset.instances();

    let max_initial_km = fleet
        .iter()
        .map(|vehicle| fleet.get(vehicle).initial_km())
        .max()
        .unwrap_or(0);
    let km_bound = (max_initial_km + routes.worst_case_km(config.planning.days) + 1) as f64;

    let assign = fleet
        .iter()
        .map(|_| {
            routes
                .iter()
                .map(|_| problem.add(variable().binary()))
                .collect()
        })
        .collect();

    let at_location = fleet
        .iter()
        .map(|_| {
            (0..=shifts)
                .map(|_| {
                    locations
                        .iter()
                        .map(|_| problem.add(variable().binary()))
                        .collect()
                })
                .collect()
        })
        .collect();

    let km = fleet
        .iter()
        .map(|_| {
            (0..=shifts)
                .map(|_| problem.add(variable().min(0).max(km_bound)))
                .collect()
        })
        .collect();

    let done = instances
        .iter()
        .map(|_| problem.add(variable().binary()))
        .collect();

    let start = instances
        .iter()
        .map(|instance| {
            (0..shifts)
                .map(|shift| {
                    if shift + instance.duration() <= shifts {
                        Some(problem.add(variable().binary()))
                    } else {
                        None
                    }
                })
                .collect()
        })
        .collect();

    let chosen_depot = instances
        .iter()
        .map(|instance| {
            instance
                .capable_depots()
                .iter()
                .map(|_| problem.add(variable().binary()))
                .collect()
        })
        .collect();

    let active_at_depot = instances
        .iter()
        .map(|instance| {
            instance
                .capable_depots()
                .iter()
                .map(|_| {
                    (0..shifts)
                        .map(|_| problem.add(variable().min(0).max(1)))
                        .collect()
                })
                .collect()
        })
        .collect();

    let maintenance_km = instances
        .iter()
        .map(|_| problem.add(variable().min(0).max(km_bound)))
        .collect();

    let deviation = instances
        .iter()
        .map(|instance| {
            if instance.is_preventive() {
                Some(problem.add(variable().min(0)))
            } else {
                None
            }
        })
        .collect();

    PlanVars {
        shifts,
        assign,
        at_location,
        km,
        done,
        start,
        chosen_depot,
        active_at_depot,
        maintenance_km,
        deviation,
        km_bound,
    }
}

/// Total absolute deviation of the preventive executions from their optimal
/// odometer readings.
pub(crate) fn objective_expression(vars: &PlanVars) -> Expression {
    vars.deviation
        .iter()
        .flatten()
        .map(|&deviation| Expression::from(deviation))
        .sum()
}

pub(crate) fn setup_constraints(
    milp: &mut impl SolverModel,
    vars: &PlanVars,
    dataset: &Dataset,
    config: &Config,
) {
    route_coverage_constraints(milp, vars, dataset);
    vehicle_exclusivity_constraints(milp, vars, dataset);
    location_constraints(milp, vars, dataset);
    kilometer_constraints(milp, vars, dataset);
    maintenance_constraints(milp, vars, dataset, config);
    manhour_constraints(milp, vars, dataset);
}

/// Sum of the route assignments of one vehicle on one shift. Empty on night
/// shifts; at most one summand can be set due to the exclusivity constraint.
fn assigned_routes_expr(vars: &PlanVars, dataset: &Dataset, vehicle: usize, shift: ShiftIdx) -> Expression {
    dataset
        .routes()
        .routes_of_shift(shift)
        .map(|route| Expression::from(vars.assign[vehicle][route.idx().get()]))
        .sum()
}

/// Whether instance `i` occupies shift `s`: the sum of its start variables
/// over the shifts from which the execution would still cover `s`.
fn active_expr(vars: &PlanVars, instance: &MaintenanceInstance, shift: ShiftIdx) -> Expression {
    let i = instance.idx().get();
    let earliest = shift.saturating_sub(instance.duration() - 1);
    (earliest..=shift)
        .filter_map(|s| vars.start[i].get(s).copied().flatten())
        .map(Expression::from)
        .sum()
}

/// Every route is covered by exactly one vehicle.
fn route_coverage_constraints(milp: &mut impl SolverModel, vars: &PlanVars, dataset: &Dataset) {
    for route in dataset.routes().iter() {
        let covering: Expression = dataset
            .fleet()
            .iter()
            .map(|vehicle| Expression::from(vars.assign[vehicle.get()][route.idx().get()]))
            .sum();
        milp.add_constraint(constraint!(covering == 1));
    }
}

/// A vehicle does at most one thing per shift: one route or one active
/// maintenance. This also keeps maintenance executions on one vehicle from
/// overlapping each other.
fn vehicle_exclusivity_constraints(
    milp: &mut impl SolverModel,
    vars: &PlanVars,
    dataset: &Dataset,
) {
    for vehicle in dataset.fleet().iter() {
        let own_instances: Vec<&MaintenanceInstance> = dataset
            .instances()
            .iter()
            .filter(|instance| instance.vehicle() == vehicle)
            .collect();
        for shift in 0..vars.shifts {
            let route_count = dataset.routes().routes_of_shift(shift).count();
            if route_count == 0 && own_instances.is_empty() {
                continue;
            }
            let mut busy = assigned_routes_expr(vars, dataset, vehicle.get(), shift);
            for instance in &own_instances {
                busy = busy + active_expr(vars, instance, shift);
            }
            milp.add_constraint(constraint!(busy <= 1));
        }
    }
}

/// Location bookkeeping: each vehicle is at exactly one location per shift,
/// starts at its initial location, stays put unless an assigned route moves
/// it, and every location obeys its capacity in every shift.
fn location_constraints(milp: &mut impl SolverModel, vars: &PlanVars, dataset: &Dataset) {
    let fleet = dataset.fleet();
    let locations = dataset.locations();

    for vehicle in fleet.iter() {
        let v = vehicle.get();

        for shift in 0..=vars.shifts {
            let somewhere: Expression = locations
                .iter()
                .map(|location| Expression::from(vars.at_location[v][shift][location.get()]))
                .sum();
            milp.add_constraint(constraint!(somewhere == 1));
        }

        let initial = fleet.get(vehicle).initial_location().get();
        milp.add_constraint(constraint!(vars.at_location[v][0][initial] == 1));

        for shift in 0..vars.shifts {
            let moving = assigned_routes_expr(vars, dataset, v, shift);
            for location in locations.iter() {
                let l = location.get();
                let stays = moving.clone() + vars.at_location[v][shift + 1][l];
                milp.add_constraint(constraint!(stays >= vars.at_location[v][shift][l]));
            }
        }

        // an assigned route pins the location after its shift to its end
        // location; the start location is deliberately not pinned
        for route in dataset.routes().iter() {
            let r = route.idx().get();
            let after = route.shift() + 1;
            milp.add_constraint(constraint!(
                vars.assign[v][r] <= vars.at_location[v][after][route.end_location().get()]
            ));
        }
    }

    for location in locations.iter() {
        let capacity = dataset.locations().get(location).capacity() as f64;
        for shift in 0..=vars.shifts {
            let occupancy: Expression = fleet
                .iter()
                .map(|vehicle| Expression::from(vars.at_location[vehicle.get()][shift][location.get()]))
                .sum();
            milp.add_constraint(constraint!(occupancy <= capacity));
        }
    }
}

/// Odometer accumulation: fixed at the initial reading, increased by the
/// distance of the assigned route per day shift, unchanged otherwise.
fn kilometer_constraints(milp: &mut impl SolverModel, vars: &PlanVars, dataset: &Dataset) {
    for vehicle in dataset.fleet().iter() {
        let v = vehicle.get();
        let initial_km = dataset.fleet().get(vehicle).initial_km() as f64;
        milp.add_constraint(constraint!(vars.km[v][0] == initial_km));

        for shift in 0..vars.shifts {
            let gained: Expression = dataset
                .routes()
                .routes_of_shift(shift)
                .map(|route| route.distance_km() as f64 * vars.assign[v][route.idx().get()])
                .sum();
            let accumulated = gained + vars.km[v][shift];
            milp.add_constraint(constraint!(accumulated == vars.km[v][shift + 1]));
        }
    }
}

/// Per-instance scheduling: start/done/depot coupling, the odometer recorded
/// at the start shift, the absolute odometer bound, presence at the chosen
/// depot, and the deviation linearisation feeding the objective.
fn maintenance_constraints(
    milp: &mut impl SolverModel,
    vars: &PlanVars,
    dataset: &Dataset,
    config: &Config,
) {
    for instance in dataset.instances() {
        let i = instance.idx().get();
        let v = instance.vehicle().get();

        let starts: Expression = vars.start[i]
            .iter()
            .filter_map(|start| start.as_ref())
            .map(|&start| Expression::from(start))
            .sum();
        milp.add_constraint(constraint!(starts == vars.done[i]));

        if !instance.is_preventive() || config.solver.force_preventive {
            milp.add_constraint(constraint!(vars.done[i] == 1));
        }

        let depots: Expression = vars.chosen_depot[i]
            .iter()
            .map(|&chosen| Expression::from(chosen))
            .sum();
        milp.add_constraint(constraint!(depots == vars.done[i]));

        // odometer lookup at the start shift, guarded by the start indicator
        for (shift, start) in vars.start[i].iter().enumerate() {
            if let Some(start) = start {
                let relax = vars.km_bound * (1 - *start);
                milp.add_constraint(constraint!(
                    vars.maintenance_km[i] <= vars.km[v][shift] + relax.clone()
                ));
                let lower = relax + vars.maintenance_km[i];
                milp.add_constraint(constraint!(lower >= vars.km[v][shift]));
            }
        }

        // the execution must happen before the instance's odometer bound
        let slack = vars.km_bound * (1 - vars.done[i]);
        let latest = slack + instance.max_km() as f64;
        milp.add_constraint(constraint!(vars.maintenance_km[i] <= latest));

        // the vehicle is at the chosen depot when the execution starts; it
        // stays there for the whole duration since active shifts exclude
        // routes and only routes move vehicles
        for (position, &depot) in instance.capable_depots().iter().enumerate() {
            let chosen = vars.chosen_depot[i][position];
            for (shift, start) in vars.start[i].iter().enumerate() {
                if let Some(start) = start {
                    let there = Expression::from(*start) + chosen;
                    let pinned = Expression::from(vars.at_location[v][shift][depot.get()]) + 1;
                    milp.add_constraint(constraint!(there <= pinned));
                }
            }
        }

        if let Some(deviation) = vars.deviation[i] {
            let optimal = instance.optimal_km().unwrap() as f64;
            let big_m = vars.km_bound.max(optimal);
            let relax = big_m * (1 - vars.done[i]);
            let above = relax.clone() + deviation + optimal;
            milp.add_constraint(constraint!(above >= vars.maintenance_km[i]));
            let below = relax + deviation + vars.maintenance_km[i];
            milp.add_constraint(constraint!(below >= optimal));
        }
    }
}

/// Per-depot per-shift manhour budgets. The guard variable of an
/// (instance, depot, shift) triple is forced to 1 exactly when the instance
/// is active in that shift and executed at that depot; the budget then sums
/// the per-shift demands of the guards.
fn manhour_constraints(milp: &mut impl SolverModel, vars: &PlanVars, dataset: &Dataset) {
    for instance in dataset.instances() {
        if instance.manhours_per_shift() == 0 {
            continue;
        }
        let i = instance.idx().get();
        for (position, _) in instance.capable_depots().iter().enumerate() {
            let chosen = vars.chosen_depot[i][position];
            for shift in 0..vars.shifts {
                let occupied = Expression::from(vars.active_at_depot[i][position][shift]) + 1;
                let required = active_expr(vars, instance, shift) + chosen;
                milp.add_constraint(constraint!(occupied >= required));
            }
        }
    }

    let mut demands: HashMap<(usize, ShiftIdx), Vec<Expression>> = HashMap::new();
    for instance in dataset.instances() {
        if instance.manhours_per_shift() == 0 {
            continue;
        }
        let i = instance.idx().get();
        for (position, &depot) in instance.capable_depots().iter().enumerate() {
            for shift in 0..vars.shifts {
                demands.entry((depot.get(), shift)).or_default().push(
                    instance.manhours_per_shift() as f64
                        * vars.active_at_depot[i][position][shift],
                );
            }
        }
    }

    for depot in dataset.locations().depots_iter() {
        let budget = depot.manhours_per_shift() as f64;
        for shift in 0..vars.shifts {
            if let Some(terms) = demands.remove(&(depot.idx().get(), shift)) {
                let demand: Expression = terms.into_iter().sum();
                milp.add_constraint(constraint!(demand <= budget));
            }
        }
    }
}
