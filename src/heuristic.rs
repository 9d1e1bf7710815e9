//! A Module with the most common Heuristics

use crate::{grid::MoveCosts, Cost, Point};
use std::fmt::Debug;

/// Estimates how expensive it is to reach `goal` from a Point.
///
/// A* only returns the cheapest Path if the estimate never exceeds the actual Cost of the
/// remaining Path (_admissible_) and never drops by more than the Cost of a single step
/// (_consistent_). Both provided implementations satisfy this for the movement modes listed in
/// their documentation.
///
/// The Heuristic is a type parameter of [`Grid`](crate::Grid) and can not be swapped out after
/// creating the Grid.
pub trait Heuristic: Clone + Debug {
	/// Gives a Heuristic for how long it takes to reach `goal` from `point`.
	///
	/// `costs` are the Costs of a single straight or diagonal step on the Grid.
	///
	/// If there is no proper way of calculation how long it takes, simply return 0. This will
	/// increase the time it takes to calculate the Path, but at least it will always be correct.
	fn estimate(&self, point: Point, goal: Point, costs: MoveCosts) -> Cost;
}

/// The Distance when moving along the 4 cardinal directions.
///
/// Also known as Manhattan Metric or [Taxicab Geometry](https://en.wikipedia.org/wiki/Taxicab_geometry).
///
/// Only admissible for four-way movement. On an eight-way Grid it overestimates the Cost of
/// diagonal steps and the resulting Paths may be longer than necessary.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ManhattanHeuristic;

impl Heuristic for ManhattanHeuristic {
	fn estimate(&self, point: Point, goal: Point, costs: MoveCosts) -> Cost {
		let (dx, dy) = delta(point, goal);
		(dx + dy) * costs.straight
	}
}

/// The exact Cost of walking from `point` to `goal` on an empty Grid with diagonal steps.
///
/// Uses as many diagonal steps as possible and covers the rest with straight steps. This is
/// admissible for both four-way and eight-way movement, but only tight for eight-way.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct OctileHeuristic;

impl Heuristic for OctileHeuristic {
	fn estimate(&self, point: Point, goal: Point, costs: MoveCosts) -> Cost {
		let (dx, dy) = delta(point, goal);
		let (min, max) = if dx < dy { (dx, dy) } else { (dy, dx) };
		// a diagonal step is never worse than two straight ones and vice versa
		let diagonal = costs.diagonal.min(2 * costs.straight);
		let straight = costs.straight.min(costs.diagonal);
		diagonal * min + straight * (max - min)
	}
}

fn delta(point: Point, goal: Point) -> (usize, usize) {
	let dx = if goal.0 > point.0 {
		goal.0 - point.0
	} else {
		point.0 - goal.0
	};
	let dy = if goal.1 > point.1 {
		goal.1 - point.1
	} else {
		point.1 - goal.1
	};
	(dx, dy)
}
