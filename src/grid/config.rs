use crate::Cost;

/// The Cost of a single step on the Grid, before Occupants are taken into account.
///
/// Default values:
/// ```
/// # use occupancy_pathfinding::MoveCosts;
/// assert_eq!(MoveCosts { straight: 10, diagonal: 14 }, Default::default());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MoveCosts {
	/// Cost of a step along one of the 4 cardinal directions (defaults to `10`)
	pub straight: Cost,
	/// Cost of a diagonal step (defaults to `14`)
	pub diagonal: Cost,
}

impl MoveCosts {
	/// The default Costs, approximating `10 * sqrt(2)` for diagonal steps
	pub const DEFAULT: MoveCosts = MoveCosts {
		straight: 10,
		diagonal: 14,
	};
}

impl Default for MoveCosts {
	fn default() -> MoveCosts {
		MoveCosts::DEFAULT
	}
}

/// How the Cost multiplier of a Cell affects the Links leading into it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CostPolicy {
	/// Occupants can only block Cells. Their Costs are tracked, but every step costs exactly
	/// the [`MoveCosts`] value.
	Blocking,
	/// (default) A step into a Cell costs the [`MoveCosts`] value plus the Cost multiplier of
	/// that Cell.
	Additive,
}

impl Default for CostPolicy {
	fn default() -> CostPolicy {
		CostPolicy::Additive
	}
}

/// Options for configuring the [`Grid`](crate::Grid)
///
/// Default options:
/// ```
/// # use occupancy_pathfinding::{CostPolicy, GridConfig, MoveCosts};
/// assert_eq!(
/// 	GridConfig {
/// 		four_way: false,
/// 		costs: MoveCosts { straight: 10, diagonal: 14 },
/// 		cost_policy: CostPolicy::Additive,
/// 	},
/// 	Default::default()
/// );
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridConfig {
	/// `true`: Paths may only move along the 4 cardinal directions.
	///
	/// `false` (default): diagonal steps are allowed as well, as long as they don't cut the
	/// corner of an unwalkable Cell.
	///
	/// Can be changed later with [`Grid::set_four_way`](crate::Grid::set_four_way).
	pub four_way: bool,
	/// The Cost of straight and diagonal steps. Both have to be greater than `0`.
	pub costs: MoveCosts,
	/// How Occupant Costs are added to the Links. See [`CostPolicy`].
	pub cost_policy: CostPolicy,
}

impl GridConfig {
	/// The default options, restricted to the 4 cardinal directions
	///
	/// Values:
	/// ```
	/// # use occupancy_pathfinding::{CostPolicy, GridConfig, MoveCosts};
	/// assert_eq!(
	/// 	GridConfig {
	/// 		four_way: true,
	/// 		costs: MoveCosts { straight: 10, diagonal: 14 },
	/// 		cost_policy: CostPolicy::Additive,
	/// 	},
	/// 	GridConfig::FOUR_WAY
	/// );
	/// ```
	pub const FOUR_WAY: GridConfig = GridConfig {
		four_way: true,
		costs: MoveCosts::DEFAULT,
		cost_policy: CostPolicy::Additive,
	};
	/// The default options, but Occupants can only block Cells
	///
	/// Values:
	/// ```
	/// # use occupancy_pathfinding::{CostPolicy, GridConfig, MoveCosts};
	/// assert_eq!(
	/// 	GridConfig {
	/// 		four_way: false,
	/// 		costs: MoveCosts { straight: 10, diagonal: 14 },
	/// 		cost_policy: CostPolicy::Blocking,
	/// 	},
	/// 	GridConfig::BLOCKING
	/// );
	/// ```
	pub const BLOCKING: GridConfig = GridConfig {
		four_way: false,
		costs: MoveCosts::DEFAULT,
		cost_policy: CostPolicy::Blocking,
	};

	/// The default options with the given movement mode
	pub const fn with_four_way(four_way: bool) -> GridConfig {
		GridConfig {
			four_way,
			costs: MoveCosts::DEFAULT,
			cost_policy: CostPolicy::Additive,
		}
	}

	/// The Cost of a single step into a Cell with the given multiplier.
	pub(crate) fn step_cost(&self, diagonal: bool, multiplier: Cost) -> Cost {
		let base = if diagonal {
			self.costs.diagonal
		} else {
			self.costs.straight
		};
		match self.cost_policy {
			CostPolicy::Blocking => base,
			CostPolicy::Additive => base.saturating_add(multiplier),
		}
	}
}

impl Default for GridConfig {
	fn default() -> GridConfig {
		GridConfig::with_four_way(false)
	}
}
