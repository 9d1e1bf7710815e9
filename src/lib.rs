#![warn(
	missing_docs,
	missing_debug_implementations,
	missing_copy_implementations,
	trivial_casts,
	trivial_numeric_casts,
	unsafe_code,
	unstable_features,
	unused_import_braces,
	unused_qualifications
)]

//! A crate to find Paths on a Grid whose Tiles are blocked or slowed down by Occupants.
//!
//! ## Introduction
//! Many games keep a fixed Grid on which Units move around. Every Unit standing on a Tile may
//! block that Tile entirely or just make it more expensive to walk across. Searching Paths on
//! such a Grid happens a lot more often than the Occupants change, so this crate stores the Grid
//! as a Graph of Cells with precomputed Links between them and only updates the Links around a
//! Cell when its Occupants actually change something.
//!
//! Searches reuse the same memory for every query: Cells are tagged with the number of the
//! search that last touched them instead of being reset, and the open set is a binary Heap with
//! a pool of recycled entries that supports lowering the key of any Cell in place.
//!
//! Paths can be searched using A* for a Path to a single Tile, or a budgeted Dijkstra for all
//! Tiles reachable within a given Cost.
//!
//! ## Examples
//! Creating the Grid:
//! ```
//! use occupancy_pathfinding::prelude::*;
//!
//! // a 5x5 Grid where Units can move in all 8 directions
//! let mut grid = Grid::new((5, 5), GridConfig::default());
//!
//! assert_eq!(grid.size(), (5, 5));
//! assert!(grid.is_walkable((2, 2)));
//! ```
//!
//! ### Occupants
//! Occupants are stored in the Grid and referenced by their [`OccupantID`]. They can be attached
//! to any number of Cells:
//! ```
//! # use occupancy_pathfinding::prelude::*;
//! # let mut grid = Grid::new((5, 5), GridConfig::default());
//! let wall = grid.add_occupant(Occupant::blocking());
//! let swamp = grid.add_occupant(Occupant::with_cost(30));
//!
//! assert!(grid.attach_occupant((2, 2), wall));
//! assert!(grid.attach_occupant((1, 3), swamp));
//!
//! assert!(!grid.is_walkable((2, 2)));
//! assert_eq!(grid.cell((1, 3)).unwrap().cost_multiplier(), 30);
//!
//! // the wall can be opened again without detaching it
//! grid.set_occupant_passable(wall, true);
//! assert!(grid.is_walkable((2, 2)));
//! ```
//!
//! ### Pathfinding
//! Finding the Path to a single Goal:
//! ```
//! # use occupancy_pathfinding::prelude::*;
//! let mut grid = Grid::new((5, 5), GridConfig::default());
//!
//! let path = grid.find_path((0, 0), (4, 4)).unwrap();
//!
//! // 4 diagonal steps
//! assert_eq!(path.cost(), 4 * 14);
//! assert_eq!(path, vec![(0, 0), (1, 1), (2, 2), (3, 3), (4, 4)]);
//! ```
//! Finding every Tile that can be reached within a Cost:
//! ```
//! # use occupancy_pathfinding::prelude::*;
//! let mut grid = Grid::new((5, 5), GridConfig::default());
//!
//! let range = grid.walkable_range((2, 2), 10);
//!
//! // the start and its 4 straight neighbors
//! assert_eq!(range.len(), 5);
//! assert!(range.contains(&(2, 1)));
//! assert!(!range.contains(&(1, 1)));
//! ```
//!
//! ### Configuration
//! The second parameter of [`Grid::new`] is a [`GridConfig`] that controls the movement mode,
//! the Cost of straight and diagonal steps and how Occupant Costs are applied.
//! ```
//! use occupancy_pathfinding::prelude::*;
//!
//! let mut grid = Grid::with_heuristic(
//!     (8, 8),
//!     ManhattanHeuristic,
//!     GridConfig {
//!         costs: MoveCosts { straight: 1, diagonal: 2 },
//!         ..GridConfig::FOUR_WAY
//!     },
//! );
//!
//! assert_eq!(grid.find_path((0, 0), (3, 3)).unwrap().cost(), 6);
//! ```

/// A shorthand for Points on the grid
pub type Point = (usize, usize);

/// The Type used for the Cost of moving across the Grid
pub type Cost = usize;

/// A [`HashMap`](hashbrown::HashMap) keyed by [`Point`]s
pub type PointMap<V> = hashbrown::HashMap<Point, V>;
/// A [`HashSet`](hashbrown::HashSet) of [`Point`]s
pub type PointSet = hashbrown::HashSet<Point>;

/// Starts a timer if the `log` feature is enabled.
macro_rules! start_timer {
	($timer: ident) => {
		#[cfg(feature = "log")]
		let $timer = std::time::Instant::now();
	};
}

/// Logs the time since `$timer` was started at trace level.
macro_rules! re_trace {
	($timer: ident, $($arg: tt)+) => {
		#[cfg(feature = "log")]
		log::trace!("{} in {:?}", format_args!($($arg)+), $timer.elapsed());
	};
}

/// Forwards to [`log::debug`] if the `log` feature is enabled.
macro_rules! debug {
	($($arg: tt)+) => {
		#[cfg(feature = "log")]
		log::debug!($($arg)+);
	};
}

mod heap;

pub mod heuristic;
pub use self::heuristic::{Heuristic, ManhattanHeuristic, OctileHeuristic};

pub mod neighbors;

mod occupant;
pub use self::occupant::{Occupant, OccupantID};

mod path;
pub use self::path::Path;

mod grid;
pub use self::grid::{Cell, CostPolicy, Grid, GridConfig, Link, MoveCosts};

/// The prelude for this crate.
pub mod prelude {
	pub use crate::{
		heuristic::{Heuristic, ManhattanHeuristic, OctileHeuristic},
		Cost, CostPolicy, Grid, GridConfig, MoveCosts, Occupant, OccupantID, Path, Point,
	};
}
