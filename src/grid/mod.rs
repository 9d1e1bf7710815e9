use crate::heap::{CellID, IndexedHeap};
use crate::heuristic::{Heuristic, OctileHeuristic};
use crate::neighbors::{get_neighbors, is_diagonal};
use crate::occupant::OccupantList;
use crate::{Cost, Occupant, OccupantID, Point};

mod a_star;
mod dijkstra;

mod cell;
pub use self::cell::{Cell, Link};

mod config;
pub use self::config::{CostPolicy, GridConfig, MoveCosts};

/// A Grid of Cells with precomputed Links that answers Path queries.
///
/// The Grid owns all Cells, the Occupants standing on them and the memory used by the searches.
/// Changing the Occupants of a Cell immediately updates the Links of that Cell and its
/// neighbors, so no further bookkeeping is required between queries.
#[derive(Clone, Debug)]
pub struct Grid<H: Heuristic = OctileHeuristic> {
	width: usize,
	height: usize,
	cells: Vec<Cell>,
	occupants: OccupantList,
	heuristic: H,
	config: GridConfig,
	heap: IndexedHeap,
	search_epoch: u32,
	range_epoch: u32,
}

impl Grid<OctileHeuristic> {
	/// Creates a new Grid where every Cell is walkable, using the [`OctileHeuristic`].
	///
	/// ## Arguments
	/// - `(width, height)` - the size of the Grid
	/// - `config` - options for the Grid. (See [`GridConfig`])
	///
	/// ## Panics
	/// if one of the [`MoveCosts`] is `0`.
	///
	/// ## Examples
	/// ```
	/// use occupancy_pathfinding::prelude::*;
	///
	/// let grid = Grid::new((4, 3), GridConfig::FOUR_WAY);
	///
	/// assert!(grid.cell((3, 2)).is_some());
	/// assert!(grid.cell((4, 2)).is_none());
	/// assert_eq!(grid.links((0, 0)).unwrap().count(), 2);
	/// ```
	pub fn new(size: (usize, usize), config: GridConfig) -> Grid<OctileHeuristic> {
		Grid::with_heuristic(size, OctileHeuristic, config)
	}
}

impl<H: Heuristic> Grid<H> {
	/// Creates a new Grid where every Cell is walkable, using a custom [`Heuristic`].
	///
	/// See [`Grid::new`] for details.
	#[track_caller]
	pub fn with_heuristic(
		(width, height): (usize, usize),
		heuristic: H,
		config: GridConfig,
	) -> Grid<H> {
		assert!(
			config.costs.straight > 0 && config.costs.diagonal > 0,
			"MoveCosts have to be greater than 0: {:?}",
			config.costs
		);
		start_timer!(timer);

		let mut cells = Vec::with_capacity(width * height);
		for y in 0..height {
			for x in 0..width {
				cells.push(Cell::new((x, y)));
			}
		}
		let count = cells.len();

		let mut grid = Grid {
			width,
			height,
			cells,
			occupants: OccupantList::new(),
			heuristic,
			config,
			heap: IndexedHeap::new(count / 2, count),
			search_epoch: 0,
			range_epoch: 0,
		};
		grid.refresh_all_links();

		re_trace!(timer, "created {}x{} Grid", width, height);
		grid
	}

	/// The size of the Grid as `(width, height)`
	pub fn size(&self) -> (usize, usize) {
		(self.width, self.height)
	}

	/// The options the Grid was created with
	pub fn config(&self) -> &GridConfig {
		&self.config
	}

	/// The Heuristic used by [`find_path`](Grid::find_path)
	pub fn heuristic(&self) -> &H {
		&self.heuristic
	}

	/// The Cell at `pos`, or `None` if `pos` is outside of the Grid
	pub fn cell(&self, pos: Point) -> Option<&Cell> {
		self.index_of(pos).map(|id| &self.cells[id])
	}

	/// Iterates over all Cells, row by row
	pub fn cells(&self) -> impl Iterator<Item = &Cell> + '_ {
		self.cells.iter()
	}

	/// `true` if `pos` is inside the Grid and not blocked by an Occupant
	pub fn is_walkable(&self, pos: Point) -> bool {
		self.cell(pos).map_or(false, Cell::is_walkable)
	}

	/// The targets and Costs of all Links leaving the Cell at `pos`
	pub fn links(&self, pos: Point) -> Option<impl Iterator<Item = (Point, Cost)> + '_> {
		let cell = self.cell(pos)?;
		Some(
			cell.links
				.iter()
				.map(move |link| (self.cells[link.target].pos(), link.cost)),
		)
	}

	/// Changes the movement mode and rebuilds all Links if it differs from the current one.
	///
	/// ## Examples
	/// ```
	/// # use occupancy_pathfinding::prelude::*;
	/// let mut grid = Grid::new((3, 3), GridConfig::default());
	/// assert_eq!(grid.links((1, 1)).unwrap().count(), 8);
	///
	/// grid.set_four_way(true);
	/// assert_eq!(grid.links((1, 1)).unwrap().count(), 4);
	/// ```
	pub fn set_four_way(&mut self, four_way: bool) {
		if self.config.four_way != four_way {
			self.config.four_way = four_way;
			self.refresh_all_links();
		}
	}

	// ---------------------------------------------------------------------------------------
	// Occupants
	// ---------------------------------------------------------------------------------------

	/// Stores a new Occupant in the Grid. It does not stand on any Cell until it is attached.
	pub fn add_occupant(&mut self, occupant: Occupant) -> OccupantID {
		self.occupants.insert(occupant)
	}

	/// Detaches the Occupant from all of its Cells and removes it from the Grid.
	pub fn remove_occupant(&mut self, id: OccupantID) -> Option<Occupant> {
		let (occupant, holders) = self.occupants.remove(id)?;
		for cell in holders {
			self.cells[cell].remove_occupant(id);
			self.cell_changed(cell);
		}
		Some(occupant)
	}

	/// The Occupant with the given ID
	pub fn occupant(&self, id: OccupantID) -> Option<&Occupant> {
		self.occupants.get(id)
	}

	/// The number of Occupants stored in the Grid
	pub fn occupant_count(&self) -> usize {
		self.occupants.len()
	}

	/// The positions of all Cells the Occupant is attached to
	pub fn occupant_cells(&self, id: OccupantID) -> impl Iterator<Item = Point> + '_ {
		self.occupants
			.holders(id)
			.iter()
			.map(move |&cell| self.cells[cell].pos())
	}

	/// Puts the Occupant onto the Cell at `pos`.
	///
	/// Returns `false` without changing anything if `pos` is outside of the Grid, the Occupant
	/// does not exist, the Cell is currently unwalkable or the Occupant is already attached to it.
	pub fn attach_occupant(&mut self, pos: Point, id: OccupantID) -> bool {
		let Some(cell) = self.index_of(pos) else {
			return false;
		};
		if !self.occupants.contains(id)
			|| !self.cells[cell].is_walkable()
			|| self.cells[cell].has_occupant(id)
		{
			return false;
		}
		self.cells[cell].push_occupant(id);
		self.occupants.add_holder(id, cell);
		self.cell_changed(cell);
		true
	}

	/// Takes the Occupant off the Cell at `pos`. Returns `false` if it was not attached there.
	pub fn detach_occupant(&mut self, pos: Point, id: OccupantID) -> bool {
		let Some(cell) = self.index_of(pos) else {
			return false;
		};
		if !self.cells[cell].remove_occupant(id) {
			return false;
		}
		self.occupants.remove_holder(id, cell);
		self.cell_changed(cell);
		true
	}

	/// Changes whether the Occupant blocks its Cells.
	///
	/// Returns `true` if the value changed, in which case all Cells holding the Occupant are
	/// updated. Returns `false` if the Occupant does not exist or already had that value.
	pub fn set_occupant_passable(&mut self, id: OccupantID, passable: bool) -> bool {
		let changed = self
			.occupants
			.get_mut(id)
			.map_or(false, |occupant| occupant.set_passable(passable));
		if changed {
			self.occupant_changed(id);
		}
		changed
	}

	/// Changes the Cost the Occupant adds to its Cells.
	///
	/// Returns `true` if the value changed, in which case all Cells holding the Occupant are
	/// updated. Returns `false` if the Occupant does not exist or already had that value.
	pub fn set_occupant_cost(&mut self, id: OccupantID, cost: Cost) -> bool {
		let changed = self
			.occupants
			.get_mut(id)
			.map_or(false, |occupant| occupant.set_cost(cost));
		if changed {
			self.occupant_changed(id);
		}
		changed
	}

	fn occupant_changed(&mut self, id: OccupantID) {
		for i in 0..self.occupants.holders(id).len() {
			let cell = self.occupants.holders(id)[i];
			self.cell_changed(cell);
		}
	}

	/// Recomputes the derived values of a Cell and refreshes the Links around it if needed.
	fn cell_changed(&mut self, cell: CellID) {
		let change = self.cells[cell].recompute(&self.occupants);
		let cost_matters = self.config.cost_policy == CostPolicy::Additive;
		if change.walkable || (change.cost && cost_matters) {
			self.refresh_links_around(cell);
		}
	}

	// ---------------------------------------------------------------------------------------
	// Links
	// ---------------------------------------------------------------------------------------

	pub(crate) fn index_of(&self, (x, y): Point) -> Option<CellID> {
		if x < self.width && y < self.height {
			Some(y * self.width + x)
		} else {
			None
		}
	}

	/// Rebuilds the Links of `cell` and every Cell in the 3x3 block around it.
	fn refresh_links_around(&mut self, cell: CellID) {
		let pos = self.cells[cell].pos();
		let size = (self.width, self.height);
		self.cells[cell].links = compute_links(&self.cells, size, &self.config, cell);
		for (x, y) in get_neighbors(pos, size, false) {
			let other = y * self.width + x;
			self.cells[other].links = compute_links(&self.cells, size, &self.config, other);
		}
	}

	fn refresh_all_links(&mut self) {
		start_timer!(timer);
		let size = (self.width, self.height);
		let cells = &self.cells;
		let config = &self.config;

		#[cfg(feature = "parallel")]
		let links: Vec<Vec<Link>> = {
			use rayon::prelude::*;
			(0..cells.len())
				.into_par_iter()
				.map(|id| compute_links(cells, size, config, id))
				.collect()
		};
		#[cfg(not(feature = "parallel"))]
		let links: Vec<Vec<Link>> = (0..cells.len())
			.map(|id| compute_links(cells, size, config, id))
			.collect();

		for (cell, links) in self.cells.iter_mut().zip(links) {
			cell.links = links;
		}
		re_trace!(timer, "rebuilt Links of {} Cells", self.cells.len());
	}

	/// Moves on to the next search epoch, clearing all tags if the counter would overflow.
	fn next_search_epoch(&mut self) -> u32 {
		if self.search_epoch >= u32::MAX - 2 {
			debug!("search epoch overflow, clearing all Cells");
			for cell in self.cells.iter_mut() {
				cell.search_epoch = 0;
			}
			self.search_epoch = 0;
		}
		self.search_epoch += 2;
		self.search_epoch
	}

	fn next_range_epoch(&mut self) -> u32 {
		if self.range_epoch == u32::MAX {
			for cell in self.cells.iter_mut() {
				cell.range_epoch = 0;
			}
			self.range_epoch = 0;
		}
		self.range_epoch += 1;
		self.range_epoch
	}
}

/// The Links of a single Cell, computed from the walkability of its neighbors.
fn compute_links(cells: &[Cell], size: (usize, usize), config: &GridConfig, id: CellID) -> Vec<Link> {
	let cell = &cells[id];
	if !cell.is_walkable() {
		return Vec::new();
	}
	let index = |(x, y): Point| y * size.0 + x;
	let pos = cell.pos();

	let mut links = Vec::with_capacity(if config.four_way { 4 } else { 8 });
	for other_pos in get_neighbors(pos, size, config.four_way) {
		let other = index(other_pos);
		if !cells[other].is_walkable() {
			continue;
		}
		let diagonal = is_diagonal(pos, other_pos);
		// no cutting corners
		if diagonal
			&& (!cells[index((pos.0, other_pos.1))].is_walkable()
				|| !cells[index((other_pos.0, pos.1))].is_walkable())
		{
			continue;
		}
		links.push(Link {
			target: other,
			cost: config.step_cost(diagonal, cells[other].cost_multiplier()),
		});
	}
	links
}
