use crate::heap::{CellID, EntryID, HeapKeys};
use crate::occupant::{OccupantID, OccupantList};
use crate::{Cost, Point};

/// A directed, weighted edge to a neighboring walkable Cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Link {
	pub(crate) target: CellID,
	pub(crate) cost: Cost,
}

impl Link {
	/// The Cost of walking along this Link
	pub fn cost(&self) -> Cost {
		self.cost
	}
}

/// A single Tile of the [`Grid`](crate::Grid).
///
/// The walkability and Cost multiplier of a Cell are derived from its Occupants and kept up to
/// date by the Grid.
#[derive(Clone, Debug)]
pub struct Cell {
	pos: Point,
	walkable: bool,
	cost_multiplier: Cost,
	pub(crate) links: Vec<Link>,
	occupants: Vec<OccupantID>,

	// transient search state, only meaningful when the epoch matches the current search
	pub(crate) parent: Option<CellID>,
	pub(crate) g: Cost,
	pub(crate) f: Cost,
	pub(crate) search_epoch: u32,
	pub(crate) range_epoch: u32,
	pub(crate) heap_slot: Option<EntryID>,
}

/// Which derived values of a Cell changed during [`Cell::recompute`]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct CellChange {
	pub walkable: bool,
	pub cost: bool,
}

impl Cell {
	pub(crate) fn new(pos: Point) -> Cell {
		Cell {
			pos,
			walkable: true,
			cost_multiplier: 0,
			links: Vec::new(),
			occupants: Vec::new(),
			parent: None,
			g: 0,
			f: 0,
			search_epoch: 0,
			range_epoch: 0,
			heap_slot: None,
		}
	}

	/// The position of the Cell on the Grid
	pub fn pos(&self) -> Point {
		self.pos
	}

	/// `true` if none of the Occupants block this Cell
	pub fn is_walkable(&self) -> bool {
		self.walkable
	}

	/// The sum of the Costs of all Occupants, or `0` if the Cell is blocked
	pub fn cost_multiplier(&self) -> Cost {
		self.cost_multiplier
	}

	/// The Links to all neighbors that can be walked to from this Cell
	pub fn links(&self) -> &[Link] {
		&self.links
	}

	/// The Occupants currently standing on this Cell
	pub fn occupants(&self) -> &[OccupantID] {
		&self.occupants
	}

	/// `true` if the Cell was part of the result of the last
	/// [`walkable_range`](crate::Grid::walkable_range) query.
	pub(crate) fn in_range(&self, range_epoch: u32) -> bool {
		self.range_epoch == range_epoch
	}

	pub(crate) fn has_occupant(&self, id: OccupantID) -> bool {
		self.occupants.contains(&id)
	}

	pub(crate) fn push_occupant(&mut self, id: OccupantID) {
		self.occupants.push(id);
	}

	pub(crate) fn remove_occupant(&mut self, id: OccupantID) -> bool {
		match self.occupants.iter().position(|&o| o == id) {
			Some(index) => {
				self.occupants.remove(index);
				true
			}
			None => false,
		}
	}

	/// Recalculates `walkable` and `cost_multiplier` from the Occupants.
	pub(crate) fn recompute(&mut self, registry: &OccupantList) -> CellChange {
		let mut walkable = true;
		let mut cost_multiplier: Cost = 0;
		for occupant in self.occupants.iter().filter_map(|&id| registry.get(id)) {
			if !occupant.is_passable() {
				walkable = false;
				cost_multiplier = 0;
				break;
			}
			cost_multiplier = cost_multiplier.saturating_add(occupant.cost());
		}

		let change = CellChange {
			walkable: walkable != self.walkable,
			cost: cost_multiplier != self.cost_multiplier,
		};
		self.walkable = walkable;
		self.cost_multiplier = cost_multiplier;
		change
	}
}

impl HeapKeys for [Cell] {
	fn key(&self, cell: CellID) -> Cost {
		self[cell].f
	}
	fn set_slot(&mut self, cell: CellID, entry: Option<EntryID>) {
		self[cell].heap_slot = entry;
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::Occupant;

	#[test]
	fn recompute() {
		let mut registry = OccupantList::new();
		let cheap = registry.insert(Occupant::with_cost(3));
		let expensive = registry.insert(Occupant::with_cost(5));
		let wall = registry.insert(Occupant::blocking());

		let mut cell = Cell::new((1, 2));
		assert!(cell.is_walkable());

		cell.push_occupant(cheap);
		cell.push_occupant(expensive);
		let change = cell.recompute(&registry);
		assert_eq!(change, CellChange { walkable: false, cost: true });
		assert_eq!(cell.cost_multiplier(), 8);
		assert!(cell.is_walkable());

		cell.push_occupant(wall);
		let change = cell.recompute(&registry);
		assert_eq!(change, CellChange { walkable: true, cost: true });
		assert!(!cell.is_walkable());
		assert_eq!(cell.cost_multiplier(), 0);

		assert!(cell.remove_occupant(wall));
		assert!(!cell.remove_occupant(wall));
		cell.recompute(&registry);
		assert!(cell.is_walkable());
		assert_eq!(cell.cost_multiplier(), 8);
		assert_eq!(cell.occupants(), &[cheap, expensive]);
	}

	#[test]
	fn cost_multiplier_saturates() {
		let mut registry = OccupantList::new();
		let a = registry.insert(Occupant::with_cost(usize::MAX / 2 + 1));
		let b = registry.insert(Occupant::with_cost(usize::MAX / 2 + 1));

		let mut cell = Cell::new((0, 0));
		cell.push_occupant(a);
		cell.push_occupant(b);
		cell.recompute(&registry);
		assert!(cell.is_walkable());
		assert_eq!(cell.cost_multiplier(), usize::MAX);
	}

	#[test]
	fn nothing_changed() {
		let registry = OccupantList::new();
		let mut cell = Cell::new((0, 0));
		assert_eq!(cell.recompute(&registry), CellChange::default());
	}
}
