use crate::Cost;

/// The Type used to reference an [`Occupant`] stored in a [`Grid`](crate::Grid).
///
/// IDs of removed Occupants may be handed out again by later calls to
/// [`add_occupant`](crate::Grid::add_occupant).
pub type OccupantID = usize;

/// Something that stands on one or more Cells of a Grid.
///
/// An Occupant either blocks the Cells it stands on or adds its `cost` to their Cost
/// multiplier. It does not know which Cells it occupies, that is tracked by the Grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Occupant {
	passable: bool,
	cost: Cost,
}

impl Occupant {
	/// Creates a new Occupant
	pub fn new(passable: bool, cost: Cost) -> Occupant {
		Occupant { passable, cost }
	}

	/// An Occupant that makes its Cells unwalkable
	pub fn blocking() -> Occupant {
		Occupant::new(false, 0)
	}

	/// A passable Occupant that adds `cost` to its Cells
	pub fn with_cost(cost: Cost) -> Occupant {
		Occupant::new(true, cost)
	}

	/// `false` if the Occupant blocks its Cells
	pub fn is_passable(&self) -> bool {
		self.passable
	}

	/// The Cost this Occupant adds to its Cells while it is passable
	pub fn cost(&self) -> Cost {
		self.cost
	}

	/// Changes the passability. Returns `true` if the value actually changed.
	pub fn set_passable(&mut self, passable: bool) -> bool {
		if self.passable == passable {
			return false;
		}
		self.passable = passable;
		true
	}

	/// Changes the Cost. Returns `true` if the value actually changed.
	pub fn set_cost(&mut self, cost: Cost) -> bool {
		if self.cost == cost {
			return false;
		}
		self.cost = cost;
		true
	}
}

impl Default for Occupant {
	fn default() -> Occupant {
		Occupant::new(true, 0)
	}
}

#[derive(Clone, Debug)]
struct Entry {
	occupant: Occupant,
	/// indices of the Cells this Occupant is attached to
	holders: Vec<usize>,
}

/// The registry of all Occupants of a Grid.
#[derive(Clone, Debug, Default)]
pub(crate) struct OccupantList {
	entries: slab::Slab<Entry>,
}

impl OccupantList {
	pub fn new() -> Self {
		Self {
			entries: slab::Slab::new(),
		}
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn insert(&mut self, occupant: Occupant) -> OccupantID {
		self.entries.insert(Entry {
			occupant,
			holders: Vec::new(),
		})
	}

	/// Removes the Occupant and returns it together with the Cells it was attached to.
	pub fn remove(&mut self, id: OccupantID) -> Option<(Occupant, Vec<usize>)> {
		let entry = self.entries.try_remove(id)?;
		Some((entry.occupant, entry.holders))
	}

	pub fn get(&self, id: OccupantID) -> Option<&Occupant> {
		self.entries.get(id).map(|entry| &entry.occupant)
	}

	pub fn get_mut(&mut self, id: OccupantID) -> Option<&mut Occupant> {
		self.entries.get_mut(id).map(|entry| &mut entry.occupant)
	}

	pub fn contains(&self, id: OccupantID) -> bool {
		self.entries.contains(id)
	}

	pub fn holders(&self, id: OccupantID) -> &[usize] {
		self.entries
			.get(id)
			.map(|entry| entry.holders.as_slice())
			.unwrap_or(&[])
	}

	#[track_caller]
	pub fn add_holder(&mut self, id: OccupantID, cell: usize) {
		self.entries[id].holders.push(cell);
	}

	pub fn remove_holder(&mut self, id: OccupantID, cell: usize) {
		if let Some(entry) = self.entries.get_mut(id) {
			if let Some(index) = entry.holders.iter().position(|&c| c == cell) {
				entry.holders.swap_remove(index);
			}
		}
	}
}
