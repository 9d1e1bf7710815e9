use crate::Cost;
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Deref, Index};

/// A Path on the Grid
///
/// Stores the sequence of Points from start to goal (both included) and the total Cost of
/// walking along them. The Costs of the individual steps are not stored.
///
/// Derefs to a slice, so `len`, `iter`, `first`, `last` etc. are available directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path<P> {
	path: Vec<P>,
	cost: Cost,
}

impl<P> Path<P> {
	/// creates a new Path with the given sequence of Points and total Cost
	/// ## Examples
	/// Basic usage:
	/// ```
	/// # use occupancy_pathfinding::Path;
	/// let path = Path::new(vec!['a', 'b', 'c'], 42);
	///
	/// assert_eq!(path.cost(), 42);
	/// assert_eq!(path.len(), 3);
	/// assert_eq!(path[1], 'b');
	/// ```
	pub fn new(path: Vec<P>, cost: Cost) -> Path<P> {
		Path { path, cost }
	}

	/// The total Cost of walking the Path
	pub fn cost(&self) -> Cost {
		self.cost
	}

	/// Consumes the Path, returning the Points
	pub fn into_vec(self) -> Vec<P> {
		self.path
	}
}

impl<P> Index<usize> for Path<P> {
	type Output = P;
	fn index(&self, index: usize) -> &P {
		&self.path[index]
	}
}

impl<P> Deref for Path<P> {
	type Target = [P];
	fn deref(&self) -> &[P] {
		&self.path
	}
}

impl<P: PartialEq> PartialEq<Vec<P>> for Path<P> {
	fn eq(&self, other: &Vec<P>) -> bool {
		&self.path == other
	}
}

impl<P: PartialEq> PartialEq<[P]> for Path<P> {
	fn eq(&self, other: &[P]) -> bool {
		self.path.as_slice() == other
	}
}

impl<P: Eq> Ord for Path<P> {
	fn cmp(&self, other: &Path<P>) -> Ordering {
		self.cost.cmp(&other.cost)
	}
}

impl<P: Eq> PartialOrd for Path<P> {
	fn partial_cmp(&self, other: &Path<P>) -> Option<Ordering> {
		Some(self.cmp(other))
	}
}

impl<P: fmt::Debug> fmt::Display for Path<P> {
	fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
		write!(fmt, "Path[Cost = {}]: ", self.cost)?;
		if self.path.is_empty() {
			write!(fmt, "<empty>")
		} else {
			write!(fmt, "{:?}", self.path[0])?;
			for p in self.path.iter().skip(1) {
				write!(fmt, " -> {:?}", p)?;
			}
			Ok(())
		}
	}
}
