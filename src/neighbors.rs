//! Neighborhoods of a Cell on the Grid

use crate::Point;

/// The 4 cardinal directions, clockwise starting at "up".
///
/// ```no_code
/// A: Cell, o: neighbor
///   o
///   |
/// o-A-o
///   |
///   o
/// ```
pub const FOUR_WAY: [(isize, isize); 4] = [(0, -1), (1, 0), (0, 1), (-1, 0)];

/// The 4 cardinal directions and the 4 diagonals, clockwise starting at "up".
///
/// ```no_code
/// A: Cell, o: neighbor
/// o o o
///  \|/
/// o-A-o
///  /|\
/// o o o
/// ```
pub const EIGHT_WAY: [(isize, isize); 8] = [
	(0, -1),
	(1, -1),
	(1, 0),
	(1, 1),
	(0, 1),
	(-1, 1),
	(-1, 0),
	(-1, -1),
];

/// Iterates over the neighbors of `point` that lie within a Grid of size `(width, height)`.
///
/// With `four_way` only the Points sharing exactly one coordinate with `point` are returned,
/// otherwise the whole 3x3 block around `point` (excluding `point` itself).
pub fn get_neighbors(
	point: Point,
	(width, height): (usize, usize),
	four_way: bool,
) -> impl Iterator<Item = Point> {
	let offsets: &'static [(isize, isize)] = if four_way { &FOUR_WAY } else { &EIGHT_WAY };
	offsets
		.iter()
		.map(move |(dx, dy)| (point.0 as isize + dx, point.1 as isize + dy))
		.filter(move |(x, y)| *x >= 0 && *y >= 0 && (*x as usize) < width && (*y as usize) < height)
		.map(|(x, y)| (x as usize, y as usize))
}

/// `true` if `a` and `b` differ in both coordinates
pub fn is_diagonal(a: Point, b: Point) -> bool {
	a.0 != b.0 && a.1 != b.1
}

#[test]
fn test_four_way_neighbors() {
	assert_eq!(
		get_neighbors((0, 2), (5, 5), true).collect::<Vec<_>>(),
		vec![(0, 1), (1, 2), (0, 3)],
	);
}

#[test]
fn test_eight_way_neighbors() {
	assert_eq!(
		get_neighbors((0, 2), (5, 5), false).collect::<Vec<_>>(),
		vec![(0, 1), (1, 1), (1, 2), (1, 3), (0, 3)],
	);
}

#[test]
fn test_corner_neighbors() {
	assert_eq!(
		get_neighbors((4, 4), (5, 5), false).collect::<Vec<_>>(),
		vec![(4, 3), (3, 4), (3, 3)],
	);
	assert_eq!(get_neighbors((0, 0), (1, 1), false).count(), 0);
}

#[test]
fn test_is_diagonal() {
	assert!(is_diagonal((1, 1), (2, 2)));
	assert!(!is_diagonal((1, 1), (1, 2)));
}
