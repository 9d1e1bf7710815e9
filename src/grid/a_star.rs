use super::Grid;
use crate::heap::CellID;
use crate::heuristic::Heuristic;
use crate::{Path, Point};

impl<H: Heuristic> Grid<H> {
    /// Calculates the cheapest Path from `start` to `goal`.
    ///
    /// The returned Path contains both `start` and `goal`, in that order. If `start == goal`,
    /// the Path consists of just that Point.
    ///
    /// Returns `None` if either Point is outside of the Grid or unwalkable, or if `goal` can't
    /// be reached from `start`.
    ///
    /// ## Examples
    /// ```
    /// use occupancy_pathfinding::prelude::*;
    ///
    /// let mut grid = Grid::new((5, 5), GridConfig::default());
    /// let wall = grid.add_occupant(Occupant::blocking());
    /// grid.attach_occupant((2, 2), wall);
    ///
    /// let path = grid.find_path((0, 0), (4, 4)).unwrap();
    /// // around the wall: 2 diagonal and 4 straight steps
    /// assert_eq!(path.len(), 7);
    /// assert_eq!(path.cost(), 2 * 14 + 4 * 10);
    ///
    /// assert!(grid.find_path((0, 0), (2, 2)).is_none());
    /// ```
    pub fn find_path(&mut self, start: Point, goal: Point) -> Option<Path<Point>> {
        let start_id = self.index_of(start)?;
        let goal_id = self.index_of(goal)?;
        if !self.cells[start_id].is_walkable() || !self.cells[goal_id].is_walkable() {
            debug!("rejected Path query {:?} -> {:?}: unwalkable", start, goal);
            return None;
        }
        if start_id == goal_id {
            return Some(Path::new(vec![start], 0));
        }

        start_timer!(timer);
        let epoch = self.next_search_epoch();
        if !self.a_star_search(start_id, goal_id, epoch) {
            re_trace!(timer, "no Path {:?} -> {:?}", start, goal);
            return None;
        }

        let steps = {
            let mut steps = vec![];
            let mut current = goal_id;

            while current != start_id {
                steps.push(self.cells[current].pos());
                current = self.cells[current]
                    .parent
                    .expect("Cell on the Path has no parent");
            }
            steps.push(start);
            steps.reverse();
            steps
        };
        re_trace!(timer, "found Path {:?} -> {:?}", start, goal);

        Some(Path::new(steps, self.cells[goal_id].g))
    }

    /// Runs A* until `goal` is closed. Returns `false` if the open set ran dry first.
    ///
    /// Cells with `search_epoch < epoch` are unvisited, `epoch` means open and `epoch + 1`
    /// means closed.
    fn a_star_search(&mut self, start: CellID, goal: CellID, epoch: u32) -> bool {
        let closed = epoch + 1;
        let costs = self.config.costs;
        let goal_pos = self.cells[goal].pos();

        self.heap.reset();
        {
            let cell = &mut self.cells[start];
            cell.g = 0;
            cell.f = self.heuristic.estimate(cell.pos(), goal_pos, costs);
            cell.parent = None;
            cell.search_epoch = closed;
        }

        let mut current = start;
        while current != goal {
            let current_g = self.cells[current].g;

            for i in 0..self.cells[current].links.len() {
                let link = self.cells[current].links[i];
                let g = current_g.saturating_add(link.cost);
                let other = &mut self.cells[link.target];

                if other.search_epoch < epoch {
                    other.g = g;
                    other.f = g.saturating_add(self.heuristic.estimate(other.pos(), goal_pos, costs));
                    other.parent = Some(current);
                    other.search_epoch = epoch;
                    self.heap.insert(link.target, self.cells.as_mut_slice());
                } else if other.search_epoch == epoch && g < other.g {
                    other.g = g;
                    other.f = g.saturating_add(self.heuristic.estimate(other.pos(), goal_pos, costs));
                    other.parent = Some(current);
                    let entry = other.heap_slot.expect("open Cell is not in the Heap");
                    self.heap.modify(entry, self.cells.as_mut_slice());
                }
                // closed Cells are never reopened
            }

            match self.heap.pop_min(self.cells.as_mut_slice()) {
                Some(next) => {
                    self.cells[next].search_epoch = closed;
                    current = next;
                }
                None => return false,
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;

    /// 0 = empty, 1 = swamp, 2 = wall
    fn build(grid: &[[usize; 5]; 5], config: GridConfig) -> Grid {
        let mut ret = Grid::new((5, 5), config);
        let swamp = ret.add_occupant(Occupant::with_cost(90));
        let wall = ret.add_occupant(Occupant::blocking());
        for (y, row) in grid.iter().enumerate() {
            for (x, &tile) in row.iter().enumerate() {
                match tile {
                    1 => assert!(ret.attach_occupant((x, y), swamp)),
                    2 => assert!(ret.attach_occupant((x, y), wall)),
                    _ => {}
                }
            }
        }
        ret
    }

    const GRID: [[usize; 5]; 5] = [
        [0, 2, 0, 0, 0],
        [0, 2, 2, 2, 2],
        [0, 1, 0, 0, 0],
        [0, 1, 0, 2, 0],
        [0, 0, 0, 2, 0],
    ];

    #[test]
    fn unreachable_goal() {
        let mut grid = build(&GRID, GridConfig::FOUR_WAY);
        assert!(grid.find_path((0, 0), (2, 0)).is_none());
        // the search state does not leak into the next query
        assert!(grid.find_path((0, 0), (4, 4)).is_some());
    }

    #[test]
    fn basic() {
        let mut grid = build(&GRID, GridConfig::FOUR_WAY);

        let path = grid.find_path((0, 0), (4, 4)).unwrap();
        #[rustfmt::skip]
        assert_eq!(
            path,
            vec![(0, 0), (0, 1), (0, 2), (0, 3), (0, 4), (1, 4), (2, 4), (2, 3), (2, 2), (3, 2), (4, 2), (4, 3), (4, 4)],
        );
        assert_eq!(path.cost(), 12 * 10);
    }

    #[test]
    fn swamp_shortcut() {
        let mut grid = build(&GRID, GridConfig::FOUR_WAY);
        let swamp = grid.cell((1, 2)).unwrap().occupants()[0];

        // cheap enough to walk through
        assert!(grid.set_occupant_cost(swamp, 20));
        let path = grid.find_path((0, 2), (2, 2)).unwrap();
        assert_eq!(path, vec![(0, 2), (1, 2), (2, 2)]);
        assert_eq!(path.cost(), 10 + 20 + 10);

        // more expensive than the detour
        assert!(grid.set_occupant_cost(swamp, 200));
        let path = grid.find_path((0, 2), (2, 2)).unwrap();
        assert_eq!(path.cost(), 6 * 10);
        assert!(!path.iter().any(|&p| p == (1, 2) || p == (1, 3)));
    }

    #[test]
    fn diagonal_path() {
        let mut grid = Grid::new((5, 5), GridConfig::default());
        let path = grid.find_path((0, 0), (4, 4)).unwrap();
        assert_eq!(path, vec![(0, 0), (1, 1), (2, 2), (3, 3), (4, 4)]);
        assert_eq!(path.cost(), 56);
    }

    #[test]
    fn huge_costs() {
        let mut grid = Grid::new((3, 2), GridConfig::FOUR_WAY);
        let boulder = grid.add_occupant(Occupant::with_cost(usize::MAX));
        assert!(grid.attach_occupant((1, 0), boulder));

        // walking around is always cheaper than a saturated Link
        let path = grid.find_path((0, 0), (2, 0)).unwrap();
        assert_eq!(path, vec![(0, 0), (0, 1), (1, 1), (2, 1), (2, 0)]);
        assert_eq!(path.cost(), 40);

        // the only way leads across the boulder
        let mut grid = Grid::new((3, 1), GridConfig::default());
        let boulder = grid.add_occupant(Occupant::with_cost(usize::MAX));
        assert!(grid.attach_occupant((1, 0), boulder));
        let path = grid.find_path((0, 0), (2, 0)).unwrap();
        assert_eq!(path.len(), 3);
        assert_eq!(path.cost(), usize::MAX);
    }

    #[test]
    fn invalid_endpoints() {
        let mut grid = build(&GRID, GridConfig::default());
        assert!(grid.find_path((0, 0), (5, 0)).is_none());
        assert!(grid.find_path((9, 9), (0, 0)).is_none());
        assert!(grid.find_path((1, 0), (0, 0)).is_none());
        assert!(grid.find_path((0, 0), (1, 0)).is_none());
    }

    #[test]
    fn same_start_and_goal() {
        let mut grid = Grid::new((3, 3), GridConfig::default());
        let path = grid.find_path((1, 1), (1, 1)).unwrap();
        assert_eq!(path, vec![(1, 1)]);
        assert_eq!(path.cost(), 0);
    }

    #[test]
    fn manhattan_heuristic() {
        let mut grid = Grid::with_heuristic((6, 4), ManhattanHeuristic, GridConfig::FOUR_WAY);
        let path = grid.find_path((5, 0), (0, 3)).unwrap();
        assert_eq!(path.len(), 9);
        assert_eq!(path.cost(), 8 * 10);
    }
}
