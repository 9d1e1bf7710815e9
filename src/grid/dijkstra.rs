use super::Grid;
use crate::heap::CellID;
use crate::heuristic::Heuristic;
use crate::{Cost, Point, PointMap, PointSet};

impl<H: Heuristic> Grid<H> {
    /// Finds all Points that can be reached from `start` with a Cost of at most `budget`.
    ///
    /// `start` itself is part of the result as long as it is walkable. Returns an empty set if
    /// `start` is outside of the Grid or unwalkable.
    ///
    /// ## Examples
    /// ```
    /// use occupancy_pathfinding::prelude::*;
    ///
    /// let mut grid = Grid::new((5, 5), GridConfig::default());
    ///
    /// let range = grid.walkable_range((0, 0), 14);
    /// assert_eq!(range.len(), 4);
    /// assert!(range.contains(&(1, 1)));
    ///
    /// let range = grid.walkable_range((0, 0), 20);
    /// assert!(range.contains(&(2, 0)));
    /// assert!(!range.contains(&(2, 1)));
    /// ```
    pub fn walkable_range(&mut self, start: Point, budget: Cost) -> PointSet {
        start_timer!(timer);
        let mut ret = PointSet::default();
        self.range_search(start, budget, |pos, _| {
            ret.insert(pos);
        });
        re_trace!(timer, "found {} Cells within {} of {:?}", ret.len(), budget, start);
        ret
    }

    /// Like [`walkable_range`](Grid::walkable_range), but also returns the Cost of the
    /// cheapest Path to each Point.
    ///
    /// ## Examples
    /// ```
    /// use occupancy_pathfinding::prelude::*;
    ///
    /// let mut grid = Grid::new((3, 3), GridConfig::FOUR_WAY);
    ///
    /// let costs = grid.walkable_range_costs((1, 1), 20);
    /// assert_eq!(costs[&(1, 1)], 0);
    /// assert_eq!(costs[&(1, 0)], 10);
    /// assert_eq!(costs[&(2, 2)], 20);
    /// assert_eq!(costs.len(), 9);
    /// ```
    pub fn walkable_range_costs(&mut self, start: Point, budget: Cost) -> PointMap<Cost> {
        start_timer!(timer);
        let mut ret = PointMap::default();
        self.range_search(start, budget, |pos, cost| {
            ret.insert(pos, cost);
        });
        re_trace!(timer, "found {} Cells within {} of {:?}", ret.len(), budget, start);
        ret
    }

    /// Dijkstra from `start` that stops once the cheapest open Cell exceeds `budget`.
    ///
    /// Every Cell within the budget is reported to `found` exactly once, in order of
    /// increasing Cost, and tagged with the new range epoch.
    fn range_search(&mut self, start: Point, budget: Cost, mut found: impl FnMut(Point, Cost)) {
        let Some(start_id) = self.index_of(start) else {
            return;
        };
        if !self.cells[start_id].is_walkable() {
            debug!("rejected range query from {:?}: unwalkable", start);
            return;
        }
        let epoch = self.next_search_epoch();
        let closed = epoch + 1;
        let range_epoch = self.next_range_epoch();

        // every step costs at least this much, so nothing outside of the box is affordable
        let min_step = self.config.costs.straight.min(self.config.costs.diagonal);
        let max_steps = budget / min_step;
        let in_box = |(x, y): Point| x.abs_diff(start.0) <= max_steps && y.abs_diff(start.1) <= max_steps;

        self.heap.reset();
        {
            let cell = &mut self.cells[start_id];
            cell.g = 0;
            cell.f = 0;
            cell.parent = None;
            cell.search_epoch = epoch;
        }
        self.heap.insert(start_id, self.cells.as_mut_slice());

        while let Some(next) = self.heap.peek() {
            if self.cells[next].g > budget {
                break;
            }
            let current: CellID = match self.heap.pop_min(self.cells.as_mut_slice()) {
                Some(current) => current,
                None => break,
            };
            let cell = &mut self.cells[current];
            cell.search_epoch = closed;
            if !cell.in_range(range_epoch) {
                cell.range_epoch = range_epoch;
                found(cell.pos(), cell.g);
            }
            let current_g = cell.g;

            for i in 0..self.cells[current].links.len() {
                let link = self.cells[current].links[i];
                let g = current_g.saturating_add(link.cost);
                if g > budget {
                    continue;
                }
                let other = &mut self.cells[link.target];
                if !in_box(other.pos()) {
                    continue;
                }

                if other.search_epoch < epoch {
                    other.g = g;
                    other.f = g;
                    other.parent = Some(current);
                    other.search_epoch = epoch;
                    self.heap.insert(link.target, self.cells.as_mut_slice());
                } else if other.search_epoch == epoch && g < other.g {
                    other.g = g;
                    other.f = g;
                    other.parent = Some(current);
                    let entry = other.heap_slot.expect("open Cell is not in the Heap");
                    self.heap.modify(entry, self.cells.as_mut_slice());
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;

    #[test]
    fn basic() {
        let mut grid = Grid::new((5, 5), GridConfig::FOUR_WAY);
        let wall = grid.add_occupant(Occupant::blocking());
        for y in 0..4 {
            assert!(grid.attach_occupant((2, y), wall));
        }

        // the wall has to be walked around at the bottom
        let costs = grid.walkable_range_costs((0, 0), 80);
        assert_eq!(costs.get(&(3, 4)), Some(&70));
        assert_eq!(costs.get(&(3, 3)), Some(&80));
        assert!(!costs.contains_key(&(3, 0)));
        assert!(!costs.contains_key(&(2, 0)));
        assert_eq!(costs.len(), 2 * 5 + 4);
    }

    #[test]
    fn zero_budget() {
        let mut grid = Grid::new((3, 3), GridConfig::default());
        let range = grid.walkable_range((1, 1), 0);
        assert_eq!(range.len(), 1);
        assert!(range.contains(&(1, 1)));
    }

    #[test]
    fn invalid_start() {
        let mut grid = Grid::new((3, 3), GridConfig::default());
        assert!(grid.walkable_range((3, 0), 100).is_empty());

        let wall = grid.add_occupant(Occupant::blocking());
        grid.attach_occupant((0, 0), wall);
        assert!(grid.walkable_range((0, 0), 100).is_empty());
    }

    #[test]
    fn whole_grid() {
        let mut grid = Grid::new((4, 4), GridConfig::default());
        assert_eq!(grid.walkable_range((0, 0), 1000).len(), 16);
        // repeated queries start from scratch
        assert_eq!(grid.walkable_range((3, 3), 10).len(), 3);
        assert_eq!(grid.walkable_range((0, 0), 1000).len(), 16);
    }

    #[test]
    fn costly_cells() {
        let mut grid = Grid::new((3, 1), GridConfig::default());
        let mud = grid.add_occupant(Occupant::with_cost(5));
        grid.attach_occupant((1, 0), mud);

        let costs = grid.walkable_range_costs((0, 0), 25);
        assert_eq!(costs.get(&(1, 0)), Some(&15));
        assert_eq!(costs.get(&(2, 0)), Some(&25));

        assert!(!grid.walkable_range((0, 0), 24).contains(&(2, 0)));
    }

    #[test]
    fn huge_costs_are_unaffordable() {
        let mut grid = Grid::new((3, 1), GridConfig::default());
        let boulder = grid.add_occupant(Occupant::with_cost(usize::MAX));
        assert!(grid.attach_occupant((1, 0), boulder));

        let costs = grid.walkable_range_costs((0, 0), 1000);
        assert_eq!(costs.len(), 1);

        // the Link cost saturates instead of wrapping around
        let costs = grid.walkable_range_costs((0, 0), usize::MAX);
        assert_eq!(costs.get(&(1, 0)), Some(&usize::MAX));
        assert_eq!(costs.get(&(2, 0)), Some(&usize::MAX));
    }
}
