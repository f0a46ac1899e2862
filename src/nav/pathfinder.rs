use pathfinding::prelude::{astar, bfs};

use super::{grid::OccupancyGrid, Cell};

const CARDINAL: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
const DIAGONAL: [(i32, i32); 4] = [(1, 1), (-1, -1), (1, -1), (-1, 1)];

/// Grid-based tactical planner: owns the occupancy grid, maps world
/// coordinates onto it, rasterizes obstacle zones, and runs A* over the
/// 8-connected cells.
///
/// Diagonal steps cost the same as cardinal ones (no sqrt(2) weighting) and
/// the heuristic is plain Manhattan distance. Both are intentional: the
/// arena is small, replanning happens every tick, and path shape under
/// these rules is what the rest of the stack is tuned against.
pub struct TacticalPathfinder {
    grid: OccupancyGrid,
    resolution: f64,
    offset: f64,
}

impl TacticalPathfinder {
    /// `arena_size` is the side length of the square arena in meters,
    /// `resolution` is meters per grid cell.
    pub fn new(arena_size: f64, resolution: f64) -> Self {
        let cells = (arena_size / resolution) as usize;
        Self {
            grid: OccupancyGrid::new(cells),
            resolution,
            offset: arena_size / 2.0,
        }
    }

    pub fn grid(&self) -> &OccupancyGrid {
        &self.grid
    }

    /// Drops all obstacles. Called by the decision agent at the start of
    /// every planning cycle.
    pub fn reset(&mut self) {
        self.grid.reset();
    }

    /// World position to grid cell, saturating at the arena edge. Feeding
    /// an out-of-bounds coordinate is not an error; it snaps to the
    /// nearest edge cell.
    pub fn to_cell(&self, pos: [f64; 2]) -> Cell {
        let gx = ((pos[0] + self.offset) / self.resolution).floor() as i32;
        let gy = ((pos[1] + self.offset) / self.resolution).floor() as i32;
        let max = self.grid.size() - 1;
        (gx.clamp(0, max), gy.clamp(0, max))
    }

    /// Grid cell back to the world coordinate of its corner (the inverse
    /// of `to_cell` up to cell resolution).
    pub fn to_world(&self, (col, row): Cell) -> [f64; 2] {
        [
            col as f64 * self.resolution - self.offset,
            row as f64 * self.resolution - self.offset,
        ]
    }

    /// Marks every cell within `radius` meters of `center` as blocked.
    /// Zones accumulate until the next `reset`.
    pub fn add_manual_obstacle(&mut self, center: [f64; 2], radius: f64) {
        let (cx, cy) = self.to_cell(center);
        let r_cells = (radius / self.resolution) as i32;
        for col in (cx - r_cells)..=(cx + r_cells) {
            for row in (cy - r_cells)..=(cy + r_cells) {
                let dx = (col - cx) as f64;
                let dy = (row - cy) as f64;
                if (dx * dx + dy * dy).sqrt() <= r_cells as f64 {
                    self.grid.block((col, row));
                }
            }
        }
    }

    /// Plans a route between two world positions.
    ///
    /// Returns the full waypoint sequence from start to goal inclusive
    /// (cell centers in world coordinates), or an empty vec when no
    /// traversable route exists. Blocked start/goal cells are rescued to
    /// the nearest free cell first, so an unlucky spawn inside an obstacle
    /// zone does not by itself make the goal unreachable.
    pub fn find_path(&self, start_pos: [f64; 2], goal_pos: [f64; 2]) -> Vec<[f64; 2]> {
        let start = self.rescue(self.to_cell(start_pos));
        let goal = self.rescue(self.to_cell(goal_pos));

        let result = astar(
            &start,
            |&cell| self.neighbors(cell),
            |&(col, row)| ((col - goal.0).abs() + (row - goal.1).abs()) as u32,
            |&cell| cell == goal,
        );

        match result {
            Some((cells, _cost)) => cells.into_iter().map(|c| self.to_world(c)).collect(),
            None => Vec::new(),
        }
    }

    /// Free 8-connected neighbors, uniform step cost.
    fn neighbors(&self, (col, row): Cell) -> Vec<(Cell, u32)> {
        CARDINAL
            .iter()
            .chain(DIAGONAL.iter())
            .map(|(dc, dr)| (col + dc, row + dr))
            .filter(|&c| self.grid.in_bounds(c) && !self.grid.is_blocked(c))
            .map(|c| (c, 1))
            .collect()
    }

    /// Nearest free cell by breadth-first search outward over 4-connected
    /// cells (blocked cells are traversable during the search). Falls back
    /// to the original cell when the whole grid is blocked.
    fn rescue(&self, cell: Cell) -> Cell {
        if !self.grid.is_blocked(cell) {
            return cell;
        }
        let found = bfs(
            &cell,
            |&(col, row)| {
                CARDINAL
                    .iter()
                    .map(move |(dc, dr)| (col + dc, row + dr))
                    .filter(|&c| self.grid.in_bounds(c))
                    .collect::<Vec<_>>()
            },
            |&c| !self.grid.is_blocked(c),
        );
        match found {
            Some(trail) => *trail.last().unwrap_or(&cell),
            None => cell,
        }
    }
}
