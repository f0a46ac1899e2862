use super::Cell;

/// Flat 2D occupancy field over a bounded square arena.
///
/// Holds no memory across planning cycles: the caller clears and
/// repopulates it at the start of every decision, so obstacle placement is
/// always driven by the current tick alone.
#[derive(Debug, Clone)]
pub struct OccupancyGrid {
    size: i32,
    cells: Vec<bool>,
}

impl OccupancyGrid {
    pub fn new(size: usize) -> Self {
        Self {
            size: size as i32,
            cells: vec![false; size * size],
        }
    }

    pub fn size(&self) -> i32 {
        self.size
    }

    pub fn in_bounds(&self, (col, row): Cell) -> bool {
        col >= 0 && col < self.size && row >= 0 && row < self.size
    }

    /// Out-of-bounds cells read as blocked so planners never step off the
    /// arena; callers clamp world coordinates before indexing anyway.
    pub fn is_blocked(&self, cell: Cell) -> bool {
        match self.index(cell) {
            Some(i) => self.cells[i],
            None => true,
        }
    }

    pub fn block(&mut self, cell: Cell) {
        if let Some(i) = self.index(cell) {
            self.cells[i] = true;
        }
    }

    /// Clears every cell back to free.
    pub fn reset(&mut self) {
        self.cells.fill(false);
    }

    fn index(&self, (col, row): Cell) -> Option<usize> {
        if self.in_bounds((col, row)) {
            Some((row * self.size + col) as usize)
        } else {
            None
        }
    }
}
