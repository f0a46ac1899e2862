pub mod agent;
pub mod grid;
pub mod pathfinder;

pub use agent::{ActionId, ActionRecommendation, DecisionAgent};
pub use grid::OccupancyGrid;
pub use pathfinder::TacticalPathfinder;

/// Grid cell address as (column, row). Signed so neighbor arithmetic near
/// the edges cannot underflow; bounds checks live in the grid.
pub type Cell = (i32, i32);
