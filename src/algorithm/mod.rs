/// Grid and overlay sweeps that assemble the output canvas
pub mod compositor;
/// Available/recycled tile sets with threshold-triggered replenishment
pub mod pool;
