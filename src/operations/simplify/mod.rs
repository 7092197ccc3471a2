mod douglas_peucker;
mod grid_cluster;

pub use douglas_peucker::DouglasPeucker;
pub use grid_cluster::GridCluster;
