// Domain layer: price-list models, the seed catalog and ports to the outside world.

pub mod catalog;
pub mod model;
pub mod ports;
