// Domain layer: outcome types and the ports the engine drives.

pub mod model;
pub mod ports;
