// Domain layer: records exchanged with the target services and the ports the
// dispatcher talks through.

pub mod model;
pub mod ports;
