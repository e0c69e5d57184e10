// Domain layer: the match record and the ports the core is written against.

pub mod model;
pub mod ports;
