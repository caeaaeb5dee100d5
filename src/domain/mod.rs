// Domain layer: course model and the ports the planner is written against.

pub mod model;
pub mod ports;
