// Domain layer: core models, the course catalog and ports (interfaces).

pub mod catalog;
pub mod model;
pub mod ports;
