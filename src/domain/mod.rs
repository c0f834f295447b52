// Domain layer: core models and ports (interfaces). No I/O here.

pub mod batch;
pub mod catalog;
pub mod model;
pub mod ports;
