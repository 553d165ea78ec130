// Domain layer: catalog models and ports (interfaces). No network or file access here.

pub mod model;
pub mod ports;
