// Domain layer: core models, the stage calculator and ports (interfaces).
// No I/O in here; adapters live under src/adapters.

pub mod model;
pub mod ports;
pub mod schema;
pub mod stage;
