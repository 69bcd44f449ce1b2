// Domain layer: value types and ports. Computation lives in `core`, I/O in `adapters`.

pub mod model;
pub mod ports;
