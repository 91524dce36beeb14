// Domain layer: wire models and the transport port. No I/O lives here.

pub mod model;
pub mod ports;
