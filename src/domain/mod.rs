// Domain layer: value types, the row table and the ports implemented by adapters.

pub mod model;
pub mod ports;
pub mod table;
