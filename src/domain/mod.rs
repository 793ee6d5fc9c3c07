// Domain layer: check results and the Check port. No library dependencies beyond serde/chrono.

pub mod model;
pub mod ports;
