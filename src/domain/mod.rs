// Domain layer: request, catalog and classification models plus the storage port.

pub mod model;
pub mod ports;
