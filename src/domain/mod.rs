// Domain layer: form model and ports. Concrete document and HTTP implementations live in adapters.

pub mod model;
pub mod ports;
