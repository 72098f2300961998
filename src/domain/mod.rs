// Domain layer: the shipment data contract and ports. No I/O here.

pub mod model;
pub mod pagination;
pub mod ports;
pub mod status;
pub mod timestamp;
