pub mod check;
pub mod export;
pub mod seed;

pub use crate::domain::model::{Shipment, ShipmentList, ShipmentPatch, ShipmentPayload};
pub use crate::domain::ports::Storage;
pub use crate::utils::error::Result;
