pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{cli::LocalStorage, CliConfig};

pub use config::seed_config::SeedConfig;
pub use domain::model::{Shipment, ShipmentList, ShipmentPatch, ShipmentPayload};
pub use domain::pagination::PageRequest;
pub use domain::status::ShipmentStatus;
pub use utils::error::{ContractError, Result};
