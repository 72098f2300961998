use crate::domain::model::{Shipment, ShipmentList};
use serde::{Deserialize, Serialize};

pub const DEFAULT_LIMIT: u32 = 10;
pub const MAX_LIMIT: u32 = 100;

/// Window into an id-descending list of shipments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub limit: u32,
    pub offset: u64,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            offset: 0,
        }
    }
}

impl PageRequest {
    /// Clamps raw query values: limit into `1..=100`, offset to at least 0.
    pub fn new(limit: i64, offset: i64) -> Self {
        Self {
            limit: limit.clamp(1, MAX_LIMIT as i64) as u32,
            offset: offset.max(0) as u64,
        }
    }
}

impl ShipmentList {
    /// Newest first (highest id), `total` counts every shipment given.
    pub fn paginate(mut shipments: Vec<Shipment>, page: PageRequest) -> Self {
        let total = shipments.len() as u64;
        shipments.sort_by(|a, b| b.id.cmp(&a.id));

        let offset = usize::try_from(page.offset).unwrap_or(usize::MAX);
        let items = shipments
            .into_iter()
            .skip(offset)
            .take(page.limit as usize)
            .collect();

        Self { total, items }
    }
}
