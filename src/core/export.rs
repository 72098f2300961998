use crate::domain::model::{Shipment, ShipmentList};
use crate::utils::error::{ContractError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum ExportFormat {
    /// Pretty-printed `ShipmentList` envelope
    #[default]
    Json,
    /// One row per shipment with a header line
    Csv,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
        }
    }
}

pub fn render(format: ExportFormat, list: &ShipmentList) -> Result<Vec<u8>> {
    match format {
        ExportFormat::Json => render_json(list),
        ExportFormat::Csv => render_csv(&list.items),
    }
}

pub fn render_json(list: &ShipmentList) -> Result<Vec<u8>> {
    let mut data = serde_json::to_vec_pretty(list)?;
    data.push(b'\n');
    Ok(data)
}

/// Nullable columns are written as empty cells.
pub fn render_csv(items: &[Shipment]) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for shipment in items {
        writer.serialize(shipment)?;
    }
    writer
        .into_inner()
        .map_err(|e| ContractError::IoError(e.into_error()))
}
