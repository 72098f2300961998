use crate::config::seed_config::SeedConfig;
use crate::core::check::{check_document, CheckReport, DocumentKind};
use crate::core::export::{render, ExportFormat};
use crate::core::seed::ShipmentSeeder;
use crate::core::Storage;
use crate::domain::model::{Shipment, ShipmentList};
use crate::domain::pagination::PageRequest;
use crate::utils::error::Result;
use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;

#[derive(Debug, Clone)]
pub struct SeedRequest {
    pub config: SeedConfig,
    pub format: ExportFormat,
    pub rng_seed: Option<u64>,
    pub output: Option<String>,
}

pub async fn run_check<S: Storage>(storage: &S, kind: DocumentKind, file: &str) -> Result<CheckReport> {
    let data = storage.read_file(file).await?;
    let report = check_document(kind, &data)?;

    for warning in &report.warnings {
        tracing::warn!("⚠️ {}", warning);
    }
    tracing::info!(
        "✅ {} is a valid {:?} document ({} record(s))",
        file,
        kind,
        report.records
    );
    Ok(report)
}

/// Generates sample shipments stamped `now` and writes them; returns the output path.
pub async fn run_seed<S: Storage>(storage: &S, request: SeedRequest, now: DateTime<Utc>) -> Result<String> {
    let rng = match request.rng_seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut seeder = ShipmentSeeder::new(request.config, rng)?;
    let shipments = seeder.generate(now.date_naive(), now);
    let list = ShipmentList::new(shipments.len() as u64, shipments);

    let data = render(request.format, &list)?;
    let output = request
        .output
        .unwrap_or_else(|| format!("shipments.{}", request.format.extension()));
    storage.write_file(&output, &data).await?;

    tracing::info!("📁 Wrote {} shipments to {}", list.total, output);
    Ok(output)
}

/// A shipment file is either a bare array or a list envelope.
fn read_shipments(data: &[u8]) -> Result<Vec<Shipment>> {
    let value: serde_json::Value = serde_json::from_slice(data)?;
    if value.is_array() {
        Ok(serde_json::from_value::<Vec<Shipment>>(value)?)
    } else {
        Ok(serde_json::from_value::<ShipmentList>(value)?.items)
    }
}

pub async fn run_page<S: Storage>(storage: &S, input: &str, page: PageRequest) -> Result<ShipmentList> {
    let data = storage.read_file(input).await?;
    let shipments = read_shipments(&data)?;

    let list = ShipmentList::paginate(shipments, page);
    tracing::debug!(
        total = list.total,
        returned = list.items.len(),
        limit = page.limit,
        offset = page.offset,
        "paged shipments"
    );
    Ok(list)
}
