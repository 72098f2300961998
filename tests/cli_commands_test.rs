use anyhow::Result;
use chrono::{TimeZone, Utc};
use serde_json::json;
use shipment_contract::app::commands::{run_check, run_page, run_seed, SeedRequest};
use shipment_contract::core::check::DocumentKind;
use shipment_contract::core::export::ExportFormat;
use shipment_contract::core::Storage;
use shipment_contract::{ContractError, LocalStorage, PageRequest, SeedConfig, ShipmentList, ShipmentStatus};
use tempfile::TempDir;

fn storage(temp_dir: &TempDir) -> LocalStorage {
    LocalStorage::new(temp_dir.path().to_str().unwrap().to_string())
}

fn seed_request(count: usize, format: ExportFormat, output: Option<&str>) -> SeedRequest {
    SeedRequest {
        config: SeedConfig {
            count,
            ..SeedConfig::default()
        },
        format,
        rng_seed: Some(2024),
        output: output.map(str::to_string),
    }
}

#[tokio::test]
async fn test_seed_json_then_check_and_page() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let storage = storage(&temp_dir);
    let now = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();

    let output = run_seed(&storage, seed_request(25, ExportFormat::Json, None), now).await?;
    assert_eq!(output, "shipments.json");
    assert!(temp_dir.path().join("shipments.json").exists());

    let report = run_check(&storage, DocumentKind::List, &output).await?;
    assert_eq!(report.records, 25);

    let page = run_page(&storage, &output, PageRequest::new(10, 20)).await?;
    assert_eq!(page.total, 25);
    let ids: Vec<i64> = page.items.iter().map(|s| s.id).collect();
    assert_eq!(ids, vec![5, 4, 3, 2, 1]);

    Ok(())
}

#[tokio::test]
async fn test_seed_is_reproducible_with_rng_seed() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let storage = storage(&temp_dir);
    let now = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();

    run_seed(&storage, seed_request(8, ExportFormat::Json, Some("a.json")), now).await?;
    run_seed(&storage, seed_request(8, ExportFormat::Json, Some("b.json")), now).await?;

    let first = storage.read_file("a.json").await?;
    let second = storage.read_file("b.json").await?;
    assert_eq!(first, second);
    Ok(())
}

#[tokio::test]
async fn test_seed_csv_into_nested_directory() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let storage = storage(&temp_dir);
    let now = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();

    let output = run_seed(&storage, seed_request(3, ExportFormat::Csv, Some("out/seed.csv")), now).await?;
    let text = String::from_utf8(storage.read_file(&output).await?)?;
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines.len(), 4);
    assert!(lines[0].starts_with("id,tracking_number,"));
    assert!(lines[1].starts_with("1,TMS-01000,"));
    assert!(lines[3].starts_with("3,TMS-01002,"));
    Ok(())
}

#[tokio::test]
async fn test_check_reports_contract_violations() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let storage = storage(&temp_dir);

    let payload = json!({
        "id": 12,
        "tracking_number": "TRK1",
        "shipper": "A",
        "consignee": "B",
        "origin": "X",
        "destination": "Y",
        "status": "created",
        "pieces": 1,
        "weight_kg": 1.0,
        "cost": 1.0
    });
    storage.write_file("payload.json", &serde_json::to_vec(&payload)?).await?;

    let err = run_check(&storage, DocumentKind::Payload, "payload.json").await.unwrap_err();
    assert!(matches!(err, ContractError::UnknownFieldError { ref field } if field == "id"));
    assert_eq!(err.exit_code(), 2);

    let mut shipment = payload.clone();
    shipment["status"] = json!("lost");
    shipment["created_at"] = json!("2024-01-01T00:00:00Z");
    shipment["updated_at"] = json!("2024-01-01T00:00:00Z");
    storage.write_file("shipment.json", &serde_json::to_vec(&shipment)?).await?;

    let err = run_check(&storage, DocumentKind::Shipment, "shipment.json").await.unwrap_err();
    assert!(matches!(err, ContractError::InvalidStatusError { ref value } if value == "lost"));

    let err = run_check(&storage, DocumentKind::Shipment, "missing.json").await.unwrap_err();
    assert!(matches!(err, ContractError::IoError(_)));
    Ok(())
}

#[tokio::test]
async fn test_page_reads_bare_arrays() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let storage = storage(&temp_dir);

    let items: Vec<serde_json::Value> = [3, 9, 1]
        .iter()
        .map(|id| {
            json!({
                "id": id,
                "tracking_number": format!("TRK{}", id),
                "shipper": "A",
                "consignee": "B",
                "origin": "X",
                "destination": "Y",
                "carrier": null,
                "status": "in_transit",
                "pieces": 2,
                "weight_kg": 3.25,
                "cost": 10.0,
                "created_at": "2024-01-01T00:00:00Z",
                "updated_at": "2024-01-02T00:00:00Z"
            })
        })
        .collect();
    storage.write_file("all.json", &serde_json::to_vec(&items)?).await?;

    let page: ShipmentList = run_page(&storage, "all.json", PageRequest::new(2, -1)).await?;
    assert_eq!(page.total, 3);
    assert_eq!(page.items.iter().map(|s| s.id).collect::<Vec<_>>(), vec![9, 3]);
    assert!(page.items.iter().all(|s| s.status == ShipmentStatus::InTransit));
    Ok(())
}

#[tokio::test]
async fn test_page_keeps_error_classification() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let storage = storage(&temp_dir);

    let mut record = json!({
        "id": 1,
        "tracking_number": "TRK1",
        "shipper": "A",
        "consignee": "B",
        "origin": "X",
        "destination": "Y",
        "status": "lost",
        "pieces": 1,
        "weight_kg": 1.0,
        "cost": 2.0,
        "created_at": "2024-01-01T00:00:00Z",
        "updated_at": "2024-01-01T00:00:00Z"
    });

    storage.write_file("array.json", &serde_json::to_vec(&json!([record.clone()]))?).await?;
    storage
        .write_file("list.json", &serde_json::to_vec(&json!({ "total": 1, "items": [record.clone()] }))?)
        .await?;
    for file in ["array.json", "list.json"] {
        match run_page(&storage, file, PageRequest::default()).await {
            Err(ContractError::InvalidStatusError { value }) => assert_eq!(value, "lost"),
            other => panic!("{}: expected InvalidStatusError, got {:?}", file, other),
        }
    }

    record["status"] = json!("created");
    record.as_object_mut().unwrap().remove("shipper");
    storage.write_file("array.json", &serde_json::to_vec(&json!([record.clone()]))?).await?;
    storage
        .write_file("list.json", &serde_json::to_vec(&json!({ "total": 1, "items": [record] }))?)
        .await?;
    for file in ["array.json", "list.json"] {
        match run_page(&storage, file, PageRequest::default()).await {
            Err(ContractError::MissingFieldError { field }) => assert_eq!(field, "shipper"),
            other => panic!("{}: expected MissingFieldError, got {:?}", file, other),
        }
    }
    Ok(())
}
