use crate::domain::model::{Shipment, ShipmentList, ShipmentPatch, ShipmentPayload};
use crate::utils::error::{ContractError, Result};
use crate::utils::validation::{
    validate_non_negative, validate_optional_text, validate_required_text, Validate,
};
use serde::de::DeserializeOwned;

pub const MAX_TRACKING_NUMBER_LEN: usize = 64;
pub const MAX_PARTY_LEN: usize = 120;
pub const MAX_PLACE_LEN: usize = 160;
pub const MAX_NOTES_LEN: usize = 800;

/// Which shape a JSON document is expected to have.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum DocumentKind {
    Shipment,
    Payload,
    Patch,
    List,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CheckReport {
    pub kind: DocumentKind,
    pub records: usize,
    pub warnings: Vec<String>,
}

struct TextFields<'a> {
    tracking_number: &'a str,
    shipper: &'a str,
    consignee: &'a str,
    origin: &'a str,
    destination: &'a str,
    carrier: Option<&'a str>,
    notes: Option<&'a str>,
}

impl TextFields<'_> {
    fn validate(&self) -> Result<()> {
        validate_required_text("tracking_number", self.tracking_number, MAX_TRACKING_NUMBER_LEN)?;
        validate_required_text("shipper", self.shipper, MAX_PARTY_LEN)?;
        validate_required_text("consignee", self.consignee, MAX_PARTY_LEN)?;
        validate_required_text("origin", self.origin, MAX_PLACE_LEN)?;
        validate_required_text("destination", self.destination, MAX_PLACE_LEN)?;
        validate_optional_text("carrier", self.carrier, MAX_PARTY_LEN)?;
        validate_optional_text("notes", self.notes, MAX_NOTES_LEN)
    }
}

impl Validate for ShipmentPayload {
    fn validate(&self) -> Result<()> {
        TextFields {
            tracking_number: &self.tracking_number,
            shipper: &self.shipper,
            consignee: &self.consignee,
            origin: &self.origin,
            destination: &self.destination,
            carrier: self.carrier.as_deref(),
            notes: self.notes.as_deref(),
        }
        .validate()?;
        validate_non_negative("weight_kg", self.weight_kg)?;
        validate_non_negative("cost", self.cost)
    }
}

impl Validate for Shipment {
    fn validate(&self) -> Result<()> {
        TextFields {
            tracking_number: &self.tracking_number,
            shipper: &self.shipper,
            consignee: &self.consignee,
            origin: &self.origin,
            destination: &self.destination,
            carrier: self.carrier.as_deref(),
            notes: self.notes.as_deref(),
        }
        .validate()?;
        validate_non_negative("weight_kg", self.weight_kg)?;
        validate_non_negative("cost", self.cost)?;

        if self.updated_at < self.created_at {
            return Err(ContractError::InvalidFieldValueError {
                field: "updated_at".to_string(),
                value: crate::domain::timestamp::format(&self.updated_at),
                reason: "Record cannot be updated before it was created".to_string(),
            });
        }
        Ok(())
    }
}

impl Validate for ShipmentPatch {
    fn validate(&self) -> Result<()> {
        let required = [
            ("tracking_number", &self.tracking_number, MAX_TRACKING_NUMBER_LEN),
            ("shipper", &self.shipper, MAX_PARTY_LEN),
            ("consignee", &self.consignee, MAX_PARTY_LEN),
            ("origin", &self.origin, MAX_PLACE_LEN),
            ("destination", &self.destination, MAX_PLACE_LEN),
        ];
        for (field, value, max_length) in required {
            if let Some(value) = value {
                validate_required_text(field, value, max_length)?;
            }
        }

        if let Some(carrier) = &self.carrier {
            validate_optional_text("carrier", carrier.as_deref(), MAX_PARTY_LEN)?;
        }
        if let Some(notes) = &self.notes {
            validate_optional_text("notes", notes.as_deref(), MAX_NOTES_LEN)?;
        }
        if let Some(weight_kg) = self.weight_kg {
            validate_non_negative("weight_kg", weight_kg)?;
        }
        if let Some(cost) = self.cost {
            validate_non_negative("cost", cost)?;
        }
        Ok(())
    }
}

impl Validate for ShipmentList {
    fn validate(&self) -> Result<()> {
        if self.items.len() as u64 > self.total {
            return Err(ContractError::InvalidFieldValueError {
                field: "total".to_string(),
                value: self.total.to_string(),
                reason: format!("Page carries {} items, more than the total", self.items.len()),
            });
        }
        self.items.iter().try_for_each(|item| item.validate())
    }
}

fn parse<T: DeserializeOwned>(data: &[u8]) -> Result<T> {
    Ok(serde_json::from_slice(data)?)
}

fn delivery_warnings<'a>(shipments: impl IntoIterator<Item = &'a Shipment>) -> Vec<String> {
    shipments
        .into_iter()
        .filter(|shipment| shipment.is_missing_delivery_time())
        .map(|shipment| {
            format!(
                "shipment {} ({}) is delivered but has no delivered_at",
                shipment.id, shipment.tracking_number
            )
        })
        .collect()
}

/// Parses `data` as the given shape and runs its validation rules.
pub fn check_document(kind: DocumentKind, data: &[u8]) -> Result<CheckReport> {
    let (records, warnings) = match kind {
        DocumentKind::Shipment => {
            let shipment: Shipment = parse(data)?;
            shipment.validate()?;
            (1, delivery_warnings([&shipment]))
        }
        DocumentKind::Payload => {
            let payload: ShipmentPayload = parse(data)?;
            payload.validate()?;
            let warnings = if payload.is_missing_delivery_time() {
                vec![format!(
                    "payload {} is delivered but has no delivered_at",
                    payload.tracking_number
                )]
            } else {
                Vec::new()
            };
            (1, warnings)
        }
        DocumentKind::Patch => {
            let patch: ShipmentPatch = parse(data)?;
            patch.validate()?;
            let warnings = if patch.is_empty() {
                vec!["patch changes no fields".to_string()]
            } else {
                Vec::new()
            };
            (1, warnings)
        }
        DocumentKind::List => {
            let list: ShipmentList = parse(data)?;
            list.validate()?;
            let mut warnings = delivery_warnings(&list.items);
            if list.is_partial() {
                warnings.push(format!(
                    "partial page: {} of {} shipments",
                    list.items.len(),
                    list.total
                ));
            }
            (list.items.len(), warnings)
        }
    };

    tracing::debug!(?kind, records, warnings = warnings.len(), "document checked");
    Ok(CheckReport {
        kind,
        records,
        warnings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload_json() -> serde_json::Value {
        json!({
            "tracking_number": "TRK1",
            "shipper": "A",
            "consignee": "B",
            "origin": "X",
            "destination": "Y",
            "status": "created",
            "pieces": 3,
            "weight_kg": 12.5,
            "cost": 99.99
        })
    }

    fn bytes(value: &serde_json::Value) -> Vec<u8> {
        serde_json::to_vec(value).unwrap()
    }

    #[test]
    fn test_payload_passes() {
        let report = check_document(DocumentKind::Payload, &bytes(&payload_json())).unwrap();
        assert_eq!(report.records, 1);
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn test_negative_cost_rejected() {
        let mut doc = payload_json();
        doc["cost"] = json!(-1.0);
        match check_document(DocumentKind::Payload, &bytes(&doc)) {
            Err(ContractError::InvalidFieldValueError { field, .. }) => assert_eq!(field, "cost"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_negative_pieces_fail_to_parse() {
        let mut doc = payload_json();
        doc["pieces"] = json!(-2);
        let err = check_document(DocumentKind::Payload, &bytes(&doc)).unwrap_err();
        assert!(matches!(err, ContractError::SerializationError(_)));
    }

    #[test]
    fn test_blank_and_oversized_text_rejected() {
        let mut doc = payload_json();
        doc["shipper"] = json!("  ");
        assert!(check_document(DocumentKind::Payload, &bytes(&doc)).is_err());

        let mut doc = payload_json();
        doc["notes"] = json!("n".repeat(MAX_NOTES_LEN + 1));
        assert!(check_document(DocumentKind::Payload, &bytes(&doc)).is_err());
    }

    #[test]
    fn test_delivered_without_time_warns() {
        let mut doc = payload_json();
        doc["id"] = json!(9);
        doc["status"] = json!("delivered");
        doc["created_at"] = json!("2024-01-01T00:00:00Z");
        doc["updated_at"] = json!("2024-01-02T00:00:00Z");
        let report = check_document(DocumentKind::Shipment, &bytes(&doc)).unwrap();
        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].contains("TRK1"));
    }

    #[test]
    fn test_delivered_payload_without_time_warns() {
        let mut doc = payload_json();
        doc["status"] = json!("delivered");
        let report = check_document(DocumentKind::Payload, &bytes(&doc)).unwrap();
        assert_eq!(
            report.warnings,
            vec!["payload TRK1 is delivered but has no delivered_at".to_string()]
        );

        doc["delivered_at"] = json!("2024-01-03T10:00:00Z");
        let report = check_document(DocumentKind::Payload, &bytes(&doc)).unwrap();
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn test_patch_null_on_required_field_rejected() {
        let err = check_document(DocumentKind::Patch, br#"{"tracking_number": null, "status": null}"#).unwrap_err();
        assert!(matches!(err, ContractError::SerializationError(_)));
    }

    #[test]
    fn test_updated_before_created_rejected() {
        let mut doc = payload_json();
        doc["id"] = json!(9);
        doc["created_at"] = json!("2024-01-02T00:00:00Z");
        doc["updated_at"] = json!("2024-01-01T00:00:00Z");
        assert!(check_document(DocumentKind::Shipment, &bytes(&doc)).is_err());
    }

    #[test]
    fn test_patch_rules() {
        let report = check_document(DocumentKind::Patch, b"{}").unwrap();
        assert_eq!(report.warnings, vec!["patch changes no fields".to_string()]);

        assert!(check_document(DocumentKind::Patch, br#"{"carrier": null}"#).is_ok());
        assert!(check_document(DocumentKind::Patch, br#"{"weight_kg": -3}"#).is_err());
        assert!(check_document(DocumentKind::Patch, br#"{"origin": ""}"#).is_err());
    }

    #[test]
    fn test_list_with_more_items_than_total_rejected() {
        let mut item = payload_json();
        item["id"] = json!(1);
        item["created_at"] = json!("2024-01-01T00:00:00Z");
        item["updated_at"] = json!("2024-01-01T00:00:00Z");
        let doc = json!({ "total": 0, "items": [item] });
        assert!(check_document(DocumentKind::List, &bytes(&doc)).is_err());
    }
}
