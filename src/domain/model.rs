use crate::domain::status::ShipmentStatus;
use crate::domain::timestamp;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{de, Deserialize, Deserializer, Serialize};

/// A persisted shipment record.
///
/// `id`, `created_at` and `updated_at` are owned by the persistence layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shipment {
    pub id: i64,
    pub tracking_number: String,
    pub shipper: String,
    pub consignee: String,
    pub origin: String,
    pub destination: String,
    #[serde(default)]
    pub carrier: Option<String>,
    pub status: ShipmentStatus,
    pub pieces: u32,
    pub weight_kg: f64,
    pub cost: f64,
    #[serde(default)]
    pub pickup_date: Option<NaiveDate>,
    #[serde(default)]
    pub expected_delivery: Option<NaiveDate>,
    #[serde(default, with = "timestamp::option")]
    pub delivered_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "timestamp")]
    pub updated_at: DateTime<Utc>,
}

/// Fields a client supplies to create or fully replace a shipment.
///
/// Server-assigned keys (`id`, `created_at`, `updated_at`) are rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ShipmentPayload {
    pub tracking_number: String,
    pub shipper: String,
    pub consignee: String,
    pub origin: String,
    pub destination: String,
    #[serde(default)]
    pub carrier: Option<String>,
    pub status: ShipmentStatus,
    pub pieces: u32,
    pub weight_kg: f64,
    pub cost: f64,
    #[serde(default)]
    pub pickup_date: Option<NaiveDate>,
    #[serde(default)]
    pub expected_delivery: Option<NaiveDate>,
    #[serde(default, with = "timestamp::option")]
    pub delivered_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Partial update. A missing key leaves the field untouched; for nullable
/// fields an explicit `null` clears the stored value. Required fields
/// cannot be cleared, so `null` on them is rejected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ShipmentPatch {
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "non_null")]
    pub tracking_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "non_null")]
    pub shipper: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "non_null")]
    pub consignee: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "non_null")]
    pub origin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "non_null")]
    pub destination: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "nullable")]
    pub carrier: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "non_null")]
    pub status: Option<ShipmentStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "non_null")]
    pub pieces: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "non_null")]
    pub weight_kg: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "non_null")]
    pub cost: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "nullable")]
    pub pickup_date: Option<Option<NaiveDate>>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "nullable")]
    pub expected_delivery: Option<Option<NaiveDate>>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "timestamp::patch")]
    pub delivered_at: Option<Option<DateTime<Utc>>>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "nullable")]
    pub notes: Option<Option<String>>,
}

/// One page of shipments plus the total number of matches.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShipmentList {
    pub total: u64,
    pub items: Vec<Shipment>,
}

// 欄位存在即為 Some，null 則為 Some(None)
fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

// 必填欄位可省略，但不可為 null
fn non_null<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer)?
        .map(Some)
        .ok_or_else(|| de::Error::custom("null is not allowed for a required field"))
}

impl Shipment {
    /// Materialises a new record from a client payload.
    pub fn from_payload(id: i64, payload: ShipmentPayload, now: DateTime<Utc>) -> Self {
        let ShipmentPayload {
            tracking_number,
            shipper,
            consignee,
            origin,
            destination,
            carrier,
            status,
            pieces,
            weight_kg,
            cost,
            pickup_date,
            expected_delivery,
            delivered_at,
            notes,
        } = payload;

        Self {
            id,
            tracking_number,
            shipper,
            consignee,
            origin,
            destination,
            carrier,
            status,
            pieces,
            weight_kg,
            cost,
            pickup_date,
            expected_delivery,
            delivered_at,
            notes,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn to_payload(&self) -> ShipmentPayload {
        ShipmentPayload {
            tracking_number: self.tracking_number.clone(),
            shipper: self.shipper.clone(),
            consignee: self.consignee.clone(),
            origin: self.origin.clone(),
            destination: self.destination.clone(),
            carrier: self.carrier.clone(),
            status: self.status,
            pieces: self.pieces,
            weight_kg: self.weight_kg,
            cost: self.cost,
            pickup_date: self.pickup_date,
            expected_delivery: self.expected_delivery,
            delivered_at: self.delivered_at,
            notes: self.notes.clone(),
        }
    }

    /// Full replacement. `id` and `created_at` are kept.
    pub fn replace(&mut self, payload: ShipmentPayload, now: DateTime<Utc>) {
        let created_at = self.created_at;
        *self = Self::from_payload(self.id, payload, now);
        self.created_at = created_at;
    }

    pub fn apply_patch(&mut self, patch: ShipmentPatch, now: DateTime<Utc>) {
        let ShipmentPatch {
            tracking_number,
            shipper,
            consignee,
            origin,
            destination,
            carrier,
            status,
            pieces,
            weight_kg,
            cost,
            pickup_date,
            expected_delivery,
            delivered_at,
            notes,
        } = patch;

        if let Some(value) = tracking_number {
            self.tracking_number = value;
        }
        if let Some(value) = shipper {
            self.shipper = value;
        }
        if let Some(value) = consignee {
            self.consignee = value;
        }
        if let Some(value) = origin {
            self.origin = value;
        }
        if let Some(value) = destination {
            self.destination = value;
        }
        if let Some(value) = carrier {
            self.carrier = value;
        }
        if let Some(value) = status {
            self.status = value;
        }
        if let Some(value) = pieces {
            self.pieces = value;
        }
        if let Some(value) = weight_kg {
            self.weight_kg = value;
        }
        if let Some(value) = cost {
            self.cost = value;
        }
        if let Some(value) = pickup_date {
            self.pickup_date = value;
        }
        if let Some(value) = expected_delivery {
            self.expected_delivery = value;
        }
        if let Some(value) = delivered_at {
            self.delivered_at = value;
        }
        if let Some(value) = notes {
            self.notes = value;
        }

        self.updated_at = now;
    }

    /// `true` when the record claims delivery but carries no delivery time.
    pub fn is_missing_delivery_time(&self) -> bool {
        self.status == ShipmentStatus::Delivered && self.delivered_at.is_none()
    }
}

impl ShipmentPayload {
    pub fn is_missing_delivery_time(&self) -> bool {
        self.status == ShipmentStatus::Delivered && self.delivered_at.is_none()
    }
}

impl ShipmentPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl ShipmentList {
    pub fn new(total: u64, items: Vec<Shipment>) -> Self {
        Self { total, items }
    }

    /// More matches exist than this page carries.
    pub fn is_partial(&self) -> bool {
        (self.items.len() as u64) < self.total
    }
}
