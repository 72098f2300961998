use crate::config::seed_config::SeedConfig;
use crate::domain::model::{Shipment, ShipmentPayload};
use crate::domain::status::ShipmentStatus;
use crate::utils::error::{ContractError, Result};
use crate::utils::validation::Validate;
use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use rand::distributions::{Distribution, WeightedIndex};
use rand::seq::SliceRandom;
use rand::Rng;

/// Generates plausible sample shipments for demos and fixtures.
pub struct ShipmentSeeder<R: Rng> {
    config: SeedConfig,
    statuses: WeightedIndex<u32>,
    rng: R,
}

fn pick<R: Rng>(rng: &mut R, values: &[String]) -> String {
    values.choose(rng).cloned().unwrap_or_default()
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

impl<R: Rng> ShipmentSeeder<R> {
    pub fn new(config: SeedConfig, rng: R) -> Result<Self> {
        config.validate()?;

        let weights = config.status_weights;
        // 權重順序須與 ShipmentStatus::ALL 一致
        let statuses = WeightedIndex::new([
            weights.created,
            weights.in_transit,
            weights.delivered,
            weights.canceled,
        ])
        .map_err(|e| ContractError::ConfigError {
            message: format!("invalid status weights: {}", e),
        })?;

        Ok(Self {
            config,
            statuses,
            rng,
        })
    }

    pub fn build_payload(&mut self, index: usize, today: NaiveDate) -> ShipmentPayload {
        let pickup_age = self.rng.gen_range(0..=i64::from(self.config.max_pickup_age_days));
        let transit = self.rng.gen_range(1..=i64::from(self.config.max_transit_days));
        let pickup = today - Duration::days(pickup_age);
        let expected = pickup + Duration::days(transit);

        let status = ShipmentStatus::ALL[self.statuses.sample(&mut self.rng)];
        let delivered_at = if status == ShipmentStatus::Delivered {
            let hour = self.rng.gen_range(9..=18);
            Some(expected.and_time(NaiveTime::MIN).and_utc() + Duration::hours(hour))
        } else {
            None
        };

        let weight_kg = round_cents(
            self.rng
                .gen_range(self.config.weight_kg.min..=self.config.weight_kg.max),
        );
        let rate = self
            .rng
            .gen_range(self.config.cost_per_kg.min..=self.config.cost_per_kg.max);

        ShipmentPayload {
            tracking_number: format!(
                "{}-{:05}",
                self.config.tracking_prefix,
                u64::from(self.config.first_sequence) + index as u64
            ),
            shipper: pick(&mut self.rng, &self.config.shippers),
            consignee: pick(&mut self.rng, &self.config.consignees),
            origin: pick(&mut self.rng, &self.config.cities),
            destination: pick(&mut self.rng, &self.config.cities),
            carrier: Some(pick(&mut self.rng, &self.config.carriers)),
            status,
            pieces: self.rng.gen_range(1..=self.config.max_pieces),
            weight_kg,
            cost: round_cents(weight_kg * rate),
            pickup_date: Some(pickup),
            expected_delivery: Some(expected),
            delivered_at,
            notes: None,
        }
    }

    /// Builds `count` records with ids starting at 1, all stamped `now`.
    pub fn generate(&mut self, today: NaiveDate, now: DateTime<Utc>) -> Vec<Shipment> {
        let count = self.config.count;
        let shipments: Vec<Shipment> = (0..count)
            .map(|index| Shipment::from_payload(index as i64 + 1, self.build_payload(index, today), now))
            .collect();

        tracing::info!(count = shipments.len(), "generated sample shipments");
        shipments
    }
}
