use crate::utils::error::{ContractError, Result};
use crate::utils::validation::{
    validate_ordered_range, validate_positive_number, validate_range, validate_required_text,
    Validate,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Upper bound for the day spans, about a hundred years.
pub const MAX_DAY_SPAN: u32 = 36_500;
/// Upper bound for `weight_kg.max` and `cost_per_kg.max`; keeps generated costs finite.
pub const MAX_RANGE_BOUND: f64 = 1_000_000.0;

/// Settings for the sample-data generator, loaded from TOML.
///
/// Every key is optional; missing keys take the defaults below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedConfig {
    pub count: usize,
    pub tracking_prefix: String,
    pub first_sequence: u32,
    pub carriers: Vec<String>,
    pub cities: Vec<String>,
    pub shippers: Vec<String>,
    pub consignees: Vec<String>,
    pub status_weights: StatusWeights,
    pub max_pickup_age_days: u32,
    pub max_transit_days: u32,
    pub max_pieces: u32,
    pub weight_kg: RangeConfig,
    pub cost_per_kg: RangeConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusWeights {
    pub created: u32,
    pub in_transit: u32,
    pub delivered: u32,
    pub canceled: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RangeConfig {
    pub min: f64,
    pub max: f64,
}

fn names(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            count: 100,
            tracking_prefix: "TMS".to_string(),
            first_sequence: 1000,
            carriers: names(&["顺丰", "京东", "德邦", "邮政", "中通", "极兔"]),
            cities: names(&[
                "北京", "上海", "广州", "深圳", "杭州", "成都", "武汉", "西安", "南京", "重庆",
            ]),
            shippers: names(&["华东仓", "华南仓", "华北仓", "华中仓"]),
            consignees: names(&["客户A", "客户B", "客户C", "客户D", "客户E"]),
            status_weights: StatusWeights::default(),
            max_pickup_age_days: 10,
            max_transit_days: 6,
            max_pieces: 6,
            weight_kg: RangeConfig { min: 1.0, max: 80.0 },
            cost_per_kg: RangeConfig { min: 3.5, max: 6.5 },
        }
    }
}

impl Default for StatusWeights {
    fn default() -> Self {
        Self {
            created: 2,
            in_transit: 4,
            delivered: 3,
            canceled: 1,
        }
    }
}

impl StatusWeights {
    pub fn total(&self) -> u64 {
        [self.created, self.in_transit, self.delivered, self.canceled]
            .iter()
            .map(|weight| u64::from(*weight))
            .sum()
    }
}

impl SeedConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ContractError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| ContractError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }
}

impl Validate for SeedConfig {
    fn validate(&self) -> Result<()> {
        validate_positive_number("count", self.count, 1)?;
        validate_positive_number("max_pieces", self.max_pieces as usize, 1)?;
        validate_positive_number("max_transit_days", self.max_transit_days as usize, 1)?;
        validate_range("max_transit_days", self.max_transit_days, 1, MAX_DAY_SPAN)?;
        validate_range("max_pickup_age_days", self.max_pickup_age_days, 0, MAX_DAY_SPAN)?;
        // 留空間給 "-" 與序號
        validate_required_text("tracking_prefix", &self.tracking_prefix, 48)?;

        let lists = [
            ("carriers", &self.carriers),
            ("cities", &self.cities),
            ("shippers", &self.shippers),
            ("consignees", &self.consignees),
        ];
        for (field, values) in lists {
            if values.is_empty() || values.iter().any(|value| value.trim().is_empty()) {
                return Err(ContractError::InvalidConfigValueError {
                    field: field.to_string(),
                    value: format!("{:?}", values),
                    reason: "List must be non-empty and contain no blank entries".to_string(),
                });
            }
        }

        if self.status_weights.total() == 0 {
            return Err(ContractError::InvalidConfigValueError {
                field: "status_weights".to_string(),
                value: format!("{:?}", self.status_weights),
                reason: "At least one status needs a positive weight".to_string(),
            });
        }

        validate_ordered_range("weight_kg", self.weight_kg.min, self.weight_kg.max)?;
        validate_ordered_range("cost_per_kg", self.cost_per_kg.min, self.cost_per_kg.max)?;
        validate_range("weight_kg.max", self.weight_kg.max, 0.0, MAX_RANGE_BOUND)?;
        validate_range("cost_per_kg.max", self.cost_per_kg.max, 0.0, MAX_RANGE_BOUND)
    }
}
