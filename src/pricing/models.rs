//! Zone records as delivered by the data source and the rows derived from them

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::fmt;
use tracing::warn;

/// Sentinel shown in place of a missing rate or usage value
pub const SENTINEL: &str = "-";

/// Response body of the zone endpoint
///
/// Entries are kept as raw JSON so a single odd entry degrades into a row of
/// sentinels instead of failing the whole list.
#[derive(Debug, Deserialize)]
pub struct ZonesResponse {
    pub zones: Vec<Value>,
}

impl ZonesResponse {
    /// Convert every entry into a `ZoneRecord`, preserving source order
    pub fn into_records(self) -> Vec<ZoneRecord> {
        self.zones.into_iter().map(ZoneRecord::from_value).collect()
    }
}

/// One pricing zone, read-only input to the row transformer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ZoneRecord {
    #[serde(default, deserialize_with = "lenient_string")]
    pub zone: String,
    #[serde(rename = "type", default, deserialize_with = "lenient_string")]
    pub zone_type: String,
    #[serde(default, deserialize_with = "lenient_number")]
    pub cost_per_gb: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub cpm: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub spend_limit: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub current_usage: Option<f64>,
}

impl ZoneRecord {
    /// Build a record from one raw `zones` entry
    ///
    /// Fields are read leniently; an entry that is not an object at all
    /// becomes an empty record.
    pub fn from_value(value: Value) -> Self {
        match serde_json::from_value(value) {
            Ok(record) => record,
            Err(e) => {
                warn!("Zone entry is not an object, rendering sentinels: {}", e);
                Self::default()
            }
        }
    }
}

fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(number_from_value))
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => s,
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    })
}

/// Numbers pass through, numeric strings are parsed, anything else is missing
fn number_from_value(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    number.is_finite().then_some(number)
}

/// A pass-through rate cell: either the source number or the sentinel
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DisplayValue {
    Amount(f64),
    Missing,
}

impl DisplayValue {
    /// Render with a currency prefix, or the bare sentinel
    pub fn money(&self, currency: &str) -> String {
        match self {
            Self::Amount(v) => format!("{}{}", currency, v),
            Self::Missing => SENTINEL.to_string(),
        }
    }
}

impl From<Option<f64>> for DisplayValue {
    fn from(value: Option<f64>) -> Self {
        value.map_or(Self::Missing, Self::Amount)
    }
}

impl fmt::Display for DisplayValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Amount(v) => write!(f, "{}", v),
            Self::Missing => f.write_str(SENTINEL),
        }
    }
}

impl Serialize for DisplayValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Amount(v) => serializer.serialize_f64(*v),
            Self::Missing => serializer.serialize_str(SENTINEL),
        }
    }
}

/// A table row: pass-through fields plus the two derived totals
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayRow {
    pub zone: String,
    #[serde(rename = "type")]
    pub zone_type: String,
    pub cost_per_gb: DisplayValue,
    pub cpm: DisplayValue,
    pub spend_limit: DisplayValue,
    pub current_usage: String,
    #[serde(rename = "totalCost")]
    pub total_cost: f64,
    #[serde(rename = "totalMonthlyCost")]
    pub total_monthly_cost: f64,
}

/// Column titles, in display order
pub const COLUMN_TITLES: [&str; 8] = [
    "Zone",
    "Type",
    "Cost/GB",
    "CPM",
    "Spend Limit",
    "Current Usage",
    "Total",
    "Monthly Total",
];

impl DisplayRow {
    /// Cell texts in `COLUMN_TITLES` order
    pub fn cells(&self, currency: &str) -> [String; 8] {
        let usage = if self.current_usage == SENTINEL {
            SENTINEL.to_string()
        } else {
            format!("{}{}", currency, self.current_usage)
        };

        [
            self.zone.clone(),
            self.zone_type.clone(),
            self.cost_per_gb.money(currency),
            self.cpm.money(currency),
            self.spend_limit.money(currency),
            usage,
            format_money(currency, self.total_cost),
            format_money(currency, self.total_monthly_cost),
        ]
    }
}

/// Format a derived amount with two decimals
pub fn format_money(currency: &str, amount: f64) -> String {
    format!("{}{:.2}", currency, amount)
}
