//! Conversion from the data.gov.in record shape to [`MarketRecord`].

use serde::{Deserialize, Deserializer};

use agrow_core::Price;

use super::MarketRecord;

/// Top-level response body. `records` is optional so its absence can be
/// reported separately from a malformed body.
#[derive(Debug, Deserialize)]
pub(super) struct RecordsResponse {
    pub records: Option<Vec<RawRecord>>,
}

/// A record as delivered by the provider. Every field is a string.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(super) struct RawRecord {
    state: String,
    district: String,
    market: String,
    commodity: String,
    variety: String,
    grade: String,
    arrival_date: String,
    #[serde(deserialize_with = "lenient_string")]
    min_price: String,
    #[serde(deserialize_with = "lenient_string")]
    max_price: String,
    #[serde(deserialize_with = "lenient_string")]
    modal_price: String,
}

/// Accept prices sent as numbers as well as strings.
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(s) => s,
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    })
}

pub(super) fn convert_record(raw: RawRecord) -> MarketRecord {
    MarketRecord {
        state: raw.state,
        district: raw.district,
        market: raw.market,
        commodity: raw.commodity,
        variety: raw.variety,
        grade: raw.grade,
        arrival_date: raw.arrival_date,
        min_price: Price::from_provider(&raw.min_price),
        max_price: Price::from_provider(&raw.max_price),
        modal_price: Price::from_provider(&raw.modal_price),
    }
}
