use std::fmt;
use std::io::Read;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{ChartError, ChartResult};

/// One calendar day of raw traffic as delivered by the data source.
///
/// `visits` and `conversions` are keyed by variation identifier. Key order
/// is preserved from the input so stable sorts downstream stay deterministic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRecord {
    pub date: String,
    #[serde(default)]
    pub visits: IndexMap<String, u64>,
    #[serde(default)]
    pub conversions: IndexMap<String, u64>,
}

impl RawRecord {
    #[must_use]
    pub fn new(date: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            visits: IndexMap::new(),
            conversions: IndexMap::new(),
        }
    }

    /// Adds (or replaces) the counts of one variation for this day.
    #[must_use]
    pub fn with_counts(mut self, variation: impl Into<String>, visits: u64, conversions: u64) -> Self {
        let variation = variation.into();
        self.conversions.insert(variation.clone(), conversions);
        self.visits.insert(variation, visits);
        self
    }

    pub fn calendar_date(&self) -> ChartResult<NaiveDate> {
        parse_record_date(&self.date)
    }
}

/// Parses an ISO calendar date, also accepting full ISO date-times.
///
/// Date-times resolve to the calendar date written in the string, without
/// shifting through any local time zone.
pub fn parse_record_date(value: &str) -> ChartResult<NaiveDate> {
    let trimmed = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date);
    }
    if let Ok(time) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(time.date_naive());
    }
    if let Ok(time) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(time.date());
    }
    Err(ChartError::InvalidDate {
        value: value.to_owned(),
    })
}

/// Variation identifier as it appears in the dataset's `variations` list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VariationId {
    Number(u64),
    Text(String),
}

impl fmt::Display for VariationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(value) => write!(f, "{value}"),
            Self::Text(value) => f.write_str(value),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariationInfo {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<VariationId>,
}

impl VariationInfo {
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: None,
        }
    }

    #[must_use]
    pub fn with_id(mut self, id: VariationId) -> Self {
        self.id = Some(id);
        self
    }

    /// Key under which this variation's counts appear in raw records:
    /// the explicit `id` when present, the `name` otherwise.
    #[must_use]
    pub fn identifier(&self) -> String {
        match &self.id {
            Some(id) => id.to_string(),
            None => self.name.clone(),
        }
    }
}

/// Input payload: raw daily records plus the authoritative variation list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub data: Vec<RawRecord>,
    #[serde(default)]
    pub variations: Vec<VariationInfo>,
}

impl Dataset {
    #[must_use]
    pub fn new(data: Vec<RawRecord>, variations: Vec<VariationInfo>) -> Self {
        Self { data, variations }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty() && self.variations.is_empty()
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let dataset: Self = serde_json::from_str(input)
            .map_err(|e| ChartError::Json(format!("failed to parse dataset json: {e}")))?;
        debug!(
            records = dataset.data.len(),
            variations = dataset.variations.len(),
            "parsed dataset"
        );
        Ok(dataset)
    }

    pub fn from_reader<R: Read>(reader: R) -> ChartResult<Self> {
        let dataset: Self = serde_json::from_reader(reader)
            .map_err(|e| ChartError::Json(format!("failed to read dataset json: {e}")))?;
        debug!(
            records = dataset.data.len(),
            variations = dataset.variations.len(),
            "read dataset"
        );
        Ok(dataset)
    }

    /// Parses `input`, degrading to an empty dataset when it is malformed.
    #[must_use]
    pub fn load_or_empty(input: &str) -> Self {
        Self::from_json_str(input).unwrap_or_else(|err| {
            warn!(error = %err, "dataset unavailable, continuing with empty data");
            Self::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_and_timestamped_dates() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 5).expect("valid date");
        assert_eq!(parse_record_date("2024-03-05").expect("plain"), expected);
        assert_eq!(
            parse_record_date("2024-03-05T23:30:00+02:00").expect("rfc3339"),
            expected
        );
        assert_eq!(
            parse_record_date("2024-03-05T08:00:00.000").expect("naive"),
            expected
        );
        assert!(matches!(
            parse_record_date("05/03/2024"),
            Err(ChartError::InvalidDate { .. })
        ));
    }

    #[test]
    fn identifier_prefers_explicit_id() {
        let original = VariationInfo::named("Original");
        let variant = VariationInfo::named("Variation A").with_id(VariationId::Number(10001));

        assert_eq!(original.identifier(), "Original");
        assert_eq!(variant.identifier(), "10001");
    }

    #[test]
    fn malformed_payload_degrades_to_empty() {
        let dataset = Dataset::load_or_empty("{\"data\": 42}");
        assert!(dataset.is_empty());
    }
}
