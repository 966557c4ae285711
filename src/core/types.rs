use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::rate::conversion_rate;

/// Bucket size of the x axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AggregationMode {
    #[default]
    Day,
    Week,
}

impl fmt::Display for AggregationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Day => f.write_str("day"),
            Self::Week => f.write_str("week"),
        }
    }
}

/// Aggregated statistics of one variation over one period.
///
/// The conversion rate is derived from the totals on construction and cannot
/// be set independently; deserialization recomputes it as well.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "PointTotals")]
pub struct Point {
    period_label: String,
    period_date_iso: String,
    variation: String,
    visits: u64,
    conversions: u64,
    conversion_rate: f64,
}

#[derive(Deserialize)]
struct PointTotals {
    period_label: String,
    period_date_iso: String,
    variation: String,
    visits: u64,
    conversions: u64,
}

impl From<PointTotals> for Point {
    fn from(totals: PointTotals) -> Self {
        Self::new(
            totals.period_label,
            totals.period_date_iso,
            totals.variation,
            totals.visits,
            totals.conversions,
        )
    }
}

impl Point {
    #[must_use]
    pub fn new(
        period_label: impl Into<String>,
        period_date_iso: impl Into<String>,
        variation: impl Into<String>,
        visits: u64,
        conversions: u64,
    ) -> Self {
        Self {
            period_label: period_label.into(),
            period_date_iso: period_date_iso.into(),
            variation: variation.into(),
            visits,
            conversions,
            conversion_rate: conversion_rate(conversions, visits),
        }
    }

    #[must_use]
    pub fn period_label(&self) -> &str {
        &self.period_label
    }

    #[must_use]
    pub fn period_date_iso(&self) -> &str {
        &self.period_date_iso
    }

    #[must_use]
    pub fn variation(&self) -> &str {
        &self.variation
    }

    #[must_use]
    pub fn visits(&self) -> u64 {
        self.visits
    }

    #[must_use]
    pub fn conversions(&self) -> u64 {
        self.conversions
    }

    /// Percentage of visits that converted, see [`conversion_rate`].
    #[must_use]
    pub fn conversion_rate(&self) -> f64 {
        self.conversion_rate
    }
}
