//! Rows produced by the reporting queries over `DADD_RECORD`.
//!
//! A DADD value is recorded per (country, decade) and may be absent, so every
//! value and aggregate here is an `Option<f64>`.

use serde::{Deserialize, Serialize};

/// Sort direction for [`DaddStore::country_trend`](crate::store::DaddStore::country_trend).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrendOrder {
  #[default]
  Ascending,
  Descending,
}

/// One point of a country's series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecadeValue {
  pub decade_id:  i64,
  pub dadd_value: Option<f64>,
}

/// A country's value in one sub-region and decade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubRegionDecadeRow {
  pub country_name:    String,
  pub sub_region_name: String,
  pub decade_id:       i64,
  pub dadd_value:      Option<f64>,
}

/// Per-sub-region aggregate inside one region and decade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubRegionAverage {
  pub region_name:     String,
  pub sub_region_id:   i64,
  pub sub_region_name: String,
  pub decade_id:       i64,
  pub avg_dadd:        Option<f64>,
  /// Distinct countries with a non-NULL value, i.e. those behind `avg_dadd`.
  pub country_count:   i64,
}

/// A country together with the value at its most recent decade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatestValue {
  pub country_id:   i64,
  pub country_name: String,
  pub decade:       i64,
  pub dadd_value:   Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryValue {
  pub country_name: String,
  pub dadd_value:   f64,
}

/// Statistics across all countries for a single decade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecadeSummary {
  pub total_countries: i64,
  /// Mean value rounded to two decimal places; `None` when nothing to average.
  pub avg_dadd:        Option<f64>,
  pub top:             Option<CountryValue>,
  pub bottom:          Option<CountryValue>,
}
