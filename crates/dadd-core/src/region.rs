//! Reference entities: the four-level geographic hierarchy.
//!
//! Region → Sub-Region → Intermediate Region → Country. Regions and
//! sub-regions are editable; the lower two levels are read-only here.

use serde::{Deserialize, Serialize};

/// Top level of the hierarchy (e.g. "Africa").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
  pub region_id:   i64,
  pub region_name: String,
}

/// Fields accepted when creating or renaming a [`Region`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRegion {
  pub region_name: String,
}

/// A sub-region. `region_id` may be NULL, in which case `region_name` is too.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubRegion {
  pub sub_region_id:   i64,
  pub sub_region_name: String,
  pub region_id:       Option<i64>,
  /// Name of the parent region, filled by read queries (not by inserts).
  pub region_name:     Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSubRegion {
  pub sub_region_name: String,
  pub region_id:       Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntermediateRegion {
  pub intermediate_region_id:   i64,
  pub intermediate_region_name: Option<String>,
  pub sub_region_id:            Option<i64>,
  pub sub_region_name:          Option<String>,
}

/// Dropdown entry for a country.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
  pub country_id:   i64,
  pub country_name: String,
}
