//! The `DaddStore` trait.
//!
//! Implemented by storage backends (e.g. `dadd-store-sqlite`). The web layer
//! depends on this abstraction, not on any concrete backend.

use std::future::Future;

use crate::{
  record::{DecadeSummary, DecadeValue, LatestValue, SubRegionAverage, SubRegionDecadeRow, TrendOrder},
  region::{Country, IntermediateRegion, NewRegion, NewSubRegion, Region, SubRegion},
};

/// Number of rows returned by [`DaddStore::search_latest`] when no search
/// text is given.
pub const DEFAULT_SEARCH_LIMIT: i64 = 30;

/// Abstraction over a DADD store backend.
///
/// Every call is a single statement (or a short sequence of independent
/// statements); there are no transactions spanning calls.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait DaddStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Regions ───────────────────────────────────────────────────────────

  /// All regions ordered by id.
  fn list_regions(
    &self,
  ) -> impl Future<Output = Result<Vec<Region>, Self::Error>> + Send + '_;

  /// All regions ordered by name, for dropdowns.
  fn list_regions_by_name(
    &self,
  ) -> impl Future<Output = Result<Vec<Region>, Self::Error>> + Send + '_;

  fn get_region(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<Region>, Self::Error>> + Send + '_;

  fn add_region(
    &self,
    input: NewRegion,
  ) -> impl Future<Output = Result<Region, Self::Error>> + Send + '_;

  /// Rename a region. Returns `false` if no region has that id.
  fn update_region(
    &self,
    id: i64,
    input: NewRegion,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  /// Returns `false` if no region has that id.
  fn delete_region(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  // ── Sub-regions ───────────────────────────────────────────────────────

  /// All sub-regions ordered by id, with the parent region's name.
  fn list_sub_regions(
    &self,
  ) -> impl Future<Output = Result<Vec<SubRegion>, Self::Error>> + Send + '_;

  fn list_sub_regions_by_name(
    &self,
  ) -> impl Future<Output = Result<Vec<SubRegion>, Self::Error>> + Send + '_;

  fn get_sub_region(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<SubRegion>, Self::Error>> + Send + '_;

  fn add_sub_region(
    &self,
    input: NewSubRegion,
  ) -> impl Future<Output = Result<SubRegion, Self::Error>> + Send + '_;

  fn update_sub_region(
    &self,
    id: i64,
    input: NewSubRegion,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  fn delete_sub_region(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  // ── Read-only reference data ──────────────────────────────────────────

  /// All intermediate regions ordered by id, with the sub-region's name.
  fn list_intermediate_regions(
    &self,
  ) -> impl Future<Output = Result<Vec<IntermediateRegion>, Self::Error>> + Send + '_;

  /// All countries ordered by name.
  fn list_countries(
    &self,
  ) -> impl Future<Output = Result<Vec<Country>, Self::Error>> + Send + '_;

  /// Distinct decades present in `DADD_RECORD`, ascending.
  fn list_decades(
    &self,
  ) -> impl Future<Output = Result<Vec<i64>, Self::Error>> + Send + '_;

  // ── Reports ───────────────────────────────────────────────────────────

  /// Every (decade, value) pair recorded for a country.
  fn country_trend(
    &self,
    country_id: i64,
    order: TrendOrder,
  ) -> impl Future<Output = Result<Vec<DecadeValue>, Self::Error>> + Send + '_;

  /// Countries of one sub-region with their value in `decade`, ordered by
  /// value ascending (NULLs last), then country name.
  fn sub_region_decade(
    &self,
    sub_region_id: i64,
    decade: i64,
  ) -> impl Future<Output = Result<Vec<SubRegionDecadeRow>, Self::Error>> + Send + '_;

  /// Sub-region averages within one region for `decade`, ordered by region
  /// name, average ascending (NULLs last), then sub-region name.
  fn region_decade_averages(
    &self,
    region_id: i64,
    decade: i64,
  ) -> impl Future<Output = Result<Vec<SubRegionAverage>, Self::Error>> + Send + '_;

  /// Each country's value at its latest recorded decade, ordered by name.
  ///
  /// With `text`, returns every case-insensitive substring match on the
  /// country name; without, returns the first [`DEFAULT_SEARCH_LIMIT`] rows.
  fn search_latest<'a>(
    &'a self,
    text: Option<&'a str>,
  ) -> impl Future<Output = Result<Vec<LatestValue>, Self::Error>> + Send + 'a;

  /// Record count, rounded average and the highest and lowest country for
  /// `decade`.
  fn decade_summary(
    &self,
    decade: i64,
  ) -> impl Future<Output = Result<DecadeSummary, Self::Error>> + Send + '_;
}
