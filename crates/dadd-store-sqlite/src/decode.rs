//! Row decoders: one per result shape, reading columns by name.

use rusqlite::Row;

use dadd_core::{
  record::{CountryValue, DecadeValue, LatestValue, SubRegionAverage, SubRegionDecadeRow},
  region::{Country, IntermediateRegion, Region, SubRegion},
};

pub(crate) fn region(row: &Row<'_>) -> rusqlite::Result<Region> {
  Ok(Region {
    region_id:   row.get("region_id")?,
    region_name: row.get("region_name")?,
  })
}

/// Expects a `region_name` column; listing queries LEFT JOIN it in, the
/// single-row fetch selects it as NULL.
pub(crate) fn sub_region(row: &Row<'_>) -> rusqlite::Result<SubRegion> {
  Ok(SubRegion {
    sub_region_id:   row.get("sub_region_id")?,
    sub_region_name: row.get("sub_region_name")?,
    region_id:       row.get("region_id")?,
    region_name:     row.get("region_name")?,
  })
}

pub(crate) fn intermediate_region(row: &Row<'_>) -> rusqlite::Result<IntermediateRegion> {
  Ok(IntermediateRegion {
    intermediate_region_id:   row.get("intermediate_region_id")?,
    intermediate_region_name: row.get("intermediate_region_name")?,
    sub_region_id:            row.get("sub_region_id")?,
    sub_region_name:          row.get("sub_region_name")?,
  })
}

pub(crate) fn country(row: &Row<'_>) -> rusqlite::Result<Country> {
  Ok(Country {
    country_id:   row.get("country_id")?,
    country_name: row.get("country_name")?,
  })
}

pub(crate) fn decade(row: &Row<'_>) -> rusqlite::Result<i64> {
  row.get("decade_id")
}

pub(crate) fn decade_value(row: &Row<'_>) -> rusqlite::Result<DecadeValue> {
  Ok(DecadeValue {
    decade_id:  row.get("decade_id")?,
    dadd_value: row.get("dadd_value")?,
  })
}

pub(crate) fn sub_region_decade_row(row: &Row<'_>) -> rusqlite::Result<SubRegionDecadeRow> {
  Ok(SubRegionDecadeRow {
    country_name:    row.get("country_name")?,
    sub_region_name: row.get("sub_region_name")?,
    decade_id:       row.get("decade_id")?,
    dadd_value:      row.get("dadd_value")?,
  })
}

pub(crate) fn sub_region_average(row: &Row<'_>) -> rusqlite::Result<SubRegionAverage> {
  Ok(SubRegionAverage {
    region_name:     row.get("region_name")?,
    sub_region_id:   row.get("sub_region_id")?,
    sub_region_name: row.get("sub_region_name")?,
    decade_id:       row.get("decade_id")?,
    avg_dadd:        row.get("avg_dadd")?,
    country_count:   row.get("country_count")?,
  })
}

pub(crate) fn latest_value(row: &Row<'_>) -> rusqlite::Result<LatestValue> {
  Ok(LatestValue {
    country_id:   row.get("country_id")?,
    country_name: row.get("country_name")?,
    decade:       row.get("decade")?,
    dadd_value:   row.get("dadd_value")?,
  })
}

pub(crate) fn country_value(row: &Row<'_>) -> rusqlite::Result<CountryValue> {
  Ok(CountryValue {
    country_name: row.get("country_name")?,
    dadd_value:   row.get("dadd_value")?,
  })
}

/// `(total_countries, avg_dadd)` from the summary aggregate.
pub(crate) fn summary_totals(row: &Row<'_>) -> rusqlite::Result<(i64, Option<f64>)> {
  Ok((row.get("total_countries")?, row.get("avg_dadd")?))
}

/// Escape `LIKE` wildcards so `text` matches literally; pair with
/// `ESCAPE '\'`.
pub(crate) fn like_escape(text: &str) -> String {
  let mut out = String::with_capacity(text.len());
  for c in text.chars() {
    if matches!(c, '%' | '_' | '\\') {
      out.push('\\');
    }
    out.push(c);
  }
  out
}
