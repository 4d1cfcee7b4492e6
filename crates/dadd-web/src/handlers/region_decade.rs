//! `GET /feature3?region_id=&decade=`: per-sub-region averages inside one
//! region for one decade.

use std::sync::Arc;

use axum::{
  extract::{Query, State},
  response::Html,
};
use dadd_core::{
  record::SubRegionAverage,
  region::Region,
  store::DaddStore,
};
use serde::Deserialize;

use crate::{
  error::Error,
  handlers::{decade_options, selection},
  html::PageWriter,
};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Params {
  pub region_id: String,
  pub decade:    String,
}

pub struct View {
  pub regions:         Vec<Region>,
  pub decades:         Vec<i64>,
  pub selected_region: String,
  pub selected_decade: String,
  pub results:         Vec<SubRegionAverage>,
}

pub async fn page<S>(
  State(store): State<Arc<S>>,
  Query(params): Query<Params>,
) -> Result<Html<String>, Error>
where
  S: DaddStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  tracing::debug!(region_id = %params.region_id, decade = %params.decade, "region decade averages");

  let (regions, decades) = tokio::try_join!(store.list_regions_by_name(), store.list_decades())
    .map_err(Error::store)?;

  let results = match (selection(&params.region_id), selection(&params.decade)) {
    (Some(region), Some(decade)) => store
      .region_decade_averages(region, decade)
      .await
      .map_err(Error::store)?,
    _ => Vec::new(),
  };

  render(&View {
    regions,
    decades,
    selected_region: params.region_id,
    selected_decade: params.decade,
    results,
  })
}

fn render(view: &View) -> Result<Html<String>, Error> {
  let mut page = PageWriter::new("Region & Decade (Sub-Region Averages)")?;

  page.open("form", &[("method", "get"), ("action", "/feature3")])?;
  page.select(
    "region_id",
    "Region",
    "-- select region --",
    view
      .regions
      .iter()
      .map(|r| (r.region_id.to_string(), r.region_name.clone())),
    &view.selected_region,
  )?;
  page.select(
    "decade",
    "Decade",
    "-- select decade --",
    decade_options(&view.decades),
    &view.selected_decade,
  )?;
  page.element("button", &[("type", "submit")], "Show")?;
  page.close("form")?;

  if view.results.is_empty() {
    page.empty_notice("No results.")?;
    return page.finish();
  }
  page.start_table(&["Region", "Sub-Region", "Decade", "Average DADD", "Countries"])?;
  for r in &view.results {
    page.row(&[
      r.region_name.clone(),
      r.sub_region_name.clone(),
      r.decade_id.to_string(),
      r.avg_dadd.map(|v| format!("{v:.2}")).unwrap_or_else(|| "N/A".into()),
      r.country_count.to_string(),
    ])?;
  }
  page.end_table()?;
  page.finish()
}
