//! `GET /feature2?sub_region_id=&decade=`: countries of a sub-region with
//! their value in one decade, lowest first.

use std::sync::Arc;

use axum::{
  extract::{Query, State},
  response::Html,
};
use dadd_core::{
  record::SubRegionDecadeRow,
  region::SubRegion,
  store::DaddStore,
};
use serde::Deserialize;

use crate::{
  error::Error,
  handlers::{decade_options, selection, show_value},
  html::PageWriter,
};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Params {
  pub sub_region_id: String,
  pub decade:        String,
}

pub struct View {
  pub sub_regions:         Vec<SubRegion>,
  pub decades:             Vec<i64>,
  pub selected_sub_region: String,
  pub selected_decade:     String,
  pub results:             Vec<SubRegionDecadeRow>,
}

pub async fn page<S>(
  State(store): State<Arc<S>>,
  Query(params): Query<Params>,
) -> Result<Html<String>, Error>
where
  S: DaddStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  tracing::debug!(
    sub_region_id = %params.sub_region_id,
    decade = %params.decade,
    "sub-region decade listing"
  );

  let (sub_regions, decades) =
    tokio::try_join!(store.list_sub_regions_by_name(), store.list_decades())
      .map_err(Error::store)?;

  let results = match (selection(&params.sub_region_id), selection(&params.decade)) {
    (Some(sub), Some(decade)) => store
      .sub_region_decade(sub, decade)
      .await
      .map_err(Error::store)?,
    _ => Vec::new(),
  };

  render(&View {
    sub_regions,
    decades,
    selected_sub_region: params.sub_region_id,
    selected_decade: params.decade,
    results,
  })
}

fn render(view: &View) -> Result<Html<String>, Error> {
  let mut page = PageWriter::new("Sub-Region & Decade")?;

  page.open("form", &[("method", "get"), ("action", "/feature2")])?;
  page.select(
    "sub_region_id",
    "Sub-region",
    "-- select sub-region --",
    view
      .sub_regions
      .iter()
      .map(|s| (s.sub_region_id.to_string(), s.sub_region_name.clone())),
    &view.selected_sub_region,
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
  page.start_table(&["Country", "Sub-Region", "Decade", "DADD"])?;
  for r in &view.results {
    page.row(&[
      r.country_name.clone(),
      r.sub_region_name.clone(),
      r.decade_id.to_string(),
      show_value(r.dadd_value),
    ])?;
  }
  page.end_table()?;
  page.finish()
}
