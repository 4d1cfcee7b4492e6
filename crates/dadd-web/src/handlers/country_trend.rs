//! `GET /feature1?country_id=`: every decade recorded for one country,
//! newest first.

use std::sync::Arc;

use axum::{
  extract::{Query, State},
  response::Html,
};
use dadd_core::{
  record::{DecadeValue, TrendOrder},
  region::Country,
  store::DaddStore,
};
use serde::Deserialize;

use crate::{
  error::Error,
  handlers::{selection, show_value},
  html::PageWriter,
};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Params {
  pub country_id: String,
}

pub struct View {
  pub countries:        Vec<Country>,
  pub selected_country: String,
  pub results:          Vec<DecadeValue>,
}

pub async fn page<S>(
  State(store): State<Arc<S>>,
  Query(params): Query<Params>,
) -> Result<Html<String>, Error>
where
  S: DaddStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  tracing::debug!(country_id = %params.country_id, "country trend");

  let countries = store.list_countries().await.map_err(Error::store)?;
  let results = match selection(&params.country_id) {
    Some(id) => store
      .country_trend(id, TrendOrder::Descending)
      .await
      .map_err(Error::store)?,
    None => Vec::new(),
  };

  render(&View { countries, selected_country: params.country_id, results })
}

fn render(view: &View) -> Result<Html<String>, Error> {
  let mut page = PageWriter::new("Country DADD by Decade")?;

  page.open("form", &[("method", "get"), ("action", "/feature1")])?;
  page.select(
    "country_id",
    "Country",
    "-- select country --",
    view
      .countries
      .iter()
      .map(|c| (c.country_id.to_string(), c.country_name.clone())),
    &view.selected_country,
  )?;
  page.element("button", &[("type", "submit")], "Show")?;
  page.close("form")?;

  if view.results.is_empty() {
    page.empty_notice("No results.")?;
    return page.finish();
  }
  page.start_table(&["Decade", "DADD"])?;
  for r in &view.results {
    page.row(&[r.decade_id.to_string(), show_value(r.dadd_value)])?;
  }
  page.end_table()?;
  page.finish()
}
