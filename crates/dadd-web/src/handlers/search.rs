//! `GET /feature4?q=`: countries with their latest-decade value.
//!
//! Without `q` the first [`DEFAULT_SEARCH_LIMIT`] countries by name are
//! shown; with `q` every case-insensitive substring match is.

use std::sync::Arc;

use axum::{
  extract::{Query, State},
  response::Html,
};
use dadd_core::{
  record::LatestValue,
  store::{DEFAULT_SEARCH_LIMIT, DaddStore},
};
use serde::Deserialize;

use crate::{error::Error, handlers::show_value, html::PageWriter};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Params {
  pub q: String,
}

pub struct View {
  pub query:        String,
  pub show_default: bool,
  pub results:      Vec<LatestValue>,
}

pub async fn page<S>(
  State(store): State<Arc<S>>,
  Query(params): Query<Params>,
) -> Result<Html<String>, Error>
where
  S: DaddStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let query = params.q.trim().to_owned();
  let text  = (!query.is_empty()).then_some(query.as_str());

  let results = store.search_latest(text).await.map_err(Error::store)?;

  render(&View { show_default: text.is_none(), query, results })
}

fn render(view: &View) -> Result<Html<String>, Error> {
  let mut page = PageWriter::new("Search Country (Latest Decade)")?;

  page.open("form", &[("method", "get"), ("action", "/feature4")])?;
  page.open("label", &[])?.text("Country name ")?;
  page.empty("input", &[("type", "search"), ("name", "q"), ("value", view.query.as_str())])?;
  page.close("label")?;
  page.element("button", &[("type", "submit")], "Search")?;
  page.close("form")?;

  if view.show_default {
    page.element(
      "p",
      &[("class", "hint")],
      &format!("Showing the first {DEFAULT_SEARCH_LIMIT} countries by name."),
    )?;
  }

  if view.results.is_empty() {
    page.empty_notice("No results.")?;
    return page.finish();
  }
  page.start_table(&["ID", "Country", "Latest Decade", "DADD"])?;
  for r in &view.results {
    page.row(&[
      r.country_id.to_string(),
      r.country_name.clone(),
      r.decade.to_string(),
      show_value(r.dadd_value),
    ])?;
  }
  page.end_table()?;
  page.finish()
}
