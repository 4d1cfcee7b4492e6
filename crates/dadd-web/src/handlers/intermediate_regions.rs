//! Read-only intermediate region list.

use std::sync::Arc;

use axum::{
  extract::State,
  response::{Html, Redirect},
};
use dadd_core::store::DaddStore;

use crate::{error::Error, html::PageWriter};

/// `GET /intermediate-regions`
pub async fn list<S>(State(store): State<Arc<S>>) -> Result<Html<String>, Error>
where
  S: DaddStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let rows = store.list_intermediate_regions().await.map_err(Error::store)?;

  let mut page = PageWriter::new("Intermediate Region List")?;
  if rows.is_empty() {
    page.empty_notice("No intermediate regions.")?;
    return page.finish();
  }
  page.start_table(&["ID", "Name", "Sub-Region"])?;
  for r in &rows {
    page.row(&[
      r.intermediate_region_id.to_string(),
      r.intermediate_region_name.clone().unwrap_or_default(),
      r.sub_region_name.clone().unwrap_or_default(),
    ])?;
  }
  page.end_table()?;
  page.finish()
}

/// `GET /intermediate_regions`: alias kept for old links.
pub async fn alias() -> Redirect {
  Redirect::to("/intermediate-regions")
}
