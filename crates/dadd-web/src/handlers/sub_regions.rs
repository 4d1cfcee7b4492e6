//! Sub-region CRUD pages. Forms carry a region dropdown sourced from the
//! region list; an empty choice stores a NULL region.

use std::sync::Arc;

use axum::{
  Form,
  extract::{Path, State},
  response::{Html, Redirect},
};
use dadd_core::{
  region::{NewSubRegion, Region, SubRegion},
  store::DaddStore,
};
use serde::Deserialize;

use crate::{error::Error, handlers::selection, html::PageWriter};

const LIST_PATH: &str = "/subregions";

#[derive(Debug, Deserialize)]
pub struct SubRegionForm {
  pub sub_region_name: String,
  #[serde(default)]
  pub region_id:       String,
}

impl From<SubRegionForm> for NewSubRegion {
  fn from(f: SubRegionForm) -> Self {
    NewSubRegion {
      sub_region_name: f.sub_region_name,
      region_id:       selection(&f.region_id),
    }
  }
}

/// `GET /subregions`
pub async fn list<S>(State(store): State<Arc<S>>) -> Result<Html<String>, Error>
where
  S: DaddStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let sub_regions = store.list_sub_regions().await.map_err(Error::store)?;

  let mut page = PageWriter::new("Sub-Region List")?;
  page.open("p", &[])?.link("/subregions/add", "Add sub-region")?.close("p")?;
  if sub_regions.is_empty() {
    page.empty_notice("No sub-regions yet.")?;
    return page.finish();
  }

  page.start_table(&["ID", "Name", "Region", ""])?;
  for s in &sub_regions {
    let id = s.sub_region_id.to_string();
    page.open("tr", &[])?;
    page.element("td", &[], &id)?;
    page.element("td", &[], &s.sub_region_name)?;
    page.element("td", &[], s.region_name.as_deref().unwrap_or(""))?;
    page.open("td", &[])?;
    page.link(&format!("/subregions/{id}/edit"), "Edit")?;
    page.post_button(&format!("/subregions/{id}/delete"), "Delete")?;
    page.close("td")?.close("tr")?;
  }
  page.end_table()?;
  page.finish()
}

/// `GET /subregions/add`
pub async fn add_form<S>(State(store): State<Arc<S>>) -> Result<Html<String>, Error>
where
  S: DaddStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let regions = store.list_regions_by_name().await.map_err(Error::store)?;
  render_form("Add Sub-Region", "/subregions/add", None, &regions)
}

/// `POST /subregions/add`
pub async fn create<S>(
  State(store): State<Arc<S>>,
  Form(form): Form<SubRegionForm>,
) -> Result<Redirect, Error>
where
  S: DaddStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let sub = store.add_sub_region(form.into()).await.map_err(Error::store)?;
  tracing::info!(sub_region_id = sub.sub_region_id, "sub-region created");
  Ok(Redirect::to(LIST_PATH))
}

/// `GET /subregions/:id/edit`
pub async fn edit_form<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
) -> Result<Html<String>, Error>
where
  S: DaddStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let (sub, regions) = tokio::try_join!(store.get_sub_region(id), store.list_regions_by_name())
    .map_err(Error::store)?;
  let sub = sub.ok_or_else(|| not_found(id))?;
  render_form("Edit Sub-Region", &format!("/subregions/{id}/edit"), Some(&sub), &regions)
}

/// `POST /subregions/:id/edit`
pub async fn update<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
  Form(form): Form<SubRegionForm>,
) -> Result<Redirect, Error>
where
  S: DaddStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  if !store.update_sub_region(id, form.into()).await.map_err(Error::store)? {
    return Err(not_found(id));
  }
  Ok(Redirect::to(LIST_PATH))
}

/// `POST /subregions/:id/delete`
pub async fn delete<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
) -> Result<Redirect, Error>
where
  S: DaddStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  if !store.delete_sub_region(id).await.map_err(Error::store)? {
    return Err(not_found(id));
  }
  tracing::info!(sub_region_id = id, "sub-region deleted");
  Ok(Redirect::to(LIST_PATH))
}

fn not_found(id: i64) -> Error {
  Error::NotFound(format!("sub-region {id} not found"))
}

fn render_form(
  title:   &str,
  action:  &str,
  current: Option<&SubRegion>,
  regions: &[Region],
) -> Result<Html<String>, Error> {
  let name     = current.map(|s| s.sub_region_name.as_str()).unwrap_or("");
  let selected = current
    .and_then(|s| s.region_id)
    .map(|id| id.to_string())
    .unwrap_or_default();

  let mut page = PageWriter::new(title)?;
  page.open("form", &[("method", "post"), ("action", action)])?;
  page.open("label", &[])?.text("Sub-region name ")?;
  page.empty("input", &[
    ("type", "text"),
    ("name", "sub_region_name"),
    ("value", name),
    ("required", "required"),
  ])?;
  page.close("label")?;
  page.select(
    "region_id",
    "Region",
    "(none)",
    regions.iter().map(|r| (r.region_id.to_string(), r.region_name.clone())),
    &selected,
  )?;
  page.element("button", &[("type", "submit")], "Save")?;
  page.close("form")?;
  page.open("p", &[])?.link(LIST_PATH, "Back to list")?.close("p")?;
  page.finish()
}
