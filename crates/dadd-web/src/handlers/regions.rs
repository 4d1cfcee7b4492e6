//! Region CRUD pages.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/regions` | Ordered by id |
//! | `GET`  | `/regions/add` | Empty form |
//! | `POST` | `/regions/add` | Form: `region_name`; redirects to the list |
//! | `GET`  | `/regions/:id/edit` | 404 if not found |
//! | `POST` | `/regions/:id/edit` | Form: `region_name`; 404 if not found |
//! | `POST` | `/regions/:id/delete` | 404 if not found |

use std::sync::Arc;

use axum::{
  Form,
  extract::{Path, State},
  response::{Html, Redirect},
};
use dadd_core::{
  region::{NewRegion, Region},
  store::DaddStore,
};
use serde::Deserialize;

use crate::{error::Error, html::PageWriter};

const LIST_PATH: &str = "/regions";

#[derive(Debug, Deserialize)]
pub struct RegionForm {
  pub region_name: String,
}

impl From<RegionForm> for NewRegion {
  fn from(f: RegionForm) -> Self {
    NewRegion { region_name: f.region_name }
  }
}

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /regions`
pub async fn list<S>(State(store): State<Arc<S>>) -> Result<Html<String>, Error>
where
  S: DaddStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let regions = store.list_regions().await.map_err(Error::store)?;
  render_list(&regions)
}

fn render_list(regions: &[Region]) -> Result<Html<String>, Error> {
  let mut page = PageWriter::new("Region List")?;
  page.open("p", &[])?.link("/regions/add", "Add region")?.close("p")?;

  if regions.is_empty() {
    page.empty_notice("No regions yet.")?;
    return page.finish();
  }

  page.start_table(&["ID", "Name", ""])?;
  for r in regions {
    let id = r.region_id.to_string();
    page.open("tr", &[])?;
    page.element("td", &[], &id)?;
    page.element("td", &[], &r.region_name)?;
    page.open("td", &[])?;
    page.link(&format!("/regions/{id}/edit"), "Edit")?;
    page.post_button(&format!("/regions/{id}/delete"), "Delete")?;
    page.close("td")?.close("tr")?;
  }
  page.end_table()?;
  page.finish()
}

// ─── Add ──────────────────────────────────────────────────────────────────────

/// `GET /regions/add`
pub async fn add_form() -> Result<Html<String>, Error> {
  render_form("Add Region", "/regions/add", "")
}

/// `POST /regions/add`
pub async fn create<S>(
  State(store): State<Arc<S>>,
  Form(form): Form<RegionForm>,
) -> Result<Redirect, Error>
where
  S: DaddStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let region = store.add_region(form.into()).await.map_err(Error::store)?;
  tracing::info!(region_id = region.region_id, "region created");
  Ok(Redirect::to(LIST_PATH))
}

// ─── Edit ─────────────────────────────────────────────────────────────────────

/// `GET /regions/:id/edit`
pub async fn edit_form<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
) -> Result<Html<String>, Error>
where
  S: DaddStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let region = store
    .get_region(id)
    .await
    .map_err(Error::store)?
    .ok_or_else(|| not_found(id))?;
  render_form("Edit Region", &format!("/regions/{id}/edit"), &region.region_name)
}

/// `POST /regions/:id/edit`
pub async fn update<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
  Form(form): Form<RegionForm>,
) -> Result<Redirect, Error>
where
  S: DaddStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  if !store.update_region(id, form.into()).await.map_err(Error::store)? {
    return Err(not_found(id));
  }
  Ok(Redirect::to(LIST_PATH))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `POST /regions/:id/delete`
pub async fn delete<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
) -> Result<Redirect, Error>
where
  S: DaddStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  if !store.delete_region(id).await.map_err(Error::store)? {
    return Err(not_found(id));
  }
  tracing::info!(region_id = id, "region deleted");
  Ok(Redirect::to(LIST_PATH))
}

fn not_found(id: i64) -> Error {
  Error::NotFound(format!("region {id} not found"))
}

fn render_form(title: &str, action: &str, name: &str) -> Result<Html<String>, Error> {
  let mut page = PageWriter::new(title)?;
  page.open("form", &[("method", "post"), ("action", action)])?;
  page.open("label", &[])?.text("Region name ")?;
  page.empty("input", &[
    ("type", "text"),
    ("name", "region_name"),
    ("value", name),
    ("required", "required"),
  ])?;
  page.close("label")?;
  page.element("button", &[("type", "submit")], "Save")?;
  page.close("form")?;
  page.open("p", &[])?.link(LIST_PATH, "Back to list")?.close("p")?;
  page.finish()
}
