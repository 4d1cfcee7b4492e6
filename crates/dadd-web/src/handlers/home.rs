//! Static landing pages.

use axum::response::Html;

use crate::{error::Error, html::PageWriter};

/// `GET /`
pub async fn index() -> Result<Html<String>, Error> {
  let mut page = PageWriter::new("DADD Final Exam")?;
  page.element("p", &[], "Reports over DADD values by country and decade.")?;
  page.open("ul", &[])?;
  for (href, label) in [
    ("/feature1", "Country DADD by decade"),
    ("/feature2", "Countries of a sub-region in a decade"),
    ("/feature3", "Sub-region averages for a region and decade"),
    ("/feature4", "Search countries (latest decade)"),
    ("/feature8", "Decade summary and country trend"),
  ] {
    page.open("li", &[])?.link(href, label)?.close("li")?;
  }
  page.close("ul")?;
  page.finish()
}

/// `GET /admin`
pub async fn admin() -> Result<Html<String>, Error> {
  let mut page = PageWriter::new("Admin Panel")?;
  page.open("ul", &[])?;
  for (href, label) in [
    ("/regions", "Manage regions"),
    ("/subregions", "Manage sub-regions"),
    ("/intermediate-regions", "Intermediate regions"),
  ] {
    page.open("li", &[])?.link(href, label)?.close("li")?;
  }
  page.close("ul")?;
  page.finish()
}
