//! `GET /feature8?summary_decade=&trend_country_id=`: decade summary and a
//! country trend with relative bars, each shown once its selection is made.

use std::sync::Arc;

use axum::{
  extract::{Query, State},
  response::Html,
};
use dadd_core::{
  record::{DecadeSummary, TrendOrder},
  region::Country,
  store::DaddStore,
  trend::{TrendBar, relative_bars},
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
  pub summary_decade:   String,
  pub trend_country_id: String,
}

pub struct View {
  pub decades:          Vec<i64>,
  pub countries:        Vec<Country>,
  pub summary_decade:   String,
  pub summary:          Option<DecadeSummary>,
  pub trend_country_id: String,
  pub trend:            Vec<TrendBar>,
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
    summary_decade = %params.summary_decade,
    trend_country_id = %params.trend_country_id,
    "decade summary"
  );

  let summary_decade = selection(&params.summary_decade);
  let trend_country  = selection(&params.trend_country_id);
  let store          = &*store;

  let (decades, countries, summary, series) = tokio::try_join!(
    store.list_decades(),
    store.list_countries(),
    async {
      match summary_decade {
        Some(d) => store.decade_summary(d).await.map(Some),
        None    => Ok(None),
      }
    },
    async {
      match trend_country {
        Some(c) => store.country_trend(c, TrendOrder::Ascending).await,
        None    => Ok(Vec::new()),
      }
    },
  )
  .map_err(Error::store)?;

  render(&View {
    decades,
    countries,
    summary_decade: params.summary_decade,
    summary,
    trend_country_id: params.trend_country_id,
    trend: relative_bars(&series),
  })
}

fn render(view: &View) -> Result<Html<String>, Error> {
  let mut page = PageWriter::new("Decade Summary & Country Trend")?;

  // ── Part A: summary ──
  page.element("h2", &[], "Decade summary")?;
  page.open("form", &[("method", "get"), ("action", "/feature8")])?;
  page.select(
    "summary_decade",
    "Decade",
    "-- select decade --",
    decade_options(&view.decades),
    &view.summary_decade,
  )?;
  page.empty("input", &[
    ("type", "hidden"),
    ("name", "trend_country_id"),
    ("value", view.trend_country_id.as_str()),
  ])?;
  page.element("button", &[("type", "submit")], "Show")?;
  page.close("form")?;

  match &view.summary {
    None => {
      page.empty_notice("No decade selected.")?;
    }
    Some(s) => {
      page.open("dl", &[("class", "summary")])?;
      page.element("dt", &[], "Records")?;
      page.element("dd", &[], &s.total_countries.to_string())?;
      page.element("dt", &[], "Average DADD")?;
      page.element("dd", &[], &show_value(s.avg_dadd))?;
      page.element("dt", &[], "Highest")?;
      page.element("dd", &[("class", "top")], &extreme(s.top.as_ref()))?;
      page.element("dt", &[], "Lowest")?;
      page.element("dd", &[("class", "bottom")], &extreme(s.bottom.as_ref()))?;
      page.close("dl")?;
    }
  }

  // ── Part B: trend ──
  page.element("h2", &[], "Country trend")?;
  page.open("form", &[("method", "get"), ("action", "/feature8")])?;
  page.empty("input", &[
    ("type", "hidden"),
    ("name", "summary_decade"),
    ("value", view.summary_decade.as_str()),
  ])?;
  page.select(
    "trend_country_id",
    "Country",
    "-- select country --",
    view
      .countries
      .iter()
      .map(|c| (c.country_id.to_string(), c.country_name.clone())),
    &view.trend_country_id,
  )?;
  page.element("button", &[("type", "submit")], "Show")?;
  page.close("form")?;

  if view.trend.is_empty() {
    page.empty_notice("No results.")?;
    return page.finish();
  }

  let data = serde_json::to_string(&view.trend).map_err(|e| Error::Render(e.to_string()))?;
  page.open("div", &[("id", "trend-chart"), ("data-trend", data.as_str())])?;
  page.start_table(&["Decade", "DADD", ""])?;
  for bar in &view.trend {
    let width = format!("width: {}%", bar.bar_width);
    page.open("tr", &[])?;
    page.element("td", &[], &bar.decade_id.to_string())?;
    page.element("td", &[], &show_value(bar.dadd_value))?;
    page.open("td", &[])?;
    page.element("div", &[("class", "bar"), ("style", width.as_str())], "")?;
    page.close("td")?.close("tr")?;
  }
  page.end_table()?;
  page.close("div")?;
  page.finish()
}

fn extreme(value: Option<&dadd_core::record::CountryValue>) -> String {
  match value {
    Some(c) => format!("{} ({})", c.country_name, c.dadd_value),
    None    => "N/A".to_string(),
  }
}
