//! HTTP layer for the DADD reporting application.
//!
//! Exposes an axum [`Router`] serving server-rendered HTML pages backed by
//! any [`DaddStore`].

pub mod error;
pub mod handlers;
pub mod html;

pub use error::Error;

use std::{path::PathBuf, sync::Arc, time::Duration};

use axum::{
  Router,
  routing::{get, post},
};
use dadd_core::store::DaddStore;
use serde::Deserialize;
use tower_http::{services::ServeDir, timeout::TimeoutLayer, trace::TraceLayer};

use handlers::{
  country_trend, home, intermediate_regions, region_decade, regions, search,
  sub_region_decade, sub_regions, summary,
};

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `dadd.toml` and `DADD_*`
/// environment variables. Missing keys take development defaults.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
  pub host:                 String,
  pub port:                 u16,
  /// SQLite database file.
  pub database:             PathBuf,
  /// Directory served under `/public`.
  pub static_dir:           PathBuf,
  pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:                 "0.0.0.0".to_string(),
      port:                 3000,
      database:             PathBuf::from("dadd.sqlite3"),
      static_dir:           PathBuf::from("public"),
      request_timeout_secs: 30,
    }
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the application [`Router`] for `store`.
pub fn router<S>(store: Arc<S>, config: &ServerConfig) -> Router
where
  S: DaddStore + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  Router::new()
    .route("/", get(home::index))
    .route("/admin", get(home::admin))
    // Regions
    .route("/regions", get(regions::list::<S>))
    .route("/regions/add", get(regions::add_form).post(regions::create::<S>))
    .route("/regions/{id}/edit", get(regions::edit_form::<S>).post(regions::update::<S>))
    .route("/regions/{id}/delete", post(regions::delete::<S>))
    // Sub-regions
    .route("/subregions", get(sub_regions::list::<S>))
    .route("/subregions/add", get(sub_regions::add_form::<S>).post(sub_regions::create::<S>))
    .route(
      "/subregions/{id}/edit",
      get(sub_regions::edit_form::<S>).post(sub_regions::update::<S>),
    )
    .route("/subregions/{id}/delete", post(sub_regions::delete::<S>))
    // Intermediate regions
    .route("/intermediate-regions", get(intermediate_regions::list::<S>))
    .route("/intermediate_regions", get(intermediate_regions::alias))
    // Reports
    .route("/feature1", get(country_trend::page::<S>))
    .route("/feature2", get(sub_region_decade::page::<S>))
    .route("/feature3", get(region_decade::page::<S>))
    .route("/feature4", get(search::page::<S>))
    .route("/feature8", get(summary::page::<S>))
    .nest_service("/public", ServeDir::new(&config.static_dir))
    .layer(TimeoutLayer::new(Duration::from_secs(config.request_timeout_secs)))
    .layer(TraceLayer::new_for_http())
    .with_state(store)
}
