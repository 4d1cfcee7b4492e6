//! [`SqliteStore`]: the SQLite implementation of [`DaddStore`].

use std::path::Path;

use dadd_core::{
  record::{DecadeSummary, DecadeValue, LatestValue, SubRegionAverage, SubRegionDecadeRow, TrendOrder},
  region::{Country, IntermediateRegion, NewRegion, NewSubRegion, Region, SubRegion},
  store::{DEFAULT_SEARCH_LIMIT, DaddStore},
};

use crate::{
  Error, Result, collate, decode,
  gateway::{Gateway, Query},
  schema::SCHEMA,
};

// ─── SQL ─────────────────────────────────────────────────────────────────────

const LIST_REGIONS: &str =
  "SELECT region_id, region_name FROM REGION ORDER BY region_id";
const LIST_REGIONS_BY_NAME: &str =
  "SELECT region_id, region_name FROM REGION ORDER BY region_name COLLATE NAME_CI, region_id";
const GET_REGION: &str =
  "SELECT region_id, region_name FROM REGION WHERE region_id = ?1";
const INSERT_REGION: &str = "INSERT INTO REGION (region_name) VALUES (?1)";
const UPDATE_REGION: &str =
  "UPDATE REGION SET region_name = ?1 WHERE region_id = ?2";
const DELETE_REGION: &str = "DELETE FROM REGION WHERE region_id = ?1";

const LIST_SUB_REGIONS: &str = "
  SELECT s.sub_region_id, s.sub_region_name, s.region_id, r.region_name
  FROM SUB_REGION s
  LEFT JOIN REGION r ON s.region_id = r.region_id
  ORDER BY s.sub_region_id";
const LIST_SUB_REGIONS_BY_NAME: &str = "
  SELECT s.sub_region_id, s.sub_region_name, s.region_id, r.region_name
  FROM SUB_REGION s
  LEFT JOIN REGION r ON s.region_id = r.region_id
  ORDER BY s.sub_region_name COLLATE NAME_CI, s.sub_region_id";
const GET_SUB_REGION: &str = "
  SELECT s.sub_region_id, s.sub_region_name, s.region_id, r.region_name
  FROM SUB_REGION s
  LEFT JOIN REGION r ON s.region_id = r.region_id
  WHERE s.sub_region_id = ?1";
const INSERT_SUB_REGION: &str =
  "INSERT INTO SUB_REGION (sub_region_name, region_id) VALUES (?1, ?2)";
const UPDATE_SUB_REGION: &str =
  "UPDATE SUB_REGION SET sub_region_name = ?1, region_id = ?2 WHERE sub_region_id = ?3";
const DELETE_SUB_REGION: &str = "DELETE FROM SUB_REGION WHERE sub_region_id = ?1";

const LIST_INTERMEDIATE_REGIONS: &str = "
  SELECT i.intermediate_region_id, i.intermediate_region_name,
         i.sub_region_id, s.sub_region_name
  FROM INTERMEDIATE_REGION i
  LEFT JOIN SUB_REGION s ON i.sub_region_id = s.sub_region_id
  ORDER BY i.intermediate_region_id";

const LIST_COUNTRIES: &str =
  "SELECT country_id, country_name FROM COUNTRY ORDER BY country_name COLLATE NAME_CI, country_id";
const LIST_DECADES: &str =
  "SELECT DISTINCT decade_id FROM DADD_RECORD ORDER BY decade_id";

const TREND_ASC: &str = "
  SELECT decade_id, dadd_value FROM DADD_RECORD
  WHERE country_id = ?1
  ORDER BY decade_id ASC";
const TREND_DESC: &str = "
  SELECT decade_id, dadd_value FROM DADD_RECORD
  WHERE country_id = ?1
  ORDER BY decade_id DESC";

const SUB_REGION_DECADE: &str = "
  SELECT c.country_name, s.sub_region_name, d.decade_id, d.dadd_value
  FROM DADD_RECORD d
  JOIN COUNTRY c             ON d.country_id = c.country_id
  JOIN INTERMEDIATE_REGION i ON c.intermediate_region_id = i.intermediate_region_id
  JOIN SUB_REGION s          ON i.sub_region_id = s.sub_region_id
  WHERE s.sub_region_id = ?1
    AND d.decade_id = ?2
  ORDER BY (d.dadd_value IS NULL), d.dadd_value ASC, c.country_name COLLATE NAME_CI ASC";

const REGION_DECADE_AVERAGES: &str = "
  SELECT
    r.region_name,
    s.sub_region_id,
    s.sub_region_name,
    d.decade_id,
    AVG(d.dadd_value) AS avg_dadd,
    COUNT(DISTINCT CASE WHEN d.dadd_value IS NOT NULL THEN c.country_id END)
      AS country_count
  FROM REGION r
  JOIN SUB_REGION s          ON s.region_id = r.region_id
  JOIN INTERMEDIATE_REGION i ON i.sub_region_id = s.sub_region_id
  JOIN COUNTRY c             ON c.intermediate_region_id = i.intermediate_region_id
  JOIN DADD_RECORD d         ON d.country_id = c.country_id
  WHERE r.region_id = ?1
    AND d.decade_id = ?2
  GROUP BY r.region_name, s.sub_region_id, s.sub_region_name, d.decade_id
  ORDER BY r.region_name COLLATE NAME_CI ASC,
           (AVG(d.dadd_value) IS NULL),
           AVG(d.dadd_value) ASC,
           s.sub_region_name COLLATE NAME_CI ASC";

const SEARCH_LATEST_DEFAULT: &str = "
  SELECT c.country_id, c.country_name, latest.latest_decade_id AS decade, d.dadd_value
  FROM COUNTRY c
  JOIN (
    SELECT country_id, MAX(decade_id) AS latest_decade_id
    FROM DADD_RECORD
    GROUP BY country_id
  ) AS latest ON c.country_id = latest.country_id
  JOIN DADD_RECORD d
    ON d.country_id = latest.country_id
   AND d.decade_id  = latest.latest_decade_id
  ORDER BY c.country_name COLLATE NAME_CI, c.country_id
  LIMIT ?1";
const SEARCH_LATEST_MATCHING: &str = r"
  SELECT c.country_id, c.country_name, latest.latest_decade_id AS decade, d.dadd_value
  FROM COUNTRY c
  JOIN (
    SELECT country_id, MAX(decade_id) AS latest_decade_id
    FROM DADD_RECORD
    GROUP BY country_id
  ) AS latest ON c.country_id = latest.country_id
  JOIN DADD_RECORD d
    ON d.country_id = latest.country_id
   AND d.decade_id  = latest.latest_decade_id
  WHERE name_fold(c.country_name) LIKE '%' || ?1 || '%' ESCAPE '\'
  ORDER BY c.country_name COLLATE NAME_CI, c.country_id";

const SUMMARY_TOTALS: &str = "
  SELECT COUNT(*) AS total_countries, ROUND(AVG(dadd_value), 2) AS avg_dadd
  FROM DADD_RECORD
  WHERE decade_id = ?1";
const SUMMARY_TOP: &str = "
  SELECT c.country_name, d.dadd_value
  FROM DADD_RECORD d
  JOIN COUNTRY c ON d.country_id = c.country_id
  WHERE d.decade_id = ?1 AND d.dadd_value IS NOT NULL
  ORDER BY d.dadd_value DESC, c.country_name COLLATE NAME_CI ASC, c.country_id ASC
  LIMIT 1";
const SUMMARY_BOTTOM: &str = "
  SELECT c.country_name, d.dadd_value
  FROM DADD_RECORD d
  JOIN COUNTRY c ON d.country_id = c.country_id
  WHERE d.decade_id = ?1 AND d.dadd_value IS NOT NULL
  ORDER BY d.dadd_value ASC, c.country_name COLLATE NAME_CI ASC, c.country_id ASC
  LIMIT 1";

// ─── Store ───────────────────────────────────────────────────────────────────

/// A DADD store backed by a single SQLite file.
///
/// Cloning is cheap: the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  gateway: Gateway,
}

impl SqliteStore {
  /// Open the database at `path` without touching the schema.
  ///
  /// Pair with [`init_schema`](Self::init_schema); kept separate so a caller
  /// can keep serving when initialisation fails.
  pub async fn connect(path: impl AsRef<Path>) -> Result<Self> {
    Ok(Self { gateway: Gateway::open(path).await? })
  }

  /// A store that opens `path` and initialises the schema on first use.
  ///
  /// Every call retries the open until one succeeds, failing with
  /// [`Error::Database`] in the meantime. Used when the database is
  /// unreachable at startup so the server can still come up.
  pub fn deferred(path: impl AsRef<Path>) -> Self {
    Self { gateway: Gateway::deferred(path, SCHEMA) }
  }

  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let store = Self::connect(path).await?;
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, mainly for tests.
  pub async fn open_in_memory() -> Result<Self> {
    let store = Self { gateway: Gateway::open_in_memory().await? };
    store.init_schema().await?;
    Ok(store)
  }

  pub async fn init_schema(&self) -> Result<()> {
    self.gateway.execute_batch(SCHEMA.to_owned()).await
  }

  /// Run a trusted SQL script, e.g. country and `DADD_RECORD` fixtures.
  pub async fn execute_script(&self, script: impl Into<String>) -> Result<()> {
    self.gateway.execute_batch(script.into()).await
  }

  /// Read a SQL script from disk and run it with
  /// [`execute_script`](Self::execute_script).
  pub async fn import_file(&self, path: impl AsRef<Path>) -> Result<()> {
    let script = tokio::fs::read_to_string(path).await.map_err(Error::Io)?;
    self.execute_script(script).await
  }
}

// ─── DaddStore impl ──────────────────────────────────────────────────────────

impl DaddStore for SqliteStore {
  type Error = Error;

  // ── Regions ───────────────────────────────────────────────────────────────

  async fn list_regions(&self) -> Result<Vec<Region>> {
    self.gateway.fetch(Query::new(LIST_REGIONS), decode::region).await
  }

  async fn list_regions_by_name(&self) -> Result<Vec<Region>> {
    self.gateway.fetch(Query::new(LIST_REGIONS_BY_NAME), decode::region).await
  }

  async fn get_region(&self, id: i64) -> Result<Option<Region>> {
    self
      .gateway
      .fetch_optional(Query::new(GET_REGION).bind(id), decode::region)
      .await
  }

  async fn add_region(&self, input: NewRegion) -> Result<Region> {
    let region_id = self
      .gateway
      .insert(Query::new(INSERT_REGION).bind(input.region_name.clone()))
      .await?;
    Ok(Region { region_id, region_name: input.region_name })
  }

  async fn update_region(&self, id: i64, input: NewRegion) -> Result<bool> {
    let changed = self
      .gateway
      .execute(Query::new(UPDATE_REGION).bind(input.region_name).bind(id))
      .await?;
    Ok(changed > 0)
  }

  async fn delete_region(&self, id: i64) -> Result<bool> {
    let changed = self.gateway.execute(Query::new(DELETE_REGION).bind(id)).await?;
    Ok(changed > 0)
  }

  // ── Sub-regions ───────────────────────────────────────────────────────────

  async fn list_sub_regions(&self) -> Result<Vec<SubRegion>> {
    self.gateway.fetch(Query::new(LIST_SUB_REGIONS), decode::sub_region).await
  }

  async fn list_sub_regions_by_name(&self) -> Result<Vec<SubRegion>> {
    self
      .gateway
      .fetch(Query::new(LIST_SUB_REGIONS_BY_NAME), decode::sub_region)
      .await
  }

  async fn get_sub_region(&self, id: i64) -> Result<Option<SubRegion>> {
    self
      .gateway
      .fetch_optional(Query::new(GET_SUB_REGION).bind(id), decode::sub_region)
      .await
  }

  async fn add_sub_region(&self, input: NewSubRegion) -> Result<SubRegion> {
    let sub_region_id = self
      .gateway
      .insert(
        Query::new(INSERT_SUB_REGION)
          .bind(input.sub_region_name.clone())
          .bind(input.region_id),
      )
      .await?;
    Ok(SubRegion {
      sub_region_id,
      sub_region_name: input.sub_region_name,
      region_id: input.region_id,
      region_name: None,
    })
  }

  async fn update_sub_region(&self, id: i64, input: NewSubRegion) -> Result<bool> {
    let changed = self
      .gateway
      .execute(
        Query::new(UPDATE_SUB_REGION)
          .bind(input.sub_region_name)
          .bind(input.region_id)
          .bind(id),
      )
      .await?;
    Ok(changed > 0)
  }

  async fn delete_sub_region(&self, id: i64) -> Result<bool> {
    let changed = self
      .gateway
      .execute(Query::new(DELETE_SUB_REGION).bind(id))
      .await?;
    Ok(changed > 0)
  }

  // ── Read-only reference data ──────────────────────────────────────────────

  async fn list_intermediate_regions(&self) -> Result<Vec<IntermediateRegion>> {
    self
      .gateway
      .fetch(Query::new(LIST_INTERMEDIATE_REGIONS), decode::intermediate_region)
      .await
  }

  async fn list_countries(&self) -> Result<Vec<Country>> {
    self.gateway.fetch(Query::new(LIST_COUNTRIES), decode::country).await
  }

  async fn list_decades(&self) -> Result<Vec<i64>> {
    self.gateway.fetch(Query::new(LIST_DECADES), decode::decade).await
  }

  // ── Reports ───────────────────────────────────────────────────────────────

  async fn country_trend(&self, country_id: i64, order: TrendOrder) -> Result<Vec<DecadeValue>> {
    let sql = match order {
      TrendOrder::Ascending  => TREND_ASC,
      TrendOrder::Descending => TREND_DESC,
    };
    self
      .gateway
      .fetch(Query::new(sql).bind(country_id), decode::decade_value)
      .await
  }

  async fn sub_region_decade(
    &self,
    sub_region_id: i64,
    decade:        i64,
  ) -> Result<Vec<SubRegionDecadeRow>> {
    self
      .gateway
      .fetch(
        Query::new(SUB_REGION_DECADE).bind(sub_region_id).bind(decade),
        decode::sub_region_decade_row,
      )
      .await
  }

  async fn region_decade_averages(
    &self,
    region_id: i64,
    decade:    i64,
  ) -> Result<Vec<SubRegionAverage>> {
    self
      .gateway
      .fetch(
        Query::new(REGION_DECADE_AVERAGES).bind(region_id).bind(decade),
        decode::sub_region_average,
      )
      .await
  }

  async fn search_latest(&self, text: Option<&str>) -> Result<Vec<LatestValue>> {
    let query = match text.map(str::trim).filter(|t| !t.is_empty()) {
      Some(t) => Query::new(SEARCH_LATEST_MATCHING).bind(decode::like_escape(&collate::fold(t))),
      None    => Query::new(SEARCH_LATEST_DEFAULT).bind(DEFAULT_SEARCH_LIMIT),
    };
    self.gateway.fetch(query, decode::latest_value).await
  }

  async fn decade_summary(&self, decade: i64) -> Result<DecadeSummary> {
    let (total_countries, avg_dadd) = self
      .gateway
      .fetch_optional(Query::new(SUMMARY_TOTALS).bind(decade), decode::summary_totals)
      .await?
      .unwrap_or((0, None));

    let top = self
      .gateway
      .fetch_optional(Query::new(SUMMARY_TOP).bind(decade), decode::country_value)
      .await?;
    let bottom = self
      .gateway
      .fetch_optional(Query::new(SUMMARY_BOTTOM).bind(decade), decode::country_value)
      .await?;

    Ok(DecadeSummary { total_countries, avg_dadd, top, bottom })
  }
}
