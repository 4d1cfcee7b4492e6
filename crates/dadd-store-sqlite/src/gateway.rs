//! The query gateway: the only path from [`SqliteStore`](crate::SqliteStore)
//! to the connection.
//!
//! A [`Query`] carries `'static` SQL text and an ordered list of bind values,
//! so request data can only ever reach SQLite as a bound parameter.

use std::{path::Path, sync::Arc};

use rusqlite::{Row, params_from_iter, types::Value};
use tokio::sync::OnceCell;
use tokio_rusqlite::Connection;

use crate::{Result, collate};

/// A parameterised statement.
#[derive(Debug, Clone)]
pub(crate) struct Query {
  sql:    &'static str,
  params: Vec<Value>,
}

impl Query {
  pub fn new(sql: &'static str) -> Self {
    Self { sql, params: Vec::new() }
  }

  /// Append the value for the next positional placeholder.
  pub fn bind(mut self, value: impl Into<Value>) -> Self {
    self.params.push(value.into());
    self
  }
}

/// Executes [`Query`] values against a single shared connection.
///
/// Cloning is cheap: the inner connection is reference-counted, and
/// `tokio_rusqlite` serialises calls, so overlapping requests are safe.
///
/// A deferred gateway opens its connection on first use. Until that
/// succeeds every call retries the open and fails with its error.
#[derive(Clone)]
pub(crate) struct Gateway {
  conn:  Arc<OnceCell<Connection>>,
  path:  Arc<Path>,
  setup: Option<&'static str>,
}

async fn connect(path: &Path) -> Result<Connection> {
  let conn = Connection::open(path).await?;
  conn.call(|conn| Ok(collate::register(conn)?)).await?;
  Ok(conn)
}

impl Gateway {
  fn ready(conn: Connection, path: &Path) -> Self {
    Self {
      conn:  Arc::new(OnceCell::new_with(Some(conn))),
      path:  path.into(),
      setup: None,
    }
  }

  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    Ok(Self::ready(connect(path).await?, path))
  }

  pub async fn open_in_memory() -> Result<Self> {
    let conn = Connection::open_in_memory().await?;
    conn.call(|conn| Ok(collate::register(conn)?)).await?;
    Ok(Self::ready(conn, Path::new(":memory:")))
  }

  /// A gateway that opens `path` and runs `setup` on first use.
  pub fn deferred(path: impl AsRef<Path>, setup: &'static str) -> Self {
    Self {
      conn:  Arc::new(OnceCell::new()),
      path:  path.as_ref().into(),
      setup: Some(setup),
    }
  }

  async fn connection(&self) -> Result<&Connection> {
    self
      .conn
      .get_or_try_init(|| async {
        let conn = connect(&self.path).await?;
        if let Some(setup) = self.setup {
          conn
            .call(move |conn| {
              conn.execute_batch(setup)?;
              Ok(())
            })
            .await?;
        }
        tracing::info!(path = ?self.path, "database connection established");
        Ok::<_, crate::Error>(conn)
      })
      .await
  }

  /// Run `query` and map every row with `map`.
  pub async fn fetch<T, F>(&self, query: Query, map: F) -> Result<Vec<T>>
  where
    T: Send + 'static,
    F: FnMut(&Row<'_>) -> rusqlite::Result<T> + Send + 'static,
  {
    tracing::debug!(sql = query.sql, binds = query.params.len(), "fetch");
    let rows = self
      .connection()
      .await?
      .call(move |conn| {
        let mut stmt = conn.prepare_cached(query.sql)?;
        let rows = stmt
          .query_map(params_from_iter(query.params.iter()), map)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(rows)
  }

  /// Run `query` and map the first row, if any.
  pub async fn fetch_optional<T, F>(&self, query: Query, map: F) -> Result<Option<T>>
  where
    T: Send + 'static,
    F: FnMut(&Row<'_>) -> rusqlite::Result<T> + Send + 'static,
  {
    Ok(self.fetch(query, map).await?.into_iter().next())
  }

  /// Run a statement and return the number of affected rows.
  pub async fn execute(&self, query: Query) -> Result<usize> {
    tracing::debug!(sql = query.sql, binds = query.params.len(), "execute");
    let changed = self
      .connection()
      .await?
      .call(move |conn| {
        let mut stmt = conn.prepare_cached(query.sql)?;
        Ok(stmt.execute(params_from_iter(query.params.iter()))?)
      })
      .await?;
    Ok(changed)
  }

  /// Run an `INSERT` and return the new row's id.
  pub async fn insert(&self, query: Query) -> Result<i64> {
    tracing::debug!(sql = query.sql, binds = query.params.len(), "insert");
    let id = self
      .connection()
      .await?
      .call(move |conn| {
        let mut stmt = conn.prepare_cached(query.sql)?;
        stmt.execute(params_from_iter(query.params.iter()))?;
        Ok(conn.last_insert_rowid())
      })
      .await?;
    Ok(id)
  }

  /// Run a trusted multi-statement script (schema, fixture imports).
  pub async fn execute_batch(&self, script: String) -> Result<()> {
    self
      .connection()
      .await?
      .call(move |conn| {
        conn.execute_batch(&script)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}
