//! Unicode-aware name comparison, registered on every connection.
//!
//! SQLite's built-in `BINARY` collation orders by bytes and its `LIKE` folds
//! ASCII only, so `"eSwatini"` and `"Åland Islands"` would sort after `"Zimbabwe"`
//! and `"CÔTE"` would never match `"Côte d'Ivoire"`. Names are instead
//! compared on a folded key: canonically decomposed, stripped of combining
//! marks, then lowercased.

use std::cmp::Ordering;

use rusqlite::{Connection, functions::FunctionFlags};
use unicode_normalization::{UnicodeNormalization, char::is_combining_mark};

/// Collation used by every `ORDER BY` on a name column.
pub(crate) const NAME_COLLATION: &str = "NAME_CI";

/// Scalar SQL function applying [`fold`] to its argument.
pub(crate) const FOLD_FUNCTION: &str = "name_fold";

/// Case- and accent-insensitive comparison key for `name`.
pub(crate) fn fold(name: &str) -> String {
  name
    .nfd()
    .filter(|c| !is_combining_mark(*c))
    .flat_map(char::to_lowercase)
    .collect()
}

/// Orders by folded key; names that fold equal fall back to byte order so
/// the ordering stays total.
fn compare(a: &str, b: &str) -> Ordering {
  fold(a).cmp(&fold(b)).then_with(|| a.cmp(b))
}

pub(crate) fn register(conn: &Connection) -> rusqlite::Result<()> {
  conn.create_collation(NAME_COLLATION, compare)?;
  conn.create_scalar_function(
    FOLD_FUNCTION,
    1,
    FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
    |ctx| Ok(ctx.get::<Option<String>>(0)?.map(|name| fold(&name))),
  )
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn fold_drops_case_and_accents() {
    assert_eq!(fold("Côte d'Ivoire"), "cote d'ivoire");
    assert_eq!(fold("ÅLAND"), "aland");
    assert_eq!(fold("Türkiye"), "turkiye");
  }

  #[test]
  fn compare_interleaves_accented_and_lowercase_names() {
    let mut names = vec!["Zimbabwe", "Åland Islands", "eSwatini", "Côte d'Ivoire", "Albania"];
    names.sort_by(|a, b| compare(a, b));
    assert_eq!(names, ["Åland Islands", "Albania", "Côte d'Ivoire", "eSwatini", "Zimbabwe"]);
  }

  #[test]
  fn compare_is_total_for_names_that_fold_equal() {
    assert_eq!(compare("Cote", "Côte"), "Cote".cmp("Côte"));
    assert_ne!(compare("Cote", "Côte"), Ordering::Equal);
  }
}
