//! Route handlers, one module per page family.
//!
//! Each handler gathers a view-model from the store and hands it to the
//! module's `render` function.

pub mod country_trend;
pub mod home;
pub mod intermediate_regions;
pub mod region_decade;
pub mod regions;
pub mod search;
pub mod sub_region_decade;
pub mod sub_regions;
pub mod summary;

/// Parse a dropdown selection. Empty or non-integer input means "not
/// selected".
pub(crate) fn selection(raw: &str) -> Option<i64> {
  raw.trim().parse().ok()
}

/// Display form of a nullable value.
pub(crate) fn show_value(value: Option<f64>) -> String {
  match value {
    Some(v) => v.to_string(),
    None    => "N/A".to_string(),
  }
}

/// Dropdown options for the decades present in the fact table.
pub(crate) fn decade_options(decades: &[i64]) -> impl Iterator<Item = (String, String)> + '_ {
  decades.iter().map(|d| (d.to_string(), d.to_string()))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn selection_requires_an_integer() {
    assert_eq!(selection("42"), Some(42));
    assert_eq!(selection(" 1990 "), Some(1990));
    assert_eq!(selection(""), None);
    assert_eq!(selection("abc"), None);
  }

  #[test]
  fn missing_values_show_as_na() {
    assert_eq!(show_value(None), "N/A");
    assert_eq!(show_value(Some(2.5)), "2.5");
  }
}
