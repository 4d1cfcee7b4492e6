//! Relative-bar computation for a country's decade series.

use serde::{Deserialize, Serialize};

use crate::record::DecadeValue;

/// A series point annotated with its width relative to the series maximum.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendBar {
  pub decade_id:  i64,
  pub dadd_value: Option<f64>,
  /// Percentage of the largest value in the series, `0..=100`.
  pub bar_width:  u8,
}

/// Annotate each point with `round(value / max * 100)`.
///
/// Missing or non-finite values count as zero. When the maximum is not
/// positive every bar is zero.
pub fn relative_bars(series: &[DecadeValue]) -> Vec<TrendBar> {
  let max = series
    .iter()
    .map(|p| numeric(p.dadd_value))
    .fold(0.0_f64, f64::max);

  series
    .iter()
    .map(|p| TrendBar {
      decade_id:  p.decade_id,
      dadd_value: p.dadd_value,
      bar_width:  bar_width(numeric(p.dadd_value), max),
    })
    .collect()
}

fn numeric(value: Option<f64>) -> f64 {
  value.filter(|v| v.is_finite()).unwrap_or(0.0)
}

fn bar_width(value: f64, max: f64) -> u8 {
  if max <= 0.0 {
    return 0;
  }
  (value / max * 100.0).round().clamp(0.0, 100.0) as u8
}

#[cfg(test)]
mod tests {
  use super::*;

  fn series(values: &[Option<f64>]) -> Vec<DecadeValue> {
    values
      .iter()
      .enumerate()
      .map(|(i, v)| DecadeValue {
        decade_id:  1960 + 10 * i as i64,
        dadd_value: *v,
      })
      .collect()
  }

  fn widths(values: &[Option<f64>]) -> Vec<u8> {
    relative_bars(&series(values))
      .into_iter()
      .map(|b| b.bar_width)
      .collect()
  }

  #[test]
  fn bars_are_relative_to_the_maximum() {
    assert_eq!(widths(&[Some(10.0), Some(5.0), Some(20.0)]), vec![50, 25, 100]);
  }

  #[test]
  fn bars_round_to_nearest_percent() {
    // 1/3 → 33.33, 2/3 → 66.67
    assert_eq!(widths(&[Some(1.0), Some(2.0), Some(3.0)]), vec![33, 67, 100]);
  }

  #[test]
  fn all_zero_or_missing_gives_zero_bars() {
    assert_eq!(widths(&[Some(0.0), None, Some(0.0)]), vec![0, 0, 0]);
    assert_eq!(widths(&[None, None]), vec![0, 0]);
  }

  #[test]
  fn missing_values_count_as_zero() {
    assert_eq!(widths(&[Some(8.0), None, Some(4.0)]), vec![100, 0, 50]);
  }

  #[test]
  fn negative_values_clamp_to_zero() {
    assert_eq!(widths(&[Some(-5.0), Some(10.0)]), vec![0, 100]);
  }

  #[test]
  fn non_finite_values_count_as_zero() {
    assert_eq!(widths(&[Some(f64::NAN), Some(f64::INFINITY), Some(2.0)]), vec![0, 0, 100]);
  }

  #[test]
  fn empty_series_gives_empty_bars() {
    assert!(relative_bars(&[]).is_empty());
  }

  #[test]
  fn bars_keep_decade_and_value() {
    let bars = relative_bars(&series(&[Some(3.0), None]));
    assert_eq!(bars[0].decade_id, 1960);
    assert_eq!(bars[0].dadd_value, Some(3.0));
    assert_eq!(bars[1].decade_id, 1970);
    assert_eq!(bars[1].dadd_value, None);
  }
}
