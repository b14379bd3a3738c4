//! Per-series extrema and averages for chart annotation.
//!
//! The rendering layer draws dedicated max/min markers and an average
//! line per series; the inline data label at the extrema points is
//! suppressed so the marker isn't doubled. This module finds those
//! indices — first occurrence wins on ties.

/// Index of the first maximum and first minimum in a series.
///
/// Returns `None` for an empty series — there is no extreme to mark.
pub fn extrema_indices<T: PartialOrd + Copy>(series: &[T]) -> Option<(usize, usize)> {
    let first = *series.first()?;
    let mut max_index = 0;
    let mut min_index = 0;
    let mut max = first;
    let mut min = first;

    for (i, &value) in series.iter().enumerate().skip(1) {
        if value > max {
            max = value;
            max_index = i;
        }
        if value < min {
            min = value;
            min_index = i;
        }
    }

    Some((max_index, min_index))
}

/// Arithmetic mean of a series, or `None` when empty.
pub fn mean(series: &[f64]) -> Option<f64> {
    if series.is_empty() {
        return None;
    }
    Some(series.iter().sum::<f64>() / series.len() as f64)
}

/// Format a megabyte value as gigabytes for marker labels: `"1.40G"`.
pub fn format_heap_gb(mb: f64) -> String {
    format!("{:.2}G", mb / 1024.0)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_first_max_and_min() {
        let series = [3, 1, 4, 1, 5, 9, 2, 6];
        assert_eq!(extrema_indices(&series), Some((5, 1)));
    }

    #[test]
    fn ties_break_leftmost() {
        let series = [7, 2, 7, 2];
        assert_eq!(extrema_indices(&series), Some((0, 1)));
    }

    #[test]
    fn single_element_is_both_extremes() {
        assert_eq!(extrema_indices(&[42]), Some((0, 0)));
    }

    #[test]
    fn empty_series_yields_none() {
        assert_eq!(extrema_indices::<u64>(&[]), None);
    }

    #[test]
    fn works_for_float_series() {
        let series = [512.5, 1024.0, 256.25];
        assert_eq!(extrema_indices(&series), Some((1, 2)));
    }

    #[test]
    fn mean_of_series() {
        assert_eq!(mean(&[1.0, 2.0, 3.0]), Some(2.0));
        assert_eq!(mean(&[]), None);
    }

    #[test]
    fn heap_gb_formatting() {
        assert_eq!(format_heap_gb(1433.6), "1.40G");
        assert_eq!(format_heap_gb(512.0), "0.50G");
    }
}
