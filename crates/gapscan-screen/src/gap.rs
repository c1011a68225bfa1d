//! Day-over-day gap computation.

/// Computes the opening gap as a fraction of the previous close.
///
/// Equal to `(current_open - previous_close) / previous_close`. Returns
/// `None` when the previous close is zero; callers skip that day.
#[must_use]
pub fn gap_fraction(previous_close: f64, current_open: f64) -> Option<f64> {
    if previous_close == 0.0 {
        return None;
    }
    Some(current_open / previous_close - 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gap_fraction_basic() {
        assert!((gap_fraction(10.0, 12.0).unwrap() - 0.20).abs() < 1e-12);
        assert!((gap_fraction(10.0, 10.0).unwrap()).abs() < 1e-12);
        assert!((gap_fraction(10.0, 9.0).unwrap() + 0.10).abs() < 1e-12);
    }

    #[test]
    fn test_gap_fraction_zero_previous_close() {
        assert!(gap_fraction(0.0, 12.0).is_none());
    }

    #[test]
    fn test_gap_fraction_ratio_identity() {
        // open/prev - 1 is algebraically (open - prev) / prev.
        let pairs = [
            (10.0, 12.0),
            (3.25, 3.51),
            (99.0, 104.7),
            (0.5, 0.4),
            (250.0, 250.0),
        ];
        for (prev, open) in pairs {
            let gap = gap_fraction(prev, open).unwrap();
            let difference_form = (open - prev) / prev;
            assert!(
                (gap - difference_form).abs() < 1e-12,
                "mismatch for prev={prev} open={open}"
            );
        }
    }
}
