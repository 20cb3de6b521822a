use std::ops::Range;

use serde::Serialize;

/// Default number of bins, matching the univariate plots of the claims dataset.
pub const DEFAULT_NUM_BINS: usize = 10;

/// A histogram representation of a dataset's distribution.
///
/// The histogram divides the data range `[min, max]` into equal-width bins and
/// counts the frequency of values falling into each bin. The last bin is closed
/// on the right so that the maximum value is counted.
#[derive(Debug, Clone, Serialize)]
pub struct Histogram {
    /// The bins comprising the histogram, in ascending order.
    pub bins: Vec<HistogramBin>,
}

/// A single bin in a histogram.
#[derive(Debug, Clone, Serialize)]
pub struct HistogramBin {
    /// The range of values covered by this bin (inclusive start, exclusive end).
    pub range: Range<f64>,
    /// The number of values that fall within this bin's range.
    pub count: u64,
}

impl Histogram {
    /// Creates a histogram from unsorted values.
    ///
    /// # Arguments
    ///
    /// * `values` - The data points to create the histogram from.
    /// * `num_bins` - The number of bins to create.
    /// * `explicit_min` - If provided, overrides the minimum value for histogram bounds.
    /// * `explicit_max` - If provided, overrides the maximum value for histogram bounds.
    ///
    /// Values outside the explicit bounds are not counted.
    ///
    /// # Examples
    ///
    /// ```
    /// # use claimstat_stats::histogram::Histogram;
    /// let values = [5.0, 2.0, 8.0, 1.0, 9.0, 3.0, 7.0, 4.0, 6.0, 10.0];
    /// let histogram = Histogram::new(values, 3, None, None);
    /// assert_eq!(histogram.bins.len(), 3);
    /// assert_eq!(histogram.total(), 10);
    /// ```
    #[must_use]
    pub fn new<I>(
        values: I,
        num_bins: usize,
        explicit_min: Option<f64>,
        explicit_max: Option<f64>,
    ) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        let mut sorted = values.into_iter().collect::<Vec<_>>();
        sorted.sort_by(f64::total_cmp);
        Self::from_sorted(&sorted, num_bins, explicit_min, explicit_max)
    }

    /// Creates a histogram from pre-sorted values.
    ///
    /// # Panics
    ///
    /// Panics if `sorted_values` is not sorted in ascending order.
    #[expect(
        clippy::cast_precision_loss,
        clippy::cast_sign_loss,
        clippy::cast_possible_truncation
    )]
    #[must_use]
    pub fn from_sorted(
        sorted_values: &[f64],
        num_bins: usize,
        explicit_min: Option<f64>,
        explicit_max: Option<f64>,
    ) -> Self {
        assert!(
            sorted_values.is_sorted_by(|a, b| a <= b),
            "values must be sorted in ascending order"
        );

        let (Some(&first), Some(&last)) = (sorted_values.first(), sorted_values.last()) else {
            return Self { bins: vec![] };
        };
        if num_bins == 0 {
            return Self { bins: vec![] };
        }

        let mut min = explicit_min.unwrap_or(first);
        let mut max = explicit_max.unwrap_or(last);
        if max - min < f64::EPSILON {
            // All values concentrated at one point: widen to a unit interval around it
            min -= 0.5;
            max += 0.5;
        }
        let bin_width = (max - min) / num_bins as f64;

        let mut bins = (0..num_bins)
            .map(|bin_idx| {
                // Recompute boundaries from `min` to avoid floating-point accumulation
                let start = min + bin_idx as f64 * bin_width;
                let end = if bin_idx == num_bins - 1 {
                    max.next_up()
                } else {
                    min + (bin_idx + 1) as f64 * bin_width
                };
                HistogramBin {
                    range: start..end,
                    count: 0,
                }
            })
            .collect::<Vec<_>>();

        for &val in sorted_values {
            if val < min || val > max {
                continue;
            }
            let idx = (((val - min) / bin_width).floor() as usize).min(num_bins - 1);
            bins[idx].count += 1;
        }

        Self { bins }
    }

    /// Total number of values counted across all bins.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.bins.iter().map(|bin| bin.count).sum()
    }

    /// Width of a single bin, `None` for an empty histogram.
    #[must_use]
    pub fn bin_width(&self) -> Option<f64> {
        self.bins.first().map(|bin| bin.range.end - bin.range.start)
    }
}
