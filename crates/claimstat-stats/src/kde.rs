//! Gaussian kernel density estimation.
//!
//! Used to overlay a smooth density curve on top of a histogram. The bandwidth
//! follows Scott's rule: `h = σ · n^(-1/5)` with `σ` the sample standard deviation.

use std::f64::consts::PI;

use crate::descriptive;

/// Gaussian kernel density estimate of a one-dimensional sample.
#[derive(Debug, Clone)]
pub struct GaussianKde {
    points: Vec<f64>,
    bandwidth: f64,
}

impl GaussianKde {
    /// Builds a density estimate using Scott's bandwidth.
    ///
    /// Returns `None` with fewer than two values or when every value is identical.
    ///
    /// # Examples
    ///
    /// ```
    /// # use claimstat_stats::kde::GaussianKde;
    /// let kde = GaussianKde::new(&[1.0, 2.0, 2.5, 3.0, 8.0]).unwrap();
    /// assert!(kde.evaluate(2.5) > kde.evaluate(6.0));
    /// ```
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn new(values: &[f64]) -> Option<Self> {
        let variance = descriptive::sample_variance(values)?;
        if variance <= 0.0 {
            return None;
        }
        let bandwidth = variance.sqrt() * (values.len() as f64).powf(-0.2);
        Some(Self {
            points: values.to_vec(),
            bandwidth,
        })
    }

    /// Kernel bandwidth.
    #[must_use]
    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    /// Probability density at `x`.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn evaluate(&self, x: f64) -> f64 {
        let h = self.bandwidth;
        let norm = 1.0 / (self.points.len() as f64 * h * (2.0 * PI).sqrt());
        let sum = self
            .points
            .iter()
            .map(|&xi| {
                let u = (x - xi) / h;
                (-0.5 * u * u).exp()
            })
            .sum::<f64>();
        norm * sum
    }

    /// Samples the density at `num_points` evenly spaced positions in `[min, max]`.
    ///
    /// `scale` multiplies every density value; pass `n · bin_width` to draw the
    /// curve on the same axis as histogram counts.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn sample_grid(&self, min: f64, max: f64, num_points: usize, scale: f64) -> Vec<(f64, f64)> {
        match num_points {
            0 => vec![],
            1 => vec![(min, self.evaluate(min) * scale)],
            _ => {
                let step = (max - min) / (num_points - 1) as f64;
                (0..num_points)
                    .map(|i| {
                        let x = min + i as f64 * step;
                        (x, self.evaluate(x) * scale)
                    })
                    .collect()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_degenerate_samples() {
        assert!(GaussianKde::new(&[]).is_none());
        assert!(GaussianKde::new(&[1.0]).is_none());
        assert!(GaussianKde::new(&[2.0, 2.0, 2.0]).is_none());
    }

    #[test]
    fn test_density_integrates_to_one() {
        let kde = GaussianKde::new(&[0.0, 1.0, 1.5, 2.0, 4.0]).unwrap();
        let grid = kde.sample_grid(-20.0, 25.0, 4501, 1.0);
        let step = 45.0 / 4500.0;
        let area = grid.iter().map(|(_, y)| y * step).sum::<f64>();
        assert!((area - 1.0).abs() < 1e-3, "area = {area}");
    }

    #[test]
    fn test_scott_bandwidth() {
        let values = [1.0, 2.0, 3.0, 4.0, 5.0];
        let kde = GaussianKde::new(&values).unwrap();
        let expected = 2.5_f64.sqrt() * 5.0_f64.powf(-0.2);
        assert!((kde.bandwidth() - expected).abs() < 1e-12);
    }
}
