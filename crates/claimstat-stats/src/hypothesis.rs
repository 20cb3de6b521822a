//! Two-sample significance testing.
//!
//! [`welch_t_test`] compares the means of two independent samples without
//! assuming equal variances. The statistic follows Student's t distribution
//! with Welch–Satterthwaite degrees of freedom:
//!
//! ```text
//! t  = (x̄₁ - x̄₂) / √(s₁²/n₁ + s₂²/n₂)
//! ν  = (s₁²/n₁ + s₂²/n₂)² / ((s₁²/n₁)²/(n₁-1) + (s₂²/n₂)²/(n₂-1))
//! ```

use std::fmt;

use serde::Serialize;
use statrs::distribution::{ContinuousCDF as _, StudentsT};

use crate::descriptive;

/// Identifies one side of a two-sample test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Sample {
    A,
    B,
}

impl fmt::Display for Sample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sample::A => f.write_str("A"),
            Sample::B => f.write_str("B"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum TestError {
    #[display("sample {sample} has {count} usable observations, at least 2 are required")]
    InsufficientData { sample: Sample, count: usize },
    #[display("both samples have zero variance but different means")]
    ZeroVariance,
    #[display("sample {sample} contains a non-finite observation")]
    NonFinite { sample: Sample },
}

/// Outcome of a two-sample t-test.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TTestResult {
    /// The t statistic. Positive when sample A has the larger mean.
    pub statistic: f64,
    /// Two-sided p-value in `[0, 1]`.
    pub p_value: f64,
    /// Degrees of freedom of the reference t distribution.
    pub df: f64,
}

impl TTestResult {
    /// Whether the null hypothesis of equal means is rejected at level `alpha`.
    #[must_use]
    pub fn is_significant(&self, alpha: f64) -> bool {
        self.p_value < alpha
    }
}

/// Welch's unequal-variance two-sample t-test.
///
/// Both samples need at least two observations. When both samples have zero
/// variance the test degenerates: equal means yield `t = 0, p = 1`, different
/// means are reported as [`TestError::ZeroVariance`]. Observations must be
/// finite. Both samples are divided by a common power of two before the
/// moments are taken, so magnitudes near `f64::MAX` do not overflow.
///
/// # Examples
///
/// ```
/// # use claimstat_stats::hypothesis::welch_t_test;
/// let result = welch_t_test(&[1.0, 2.0, 3.0, 4.0, 5.0], &[2.0, 4.0, 6.0, 8.0, 10.0]).unwrap();
/// assert!((result.statistic + 1.897_366_596_101_027_5).abs() < 1e-9);
/// assert!((result.p_value - 0.107_531_194_930_627_28).abs() < 1e-6);
/// ```
#[expect(clippy::cast_precision_loss, clippy::float_cmp)]
pub fn welch_t_test(a: &[f64], b: &[f64]) -> Result<TTestResult, TestError> {
    check_finite(a, Sample::A)?;
    check_finite(b, Sample::B)?;
    // t and df are invariant under a common scale
    let scale = common_scale(a.iter().chain(b));
    let a = a.iter().map(|v| v / scale).collect::<Vec<_>>();
    let b = b.iter().map(|v| v / scale).collect::<Vec<_>>();

    let (mean_a, var_a) = mean_and_variance(&a, Sample::A)?;
    let (mean_b, var_b) = mean_and_variance(&b, Sample::B)?;
    let n_a = a.len() as f64;
    let n_b = b.len() as f64;

    let se_a = var_a / n_a;
    let se_b = var_b / n_b;
    let se_sum = se_a + se_b;
    let diff = mean_a - mean_b;

    if se_sum <= 0.0 {
        if diff == 0.0 {
            return Ok(TTestResult {
                statistic: 0.0,
                p_value: 1.0,
                df: n_a + n_b - 2.0,
            });
        }
        return Err(TestError::ZeroVariance);
    }

    let statistic = diff / se_sum.sqrt();
    let df = se_sum.powi(2) / (se_a.powi(2) / (n_a - 1.0) + se_b.powi(2) / (n_b - 1.0));
    let p_value = student_t_two_sided_p(statistic, df);

    Ok(TTestResult {
        statistic,
        p_value,
        df,
    })
}

/// Two-sided p-value `P(|T| ≥ |t|)` for Student's t with `df` degrees of freedom.
///
/// Returns `NaN` for a non-finite statistic or non-positive degrees of freedom.
///
/// # Examples
///
/// ```
/// # use claimstat_stats::hypothesis::student_t_two_sided_p;
/// assert_eq!(student_t_two_sided_p(0.0, 10.0), 1.0);
/// assert!((student_t_two_sided_p(2.228, 10.0) - 0.05).abs() < 1e-3);
/// ```
#[must_use]
pub fn student_t_two_sided_p(t: f64, df: f64) -> f64 {
    if t.is_nan() || df.is_nan() || df <= 0.0 {
        return f64::NAN;
    }
    let Ok(dist) = StudentsT::new(0.0, 1.0, df) else {
        return f64::NAN;
    };
    (2.0 * dist.sf(t.abs())).clamp(0.0, 1.0)
}

fn check_finite(values: &[f64], sample: Sample) -> Result<(), TestError> {
    if values.iter().all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(TestError::NonFinite { sample })
    }
}

/// Power of two bringing the largest magnitude into `[1, 2)`, 1 for all-zero data.
fn common_scale<'a, I>(values: I) -> f64
where
    I: Iterator<Item = &'a f64>,
{
    let max_abs = values.fold(0.0_f64, |max, v| max.max(v.abs()));
    if max_abs > 0.0 {
        max_abs.log2().floor().exp2()
    } else {
        1.0
    }
}

fn mean_and_variance(values: &[f64], sample: Sample) -> Result<(f64, f64), TestError> {
    let insufficient = || TestError::InsufficientData {
        sample,
        count: values.len(),
    };
    let variance = descriptive::sample_variance(values).ok_or_else(insufficient)?;
    let mean = descriptive::mean(values).ok_or_else(insufficient)?;
    Ok((mean, variance))
}
