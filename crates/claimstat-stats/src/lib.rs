//! Statistical primitives for the claimstat project.
//!
//! This crate provides the numeric building blocks used by the claims analysis
//! tooling. Every function works on plain `f64` slices; callers are expected to
//! filter out missing values (`NaN`) beforehand.
//!
//! - **Descriptive statistics**: count, mean, median, population and sample variance
//! - **Percentiles**: linear-interpolation percentiles
//! - **Histograms**: equal-width frequency distributions
//! - **Kernel density**: Gaussian KDE for smooth distribution curves
//! - **Box summaries**: quartiles, whiskers and outliers
//! - **Comprehensive statistics**: all of the above combined
//! - **Correlation**: Pearson coefficient and least-squares line fits
//! - **Hypothesis testing**: Welch's unequal-variance two-sample t-test
//!
//! # Examples
//!
//! ## Computing descriptive statistics
//!
//! ```
//! use claimstat_stats::descriptive::DescriptiveStats;
//!
//! let values = [1.0, 2.0, 3.0, 4.0, 5.0];
//! let stats = DescriptiveStats::new(values).unwrap();
//! assert_eq!(stats.mean, 3.0);
//! ```
//!
//! ## Comparing two samples
//!
//! ```
//! use claimstat_stats::hypothesis::welch_t_test;
//!
//! let male_claims = [100.0, 150.0];
//! let female_claims = [200.0, 50.0];
//! let result = welch_t_test(&male_claims, &female_claims).unwrap();
//! assert_eq!(result.statistic, 0.0);
//! assert!(!result.is_significant(0.05));
//! ```

pub mod boxplot;
pub mod comprehensive;
pub mod correlation;
pub mod descriptive;
pub mod histogram;
pub mod hypothesis;
pub mod kde;
pub mod percentiles;
