//! Tabular analysis of insurance claims data.
//!
//! This crate holds an in-memory [`table::DataTable`] loaded from delimited
//! text and the operations of an exploratory analysis over it.
//!
//! # Overview
//!
//! ## Preparing Data
//!
//! 1. **Load** ([`loader::read_table`]): parse a delimited file, inferring
//!    numeric and categorical columns
//! 2. **Inspect** ([`missing::missing_values_summary`]): count missing cells
//! 3. **Clean** ([`cleaning`]): impute means, drop sparse columns and
//!    incomplete rows, normalize dates
//! 4. **Encode and Scale** ([`encoding`], [`scaling`]): one-hot and label
//!    encoding, standardization
//!
//! ## Hypothesis Testing
//!
//! [`comparison::compare_groups`] runs Welch's t-test on a numeric measure
//! between two groups of rows. [`comparison::derive_margin`] adds the profit
//! margin column that many comparisons test, and a [`plan::TestPlan`] runs a
//! batch of comparisons and records a verdict for each.
//!
//! ## Relationships
//!
//! [`crosstab::crosstab`] counts co-occurring labels and
//! [`correlation::correlation_matrix`] computes pairwise Pearson coefficients.
//!
//! # Examples
//!
//! ```
//! use claimstat_frame::{comparison, loader};
//!
//! let input = "\
//! Gender,TotalPremium,TotalClaims
//! Male,200,100
//! Female,300,200
//! Male,180,150
//! Female,90,50
//! ";
//! let table = loader::read_table_from_reader(input.as_bytes(), b',').unwrap();
//! let result = comparison::compare_groups(&table, "Gender", "Male", "Female", "TotalClaims")
//!     .unwrap();
//! assert_eq!(result.p_value, 1.0);
//!
//! let table = comparison::derive_margin(&table).unwrap();
//! assert_eq!(table.numeric("ProfitMargin").unwrap()[0], 50.0);
//! ```

pub use self::error::FrameError;

pub mod cleaning;
pub mod comparison;
pub mod correlation;
pub mod crosstab;
pub mod encoding;
mod error;
pub mod loader;
pub mod missing;
pub mod plan;
pub mod scaling;
pub mod table;

/// Column names of the claims dataset.
pub mod columns {
    pub const GENDER: &str = "Gender";
    pub const TOTAL_CLAIMS: &str = "TotalClaims";
    pub const TOTAL_PREMIUM: &str = "TotalPremium";
    pub const POSTAL_CODE: &str = "PostalCode";
    pub const PROVINCE: &str = "Province";
    pub const VEHICLE_TYPE: &str = "VehicleType";
    pub const VEHICLE_INTRO_DATE: &str = "VehicleIntroDate";
    /// Derived by [`crate::comparison::derive_margin`].
    pub const PROFIT_MARGIN: &str = "ProfitMargin";
}
