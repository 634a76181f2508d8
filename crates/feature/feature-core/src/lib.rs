//! Feature Preparation Core
//!
//! Cleaning and feature-matrix implementations.

mod builder;
mod cleaner;
mod encoding;
mod imputation;
mod temporal;

pub use builder::{prepare, TabularFeatureBuilder};
pub use cleaner::TableCleaner;
pub use encoding::CategoryEncoder;
pub use imputation::{fill_dates, impute_categorical, impute_numeric, median};
pub use temporal::{day_of_week, month, period_index, synthetic_index};
