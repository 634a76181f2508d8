//! Analysis Routines
//!
//! End-to-end routines over an uploaded CSV:
//!
//! - [`run_sales_forecast`]: flag unusual periods and forecast the target
//! - [`run_fraud_detection`]: score transactions and summarize the suspicious ones
//! - [`run_invoice_processing`]: segment revenue, flag invoices, and audit budgets
//!
//! Each routine validates its parameters before reading any data and maps
//! every failure, including a panic inside a stage, to [`AnalysisError`].

pub mod config;
pub mod correlation;
mod error;
pub mod fraud;
mod guard;
pub mod invoice;
pub mod sales;
mod stages;
mod stats;

pub use config::{
    InvoiceConfig, InvoiceConfigBuilder, RunConfig, RunConfigBuilder, CONTAMINATION_RANGE,
    HORIZON_RANGE,
};
pub use correlation::{correlation_matrix, pearson, CorrelationMatrix};
pub use error::{AnalysisError, Result};
pub use fraud::{run_fraud_detection, FraudReport};
pub use invoice::{run_invoice_processing, InvoiceReport};
pub use sales::{run_sales_forecast, SalesForecastReport};
