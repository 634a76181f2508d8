//! Contract module containing trait definitions for feature preparation

mod cleaner;
mod feature_builder;

pub use cleaner::Cleaner;
pub use feature_builder::FeatureBuilder;
