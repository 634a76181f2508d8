//! Model module containing feature data structures

mod feature_matrix;

pub use feature_matrix::FeatureMatrix;
