//! Core compute primitives (Vector, Matrix).
//!
//! Narrow f64 types backing the regression harness. Panel values are
//! macro-economic magnitudes, so everything is double precision.

mod matrix;
mod vector;

pub use matrix::Matrix;
pub use vector::Vector;
