//! Dense matrices of exact decimal values and the linear algebra on them.

pub mod matrix;
