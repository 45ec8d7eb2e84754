//! An exact decimal matrix calculator.
//!
//! Matrices hold [rust_decimal::Decimal] values, so sums, products and
//! determinants are computed without binary floating-point error. Linear
//! systems are solved with Cramer's rule.
//!
//! For example:
//!
//! ```
//! use matrix_calculator::{printer::SolutionPrinter, tensors::matrix::Matrix};
//!
//! fn main() {
//!     // 2x + y = 5, x + 3y = 10
//!     let system: Matrix = "2 1 5\n1 3 10".parse().unwrap();
//!     println!("det = {}", system.replace_column(2, None).det().unwrap());
//!
//!     let solution = system.solve_cramer().unwrap();
//!     assert_eq!(SolutionPrinter::new(&solution).to_string(), "x1 = 1.00;\nx2 = 3.00;");
//! }
//! ```
//!
//! The `matrix-calculator` binary wraps the library in an interactive
//! [shell](shell::Shell).

pub mod decimal;
pub mod generator;
pub mod parser;
pub mod printer;
pub mod settings;
pub mod shell;
pub mod solve;
pub mod tensors;
