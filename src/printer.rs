//! Text output of matrices and solutions.

use std::fmt::{self, Write};

use crate::{solve::Solution, tensors::matrix::Matrix};

/// Options that control how matrices are printed.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct PrintOptions {
    /// The character between two entries of a row.
    pub column_separator: char,
    /// Round every entry to this many fractional digits.
    pub precision: Option<u32>,
    /// Strip trailing zeros, e.g. print `2.50` as `2.5`.
    pub normalize: bool,
}

impl PrintOptions {
    pub const fn new() -> Self {
        PrintOptions {
            column_separator: '\t',
            precision: None,
            normalize: false,
        }
    }
}

impl Default for PrintOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// Print a matrix as a grid: one line per row, entries separated by
/// [PrintOptions::column_separator]. The last row is not followed by a newline.
pub struct MatrixPrinter<'a> {
    pub matrix: &'a Matrix,
    pub opts: PrintOptions,
}

impl<'a> MatrixPrinter<'a> {
    pub fn new(matrix: &'a Matrix) -> MatrixPrinter<'a> {
        MatrixPrinter {
            matrix,
            opts: PrintOptions::default(),
        }
    }

    pub fn with_options(mut self, opts: PrintOptions) -> MatrixPrinter<'a> {
        self.opts = opts;
        self
    }
}

impl<'a> fmt::Display for MatrixPrinter<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.matrix.is_empty() {
            return Ok(());
        }

        for (ri, r) in self.matrix.row_iter().enumerate() {
            if ri > 0 {
                f.write_char('\n')?;
            }

            for (ci, c) in r.iter().enumerate() {
                if ci > 0 {
                    f.write_char(self.opts.column_separator)?;
                }

                let mut c = *c;
                if let Some(p) = self.opts.precision {
                    c = c.round_dp(p);
                }
                if self.opts.normalize {
                    c = c.normalize();
                }
                write!(f, "{}", c)?;
            }
        }

        Ok(())
    }
}

/// Print the outcome of solving a linear system, one unknown per line:
/// `x1 = 1.00;`.
pub struct SolutionPrinter<'a> {
    pub solution: &'a Solution,
}

impl<'a> SolutionPrinter<'a> {
    pub fn new(solution: &'a Solution) -> SolutionPrinter<'a> {
        SolutionPrinter { solution }
    }
}

impl<'a> fmt::Display for SolutionPrinter<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.solution {
            Solution::NoSolution => f.write_str("The system has no solutions."),
            Solution::Infinite => f.write_str("The system has infinitely many solutions."),
            Solution::Unique(x) => {
                for (i, v) in x.iter().enumerate() {
                    if i > 0 {
                        f.write_char('\n')?;
                    }
                    write!(f, "x{} = {};", i + 1, v)?;
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod test {
    use rust_decimal_macros::dec;

    use super::{MatrixPrinter, PrintOptions, SolutionPrinter};
    use crate::{solve::Solution, tensors::matrix::Matrix};

    #[test]
    fn grid() {
        let m = Matrix::from_linear(vec![dec!(1), dec!(-2.50), dec!(3), dec!(0.125)], 2, 2).unwrap();
        assert_eq!(m.to_string(), "1\t-2.50\n3\t0.125");

        let p = MatrixPrinter::new(&m).with_options(PrintOptions {
            column_separator: ' ',
            precision: Some(2),
            normalize: true,
        });
        assert_eq!(p.to_string(), "1 -2.5\n3 0.12");

        assert_eq!(Matrix::default().to_string(), "");
    }

    #[test]
    fn solutions() {
        let s = Solution::Unique(vec![dec!(1.00), dec!(-3.25)]);
        assert_eq!(
            SolutionPrinter::new(&s).to_string(),
            "x1 = 1.00;\nx2 = -3.25;"
        );
        assert_eq!(
            SolutionPrinter::new(&Solution::NoSolution).to_string(),
            "The system has no solutions."
        );
        assert_eq!(
            SolutionPrinter::new(&Solution::Infinite).to_string(),
            "The system has infinitely many solutions."
        );
    }
}
