//! Solving square linear systems with Cramer's rule.

use rust_decimal::{Decimal, RoundingStrategy};
use tracing::debug;

use crate::{
    decimal,
    tensors::matrix::{Matrix, MatrixError},
};

/// The outcome of solving a linear system.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Solution {
    /// The system is inconsistent.
    NoSolution,
    /// The system has exactly one solution.
    Unique(Vec<Decimal>),
    /// The equations are dependent: there are infinitely many solutions.
    Infinite,
}

impl Solution {
    /// Return the number of solutions, or `None` if there are infinitely many.
    pub fn count(&self) -> Option<usize> {
        match self {
            Solution::NoSolution => Some(0),
            Solution::Unique(_) => Some(1),
            Solution::Infinite => None,
        }
    }
}

/// Settings for [Matrix::solve_cramer_with].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CramerOptions {
    /// The number of fractional digits of each unknown.
    pub decimal_places: u32,
    /// The rounding applied when an unknown has more fractional digits.
    pub rounding: RoundingStrategy,
}

impl Default for CramerOptions {
    fn default() -> Self {
        CramerOptions {
            decimal_places: 2,
            rounding: RoundingStrategy::MidpointNearestEven,
        }
    }
}

impl Matrix {
    /// Solve the system of linear equations whose augmented matrix is `self`,
    /// with unknowns rounded to two decimal places.
    /// See [Matrix::solve_cramer_with].
    pub fn solve_cramer(&self) -> Result<Solution, MatrixError> {
        self.solve_cramer_with(&CramerOptions::default())
    }

    /// Solve the system of linear equations whose augmented matrix is `self`.
    ///
    /// The matrix must have `n` rows and `n+1` columns: the first `n` columns
    /// hold the coefficients and the last one holds the constants. Unknown `i`
    /// is the ratio of the determinant of the coefficient matrix with column
    /// `i` replaced by the constants and the determinant of the coefficient matrix.
    ///
    /// If the main determinant is zero, the system has no solution as soon as
    /// one of the substituted determinants is non-zero, and infinitely many otherwise.
    ///
    /// # Examples
    ///
    /// ```
    /// use matrix_calculator::{solve::Solution, tensors::matrix::Matrix};
    /// use rust_decimal::Decimal;
    ///
    /// // 2x + y = 5, x + 3y = 10
    /// let m = Matrix::from_linear(
    ///     [2, 1, 5, 1, 3, 10].into_iter().map(Decimal::from).collect(),
    ///     2,
    ///     3,
    /// )
    /// .unwrap();
    ///
    /// let s = m.solve_cramer().unwrap();
    /// assert_eq!(s, Solution::Unique(vec![Decimal::from(1), Decimal::from(3)]));
    /// ```
    pub fn solve_cramer_with(&self, options: &CramerOptions) -> Result<Solution, MatrixError> {
        if self.ncols == 0 || self.nrows != self.ncols - 1 {
            return Err(MatrixError::CramerNotApplicable {
                nrows: self.nrows,
                ncols: self.ncols,
            });
        }

        let last = self.ncols - 1;
        let coefficients = self.replace_column(last, None);
        // a system without unknowns has the empty determinant 0
        let main_det = if coefficients.is_empty() {
            Decimal::ZERO
        } else {
            coefficients.det()?
        };
        let constants = self.column(last);

        let mut solution = vec![Decimal::ZERO; self.nrows as usize];
        for (i, x) in solution.iter_mut().enumerate() {
            let delta_det = coefficients
                .replace_column(i as u32, Some(constants.as_slice()))
                .det()?;

            if main_det.is_zero() {
                if !delta_det.is_zero() {
                    debug!("Determinant of unknown {} is {}: no solution", i, delta_det);
                    return Ok(Solution::NoSolution);
                }
                continue;
            }

            *x = decimal::round_fixed(
                decimal::div(&delta_det, &main_det)?,
                options.decimal_places,
                options.rounding,
            );
        }

        if main_det.is_zero() {
            debug!("All determinants vanish: infinitely many solutions");
            Ok(Solution::Infinite)
        } else {
            debug!("Main determinant {}: unique solution", main_det);
            Ok(Solution::Unique(solution))
        }
    }
}

#[cfg(test)]
mod test {
    use rust_decimal::{Decimal, RoundingStrategy};
    use rust_decimal_macros::dec;

    use super::{CramerOptions, Solution};
    use crate::tensors::matrix::{Matrix, MatrixError};

    fn augmented(data: &[i64], nrows: u32) -> Matrix {
        Matrix::from_linear(
            data.iter().map(|x| Decimal::from(*x)).collect(),
            nrows,
            nrows + 1,
        )
        .unwrap()
    }

    #[test]
    fn solve_trivial() {
        let s = augmented(&[4, 2], 1).solve_cramer().unwrap();
        assert_eq!(s, Solution::Unique(vec![dec!(0.50)]));
        assert_eq!(s.count(), Some(1));
    }

    #[test]
    fn solve_three_unknowns() {
        let s = augmented(&[1, 1, 2, 3, 3, 4, 3, 15, 16, 5, 5, 8], 3)
            .solve_cramer()
            .unwrap();

        // exact: -5/6, 47/10, -13/30
        let x = match s {
            Solution::Unique(x) => x,
            other => panic!("Expected a unique solution, got {:?}", other),
        };
        assert_eq!(x, vec![dec!(-0.83), dec!(4.70), dec!(-0.43)]);
        assert_eq!(
            x.iter().map(|e| e.to_string()).collect::<Vec<_>>(),
            vec!["-0.83", "4.70", "-0.43"]
        );
    }

    #[test]
    fn options() {
        let m = augmented(&[8, 1], 1);
        let s = m
            .solve_cramer_with(&CramerOptions {
                decimal_places: 3,
                rounding: RoundingStrategy::MidpointAwayFromZero,
            })
            .unwrap();
        assert_eq!(s, Solution::Unique(vec![dec!(0.125)]));

        assert_eq!(
            m.solve_cramer().unwrap(),
            Solution::Unique(vec![dec!(0.12)])
        );
        assert_eq!(
            m.solve_cramer_with(&CramerOptions {
                decimal_places: 2,
                rounding: RoundingStrategy::MidpointAwayFromZero,
            })
            .unwrap(),
            Solution::Unique(vec![dec!(0.13)])
        );
    }

    #[test]
    fn degenerate() {
        let s = augmented(&[1, 1, 2, 2, 2, 4], 2).solve_cramer().unwrap();
        assert_eq!(s, Solution::Infinite);
        assert_eq!(s.count(), None);

        let s = augmented(&[1, 1, 2, 1, 1, 5], 2).solve_cramer().unwrap();
        assert_eq!(s, Solution::NoSolution);
        assert_eq!(s.count(), Some(0));

        // the first substituted determinant vanishes, the second does not
        let s = augmented(&[1, 0, 0, 2, 0, 3], 2).solve_cramer().unwrap();
        assert_eq!(s, Solution::NoSolution);
    }

    #[test]
    fn not_applicable() {
        let square = Matrix::from_linear(vec![dec!(1); 4], 2, 2).unwrap();
        assert_eq!(
            square.solve_cramer(),
            Err(MatrixError::CramerNotApplicable { nrows: 2, ncols: 2 })
        );
        assert_eq!(
            Matrix::default().solve_cramer(),
            Err(MatrixError::CramerNotApplicable { nrows: 0, ncols: 0 })
        );
    }

    #[test]
    fn no_unknowns() {
        let s = Matrix::new(0, 1).solve_cramer().unwrap();
        assert_eq!(s, Solution::Infinite);
    }
}
