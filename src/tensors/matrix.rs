use std::{
    fmt::Display,
    ops::{Index, IndexMut, Neg},
    slice::Chunks,
};

use rust_decimal::Decimal;
use smallvec::SmallVec;
use tracing::{instrument, trace};

use crate::{decimal, printer::MatrixPrinter};

/// A dense matrix of exact decimal values, stored in row-major order.
///
/// A matrix with zero rows or zero columns is *empty*; `Matrix::default()`
/// creates one. Every operation that derives a new matrix allocates it, so
/// operands are never modified.
#[derive(Clone, Default, Hash, PartialEq, Eq, Debug)]
pub struct Matrix {
    pub(crate) data: SmallVec<[Decimal; 16]>,
    pub(crate) nrows: u32,
    pub(crate) ncols: u32,
}

/// Errors that can occur when performing matrix operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MatrixError {
    /// The operation requires a square matrix.
    NotSquare { nrows: u32, ncols: u32 },
    /// The operands of an elementwise operation have different shapes.
    ShapeMismatch { lhs: (u32, u32), rhs: (u32, u32) },
    /// The number of columns of the left operand differs from the number of rows of the right one.
    DimensionMismatch { lhs: (u32, u32), rhs: (u32, u32) },
    /// The matrix is not an `n x (n+1)` augmented matrix of a linear system.
    CramerNotApplicable { nrows: u32, ncols: u32 },
    /// A value left the range of the decimal type.
    Overflow,
    /// The determinant of an empty matrix was requested.
    Empty,
    /// The length of the data does not match the requested dimensions.
    DataLength { len: usize, nrows: u32, ncols: u32 },
    /// The rows of a nested vector have different lengths.
    NotRectangular,
}

impl std::fmt::Display for MatrixError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatrixError::NotSquare { nrows, ncols } => {
                write!(f, "The matrix is not square: ({},{})", nrows, ncols)
            }
            MatrixError::ShapeMismatch { lhs, rhs } => write!(
                f,
                "The matrices must have the same shape: ({},{}) vs ({},{})",
                lhs.0, lhs.1, rhs.0, rhs.1
            ),
            MatrixError::DimensionMismatch { lhs, rhs } => write!(
                f,
                "Cannot multiply matrices because of a dimension mismatch: ({},{}) vs ({},{})",
                lhs.0, lhs.1, rhs.0, rhs.1
            ),
            MatrixError::CramerNotApplicable { nrows, ncols } => write!(
                f,
                "Cramer's rule needs n x n coefficients followed by a column of constants, got ({},{})",
                nrows, ncols
            ),
            MatrixError::Overflow => write!(f, "The numbers are too large for exact decimal arithmetic"),
            MatrixError::Empty => write!(f, "The matrix is empty"),
            MatrixError::DataLength { len, nrows, ncols } => write!(
                f,
                "Data length does not match matrix dimensions: {} vs ({},{})",
                len, nrows, ncols
            ),
            MatrixError::NotRectangular => write!(f, "Matrix is not rectangular"),
        }
    }
}

impl std::error::Error for MatrixError {}

impl Matrix {
    /// Create a new zeroed matrix with `nrows` rows and `ncols` columns.
    pub fn new(nrows: u32, ncols: u32) -> Matrix {
        Matrix {
            data: SmallVec::from_elem(Decimal::ZERO, nrows as usize * ncols as usize),
            nrows,
            ncols,
        }
    }

    /// Create a new square matrix with `nrows` rows and ones on the main diagonal and zeroes elsewhere.
    pub fn identity(nrows: u32) -> Matrix {
        Matrix::eye(&vec![Decimal::ONE; nrows as usize])
    }

    /// Create a new matrix with the scalars `diag` on the main diagonal and zeroes elsewhere.
    pub fn eye(diag: &[Decimal]) -> Matrix {
        let mut m = Matrix::new(diag.len() as u32, diag.len() as u32);
        for (i, e) in diag.iter().enumerate() {
            m[(i as u32, i as u32)] = *e;
        }
        m
    }

    /// Convert a row-major linear representation of a matrix to a `Matrix`.
    pub fn from_linear(data: Vec<Decimal>, nrows: u32, ncols: u32) -> Result<Matrix, MatrixError> {
        if data.len() == nrows as usize * ncols as usize {
            Ok(Matrix {
                data: data.into(),
                nrows,
                ncols,
            })
        } else {
            Err(MatrixError::DataLength {
                len: data.len(),
                nrows,
                ncols,
            })
        }
    }

    /// Create a new matrix from a 2-dimensional vector of scalars.
    pub fn from_nested_vec(matrix: Vec<Vec<Decimal>>) -> Result<Matrix, MatrixError> {
        let nrows = matrix.len() as u32;
        let ncols = matrix.first().map(|r| r.len()).unwrap_or(0);

        let mut data = SmallVec::with_capacity(nrows as usize * ncols);
        for d in matrix {
            if d.len() != ncols {
                return Err(MatrixError::NotRectangular);
            }

            data.extend(d);
        }

        Ok(Matrix {
            data,
            nrows,
            ncols: ncols as u32,
        })
    }

    /// Return the number of rows.
    #[inline]
    pub fn nrows(&self) -> u32 {
        self.nrows
    }

    /// Return the number of columns.
    #[inline]
    pub fn ncols(&self) -> u32 {
        self.ncols
    }

    /// Return true iff the matrix holds no elements.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Return true iff the number of rows equals the number of columns.
    pub fn is_square(&self) -> bool {
        self.nrows == self.ncols
    }

    /// Return true iff `other` has the same number of rows and columns.
    pub fn size_equals(&self, other: &Matrix) -> bool {
        self.nrows == other.nrows && self.ncols == other.ncols
    }

    /// Get the element at row `i` and column `j`.
    #[inline]
    pub fn get(&self, i: u32, j: u32) -> Decimal {
        self[(i, j)]
    }

    /// Set the element at row `i` and column `j`.
    #[inline]
    pub fn set(&mut self, i: u32, j: u32, value: Decimal) {
        self[(i, j)] = value;
    }

    /// Get the `i`th row of the matrix.
    pub fn row(&self, i: u32) -> &[Decimal] {
        assert!(i < self.nrows, "Row {} out of bounds ({} rows)", i, self.nrows);
        let start = i as usize * self.ncols as usize;
        &self.data[start..start + self.ncols as usize]
    }

    /// Overwrite the `i`th row with `values`, which must have exactly `ncols` entries.
    pub fn set_row(&mut self, i: u32, values: &[Decimal]) {
        assert!(i < self.nrows, "Row {} out of bounds ({} rows)", i, self.nrows);
        assert_eq!(
            values.len(),
            self.ncols as usize,
            "Row length does not match the number of columns"
        );
        let start = i as usize * self.ncols as usize;
        self.data[start..start + self.ncols as usize].copy_from_slice(values);
    }

    /// Get the `j`th column of the matrix, from top to bottom.
    pub fn column(&self, j: u32) -> Vec<Decimal> {
        (0..self.nrows).map(|i| self[(i, j)]).collect()
    }

    /// Return an iterator over the rows of the matrix.
    pub fn row_iter(&self) -> Chunks<'_, Decimal> {
        self.data.chunks(self.ncols.max(1) as usize)
    }

    /// Transpose the matrix.
    pub fn transpose(&self) -> Matrix {
        let mut m = Matrix::new(self.ncols, self.nrows);
        for i in 0..self.nrows {
            for j in 0..self.ncols {
                m[(j, i)] = self[(i, j)];
            }
        }
        m
    }

    /// Compute the sum of the entries on the main diagonal.
    pub fn trace(&self) -> Result<Decimal, MatrixError> {
        if !self.is_square() {
            return Err(MatrixError::NotSquare {
                nrows: self.nrows,
                ncols: self.ncols,
            });
        }

        let mut trace = Decimal::ZERO;
        for i in 0..self.nrows {
            trace = decimal::add(&trace, &self[(i, i)])?;
        }
        Ok(trace)
    }

    /// Get the matrix without row `row` and column `col`.
    /// The remaining entries keep their relative order.
    pub fn minor(&self, row: u32, col: u32) -> Matrix {
        assert!(
            row < self.nrows && col < self.ncols,
            "Minor ({},{}) out of bounds for a ({},{}) matrix",
            row,
            col,
            self.nrows,
            self.ncols
        );

        let data = self
            .row_iter()
            .enumerate()
            .filter(|(i, _)| *i != row as usize)
            .flat_map(|(_, r)| {
                r.iter()
                    .enumerate()
                    .filter(|(j, _)| *j != col as usize)
                    .map(|(_, e)| *e)
            })
            .collect();

        Matrix {
            data,
            nrows: self.nrows - 1,
            ncols: self.ncols - 1,
        }
    }

    /// Remove or overwrite column `col`.
    ///
    /// If `values` is `None`, the column is deleted and the result has one
    /// column less. Otherwise the column is replaced by `values`, which must
    /// have one entry per row.
    pub fn replace_column(&self, col: u32, values: Option<&[Decimal]>) -> Matrix {
        assert!(
            col < self.ncols,
            "Column {} out of bounds ({} columns)",
            col,
            self.ncols
        );

        match values {
            None => {
                let ncols = self.ncols - 1;
                if ncols == 0 {
                    return Matrix::new(self.nrows, 0);
                }

                let data = self
                    .row_iter()
                    .flat_map(|r| {
                        r.iter()
                            .enumerate()
                            .filter(|(j, _)| *j != col as usize)
                            .map(|(_, e)| *e)
                    })
                    .collect();
                Matrix {
                    data,
                    nrows: self.nrows,
                    ncols,
                }
            }
            Some(v) => {
                assert_eq!(
                    v.len(),
                    self.nrows as usize,
                    "Column length does not match the number of rows"
                );

                let mut m = self.clone();
                for (i, e) in v.iter().enumerate() {
                    m[(i as u32, col)] = *e;
                }
                m
            }
        }
    }

    /// Add two matrices of the same shape.
    pub fn add(&self, rhs: &Matrix) -> Result<Matrix, MatrixError> {
        self.zip_with(rhs, decimal::add)
    }

    /// Subtract `rhs` from `self`. Both must have the same shape.
    pub fn subtract(&self, rhs: &Matrix) -> Result<Matrix, MatrixError> {
        self.zip_with(rhs, decimal::sub)
    }

    fn zip_with(
        &self,
        rhs: &Matrix,
        f: impl Fn(&Decimal, &Decimal) -> Result<Decimal, MatrixError>,
    ) -> Result<Matrix, MatrixError> {
        if !self.size_equals(rhs) {
            return Err(MatrixError::ShapeMismatch {
                lhs: (self.nrows, self.ncols),
                rhs: (rhs.nrows, rhs.ncols),
            });
        }

        Ok(Matrix {
            data: self
                .data
                .iter()
                .zip(&rhs.data)
                .map(|(a, b)| f(a, b))
                .collect::<Result<_, _>>()?,
            nrows: self.nrows,
            ncols: self.ncols,
        })
    }

    /// Multiply two matrices.
    pub fn multiply(&self, rhs: &Matrix) -> Result<Matrix, MatrixError> {
        if self.ncols != rhs.nrows {
            return Err(MatrixError::DimensionMismatch {
                lhs: (self.nrows, self.ncols),
                rhs: (rhs.nrows, rhs.ncols),
            });
        }

        let mut m = Matrix::new(self.nrows, rhs.ncols);
        for i in 0..self.nrows {
            for j in 0..rhs.ncols {
                let sum = &mut m[(i, j)];
                for k in 0..self.ncols {
                    decimal::add_mul_assign(sum, &self[(i, k)], &rhs[(k, j)])?;
                }
            }
        }

        Ok(m)
    }

    /// Multiply the scalar `e` to each entry of the matrix.
    pub fn scale(&self, e: &Decimal) -> Result<Matrix, MatrixError> {
        Ok(Matrix {
            data: self
                .data
                .iter()
                .map(|ee| decimal::mul(ee, e))
                .collect::<Result<_, _>>()?,
            nrows: self.nrows,
            ncols: self.ncols,
        })
    }

    /// Compute the determinant by cofactor expansion along the first row.
    ///
    /// This stays in exact decimal arithmetic: no division is performed.
    /// The cost grows factorially with the size, which is fine for the
    /// small matrices this crate is meant for.
    pub fn det(&self) -> Result<Decimal, MatrixError> {
        if !self.is_square() {
            return Err(MatrixError::NotSquare {
                nrows: self.nrows,
                ncols: self.ncols,
            });
        }

        if self.is_empty() {
            return Err(MatrixError::Empty);
        }

        self.cofactor_expansion()
    }

    #[instrument(level = "trace", skip(self), fields(size = self.nrows))]
    fn cofactor_expansion(&self) -> Result<Decimal, MatrixError> {
        if self.nrows == 1 {
            return Ok(self.data[0]);
        }

        let mut det = Decimal::ZERO;
        for (i, e) in self.row(0).iter().enumerate() {
            let minor_det = self.minor(0, i as u32).cofactor_expansion()?;
            let term = decimal::mul(e, &minor_det)?;
            det = if i % 2 == 0 {
                decimal::add(&det, &term)?
            } else {
                decimal::sub(&det, &term)?
            };
        }

        trace!("det = {}", det);
        Ok(det)
    }
}

impl Index<(u32, u32)> for Matrix {
    type Output = Decimal;

    /// Get the `i`th row and `j`th column of the matrix, where `index=(i,j)`.
    #[inline]
    fn index(&self, index: (u32, u32)) -> &Self::Output {
        assert!(
            index.0 < self.nrows && index.1 < self.ncols,
            "Index ({},{}) out of bounds for a ({},{}) matrix",
            index.0,
            index.1,
            self.nrows,
            self.ncols
        );
        &self.data[index.0 as usize * self.ncols as usize + index.1 as usize]
    }
}

impl IndexMut<(u32, u32)> for Matrix {
    /// Get the `i`th row and `j`th column of the matrix, where `index=(i,j)`.
    #[inline]
    fn index_mut(&mut self, index: (u32, u32)) -> &mut Decimal {
        assert!(
            index.0 < self.nrows && index.1 < self.ncols,
            "Index ({},{}) out of bounds for a ({},{}) matrix",
            index.0,
            index.1,
            self.nrows,
            self.ncols
        );
        &mut self.data[index.0 as usize * self.ncols as usize + index.1 as usize]
    }
}

impl Display for Matrix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        MatrixPrinter::new(self).fmt(f)
    }
}

impl Neg for Matrix {
    type Output = Matrix;

    /// Negate each entry of the matrix.
    fn neg(mut self) -> Self::Output {
        for e in &mut self.data {
            *e = -*e;
        }

        self
    }
}
