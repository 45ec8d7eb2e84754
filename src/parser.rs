//! Parse matrices from text.
//!
//! A matrix is written as one row per line with whitespace separated
//! entries. Both `.` and `,` are accepted as decimal separator:
//! ```text
//! 1 2,5 -3
//! 4 5   6.25
//! ```

use std::{fmt, str::FromStr};

use rust_decimal::Decimal;

use crate::{settings::DimensionLimits, tensors::matrix::Matrix};

/// Errors that can occur when parsing a matrix.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParseError {
    Empty,
    /// `row` is 1-based.
    InvalidNumber { row: usize, token: String },
    RaggedRow { row: usize, expected: usize, found: usize },
    TooManyRows { max: u32 },
    TooManyColumns { max: u32 },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ParseError::Empty => write!(f, "The input is empty"),
            ParseError::InvalidNumber { row, token } => {
                write!(f, "Cannot convert `{}` in row {} to a number", token, row)
            }
            ParseError::RaggedRow {
                row,
                expected,
                found,
            } => write!(
                f,
                "Row {} has {} entries, but row 1 has {}",
                row, found, expected
            ),
            ParseError::TooManyRows { max } => {
                write!(f, "The matrix may not have more than {} rows", max)
            }
            ParseError::TooManyColumns { max } => {
                write!(f, "The matrix may not have more than {} columns", max)
            }
        }
    }
}

impl std::error::Error for ParseError {}

/// Parse a single decimal number. A `,` is read as decimal separator.
pub fn parse_decimal(token: &str) -> Option<Decimal> {
    let unsigned = token.strip_prefix(['-', '+']).unwrap_or(token);

    let mut separators = 0;
    let mut digits = 0;
    for c in unsigned.chars() {
        match c {
            '0'..='9' => digits += 1,
            '.' | ',' => separators += 1,
            _ => return None,
        }
    }

    if digits == 0 || separators > 1 {
        return None;
    }

    let normalized = token.strip_prefix('+').unwrap_or(token).replace(',', ".");
    Decimal::from_str(&normalized).ok()
}

/// Parse a whitespace separated row of numbers. `row` is used for error reporting only.
pub fn parse_row(line: &str, row: usize) -> Result<Vec<Decimal>, ParseError> {
    line.split_whitespace()
        .map(|t| {
            parse_decimal(t).ok_or_else(|| ParseError::InvalidNumber {
                row,
                token: t.to_string(),
            })
        })
        .collect()
}

/// Parse a matrix with one row per line. Blank lines are skipped.
pub fn parse_matrix(input: &str, limits: &DimensionLimits) -> Result<Matrix, ParseError> {
    let lines: Vec<_> = input.lines().filter(|l| !l.trim().is_empty()).collect();

    if lines.is_empty() {
        return Err(ParseError::Empty);
    }

    if lines.len() > limits.max_rows as usize {
        return Err(ParseError::TooManyRows {
            max: limits.max_rows,
        });
    }

    let mut rows: Vec<Vec<Decimal>> = Vec::with_capacity(lines.len());
    for (i, l) in lines.iter().enumerate() {
        let r = parse_row(l, i + 1)?;

        if r.len() > limits.max_cols as usize {
            return Err(ParseError::TooManyColumns {
                max: limits.max_cols,
            });
        }

        if let Some(first) = rows.first() {
            if first.len() != r.len() {
                return Err(ParseError::RaggedRow {
                    row: i + 1,
                    expected: first.len(),
                    found: r.len(),
                });
            }
        }

        rows.push(r);
    }

    Ok(Matrix {
        nrows: rows.len() as u32,
        ncols: rows[0].len() as u32,
        data: rows.into_iter().flatten().collect(),
    })
}

impl FromStr for Matrix {
    type Err = ParseError;

    /// Parse a matrix within the default dimension limits.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_matrix(s, &DimensionLimits::default())
    }
}

#[cfg(test)]
mod test {
    use rust_decimal_macros::dec;

    use super::{parse_decimal, parse_matrix, parse_row, ParseError};
    use crate::{settings::DimensionLimits, tensors::matrix::Matrix};

    #[test]
    fn numbers() {
        assert_eq!(parse_decimal("12"), Some(dec!(12)));
        assert_eq!(parse_decimal("-2,5"), Some(dec!(-2.5)));
        assert_eq!(parse_decimal("+0.125"), Some(dec!(0.125)));
        assert_eq!(parse_decimal("1.2.3"), None);
        assert_eq!(parse_decimal("1e5"), None);
        assert_eq!(parse_decimal("-"), None);
        assert_eq!(parse_decimal(""), None);
        assert_eq!(parse_decimal("abc"), None);
    }

    #[test]
    fn row() {
        assert_eq!(
            parse_row("  1 2,5\t-3 ", 1),
            Ok(vec![dec!(1), dec!(2.5), dec!(-3)])
        );
        assert_eq!(
            parse_row("1 x", 4),
            Err(ParseError::InvalidNumber {
                row: 4,
                token: "x".to_string()
            })
        );
    }

    #[test]
    fn matrix() {
        let m: Matrix = "1 2 3\n4 5 6.5\n\n".parse().unwrap();
        assert_eq!((m.nrows(), m.ncols()), (2, 3));
        assert_eq!(m.get(1, 2), dec!(6.5));

        let m: Matrix = "1 2\r\n3 4\r\n".parse().unwrap();
        assert_eq!(m.row(1), &[dec!(3), dec!(4)]);
    }

    #[test]
    fn errors() {
        assert_eq!("".parse::<Matrix>(), Err(ParseError::Empty));
        assert_eq!(" \n \n".parse::<Matrix>(), Err(ParseError::Empty));
        assert_eq!(
            "1 2\n3".parse::<Matrix>(),
            Err(ParseError::RaggedRow {
                row: 2,
                expected: 2,
                found: 1
            })
        );

        let limits = DimensionLimits {
            max_rows: 2,
            max_cols: 2,
        };
        assert_eq!(
            parse_matrix("1\n2\n3", &limits),
            Err(ParseError::TooManyRows { max: 2 })
        );
        assert_eq!(
            parse_matrix("1 2 3", &limits),
            Err(ParseError::TooManyColumns { max: 2 })
        );
    }
}
