use matrix_calculator::tensors::matrix::{Matrix, MatrixError};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn matrix(rows: &[&[Decimal]]) -> Matrix {
    Matrix::from_nested_vec(rows.iter().map(|r| r.to_vec()).collect()).unwrap()
}

fn samples() -> Vec<Matrix> {
    vec![
        matrix(&[&[dec!(1), dec!(2)], &[dec!(3), dec!(4)]]),
        matrix(&[&[dec!(0.1), dec!(-2.75)], &[dec!(0.0000000001), dec!(123456789)]]),
        matrix(&[
            &[dec!(2), dec!(-1), dec!(0)],
            &[dec!(0.5), dec!(3), dec!(1.25)],
            &[dec!(-7), dec!(0), dec!(4)],
        ]),
        matrix(&[&[dec!(1), dec!(2), dec!(3)], &[dec!(4), dec!(5), dec!(6)]]),
    ]
}

#[test]
fn double_transpose() {
    for a in samples() {
        assert_eq!(a.transpose().transpose(), a);
    }

    let a = &samples()[3];
    let t = a.transpose();
    assert_eq!((t.nrows(), t.ncols()), (3, 2));
    assert_eq!(t.get(2, 1), a.get(1, 2));
}

#[test]
fn addition_and_subtraction() {
    let a = matrix(&[&[dec!(0.1), dec!(7)], &[dec!(-3.3), dec!(2)]]);
    let b = matrix(&[&[dec!(0.2), dec!(-7)], &[dec!(1.05), dec!(0.00000000000000000001)]]);

    assert_eq!(a.add(&b).unwrap().subtract(&b).unwrap(), a);
    assert_eq!(a.add(&b).unwrap(), b.add(&a).unwrap());
    assert_eq!(a.add(&b).unwrap().get(0, 0), dec!(0.3));

    assert!(matches!(
        a.add(&samples()[3]),
        Err(MatrixError::ShapeMismatch { .. })
    ));
    assert!(matches!(
        a.subtract(&samples()[2]),
        Err(MatrixError::ShapeMismatch { .. })
    ));
}

#[test]
fn associativity() {
    let a = matrix(&[&[dec!(1), dec!(2), dec!(3)], &[dec!(-4), dec!(0.5), dec!(6)]]);
    let b = matrix(&[&[dec!(7), dec!(8)], &[dec!(-9), dec!(10)], &[dec!(0.25), dec!(12)]]);
    let c = matrix(&[&[dec!(2), dec!(0), dec!(1)], &[dec!(-1), dec!(3), dec!(0.1)]]);

    let left = a.multiply(&b).unwrap().multiply(&c).unwrap();
    let right = a.multiply(&b.multiply(&c).unwrap()).unwrap();
    assert_eq!(left, right);
    assert_eq!((left.nrows(), left.ncols()), (2, 3));

    assert!(matches!(
        a.multiply(&c),
        Err(MatrixError::DimensionMismatch {
            lhs: (2, 3),
            rhs: (2, 3)
        })
    ));
}

#[test]
fn scalar_multiplication() {
    let a = samples().remove(2);
    let s = a.scale(&dec!(-0.5)).unwrap();
    assert_eq!(s.get(1, 2), dec!(-0.625));
    assert!(s.size_equals(&a));
    assert_eq!(a.scale(&Decimal::ZERO).unwrap(), Matrix::new(3, 3));
}

#[test]
fn determinant_two_by_two() {
    for (a, b, c, d) in [
        (dec!(1), dec!(2), dec!(3), dec!(4)),
        (dec!(0.5), dec!(-1.25), dec!(8), dec!(3.3)),
        (dec!(0), dec!(0), dec!(0), dec!(0)),
        (dec!(0.000000000001), dec!(999999), dec!(7), dec!(-0.001)),
    ] {
        let m = matrix(&[&[a, b], &[c, d]]);
        assert_eq!(m.det().unwrap(), a * d - b * c);
    }
}

#[test]
fn determinant_diagonal() {
    let diag = [dec!(2), dec!(-3), dec!(0.5), dec!(7), dec!(1.1)];
    let m = Matrix::eye(&diag);
    let product = diag.iter().fold(Decimal::ONE, |acc, v| acc * *v);
    assert_eq!(m.det().unwrap(), product);

    assert_eq!(Matrix::identity(6).det().unwrap(), Decimal::ONE);
}

#[test]
fn determinant_errors() {
    assert_eq!(
        samples()[3].det(),
        Err(MatrixError::NotSquare { nrows: 2, ncols: 3 })
    );
    assert_eq!(
        samples()[3].trace(),
        Err(MatrixError::NotSquare { nrows: 2, ncols: 3 })
    );
    assert_eq!(Matrix::default().det(), Err(MatrixError::Empty));
}

#[test]
fn replace_column_round_trip() {
    let a = samples().remove(2);
    for j in 0..a.ncols() {
        let captured = a.column(j);
        let removed = a.replace_column(j, None);
        assert_eq!((removed.nrows(), removed.ncols()), (3, 2));

        // overwrite mode keeps the width and touches only column `j`
        let restored = a
            .replace_column(j, Some(&[Decimal::ZERO; 3][..]))
            .replace_column(j, Some(captured.as_slice()));
        assert_eq!(restored, a);
    }
}

#[test]
fn minor_shape_and_order() {
    let a = matrix(&[
        &[dec!(1), dec!(2), dec!(3), dec!(4)],
        &[dec!(5), dec!(6), dec!(7), dec!(8)],
        &[dec!(9), dec!(10), dec!(11), dec!(12)],
    ]);

    for r in 0..a.nrows() {
        for c in 0..a.ncols() {
            let m = a.minor(r, c);
            assert_eq!((m.nrows(), m.ncols()), (a.nrows() - 1, a.ncols() - 1));

            let expected: Vec<Decimal> = (0..a.nrows())
                .filter(|i| *i != r)
                .flat_map(|i| {
                    (0..a.ncols())
                        .filter(move |j| *j != c)
                        .map(move |j| (i, j))
                })
                .map(|(i, j)| a.get(i, j))
                .collect();
            let found: Vec<Decimal> = m.row_iter().flatten().copied().collect();
            assert_eq!(found, expected);
        }
    }
}

#[test]
fn operands_are_untouched() {
    let a = samples().remove(0);
    let b = samples().remove(0);
    let before = a.clone();

    let _ = a.add(&b);
    let _ = a.multiply(&b);
    let _ = a.scale(&dec!(3));
    let _ = a.transpose();
    let _ = a.minor(0, 0);
    let _ = a.replace_column(1, None);
    let _ = a.det();

    assert_eq!(a, before);
}

#[test]
fn overflow_aborts_operation() {
    let big = Matrix::from_linear(vec![Decimal::MAX, Decimal::MAX], 1, 2).unwrap();
    let col = Matrix::from_linear(vec![dec!(1), dec!(1)], 2, 1).unwrap();

    assert_eq!(big.multiply(&col), Err(MatrixError::Overflow));
    assert_eq!(big.get(0, 1), Decimal::MAX);
    assert_eq!(col.get(1, 0), dec!(1));
}
