//! Gauss-Jordan elimination on small fixed-size matrices.
//!
//! Only the tiny systems the projection pipeline needs are solved here: a
//! 2×3 augmented matrix for segment crossings and a 3×4 augmented matrix for
//! ray/plane projection. Degenerate systems are reported through
//! [`SolutionClass`], never by panicking or producing NaN.

use nalgebra::{Matrix2x3, Matrix3x4, SMatrix};

use super::{Vector2, Vector3};

/// Number of solutions of an augmented linear system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolutionClass {
    /// The system is inconsistent.
    None,
    /// Exactly one solution; it sits in the constant column after reduction.
    Unique,
    /// The system is consistent but rank deficient.
    Infinite,
}

/// Reduces `matrix` in place to (almost) reduced row-echelon form, with
/// leading 1s on the main diagonal where achievable, and classifies it.
///
/// With `augmented` set, the last column is the constant vector and the
/// returned class describes the number of solutions of the system. Without
/// it the matrix is treated as a homogeneous system, which has infinitely
/// many solutions exactly when the matrix is singular.
///
/// Every comparison against zero uses `tolerance`, so nearly parallel
/// directions come out as degenerate instead of barely unique.
///
/// Each pivot is the largest-magnitude entry at or below the diagonal, not
/// the first nonzero one. The choice only affects rounding; the returned
/// class is the one the first-nonzero rule gives.
pub fn row_reduce<const R: usize, const C: usize>(
    matrix: &mut SMatrix<f64, R, C>,
    augmented: bool,
    tolerance: f64,
) -> SolutionClass {
    let unknowns = if augmented { C.saturating_sub(1) } else { C };
    let pivots = R.min(unknowns);

    for i in 0..pivots {
        // A column without a usable pivot is skipped; the zero left on the
        // diagonal is what classification picks up later.
        let Some(pivot_row) = find_pivot_row(matrix, i, tolerance) else {
            continue;
        };
        if pivot_row != i {
            matrix.swap_rows(i, pivot_row);
        }

        let pivot = matrix[(i, i)];
        for col in 0..C {
            matrix[(i, col)] /= pivot;
        }

        for row in 0..R {
            if row == i {
                continue;
            }
            let factor = matrix[(row, i)];
            for col in 0..C {
                let value = matrix[(i, col)];
                matrix[(row, col)] -= factor * value;
            }
        }
    }

    classify(matrix, augmented, pivots, unknowns, tolerance)
}

/// Picks the row at or below `column` with the largest entry in `column`,
/// provided that entry is not zero within `tolerance`.
fn find_pivot_row<const R: usize, const C: usize>(
    matrix: &SMatrix<f64, R, C>,
    column: usize,
    tolerance: f64,
) -> Option<usize> {
    (column..R)
        .filter(|&row| matrix[(row, column)].abs() >= tolerance)
        .max_by(|&a, &b| {
            matrix[(a, column)]
                .abs()
                .total_cmp(&matrix[(b, column)].abs())
        })
}

fn classify<const R: usize, const C: usize>(
    matrix: &SMatrix<f64, R, C>,
    augmented: bool,
    pivots: usize,
    unknowns: usize,
    tolerance: f64,
) -> SolutionClass {
    let zero = |value: f64| value.abs() < tolerance;

    if !augmented {
        let singular = unknowns > R || (0..pivots).any(|k| zero(matrix[(k, k)]));
        return if singular {
            SolutionClass::Infinite
        } else {
            SolutionClass::Unique
        };
    }

    let constant = C - 1;
    let mut class = SolutionClass::Unique;

    if let Some(k) = (0..pivots).find(|&k| zero(matrix[(k, k)])) {
        class = if zero(matrix[(k, constant)]) {
            SolutionClass::Infinite
        } else {
            SolutionClass::None
        };
    }

    // Rows past the pivoted block only exist for over-determined systems;
    // a leftover constant there means the extra equations disagree.
    if (pivots..R).any(|row| !zero(matrix[(row, constant)])) {
        return SolutionClass::None;
    }

    if class == SolutionClass::Unique && unknowns > R {
        SolutionClass::Infinite
    } else {
        class
    }
}

/// Builds the 2×3 augmented matrix `[a | b | constant]`.
#[must_use]
pub fn augmented_2x3(a: &Vector2, b: &Vector2, constant: &Vector2) -> Matrix2x3<f64> {
    Matrix2x3::from_columns(&[*a, *b, *constant])
}

/// Builds the 3×4 augmented matrix `[a | b | c | constant]`.
#[must_use]
pub fn augmented_3x4(a: &Vector3, b: &Vector3, c: &Vector3, constant: &Vector3) -> Matrix3x4<f64> {
    Matrix3x4::from_columns(&[*a, *b, *c, *constant])
}

/// Solves `x * a + y * b = constant`, returning `(x, y)` when the solution is unique.
#[must_use]
pub fn solve_2x3(a: &Vector2, b: &Vector2, constant: &Vector2, tolerance: f64) -> Option<(f64, f64)> {
    let mut matrix = augmented_2x3(a, b, constant);
    match row_reduce(&mut matrix, true, tolerance) {
        SolutionClass::Unique => Some((matrix[(0, 2)], matrix[(1, 2)])),
        SolutionClass::None | SolutionClass::Infinite => None,
    }
}

/// Solves `x * a + y * b + z * c = constant`, returning `(x, y, z)` when the
/// solution is unique.
#[must_use]
pub fn solve_3x4(
    a: &Vector3,
    b: &Vector3,
    c: &Vector3,
    constant: &Vector3,
    tolerance: f64,
) -> Option<Vector3> {
    let mut matrix = augmented_3x4(a, b, c, constant);
    match row_reduce(&mut matrix, true, tolerance) {
        SolutionClass::Unique => Some(matrix.column(3).into_owned()),
        SolutionClass::None | SolutionClass::Infinite => None,
    }
}
