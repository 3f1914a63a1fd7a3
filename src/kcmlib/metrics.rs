use ndarray::{ArrayView1, ArrayView2};
use ordered_float::OrderedFloat;
use std::cmp::Reverse;

/// Euclidean distance between two coordinate vectors of the same dimensionality.
///
/// # Parameters
/// - `a`: The first coordinate vector.
/// - `b`: The second coordinate vector.
///
/// # Returns
/// The straight-line distance between `a` and `b`.
pub fn distance(a: ArrayView1<f64>, b: ArrayView1<f64>) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(&x, &y)| (x - y).powi(2))
        .sum::<f64>()
        .sqrt()
}

/// `x * ln(x)` with the limit convention `0 * ln(0) = 0`
pub fn xlogx(x: f64) -> f64 {
    if x <= 0.0 {
        0.0
    } else {
        x * x.ln()
    }
}

/// Computes the normalized partition entropy of a membership table.
/// The entropy is `-(1 / ln(c)) * sum_i sum_k u_ik * ln(u_ik)` where `c` is the number of
/// clusters (columns). Lower values indicate a crisper partition.
///
/// # Parameters
/// - `memberships`: An `n x c` table, one row of fuzzy memberships per point.
///
/// # Returns
/// The entropy. A table with fewer than two columns has no defined normalization and
/// returns 0.0.
pub fn partition_entropy(memberships: ArrayView2<f64>) -> f64 {
    let c = memberships.ncols();
    if c < 2 {
        return 0.0;
    }
    let total: f64 = memberships.iter().map(|&u| xlogx(u)).sum();
    -total / (c as f64).ln()
}

/// Index of the largest membership. Ties go to the first maximal index.
///
/// # Returns
/// `None` when the membership vector is empty.
pub fn argmax(memberships: ArrayView1<f64>) -> Option<usize> {
    memberships
        .iter()
        .enumerate()
        .min_by_key(|&(_, &u)| Reverse(OrderedFloat(u)))
        .map(|(i, _)| i)
}

/// Largest absolute per-coordinate difference between two center tables.
/// Any NaN coordinate makes the result NaN so it can never pass a tolerance test.
pub fn max_shift(old: ArrayView2<f64>, new: ArrayView2<f64>) -> f64 {
    old.iter()
        .zip(new.iter())
        .map(|(&a, &b)| (a - b).abs())
        .fold(0.0, |acc: f64, d| if acc.is_nan() || d.is_nan() { f64::NAN } else { acc.max(d) })
}
