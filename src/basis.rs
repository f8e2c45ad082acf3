//! Scalar Cox–de Boor evaluation.
//!
//! The classical definition is a two-branch recursion in the local order `j`.
//! Evaluating it literally costs `O(2^j)` per call, so the functions here fill
//! a triangular table of orders `0..=j` instead, computing each cell exactly
//! once at `O(j^2)` per call while preserving the recursion's conventions:
//! zero-length sub-intervals contribute 0 (the 0/0 convention), and the last
//! degree-0 function extends to 1 at the domain's upper endpoint so the basis
//! covers the closed domain.

use crate::error::BasisError;
use crate::knots::KnotVector;

/// Value of the degree-`order` B-spline basis function `index`, evaluated at
/// `u` within knot span `span` (as returned by [`KnotVector::spot`]).
pub fn spline_basis_value(
    index: usize,
    order: usize,
    span: usize,
    u: f64,
    knots: &KnotVector,
) -> f64 {
    let n = knots.count();
    let m = knots.len() - 1;

    // Row `j` holds the order-`j` values for indices `index..=index + order - j`;
    // each pass shrinks the row by one until only the requested cell remains.
    let mut row = vec![0.0; order + 1];
    for (offset, cell) in row.iter_mut().enumerate() {
        let i = index + offset;
        *cell = if span >= i && (i == span || (i + 1 == n && span == n)) {
            1.0
        } else {
            0.0
        };
    }

    for j in 1..=order {
        for offset in 0..=(order - j) {
            let i = index + offset;
            row[offset] = if span < i || i + j < span {
                0.0
            } else {
                let factor1 = if i + j > m || knots[i] == knots[i + j] {
                    0.0
                } else {
                    (u - knots[i]) / (knots[i + j] - knots[i])
                };
                let factor2 = if i + j + 1 > m || knots[i + j + 1] == knots[i + 1] {
                    0.0
                } else {
                    (knots[i + j + 1] - u) / (knots[i + j + 1] - knots[i + 1])
                };
                factor1 * row[offset] + factor2 * row[offset + 1]
            };
        }
    }

    row[0]
}

/// Value of the rational (NURBS) basis function `index` at `u` within `span`:
/// `w[i] * N_i / sum_z(w[z] * N_z)`.
///
/// Short-circuits to 0 when the numerator basis value is 0. A zero
/// denominator with a nonzero numerator cannot occur for strictly positive
/// weights, but is guarded rather than divided through.
pub fn rational_basis_value(
    index: usize,
    order: usize,
    span: usize,
    u: f64,
    knots: &KnotVector,
    weights: &[f64],
) -> Result<f64, BasisError> {
    let numerator = spline_basis_value(index, order, span, u, knots);
    if numerator == 0.0 {
        return Ok(0.0);
    }

    let mut denominator = 0.0;
    for (z, &weight) in weights.iter().enumerate() {
        denominator += weight * spline_basis_value(z, order, span, u, knots);
    }
    if denominator == 0.0 {
        return Err(BasisError::DegenerateWeights);
    }

    Ok(weights[index] * numerator / denominator)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn knot_vector(values: &[f64]) -> KnotVector {
        KnotVector::new(values.to_vec()).expect("knot vector should be valid")
    }

    /// Literal transcription of the two-branch recursion, kept as an oracle to
    /// cross-validate the iterative table against the canonical definition.
    fn recursive_basis_value(
        index: usize,
        order: usize,
        span: usize,
        u: f64,
        knots: &KnotVector,
    ) -> f64 {
        let n = knots.count();
        let m = knots.len() - 1;

        if span < index {
            return 0.0;
        }
        if order == 0 {
            if index == span || (index + 1 == n && span == n) {
                return 1.0;
            }
            return 0.0;
        }
        if index + order < span {
            return 0.0;
        }

        let factor1 = if index + order > m || knots[index] == knots[index + order] {
            0.0
        } else {
            (u - knots[index]) / (knots[index + order] - knots[index])
        };
        let factor2 = if index + order + 1 > m || knots[index + order + 1] == knots[index + 1] {
            0.0
        } else {
            (knots[index + order + 1] - u) / (knots[index + order + 1] - knots[index + 1])
        };

        factor1 * recursive_basis_value(index, order - 1, span, u, knots)
            + factor2 * recursive_basis_value(index + 1, order - 1, span, u, knots)
    }

    fn sample_grid(points: usize) -> Vec<f64> {
        (0..=points).map(|i| i as f64 / points as f64).collect()
    }

    #[test]
    fn table_matches_recursive_definition() {
        let vectors = [
            vec![0.0, 0.0, 1.0, 1.0],
            vec![0.0, 0.0, 0.5, 1.0, 1.0],
            vec![0.0, 0.0, 0.0, 1.0, 1.0, 1.0],
            vec![0.0, 0.0, 0.0, 0.5, 1.0, 1.0, 1.0],
            vec![0.0, 0.0, 0.0, 0.0, 0.3, 0.3, 0.7, 1.0, 1.0, 1.0, 1.0],
        ];
        for values in vectors {
            let knots = knot_vector(&values);
            for &u in &sample_grid(37) {
                let span = knots.spot(u).unwrap();
                for index in 0..knots.count() {
                    for order in 0..=knots.degree() {
                        let iterative = spline_basis_value(index, order, span, u, &knots);
                        let recursive = recursive_basis_value(index, order, span, u, &knots);
                        assert_abs_diff_eq!(iterative, recursive, epsilon = 1e-12);
                    }
                }
            }
        }
    }

    #[test]
    fn single_values_linear_basis() {
        let knots = knot_vector(&[0.0, 0.0, 1.0, 1.0]);
        let value = |i, j, u: f64| {
            let span = knots.spot(u).unwrap();
            spline_basis_value(i, j, span, u, &knots)
        };

        // Order 0: the second indicator covers the whole domain, including the
        // boundary extension at u = 1.
        for &u in &[0.0, 0.5, 1.0] {
            assert_eq!(value(0, 0, u), 0.0);
            assert_eq!(value(1, 0, u), 1.0);
        }

        assert_eq!(value(0, 1, 0.0), 1.0);
        assert_eq!(value(0, 1, 0.5), 0.5);
        assert_eq!(value(0, 1, 1.0), 0.0);
        assert_eq!(value(1, 1, 0.0), 0.0);
        assert_eq!(value(1, 1, 0.5), 0.5);
        assert_eq!(value(1, 1, 1.0), 1.0);
    }

    #[test]
    fn single_values_quadratic_basis() {
        let knots = knot_vector(&[0.0, 0.0, 0.0, 1.0, 1.0, 1.0]);
        let value = |i, j, u: f64| {
            let span = knots.spot(u).unwrap();
            spline_basis_value(i, j, span, u, &knots)
        };

        for &u in &[0.0, 0.5, 1.0] {
            assert_eq!(value(0, 0, u), 0.0);
            assert_eq!(value(1, 0, u), 0.0);
            assert_eq!(value(2, 0, u), 1.0);
        }

        assert_eq!(value(1, 1, 0.0), 1.0);
        assert_eq!(value(1, 1, 0.5), 0.5);
        assert_eq!(value(1, 1, 1.0), 0.0);
        assert_eq!(value(2, 1, 0.0), 0.0);
        assert_eq!(value(2, 1, 0.5), 0.5);
        assert_eq!(value(2, 1, 1.0), 1.0);

        assert_eq!(value(0, 2, 0.0), 1.0);
        assert_eq!(value(0, 2, 0.5), 0.25);
        assert_eq!(value(0, 2, 1.0), 0.0);
        assert_eq!(value(1, 2, 0.5), 0.5);
        assert_eq!(value(2, 2, 0.5), 0.25);
        assert_eq!(value(2, 2, 1.0), 1.0);
    }

    #[test]
    fn partition_of_unity_at_full_order() {
        let vectors = [
            vec![0.0, 0.0, 1.0, 1.0],
            vec![0.0, 0.0, 0.0, 0.5, 1.0, 1.0, 1.0],
            vec![0.0, 0.0, 0.0, 0.0, 0.2, 0.6, 1.0, 1.0, 1.0, 1.0],
        ];
        for values in vectors {
            let knots = knot_vector(&values);
            let order = knots.degree();
            for &u in &sample_grid(53) {
                let span = knots.spot(u).unwrap();
                let total: f64 = (0..knots.count())
                    .map(|i| spline_basis_value(i, order, span, u, &knots))
                    .sum();
                assert_abs_diff_eq!(total, 1.0, epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn values_are_non_negative() {
        let knots = knot_vector(&[0.0, 0.0, 0.0, 0.0, 0.3, 0.7, 1.0, 1.0, 1.0, 1.0]);
        for &u in &sample_grid(41) {
            let span = knots.spot(u).unwrap();
            for index in 0..knots.count() {
                for order in 0..=knots.degree() {
                    assert!(spline_basis_value(index, order, span, u, &knots) >= 0.0);
                }
            }
        }
    }

    #[test]
    fn support_is_local() {
        let knots = knot_vector(&[0.0, 0.0, 0.0, 0.2, 0.4, 0.6, 0.8, 1.0, 1.0, 1.0]);
        for &u in &sample_grid(59) {
            let span = knots.spot(u).unwrap();
            for index in 0..knots.count() {
                for order in 0..=knots.degree() {
                    if u < knots[index] || u > knots[index + order + 1] {
                        assert_eq!(
                            spline_basis_value(index, order, span, u, &knots),
                            0.0,
                            "B_{{{index},{order}}}({u}) should vanish outside its support"
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn uniform_weights_reproduce_the_polynomial_basis() {
        let knots = knot_vector(&[0.0, 0.0, 0.0, 0.5, 1.0, 1.0, 1.0]);
        let weights = vec![1.0; knots.count()];
        for &u in &sample_grid(23) {
            let span = knots.spot(u).unwrap();
            for index in 0..knots.count() {
                let rational =
                    rational_basis_value(index, knots.degree(), span, u, &knots, &weights).unwrap();
                let spline = spline_basis_value(index, knots.degree(), span, u, &knots);
                assert_abs_diff_eq!(rational, spline, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn rational_values_form_a_partition_of_unity() {
        let knots = knot_vector(&[0.0, 0.0, 0.0, 0.5, 1.0, 1.0, 1.0]);
        let weights = vec![1.0, 0.25, 3.0, 0.5];
        for &u in &sample_grid(31) {
            let span = knots.spot(u).unwrap();
            let total: f64 = (0..knots.count())
                .map(|i| {
                    rational_basis_value(i, knots.degree(), span, u, &knots, &weights).unwrap()
                })
                .sum();
            assert_abs_diff_eq!(total, 1.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn rational_short_circuits_outside_the_support() {
        let knots = knot_vector(&[0.0, 0.0, 0.5, 1.0, 1.0]);
        // All-zero weights would make the denominator degenerate, but a zero
        // numerator never reaches it.
        let zero_weights = vec![0.0; knots.count()];
        let span = knots.spot(0.25).unwrap();
        assert_eq!(
            rational_basis_value(2, 1, span, 0.25, &knots, &zero_weights).unwrap(),
            0.0
        );
    }

    #[test]
    fn rational_guards_a_degenerate_denominator() {
        let knots = knot_vector(&[0.0, 0.0, 1.0, 1.0]);
        let zero_weights = vec![0.0, 0.0];
        let span = knots.spot(0.5).unwrap();
        assert!(matches!(
            rational_basis_value(0, 1, span, 0.5, &knots, &zero_weights),
            Err(BasisError::DegenerateWeights)
        ));
    }
}
