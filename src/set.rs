//! The basis-function set facade: owns the knot vector, degree, transform
//! matrix, and (for NURBS) weights, and hands out evaluation views and
//! derived sets.

use crate::error::BasisError;
use crate::knots::KnotVector;
use crate::view::{EvaluationView, IndexSelection};
use log::debug;
use ndarray::{Array1, Array2};

/// Scalar-evaluation capability, fixed at construction.
#[derive(Debug, Clone, PartialEq)]
pub enum BasisVariant {
    /// Plain B-spline basis: the Cox–de Boor rule, no weights.
    Polynomial,
    /// NURBS basis: weighted normalization with strictly positive weights.
    Rational { weights: Vec<f64> },
}

/// A set of `n` basis functions over a knot vector, together with an `n x n`
/// transform matrix re-expressing raw basis values in a derived basis.
///
/// The transform starts as the identity. [`derivate`](Self::derivate) and
/// [`compose_transform`](Self::compose_transform) return new, independent
/// sets; an existing set is never mutated through them.
#[derive(Debug, Clone)]
pub struct BasisFunctionSet {
    knots: KnotVector,
    degree: usize,
    transform: Array2<f64>,
    variant: BasisVariant,
}

impl BasisFunctionSet {
    /// Polynomial (spline) basis set at the knot vector's own degree, with an
    /// identity transform.
    pub fn spline(knots: KnotVector) -> Self {
        let degree = knots.degree();
        let count = knots.count();
        debug!("creating spline basis set: degree={degree}, count={count}");
        Self {
            degree,
            transform: Array2::eye(count),
            knots,
            variant: BasisVariant::Polynomial,
        }
    }

    /// Rational (NURBS) basis set. Requires one strictly positive, finite
    /// weight per basis function.
    pub fn rational(knots: KnotVector, weights: Vec<f64>) -> Result<Self, BasisError> {
        let count = knots.count();
        if weights.len() != count {
            return Err(BasisError::WeightSizeMismatch {
                expected: count,
                found: weights.len(),
            });
        }
        for (index, &value) in weights.iter().enumerate() {
            if !value.is_finite() || value <= 0.0 {
                return Err(BasisError::InvalidWeight { index, value });
            }
        }
        let degree = knots.degree();
        debug!("creating rational basis set: degree={degree}, count={count}");
        Ok(Self {
            degree,
            transform: Array2::eye(count),
            knots,
            variant: BasisVariant::Rational { weights },
        })
    }

    /// Degree of this set. A derived set reports one less than its knot
    /// vector's own degree per derivation.
    pub fn degree(&self) -> usize {
        self.degree
    }

    /// Number of basis functions `n`.
    pub fn count(&self) -> usize {
        self.knots.count()
    }

    pub fn knots(&self) -> &KnotVector {
        &self.knots
    }

    pub fn transform(&self) -> &Array2<f64> {
        &self.transform
    }

    pub fn variant(&self) -> &BasisVariant {
        &self.variant
    }

    /// Weight vector for the rational variant, `None` for the polynomial one.
    pub fn weights(&self) -> Option<&[f64]> {
        match &self.variant {
            BasisVariant::Polynomial => None,
            BasisVariant::Rational { weights } => Some(weights),
        }
    }

    pub fn is_rational(&self) -> bool {
        matches!(self.variant, BasisVariant::Rational { .. })
    }

    /// Knot-span lookup passthrough, for collaborators that keep span-aligned
    /// bookkeeping of their own.
    pub fn spot(&self, u: f64) -> Result<usize, BasisError> {
        self.knots.spot(u)
    }

    /// Replaces the transform with a validated `n x n` matrix.
    pub fn with_transform(mut self, transform: Array2<f64>) -> Result<Self, BasisError> {
        let count = self.count();
        if transform.nrows() != count || transform.ncols() != count {
            return Err(BasisError::TransformShapeMismatch {
                expected: count,
                rows: transform.nrows(),
                cols: transform.ncols(),
            });
        }
        self.transform = transform;
        Ok(self)
    }

    /// Returns a new set whose transform is `A * matrix`, leaving `self`
    /// untouched. `derivate` is this composition with the differentiation
    /// matrix; advanced collaborators can compose arbitrary transforms.
    pub fn compose_transform(&self, matrix: &Array2<f64>) -> Result<Self, BasisError> {
        let count = self.count();
        if matrix.nrows() != count || matrix.ncols() != count {
            return Err(BasisError::TransformShapeMismatch {
                expected: count,
                rows: matrix.nrows(),
                cols: matrix.ncols(),
            });
        }
        let mut composed = self.clone();
        composed.transform = self.transform.dot(matrix);
        Ok(composed)
    }

    /// An evaluation view over an explicit index selection and local order.
    /// The order must lie in `[0, degree]`; indices may go up to and
    /// including `n` at selection time.
    pub fn select(
        &self,
        selection: IndexSelection,
        order: usize,
    ) -> Result<EvaluationView<'_>, BasisError> {
        if order > self.degree {
            return Err(BasisError::InvalidOrder {
                order,
                degree: self.degree,
            });
        }
        let count = self.count();
        let range = selection.resolve(count);
        if range.start > count || range.end > count + 1 {
            return Err(BasisError::InvalidIndex {
                index: range.start.max(range.end.saturating_sub(1)),
                count,
            });
        }
        Ok(EvaluationView::new(self, selection, order))
    }

    /// All indices at the set's own degree.
    pub fn select_all(&self) -> EvaluationView<'_> {
        EvaluationView::new(self, IndexSelection::All, self.degree)
    }

    /// Evaluates every basis function at the given samples: an `n x samples`
    /// matrix through the current transform.
    pub fn evaluate(&self, samples: &[f64]) -> Result<Array2<f64>, BasisError> {
        self.select_all().compute(samples)
    }

    /// Evaluates a single basis function across the samples.
    pub fn evaluate_one(&self, index: usize, samples: &[f64]) -> Result<Array1<f64>, BasisError> {
        self.select(IndexSelection::Single(index), self.degree)?
            .compute_vector(samples)
    }

    /// Evaluates every basis function at one parameter value: the `n`-vector
    /// column of [`evaluate`](Self::evaluate).
    pub fn evaluate_at(&self, u: f64) -> Result<Array1<f64>, BasisError> {
        let matrix = self.evaluate(&[u])?;
        Ok(matrix.column(0).to_owned())
    }

    /// Returns a new degree-`p - 1` set over the same knot vector whose
    /// transform is `A * D`, with `D` the bidiagonal differentiation matrix
    /// (`D[i, i] = a_i`, `D[i, i + 1] = -a_{i+1}`, `a_i = p / (U[i+p] - U[i])`
    /// or 0 on a zero-length span). This encodes
    /// `d/du B_{i,p} = a_i B_{i,p-1} - a_{i+1} B_{i+1,p-1}`; repeated calls
    /// compose further differentiation matrices.
    ///
    /// Only the polynomial variant can be derived: rational derivatives do
    /// not reduce to a transform composition, so they fail explicitly.
    pub fn derivate(&self) -> Result<Self, BasisError> {
        if self.is_rational() {
            return Err(BasisError::NotSupported(
                "derivatives of rational basis sets do not reduce to transform composition",
            ));
        }
        if self.degree == 0 {
            return Err(BasisError::InvalidDegree(self.degree));
        }

        let degree = self.degree;
        let count = self.count();
        let mut coefficients = vec![0.0; count];
        for (i, coefficient) in coefficients.iter_mut().enumerate() {
            let span = self.knots[i + degree] - self.knots[i];
            if span != 0.0 {
                *coefficient = degree as f64 / span;
            }
        }

        let mut diff = Array2::zeros((count, count));
        for i in 0..count {
            diff[[i, i]] = coefficients[i];
            if i + 1 < count {
                diff[[i, i + 1]] = -coefficients[i + 1];
            }
        }

        let mut derived = self.clone();
        derived.degree = degree - 1;
        derived.transform = self.transform.dot(&diff);
        debug!("derived basis set: degree {degree} -> {}", degree - 1);
        Ok(derived)
    }
}
