//! Evaluation views: transient selections of basis indices at a fixed local
//! order, borrowed from an owning [`BasisFunctionSet`].

use crate::basis::{rational_basis_value, spline_basis_value};
use crate::error::BasisError;
use crate::set::{BasisFunctionSet, BasisVariant};
use ndarray::{s, Array1, Array2};
use std::ops::Range;

/// Which basis indices an evaluation covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexSelection {
    /// Every index in `[0, n)`.
    All,
    /// A single basis function.
    Single(usize),
    /// A contiguous index range.
    Span(Range<usize>),
}

impl IndexSelection {
    pub(crate) fn resolve(&self, count: usize) -> Range<usize> {
        match self {
            IndexSelection::All => 0..count,
            IndexSelection::Single(index) => *index..*index + 1,
            IndexSelection::Span(range) => range.clone(),
        }
    }
}

/// A transient evaluation request: an index selection and a fixed local order
/// over the owning set's knot vector, degree, transform, and weights.
///
/// Views borrow the set and never outlive it; they hold no state of their own
/// beyond the selection.
#[derive(Debug)]
pub struct EvaluationView<'a> {
    set: &'a BasisFunctionSet,
    selection: IndexSelection,
    order: usize,
}

impl<'a> EvaluationView<'a> {
    pub(crate) fn new(set: &'a BasisFunctionSet, selection: IndexSelection, order: usize) -> Self {
        Self {
            set,
            selection,
            order,
        }
    }

    pub fn order(&self) -> usize {
        self.order
    }

    pub fn selection(&self) -> &IndexSelection {
        &self.selection
    }

    /// Raw basis values, before the transform: a dense `n x samples` matrix
    /// with one row per basis index and one column per sample. Rows outside
    /// the selection are left at zero.
    pub fn compute_raw(&self, samples: &[f64]) -> Result<Array2<f64>, BasisError> {
        let knots = self.set.knots();
        let count = knots.count();
        let rows = self.selection.resolve(count);
        // Index n is admissible at selection time but has no matrix row.
        if rows.end > count {
            return Err(BasisError::InvalidIndex {
                index: rows.end - 1,
                count,
            });
        }

        let mut matrix = Array2::zeros((count, samples.len()));
        for (col, &u) in samples.iter().enumerate() {
            let span = knots.spot(u)?;
            for index in rows.clone() {
                let value = match self.set.variant() {
                    BasisVariant::Polynomial => {
                        spline_basis_value(index, self.order, span, u, knots)
                    }
                    BasisVariant::Rational { weights } => {
                        rational_basis_value(index, self.order, span, u, knots, weights)?
                    }
                };
                matrix[[index, col]] = value;
            }
        }
        Ok(matrix)
    }

    /// Transformed basis values: `A * compute_raw(samples)`, restricted to the
    /// selected rows. Applying the transform against the full-width raw buffer
    /// is what lets a derived set re-express raw lower-order values in its
    /// derivative basis.
    pub fn compute(&self, samples: &[f64]) -> Result<Array2<f64>, BasisError> {
        let raw = self.compute_raw(samples)?;
        let transformed = self.set.transform().dot(&raw);
        let rows = self.selection.resolve(self.set.count());
        Ok(transformed.slice(s![rows, ..]).to_owned())
    }

    /// Single-row variant of [`compute`](Self::compute) for one-index
    /// selections.
    pub fn compute_vector(&self, samples: &[f64]) -> Result<Array1<f64>, BasisError> {
        let index = match &self.selection {
            IndexSelection::Single(index) => *index,
            _ => {
                return Err(BasisError::NotSupported(
                    "compute_vector requires a single-index selection",
                ))
            }
        };
        let raw = self.compute_raw(samples)?;
        let transformed = self.set.transform().dot(&raw);
        Ok(transformed.row(index).to_owned())
    }
}
