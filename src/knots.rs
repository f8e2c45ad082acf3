use crate::error::BasisError;
use std::ops::Index;

/// An immutable, validated knot vector `U[0..=m]`.
///
/// The degree `p` is derived from the multiplicity of the first knot, and the
/// basis-function count is `n = (m + 1) - p - 1`. Construction enforces the
/// clamped contract: both end knots repeat exactly `p + 1` times, interior
/// knots repeat at most `p` times, and the sequence is non-decreasing.
#[derive(Debug, Clone, PartialEq)]
pub struct KnotVector {
    knots: Vec<f64>,
    degree: usize,
    count: usize,
}

impl KnotVector {
    /// Validates `knots` and derives the degree and basis-function count.
    pub fn new(knots: Vec<f64>) -> Result<Self, BasisError> {
        if knots.len() < 4 {
            return Err(BasisError::InvalidKnotVector(format!(
                "at least 4 knots are required, but only {} were provided",
                knots.len()
            )));
        }

        if knots.iter().any(|&k| !k.is_finite()) {
            return Err(BasisError::InvalidKnotVector(
                "knot vector contains non-finite (NaN or Infinity) values".to_string(),
            ));
        }

        for i in 0..(knots.len() - 1) {
            if knots[i] > knots[i + 1] {
                return Err(BasisError::InvalidKnotVector(
                    "knot vector is not non-decreasing".to_string(),
                ));
            }
        }

        let m = knots.len() - 1;
        if knots[0] == knots[m] {
            return Err(BasisError::InvalidKnotVector(
                "knot domain has zero width (first and last knots are equal)".to_string(),
            ));
        }

        let lead = knots.iter().take_while(|&&k| k == knots[0]).count();
        let trail = knots.iter().rev().take_while(|&&k| k == knots[m]).count();
        if trail != lead {
            return Err(BasisError::InvalidKnotVector(format!(
                "end multiplicities are inconsistent: the first knot repeats {lead} times but the last repeats {trail} times"
            )));
        }

        let degree = lead - 1;
        if degree == 0 {
            return Err(BasisError::InvalidKnotVector(
                "end multiplicity 1 implies degree 0, which admits no interior structure"
                    .to_string(),
            ));
        }

        // Interior multiplicity above p would make the basis ill-posed.
        let interior = &knots[lead..knots.len() - trail];
        let mut idx = 0;
        while idx < interior.len() {
            let mut run = 1;
            while idx + run < interior.len() && interior[idx + run] == interior[idx] {
                run += 1;
            }
            if run > degree {
                return Err(BasisError::InvalidKnotVector(format!(
                    "interior knot {} repeats {run} times, which exceeds the degree {degree}",
                    interior[idx]
                )));
            }
            idx += run;
        }

        let count = knots.len() - degree - 1;
        Ok(Self {
            knots,
            degree,
            count,
        })
    }

    /// Polynomial degree `p`.
    pub fn degree(&self) -> usize {
        self.degree
    }

    /// Number of basis functions `n`.
    pub fn count(&self) -> usize {
        self.count
    }

    pub fn len(&self) -> usize {
        self.knots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.knots.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.knots
    }

    /// Parametric domain `(U[0], U[m])`.
    pub fn domain(&self) -> (f64, f64) {
        (self.knots[0], self.knots[self.knots.len() - 1])
    }

    /// Knot-span index for `u`: the largest `idx` such that `U[idx] <= u`,
    /// capped at `n` so the span never lands inside the trailing clamp and
    /// `U[idx + 1]` stays addressable. For `u < U[m]` the cap is inert (the
    /// trailing clamp occupies indices `n..=m`); at the domain maximum the
    /// result is exactly `n`, which is what lets the last degree-0 basis
    /// function extend to 1 there.
    pub fn spot(&self, u: f64) -> Result<usize, BasisError> {
        let (min, max) = self.domain();
        if !(min <= u && u <= max) {
            return Err(BasisError::OutOfDomain {
                value: u,
                min,
                max,
            });
        }

        let cap = self.count;
        let mut span = 0;
        for idx in 1..=cap {
            if self.knots[idx] <= u {
                span = idx;
            } else {
                break;
            }
        }
        Ok(span)
    }

    /// Element-wise [`spot`](Self::spot) over a slice of samples. The output
    /// is non-decreasing whenever the input is.
    pub fn spots(&self, samples: &[f64]) -> Result<Vec<usize>, BasisError> {
        samples.iter().map(|&u| self.spot(u)).collect()
    }
}

impl Index<usize> for KnotVector {
    type Output = f64;

    fn index(&self, index: usize) -> &f64 {
        &self.knots[index]
    }
}
