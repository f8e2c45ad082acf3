//! B-spline and NURBS basis-function evaluation.
//!
//! The crate evaluates basis functions over a parametric domain defined by a
//! validated, clamped knot vector, and derives new basis-function sets from
//! existing ones through transform-matrix composition — most notably
//! derivative bases via [`BasisFunctionSet::derivate`].
//!
//! ```
//! use nurbs_basis::{BasisFunctionSet, KnotVector};
//!
//! let knots = KnotVector::new(vec![0.0, 0.0, 0.0, 1.0, 1.0, 1.0])?;
//! let basis = BasisFunctionSet::spline(knots);
//!
//! // One row per basis function, one column per sample.
//! let values = basis.evaluate(&[0.0, 0.5, 1.0])?;
//! assert_eq!(values.shape(), &[3, 3]);
//!
//! // The derivative basis is the same machinery behind a composed transform.
//! let first = basis.derivate()?;
//! assert_eq!(first.degree(), 1);
//! # Ok::<(), nurbs_basis::BasisError>(())
//! ```

#![deny(dead_code)]
#![deny(unused_imports)]

pub mod basis;
pub mod error;
pub mod knots;
pub mod set;
pub mod view;

pub use basis::{rational_basis_value, spline_basis_value};
pub use error::BasisError;
pub use knots::KnotVector;
pub use set::{BasisFunctionSet, BasisVariant};
pub use view::{EvaluationView, IndexSelection};
