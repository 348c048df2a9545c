//! # Operator library (`ops`)
//!
//! Concrete implementations of [`Operator`](crate::autograd::Operator), grouped
//! by family, plus builder functions that add them to a [`Graph`](crate::autograd::Graph).
//!
//! Builders pick the concrete operator from the *declared* kinds of their
//! operands when the node is created. Combinations without a defined rule are
//! rejected immediately with [`DagradError::UnsupportedCombination`] (binary)
//! or [`DagradError::UnsupportedKind`] (unary); nothing is coerced.
//!
//! - [`leaf`]: constants (settable inputs) and trainable parameters.
//! - [`arithmetic`]: `add`, `sub`, `mul`, `div`, `neg`, `pow` and the
//!   element-wise matrix product and quotient.
//! - [`linalg`]: matrix product and dot product.
//! - [`reduction`]: sum and max over every element of a matrix.
//! - [`math_elem`]: element-wise functions (`sin`, `exp`, `mish`, ...).
//! - [`activation`]: softmax and dropout.
//! - [`loss`]: cross-entropy.

use crate::error::DagradError;
use crate::value::ValueKind;

pub mod activation;
pub mod arithmetic;
pub mod leaf;
pub mod linalg;
pub mod loss;
pub mod math_elem;
pub mod reduction;

pub use activation::{dropout, dropout_with_rng, softmax};
pub use arithmetic::{add, cwise_product, cwise_quotient, div, mul, neg, pow, sub};
pub use leaf::{constant, parameter};
pub use linalg::{dot, matmul};
pub use loss::cross_entropy;
pub use math_elem::{cos, exp, log, lrelu, mish, sigmoid, sin, tanh, Function};
pub use reduction::{max, sum};

pub(crate) fn unsupported(operation: &str, lhs: ValueKind, rhs: ValueKind) -> DagradError {
    DagradError::UnsupportedCombination {
        operation: operation.to_string(),
        lhs,
        rhs,
    }
}

/// Fails unless `kind` is one of `allowed`.
pub(crate) fn expect_kind(
    operation: &str,
    kind: ValueKind,
    allowed: &[ValueKind],
) -> Result<(), DagradError> {
    if allowed.contains(&kind) {
        Ok(())
    } else {
        Err(DagradError::UnsupportedKind {
            operation: operation.to_string(),
            kind,
        })
    }
}
