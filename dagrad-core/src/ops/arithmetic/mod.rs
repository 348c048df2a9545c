//! Arithmetic builders and the operators they dispatch to.
//!
//! | builder | S,S            | M,M            | M,S                    | S,M                    |
//! |---------|----------------|----------------|------------------------|------------------------|
//! | `add`   | ScalarSum      | MatrixSum      | MatrixScalarSum        | MatrixScalarSum (swap) |
//! | `sub`   | ScalarDiff     | MatrixDiff     | MatrixScalarDiff       | ScalarMatrixDiff       |
//! | `mul`   | ScalarProduct  | MatrixProduct  | MatrixScalarProduct (swap) | MatrixScalarProduct |
//! | `div`   | ScalarQuotient | -              | MatrixScalarQuotient   | -                      |

pub mod add;
pub mod div;
pub mod mul;
pub mod neg;
pub mod pow;
pub mod sub;

pub use add::{MatrixScalarSum, MatrixSum, ScalarSum};
pub use div::{MatrixCwiseQuotient, MatrixScalarQuotient, ScalarQuotient};
pub use mul::{MatrixCwiseProduct, MatrixScalarProduct, ScalarProduct};
pub use neg::Negation;
pub use pow::ScalarPow;
pub use sub::{MatrixDiff, MatrixScalarDiff, ScalarDiff, ScalarMatrixDiff};

use super::linalg::MatrixProduct;
use super::{expect_kind, unsupported};
use crate::autograd::{Graph, NodeId};
use crate::error::DagradError;
use crate::value::ValueKind;

pub fn add(graph: &mut Graph, a: NodeId, b: NodeId) -> Result<NodeId, DagradError> {
    match (graph.kind_of(a)?, graph.kind_of(b)?) {
        (ValueKind::Scalar, ValueKind::Scalar) => graph.push(ScalarSum::new(a, b)),
        (ValueKind::Matrix, ValueKind::Matrix) => graph.push(MatrixSum::new(a, b)),
        (ValueKind::Matrix, ValueKind::Scalar) => graph.push(MatrixScalarSum::new(a, b)),
        (ValueKind::Scalar, ValueKind::Matrix) => graph.push(MatrixScalarSum::new(b, a)),
        (lhs, rhs) => Err(unsupported("add", lhs, rhs)),
    }
}

pub fn sub(graph: &mut Graph, a: NodeId, b: NodeId) -> Result<NodeId, DagradError> {
    match (graph.kind_of(a)?, graph.kind_of(b)?) {
        (ValueKind::Scalar, ValueKind::Scalar) => graph.push(ScalarDiff::new(a, b)),
        (ValueKind::Matrix, ValueKind::Matrix) => graph.push(MatrixDiff::new(a, b)),
        (ValueKind::Matrix, ValueKind::Scalar) => graph.push(MatrixScalarDiff::new(a, b)),
        (ValueKind::Scalar, ValueKind::Matrix) => graph.push(ScalarMatrixDiff::new(a, b)),
        (lhs, rhs) => Err(unsupported("sub", lhs, rhs)),
    }
}

/// Multiplication. Two matrices give the matrix product, not the
/// element-wise one (see [`cwise_product`]).
pub fn mul(graph: &mut Graph, a: NodeId, b: NodeId) -> Result<NodeId, DagradError> {
    match (graph.kind_of(a)?, graph.kind_of(b)?) {
        (ValueKind::Scalar, ValueKind::Scalar) => graph.push(ScalarProduct::new(a, b)),
        (ValueKind::Matrix, ValueKind::Matrix) => graph.push(MatrixProduct::new(a, b)),
        (ValueKind::Matrix, ValueKind::Scalar) => graph.push(MatrixScalarProduct::new(b, a)),
        (ValueKind::Scalar, ValueKind::Matrix) => graph.push(MatrixScalarProduct::new(a, b)),
        (lhs, rhs) => Err(unsupported("mul", lhs, rhs)),
    }
}

pub fn div(graph: &mut Graph, a: NodeId, b: NodeId) -> Result<NodeId, DagradError> {
    match (graph.kind_of(a)?, graph.kind_of(b)?) {
        (ValueKind::Scalar, ValueKind::Scalar) => graph.push(ScalarQuotient::new(a, b)),
        (ValueKind::Matrix, ValueKind::Scalar) => graph.push(MatrixScalarQuotient::new(a, b)),
        (lhs, rhs) => Err(unsupported("div", lhs, rhs)),
    }
}

pub fn neg(graph: &mut Graph, a: NodeId) -> Result<NodeId, DagradError> {
    let kind = graph.kind_of(a)?;
    expect_kind("neg", kind, &[ValueKind::Scalar, ValueKind::Matrix])?;
    graph.push(Negation::new(a, kind))
}

pub fn pow(graph: &mut Graph, base: NodeId, exponent: NodeId) -> Result<NodeId, DagradError> {
    match (graph.kind_of(base)?, graph.kind_of(exponent)?) {
        (ValueKind::Scalar, ValueKind::Scalar) => graph.push(ScalarPow::new(base, exponent)),
        (lhs, rhs) => Err(unsupported("pow", lhs, rhs)),
    }
}

pub fn cwise_product(graph: &mut Graph, a: NodeId, b: NodeId) -> Result<NodeId, DagradError> {
    match (graph.kind_of(a)?, graph.kind_of(b)?) {
        (ValueKind::Matrix, ValueKind::Matrix) => graph.push(MatrixCwiseProduct::new(a, b)),
        (lhs, rhs) => Err(unsupported("cwise_product", lhs, rhs)),
    }
}

pub fn cwise_quotient(graph: &mut Graph, a: NodeId, b: NodeId) -> Result<NodeId, DagradError> {
    match (graph.kind_of(a)?, graph.kind_of(b)?) {
        (ValueKind::Matrix, ValueKind::Matrix) => graph.push(MatrixCwiseQuotient::new(a, b)),
        (lhs, rhs) => Err(unsupported("cwise_quotient", lhs, rhs)),
    }
}

#[cfg(test)]
#[path = "div_test.rs"]
mod div_test;
#[cfg(test)]
#[path = "sub_test.rs"]
mod sub_test;
