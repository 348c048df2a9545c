//! The value union shared by forward outputs and gradients.
//!
//! Every node evaluates to a [`Value`] and every gradient flowing backward is a
//! [`Value`] of the same kind. Arithmetic between values is always kind-matched:
//! there is no implicit coercion between scalars, matrices and cubes.

use crate::error::DagradError;
use ndarray::{Array2, Zip};
use std::fmt;

pub type Scalar = f64;
pub type Matrix = Array2<Scalar>;
/// A short list of matrices. The first dimension is expected to be small (channels).
pub type Cube = Vec<Matrix>;

/// Identifies which variant of [`Value`] a node produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Scalar,
    Matrix,
    Cube,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::Scalar => "Scalar",
            ValueKind::Matrix => "Matrix",
            ValueKind::Cube => "Cube",
        };
        f.write_str(name)
    }
}

/// The unified value type.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Scalar(Scalar),
    Matrix(Matrix),
    Cube(Cube),
}

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Scalar(_) => ValueKind::Scalar,
            Value::Matrix(_) => ValueKind::Matrix,
            Value::Cube(_) => ValueKind::Cube,
        }
    }

    pub fn as_scalar(&self) -> Result<Scalar, DagradError> {
        match self {
            Value::Scalar(x) => Ok(*x),
            other => Err(kind_error(ValueKind::Scalar, other, "as_scalar")),
        }
    }

    pub fn as_matrix(&self) -> Result<&Matrix, DagradError> {
        match self {
            Value::Matrix(m) => Ok(m),
            other => Err(kind_error(ValueKind::Matrix, other, "as_matrix")),
        }
    }

    pub fn as_cube(&self) -> Result<&Cube, DagradError> {
        match self {
            Value::Cube(c) => Ok(c),
            other => Err(kind_error(ValueKind::Cube, other, "as_cube")),
        }
    }

    pub fn into_matrix(self) -> Result<Matrix, DagradError> {
        match self {
            Value::Matrix(m) => Ok(m),
            other => Err(kind_error(ValueKind::Matrix, &other, "into_matrix")),
        }
    }

    /// A value of the same kind and shape filled with ones. Seeds the backward pass.
    pub fn ones_like(&self) -> Value {
        self.map(|_| 1.0)
    }

    /// A value of the same kind and shape filled with zeros.
    pub fn zeros_like(&self) -> Value {
        self.map(|_| 0.0)
    }

    /// Applies `f` to every element, preserving kind and shape.
    pub fn map<F>(&self, f: F) -> Value
    where
        F: Fn(Scalar) -> Scalar,
    {
        match self {
            Value::Scalar(x) => Value::Scalar(f(*x)),
            Value::Matrix(m) => Value::Matrix(m.mapv(&f)),
            Value::Cube(c) => Value::Cube(c.iter().map(|m| m.mapv(&f)).collect()),
        }
    }

    /// Combines two values of the same kind and shape element by element.
    pub fn zip_map<F>(&self, other: &Value, operation: &str, f: F) -> Result<Value, DagradError>
    where
        F: Fn(Scalar, Scalar) -> Scalar,
    {
        match (self, other) {
            (Value::Scalar(a), Value::Scalar(b)) => Ok(Value::Scalar(f(*a, *b))),
            (Value::Matrix(a), Value::Matrix(b)) => {
                ensure_same_shape(a, b, operation)?;
                Ok(Value::Matrix(Zip::from(a).and(b).map_collect(|&x, &y| f(x, y))))
            }
            (Value::Cube(a), Value::Cube(b)) => {
                ensure_same_depth(a, b, operation)?;
                let mut slices = Vec::with_capacity(a.len());
                for (x, y) in a.iter().zip(b) {
                    ensure_same_shape(x, y, operation)?;
                    slices.push(Zip::from(x).and(y).map_collect(|&p, &q| f(p, q)));
                }
                Ok(Value::Cube(slices))
            }
            (lhs, rhs) => Err(kind_error(lhs.kind(), rhs, operation)),
        }
    }

    pub fn scale(&self, factor: Scalar) -> Value {
        self.map(|x| factor * x)
    }

    /// Adds `other` into `self` in place. Both must have the same kind and shape.
    pub fn accumulate(&mut self, other: &Value) -> Result<(), DagradError> {
        match (&mut *self, other) {
            (Value::Scalar(a), Value::Scalar(b)) => *a += *b,
            (Value::Matrix(a), Value::Matrix(b)) => {
                ensure_same_shape(a, b, "accumulate")?;
                *a += b;
            }
            (Value::Cube(a), Value::Cube(b)) => {
                ensure_same_depth(a, b, "accumulate")?;
                for (x, y) in a.iter_mut().zip(b) {
                    ensure_same_shape(x, y, "accumulate")?;
                    *x += y;
                }
            }
            (lhs, rhs) => return Err(kind_error(lhs.kind(), rhs, "accumulate")),
        }
        Ok(())
    }

    /// Fails unless `other` has the same kind and shape as `self`, that is
    /// unless `self.accumulate(other)` would succeed.
    pub fn ensure_same_layout(&self, other: &Value, operation: &str) -> Result<(), DagradError> {
        match (self, other) {
            (Value::Scalar(_), Value::Scalar(_)) => Ok(()),
            (Value::Matrix(a), Value::Matrix(b)) => ensure_same_shape(a, b, operation),
            (Value::Cube(a), Value::Cube(b)) => {
                ensure_same_depth(a, b, operation)?;
                a.iter().zip(b).try_for_each(|(x, y)| ensure_same_shape(x, y, operation))
            }
            (lhs, rhs) => Err(kind_error(lhs.kind(), rhs, operation)),
        }
    }

    /// Sum of every element.
    pub fn sum(&self) -> Scalar {
        match self {
            Value::Scalar(x) => *x,
            Value::Matrix(m) => m.sum(),
            Value::Cube(c) => c.iter().map(|m| m.sum()).sum(),
        }
    }

    /// Describes the first NaN or infinite entry, if any.
    pub fn non_finite(&self) -> Option<String> {
        fn scan(m: &Matrix, label: &str) -> Option<String> {
            if m.iter().any(|x| x.is_nan()) {
                return Some(format!("{label} nan"));
            }
            if m.iter().any(|x| x.is_infinite()) {
                return Some(format!("{label} inf"));
            }
            None
        }
        match self {
            Value::Scalar(x) if x.is_nan() => Some("scalar nan".to_string()),
            Value::Scalar(x) if x.is_infinite() => Some("scalar inf".to_string()),
            Value::Scalar(_) => None,
            Value::Matrix(m) => scan(m, "matrix"),
            Value::Cube(c) => c.iter().find_map(|m| scan(m, "cube")),
        }
    }
}

impl From<Scalar> for Value {
    fn from(x: Scalar) -> Self {
        Value::Scalar(x)
    }
}

impl From<Matrix> for Value {
    fn from(m: Matrix) -> Self {
        Value::Matrix(m)
    }
}

impl From<Cube> for Value {
    fn from(c: Cube) -> Self {
        Value::Cube(c)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Scalar(x) => write!(f, "{x}"),
            Value::Matrix(m) => write!(f, "{m}"),
            Value::Cube(c) => {
                for (i, m) in c.iter().enumerate() {
                    writeln!(f, "[{i}]")?;
                    writeln!(f, "{m}")?;
                }
                Ok(())
            }
        }
    }
}

fn kind_error(expected: ValueKind, actual: &Value, operation: &str) -> DagradError {
    DagradError::TypeMismatch {
        expected,
        actual: actual.kind(),
        operation: operation.to_string(),
    }
}

pub(crate) fn ensure_same_shape(a: &Matrix, b: &Matrix, operation: &str) -> Result<(), DagradError> {
    if a.dim() != b.dim() {
        return Err(DagradError::ShapeMismatch {
            expected: a.shape().to_vec(),
            actual: b.shape().to_vec(),
            operation: operation.to_string(),
        });
    }
    Ok(())
}

fn ensure_same_depth(a: &Cube, b: &Cube, operation: &str) -> Result<(), DagradError> {
    if a.len() != b.len() {
        return Err(DagradError::ShapeMismatch {
            expected: vec![a.len()],
            actual: vec![b.len()],
            operation: operation.to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
#[path = "value_test.rs"]
mod tests;
