use crate::autograd::{Environment, NodeId, Operator};
use crate::error::DagradError;
use crate::value::{ensure_same_shape, Value, ValueKind};

#[derive(Debug, Clone)]
pub struct ScalarDiff {
    lhs: NodeId,
    rhs: NodeId,
}

#[derive(Debug, Clone)]
pub struct MatrixDiff {
    lhs: NodeId,
    rhs: NodeId,
}

/// `matrix - scalar`, element by element.
#[derive(Debug, Clone)]
pub struct MatrixScalarDiff {
    matrix: NodeId,
    scalar: NodeId,
}

/// `scalar - matrix`, element by element.
#[derive(Debug, Clone)]
pub struct ScalarMatrixDiff {
    scalar: NodeId,
    matrix: NodeId,
}

impl ScalarDiff {
    pub fn new(lhs: NodeId, rhs: NodeId) -> Self {
        ScalarDiff { lhs, rhs }
    }
}

impl MatrixDiff {
    pub fn new(lhs: NodeId, rhs: NodeId) -> Self {
        MatrixDiff { lhs, rhs }
    }
}

impl MatrixScalarDiff {
    pub fn new(matrix: NodeId, scalar: NodeId) -> Self {
        MatrixScalarDiff { matrix, scalar }
    }
}

impl ScalarMatrixDiff {
    pub fn new(scalar: NodeId, matrix: NodeId) -> Self {
        ScalarMatrixDiff { scalar, matrix }
    }
}

impl Operator for ScalarDiff {
    fn name(&self) -> &'static str {
        "ScalarDiff"
    }

    fn inputs(&self) -> Vec<NodeId> {
        vec![self.lhs, self.rhs]
    }

    fn output_kind(&self) -> ValueKind {
        ValueKind::Scalar
    }

    fn evaluate(&mut self, env: &Environment<'_>) -> Result<Value, DagradError> {
        Ok(Value::Scalar(env.scalar(self.lhs)? - env.scalar(self.rhs)?))
    }

    fn differentiate(&self, _env: &Environment<'_>, output_grad: &Value) -> Result<Vec<Value>, DagradError> {
        let g = output_grad.as_scalar()?;
        Ok(vec![Value::Scalar(g), Value::Scalar(-g)])
    }
}

impl Operator for MatrixDiff {
    fn name(&self) -> &'static str {
        "MatrixDiff"
    }

    fn inputs(&self) -> Vec<NodeId> {
        vec![self.lhs, self.rhs]
    }

    fn output_kind(&self) -> ValueKind {
        ValueKind::Matrix
    }

    fn evaluate(&mut self, env: &Environment<'_>) -> Result<Value, DagradError> {
        let a = env.matrix(self.lhs)?;
        let b = env.matrix(self.rhs)?;
        ensure_same_shape(a, b, self.name())?;
        Ok(Value::Matrix(a - b))
    }

    fn differentiate(&self, _env: &Environment<'_>, output_grad: &Value) -> Result<Vec<Value>, DagradError> {
        let g = output_grad.as_matrix()?;
        Ok(vec![Value::Matrix(g.clone()), Value::Matrix(-g)])
    }
}

impl Operator for MatrixScalarDiff {
    fn name(&self) -> &'static str {
        "MatrixScalarDiff"
    }

    fn inputs(&self) -> Vec<NodeId> {
        vec![self.matrix, self.scalar]
    }

    fn output_kind(&self) -> ValueKind {
        ValueKind::Matrix
    }

    fn evaluate(&mut self, env: &Environment<'_>) -> Result<Value, DagradError> {
        let s = env.scalar(self.scalar)?;
        Ok(Value::Matrix(env.matrix(self.matrix)?.mapv(|x| x - s)))
    }

    fn differentiate(&self, _env: &Environment<'_>, output_grad: &Value) -> Result<Vec<Value>, DagradError> {
        let g = output_grad.as_matrix()?;
        Ok(vec![Value::Matrix(g.clone()), Value::Scalar(-g.sum())])
    }
}

impl Operator for ScalarMatrixDiff {
    fn name(&self) -> &'static str {
        "ScalarMatrixDiff"
    }

    fn inputs(&self) -> Vec<NodeId> {
        vec![self.scalar, self.matrix]
    }

    fn output_kind(&self) -> ValueKind {
        ValueKind::Matrix
    }

    fn evaluate(&mut self, env: &Environment<'_>) -> Result<Value, DagradError> {
        let s = env.scalar(self.scalar)?;
        Ok(Value::Matrix(env.matrix(self.matrix)?.mapv(|x| s - x)))
    }

    fn differentiate(&self, _env: &Environment<'_>, output_grad: &Value) -> Result<Vec<Value>, DagradError> {
        let g = output_grad.as_matrix()?;
        Ok(vec![Value::Scalar(g.sum()), Value::Matrix(-g)])
    }
}
