use crate::autograd::{Environment, NodeId, Operator};
use crate::error::DagradError;
use crate::value::{Value, ValueKind};

/// Flips the sign of a scalar or of every element of a matrix.
#[derive(Debug, Clone)]
pub struct Negation {
    operand: NodeId,
    kind: ValueKind,
}

impl Negation {
    pub fn new(operand: NodeId, kind: ValueKind) -> Self {
        Negation { operand, kind }
    }
}

impl Operator for Negation {
    fn name(&self) -> &'static str {
        match self.kind {
            ValueKind::Scalar => "ScalarNeg",
            _ => "MatrixNeg",
        }
    }

    fn inputs(&self) -> Vec<NodeId> {
        vec![self.operand]
    }

    fn output_kind(&self) -> ValueKind {
        self.kind
    }

    fn evaluate(&mut self, env: &Environment<'_>) -> Result<Value, DagradError> {
        Ok(env.value_of(self.operand)?.scale(-1.0))
    }

    fn differentiate(&self, _env: &Environment<'_>, output_grad: &Value) -> Result<Vec<Value>, DagradError> {
        Ok(vec![output_grad.scale(-1.0)])
    }
}
