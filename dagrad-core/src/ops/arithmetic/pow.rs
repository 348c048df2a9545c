use crate::autograd::{Environment, NodeId, Operator};
use crate::error::DagradError;
use crate::value::{Value, ValueKind};

/// `base ^ exponent` for two scalars.
///
/// The exponent's gradient involves `ln(base)` and is only finite for a
/// positive base.
#[derive(Debug, Clone)]
pub struct ScalarPow {
    base: NodeId,
    exponent: NodeId,
}

impl ScalarPow {
    pub fn new(base: NodeId, exponent: NodeId) -> Self {
        ScalarPow { base, exponent }
    }
}

impl Operator for ScalarPow {
    fn name(&self) -> &'static str {
        "ScalarPow"
    }

    fn inputs(&self) -> Vec<NodeId> {
        vec![self.base, self.exponent]
    }

    fn output_kind(&self) -> ValueKind {
        ValueKind::Scalar
    }

    fn evaluate(&mut self, env: &Environment<'_>) -> Result<Value, DagradError> {
        Ok(Value::Scalar(env.scalar(self.base)?.powf(env.scalar(self.exponent)?)))
    }

    fn differentiate(&self, env: &Environment<'_>, output_grad: &Value) -> Result<Vec<Value>, DagradError> {
        let g = output_grad.as_scalar()?;
        let x = env.scalar(self.base)?;
        let p = env.scalar(self.exponent)?;
        Ok(vec![
            Value::Scalar(g * p * x.powf(p - 1.0)),
            Value::Scalar(g * x.ln() * x.powf(p)),
        ])
    }
}
