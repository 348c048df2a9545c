use crate::autograd::{Environment, Graph, NodeId, Operator};
use crate::error::DagradError;
use crate::ops::unsupported;
use crate::value::{ensure_same_shape, Scalar, Value, ValueKind};

/// Keeps both logarithms of [`CrossEntropy`] finite at 0 and 1.
pub const CROSS_ENTROPY_EPSILON: Scalar = 1e-8;

/// Binary cross-entropy summed over every element:
/// `-Σ y·ln(ŷ + ε) - Σ (1 - y)·ln(1 + ε - ŷ)`.
///
/// Inputs are `(ŷ, y)`: the prediction first, then the target.
#[derive(Debug, Clone)]
pub struct CrossEntropy {
    prediction: NodeId,
    target: NodeId,
}

impl CrossEntropy {
    pub fn new(prediction: NodeId, target: NodeId) -> Self {
        CrossEntropy { prediction, target }
    }
}

impl Operator for CrossEntropy {
    fn name(&self) -> &'static str {
        "CrossEntropy"
    }

    fn inputs(&self) -> Vec<NodeId> {
        vec![self.prediction, self.target]
    }

    fn output_kind(&self) -> ValueKind {
        ValueKind::Scalar
    }

    fn evaluate(&mut self, env: &Environment<'_>) -> Result<Value, DagradError> {
        let y_hat = env.matrix(self.prediction)?;
        let y = env.matrix(self.target)?;
        ensure_same_shape(y_hat, y, self.name())?;
        let eps = CROSS_ENTROPY_EPSILON;
        let loss = y_hat
            .iter()
            .zip(y.iter())
            .map(|(&p, &t)| -t * (p + eps).ln() - (1.0 - t) * (1.0 + eps - p).ln())
            .sum::<Scalar>();
        Ok(Value::Scalar(loss))
    }

    fn differentiate(&self, env: &Environment<'_>, output_grad: &Value) -> Result<Vec<Value>, DagradError> {
        let g = output_grad.as_scalar()?;
        let y_hat = env.matrix(self.prediction)?;
        let y = env.matrix(self.target)?;
        let eps = CROSS_ENTROPY_EPSILON;
        let mut grad_prediction = y_hat.clone();
        let mut grad_target = y.clone();
        ndarray::Zip::from(&mut grad_prediction)
            .and(&mut grad_target)
            .and(y_hat)
            .and(y)
            .for_each(|dp, dt, &p, &t| {
                *dp = g * ((1.0 - t) / (1.0 + eps - p) - t / (p + eps));
                *dt = g * ((1.0 + eps - p).ln() - (p + eps).ln());
            });
        Ok(vec![Value::Matrix(grad_prediction), Value::Matrix(grad_target)])
    }
}

pub fn cross_entropy(graph: &mut Graph, prediction: NodeId, target: NodeId) -> Result<NodeId, DagradError> {
    match (graph.kind_of(prediction)?, graph.kind_of(target)?) {
        (ValueKind::Matrix, ValueKind::Matrix) => graph.push(CrossEntropy::new(prediction, target)),
        (lhs, rhs) => Err(unsupported("cross_entropy", lhs, rhs)),
    }
}

#[cfg(test)]
#[path = "cross_entropy_test.rs"]
mod tests;
