use crate::autograd::{Environment, Graph, NodeId, Operator};
use crate::error::DagradError;
use crate::ops::expect_kind;
use crate::utils::random::seeded_rng;
use crate::value::{Matrix, Scalar, Value, ValueKind};
use rand::rngs::StdRng;
use rand::Rng;

/// Randomly zeroes matrix elements while training.
///
/// In training mode each element is dropped with probability `rate` and the
/// mask drawn by the last evaluation is kept for the backward pass. Outputs are
/// not rescaled while training; in inference mode the whole input is scaled by
/// `1 - rate` instead.
#[derive(Debug, Clone)]
pub struct Dropout {
    operand: NodeId,
    rate: Scalar,
    training: bool,
    rng: StdRng,
    mask: Option<Matrix>,
}

impl Dropout {
    pub fn new(operand: NodeId, rate: Scalar, rng: StdRng) -> Result<Self, DagradError> {
        if !(0.0..1.0).contains(&rate) {
            return Err(DagradError::ConfigurationError(format!(
                "dropout rate must be in [0, 1), got {}",
                rate
            )));
        }
        Ok(Dropout {
            operand,
            rate,
            training: true,
            rng,
            mask: None,
        })
    }

    pub fn rate(&self) -> Scalar {
        self.rate
    }

    pub fn is_training(&self) -> bool {
        self.training
    }

    /// Mask applied by the last training-mode evaluation (1 = kept, 0 = dropped).
    pub fn mask(&self) -> Option<&Matrix> {
        self.mask.as_ref()
    }
}

impl Operator for Dropout {
    fn name(&self) -> &'static str {
        "Dropout"
    }

    fn inputs(&self) -> Vec<NodeId> {
        vec![self.operand]
    }

    fn output_kind(&self) -> ValueKind {
        ValueKind::Matrix
    }

    fn evaluate(&mut self, env: &Environment<'_>) -> Result<Value, DagradError> {
        let x = env.matrix(self.operand)?;
        if !self.training {
            self.mask = None;
            return Ok(Value::Matrix(x * (1.0 - self.rate)));
        }
        let rate = self.rate;
        let rng = &mut self.rng;
        let mask = Matrix::from_shape_fn(x.dim(), |_| if rng.gen::<Scalar>() < rate { 0.0 } else { 1.0 });
        let out = x * &mask;
        self.mask = Some(mask);
        Ok(Value::Matrix(out))
    }

    /// Follows whatever the last evaluation did, even if the mode was switched
    /// in between.
    fn differentiate(&self, _env: &Environment<'_>, output_grad: &Value) -> Result<Vec<Value>, DagradError> {
        let g = output_grad.as_matrix()?;
        match &self.mask {
            Some(mask) => {
                crate::value::ensure_same_shape(mask, g, self.name())?;
                Ok(vec![Value::Matrix(g * mask)])
            }
            None => Ok(vec![Value::Matrix(g * (1.0 - self.rate))]),
        }
    }

    fn set_training(&mut self, training: bool) {
        self.training = training;
    }
}

/// Adds a dropout node seeded from the system entropy source.
pub fn dropout(graph: &mut Graph, a: NodeId, rate: Scalar) -> Result<NodeId, DagradError> {
    dropout_with_rng(graph, a, rate, seeded_rng())
}

/// Adds a dropout node drawing its masks from `rng`.
pub fn dropout_with_rng(
    graph: &mut Graph,
    a: NodeId,
    rate: Scalar,
    rng: StdRng,
) -> Result<NodeId, DagradError> {
    expect_kind("dropout", graph.kind_of(a)?, &[ValueKind::Matrix])?;
    graph.push(Dropout::new(a, rate, rng)?)
}

#[cfg(test)]
#[path = "dropout_test.rs"]
mod tests;
