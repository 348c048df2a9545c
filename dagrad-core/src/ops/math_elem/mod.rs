//! Element-wise real functions.
//!
//! A [`Function`] is applied to a scalar node directly or to every element of
//! a matrix node. The chain rule is applied element by element:
//! `dx = f'(x) ⊙ g`.

use crate::autograd::{Environment, Graph, NodeId, Operator};
use crate::error::DagradError;
use crate::ops::expect_kind;
use crate::value::{Scalar, Value, ValueKind};

/// Offset added to the argument of [`Function::Log`] so that `log(0)` stays finite.
pub const LOG_EPSILON: Scalar = 1e-8;

/// Slope of [`Function::LeakyRelu`] for non-positive inputs.
pub const LRELU_SLOPE: Scalar = 0.01;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Function {
    Sin,
    Cos,
    /// `ln(x + 1e-8)`
    Log,
    Exp,
    Tanh,
    Sigmoid,
    LeakyRelu,
    /// `x · tanh(ln(1 + eˣ))`
    Mish,
}

fn sigmoid_of(x: Scalar) -> Scalar {
    1.0 / (1.0 + (-x).exp())
}

impl Function {
    pub fn name(self) -> &'static str {
        match self {
            Function::Sin => "Sin",
            Function::Cos => "Cos",
            Function::Log => "Log",
            Function::Exp => "Exp",
            Function::Tanh => "Tanh",
            Function::Sigmoid => "Sigmoid",
            Function::LeakyRelu => "LeakyRelu",
            Function::Mish => "Mish",
        }
    }

    pub fn apply(self, x: Scalar) -> Scalar {
        match self {
            Function::Sin => x.sin(),
            Function::Cos => x.cos(),
            Function::Log => (x + LOG_EPSILON).ln(),
            Function::Exp => x.exp(),
            Function::Tanh => x.tanh(),
            Function::Sigmoid => sigmoid_of(x),
            Function::LeakyRelu => {
                if x > 0.0 {
                    x
                } else {
                    LRELU_SLOPE * x
                }
            }
            Function::Mish => x * x.exp().ln_1p().tanh(),
        }
    }

    /// First derivative at `x`.
    pub fn derivative(self, x: Scalar) -> Scalar {
        match self {
            Function::Sin => x.cos(),
            Function::Cos => -x.sin(),
            Function::Log => 1.0 / (x + LOG_EPSILON),
            Function::Exp => x.exp(),
            Function::Tanh => 1.0 - x.tanh().powi(2),
            Function::Sigmoid => {
                let s = sigmoid_of(x);
                s * (1.0 - s)
            }
            Function::LeakyRelu => {
                if x > 0.0 {
                    1.0
                } else {
                    LRELU_SLOPE
                }
            }
            Function::Mish => {
                let t = x.exp().ln_1p().tanh();
                t + x * sigmoid_of(x) * (1.0 - t * t)
            }
        }
    }
}

/// Applies a [`Function`] to a scalar or to every element of a matrix.
#[derive(Debug, Clone)]
pub struct ElementWise {
    operand: NodeId,
    function: Function,
    kind: ValueKind,
}

impl ElementWise {
    pub fn new(operand: NodeId, function: Function, kind: ValueKind) -> Self {
        ElementWise { operand, function, kind }
    }

    pub fn function(&self) -> Function {
        self.function
    }
}

impl Operator for ElementWise {
    fn name(&self) -> &'static str {
        self.function.name()
    }

    fn inputs(&self) -> Vec<NodeId> {
        vec![self.operand]
    }

    fn output_kind(&self) -> ValueKind {
        self.kind
    }

    fn evaluate(&mut self, env: &Environment<'_>) -> Result<Value, DagradError> {
        let f = self.function;
        Ok(env.value_of(self.operand)?.map(|x| f.apply(x)))
    }

    fn differentiate(&self, env: &Environment<'_>, output_grad: &Value) -> Result<Vec<Value>, DagradError> {
        let f = self.function;
        let slope = env.value_of(self.operand)?.map(|x| f.derivative(x));
        Ok(vec![slope.zip_map(output_grad, f.name(), |d, g| d * g)?])
    }
}

/// Adds `function(a)`. `a` must be a scalar or a matrix.
pub fn apply(graph: &mut Graph, a: NodeId, function: Function) -> Result<NodeId, DagradError> {
    let kind = graph.kind_of(a)?;
    expect_kind(function.name(), kind, &[ValueKind::Scalar, ValueKind::Matrix])?;
    graph.push(ElementWise::new(a, function, kind))
}

pub fn sin(graph: &mut Graph, a: NodeId) -> Result<NodeId, DagradError> {
    apply(graph, a, Function::Sin)
}

pub fn cos(graph: &mut Graph, a: NodeId) -> Result<NodeId, DagradError> {
    apply(graph, a, Function::Cos)
}

pub fn log(graph: &mut Graph, a: NodeId) -> Result<NodeId, DagradError> {
    apply(graph, a, Function::Log)
}

pub fn exp(graph: &mut Graph, a: NodeId) -> Result<NodeId, DagradError> {
    apply(graph, a, Function::Exp)
}

pub fn tanh(graph: &mut Graph, a: NodeId) -> Result<NodeId, DagradError> {
    apply(graph, a, Function::Tanh)
}

pub fn sigmoid(graph: &mut Graph, a: NodeId) -> Result<NodeId, DagradError> {
    apply(graph, a, Function::Sigmoid)
}

pub fn lrelu(graph: &mut Graph, a: NodeId) -> Result<NodeId, DagradError> {
    apply(graph, a, Function::LeakyRelu)
}

pub fn mish(graph: &mut Graph, a: NodeId) -> Result<NodeId, DagradError> {
    apply(graph, a, Function::Mish)
}

#[cfg(test)]
#[path = "math_elem_test.rs"]
mod tests;
