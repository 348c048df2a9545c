use super::executor::Executor;
use super::graph::Graph;
use super::operator::NodeId;
use crate::error::DagradError;
use crate::value::Value;
use approx::relative_eq;
use log::trace;
use thiserror::Error;

/// Error type specifically for gradient checking failures.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GradCheckError {
    #[error("Gradient check failed for leaf {input_index}, element {element_index}: analytical {analytical_grad:?} != numerical {numerical_grad:?} (difference {difference:?})")]
    GradientMismatch {
        input_index: usize,
        element_index: usize,
        analytical_grad: f64,
        numerical_grad: f64,
        difference: f64,
    },
    #[error("Numerical gradient is NaN or infinite for leaf {input_index}, element {element_index}. Loss+: {loss_plus:?}, Loss-: {loss_minus:?}")]
    NumericalGradNaNOrInfinite {
        input_index: usize,
        element_index: usize,
        loss_plus: f64,
        loss_minus: f64,
    },
    #[error("Analytical gradient is NaN or infinite for leaf {input_index}, element {element_index}. Value: {value:?}")]
    AnalyticalGradNaNOrInfinite {
        input_index: usize,
        element_index: usize,
        value: f64,
    },
    #[error("Gradient check input {input_index} must be a leaf holding a value.")]
    InputNotLeaf { input_index: usize },
    #[error("Graph error during gradient check: {0}")]
    Graph(DagradError),
}

impl From<DagradError> for GradCheckError {
    fn from(err: DagradError) -> Self {
        GradCheckError::Graph(err)
    }
}

/// Compares the gradients computed by back-propagation against central finite
/// differences.
///
/// The loss is the sum of every element of `root`'s value. Each element of each
/// leaf in `leaves` is nudged by `±epsilon`, and the graph is re-evaluated
/// without gradients. Leaves are restored to their original values before
/// returning, whatever the outcome.
pub fn check_gradients(
    graph: &mut Graph,
    root: NodeId,
    leaves: &[NodeId],
    epsilon: f64,
    tolerance: f64,
) -> Result<(), GradCheckError> {
    let mut executor = Executor::new(graph, root)?;
    executor.propagate(graph, true)?;
    let analytical = leaves
        .iter()
        .map(|&leaf| executor.last_gradient_of(leaf).map(|g| flatten(&g)))
        .collect::<Result<Vec<_>, _>>()?;

    for (i, &leaf) in leaves.iter().enumerate() {
        let original = match graph.node(leaf)?.stored_value() {
            Some(value) => value.clone(),
            None => return Err(GradCheckError::InputNotLeaf { input_index: i }),
        };
        let outcome = check_leaf(graph, &mut executor, leaf, i, &original, &analytical[i], epsilon, tolerance);
        graph.set(leaf, original)?;
        outcome?;
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn check_leaf(
    graph: &mut Graph,
    executor: &mut Executor,
    leaf: NodeId,
    input_index: usize,
    original: &Value,
    analytical: &[f64],
    epsilon: f64,
    tolerance: f64,
) -> Result<(), GradCheckError> {
    for (element_index, &analytical_grad) in analytical.iter().enumerate() {
        graph.set(leaf, nudge(original, element_index, epsilon))?;
        let loss_plus = executor.propagate(graph, false)?.sum();
        graph.set(leaf, nudge(original, element_index, -epsilon))?;
        let loss_minus = executor.propagate(graph, false)?.sum();

        let numerical_grad = (loss_plus - loss_minus) / (2.0 * epsilon);
        trace!(
            "grad_check: leaf {} element {}: analytical {} numerical {}",
            leaf,
            element_index,
            analytical_grad,
            numerical_grad
        );

        if !numerical_grad.is_finite() {
            return Err(GradCheckError::NumericalGradNaNOrInfinite {
                input_index,
                element_index,
                loss_plus,
                loss_minus,
            });
        }
        if !analytical_grad.is_finite() {
            return Err(GradCheckError::AnalyticalGradNaNOrInfinite {
                input_index,
                element_index,
                value: analytical_grad,
            });
        }
        if !relative_eq!(analytical_grad, numerical_grad, epsilon = tolerance, max_relative = tolerance) {
            return Err(GradCheckError::GradientMismatch {
                input_index,
                element_index,
                analytical_grad,
                numerical_grad,
                difference: (analytical_grad - numerical_grad).abs(),
            });
        }
    }
    Ok(())
}

/// Elements in row-major order, cube slices one after another.
fn flatten(value: &Value) -> Vec<f64> {
    match value {
        Value::Scalar(x) => vec![*x],
        Value::Matrix(m) => m.iter().copied().collect(),
        Value::Cube(c) => c.iter().flat_map(|m| m.iter().copied()).collect(),
    }
}

fn nudge(value: &Value, index: usize, delta: f64) -> Value {
    let mut nudged = value.clone();
    match &mut nudged {
        Value::Scalar(x) => *x += delta,
        Value::Matrix(m) => {
            if let Some(x) = m.iter_mut().nth(index) {
                *x += delta;
            }
        }
        Value::Cube(c) => {
            if let Some(x) = c.iter_mut().flat_map(|m| m.iter_mut()).nth(index) {
                *x += delta;
            }
        }
    }
    nudged
}
