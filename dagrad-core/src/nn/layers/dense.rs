use crate::autograd::{Graph, NodeId};
use crate::error::DagradError;
use crate::nn::init::{rand_normal, rand_normal_vector};
use crate::ops::{add, mul, parameter};
use crate::value::Scalar;
use rand::Rng;

/// Fully connected layer `W · prev + b` on a column-vector input.
///
/// `W` (`size × prev_size`) and `b` (`size × 1`) are trainable parameters drawn
/// from N(0, gain / prev_size). A gain of 2 gives Kaiming initialisation.
///
/// Returns the output node together with the weight and bias nodes.
pub fn dense_layer<R: Rng + ?Sized>(
    graph: &mut Graph,
    prev: NodeId,
    prev_size: usize,
    size: usize,
    gain: Scalar,
    rng: &mut R,
) -> Result<(NodeId, NodeId, NodeId), DagradError> {
    if prev_size == 0 {
        return Err(DagradError::ConfigurationError(
            "dense layer input size must be positive".to_string(),
        ));
    }
    let std_dev = (gain / prev_size as Scalar).sqrt();
    let weight = parameter(graph, rand_normal(rng, size, prev_size, std_dev, 0.0)?);
    let bias = parameter(graph, rand_normal_vector(rng, size, std_dev, 0.0)?);
    let product = mul(graph, weight, prev)?;
    let output = add(graph, product, bias)?;
    Ok((output, weight, bias))
}

/// [`dense_layer`] returning only the output node.
pub fn dense<R: Rng + ?Sized>(
    graph: &mut Graph,
    prev: NodeId,
    prev_size: usize,
    size: usize,
    gain: Scalar,
    rng: &mut R,
) -> Result<NodeId, DagradError> {
    Ok(dense_layer(graph, prev, prev_size, size, gain, rng)?.0)
}

#[cfg(test)]
#[path = "dense_test.rs"]
mod tests;
