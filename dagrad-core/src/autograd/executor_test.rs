use super::*;
use crate::ops::{add, constant, div, mul, parameter, sum};
use crate::utils::testing::check_value_near;
use crate::value::Value;
use approx::assert_relative_eq;
use ndarray::array;

fn product_graph() -> (Graph, NodeId, NodeId, NodeId) {
    let mut graph = Graph::new();
    let a = parameter(&mut graph, 3.0);
    let b = constant(&mut graph, 4.0);
    let c = mul(&mut graph, a, b).unwrap();
    (graph, a, b, c)
}

#[test]
fn test_value_of_before_propagation() {
    let (mut graph, a, _b, c) = product_graph();
    let outside = constant(&mut graph, 0.0);
    let executor = Executor::new(&graph, c).unwrap();
    assert_eq!(executor.value_of(a), Err(DagradError::NotEvaluated(a)));
    assert_eq!(executor.value_of(outside), Err(DagradError::UnknownNode(outside)));
    assert!(executor.gradient_of(a).is_err());
    assert!(!executor.has_gradient());
}

#[test]
fn test_propagate_returns_root_value_and_gradients() {
    let (mut graph, a, b, c) = product_graph();
    let mut executor = Executor::new(&graph, c).unwrap();
    assert_eq!(executor.root(), c);
    assert_eq!(executor.propagate(&mut graph, true).unwrap(), &Value::Scalar(12.0));
    assert_eq!(executor.gradient_of(a).unwrap(), Value::Scalar(4.0));
    assert_eq!(executor.gradient_of(b).unwrap(), Value::Scalar(3.0));
    assert_eq!(executor.gradient_of(c).unwrap(), Value::Scalar(1.0));
    assert!(executor.has_gradient());
}

#[test]
fn test_forward_only_keeps_accumulated_gradients() {
    let (mut graph, a, _b, c) = product_graph();
    let mut executor = Executor::new(&graph, c).unwrap();
    executor.propagate(&mut graph, true).unwrap();
    graph.set(a, 10.0).unwrap();
    executor.propagate(&mut graph, false).unwrap();

    assert_eq!(executor.value_of(c).unwrap(), &Value::Scalar(40.0));
    assert_eq!(executor.last_gradient_of(a).unwrap(), Value::Scalar(0.0));
    assert_eq!(executor.gradient_of(a).unwrap(), Value::Scalar(4.0));
}

#[test]
fn test_gradients_accumulate_until_cleared() {
    let (mut graph, a, _b, c) = product_graph();
    let mut executor = Executor::new(&graph, c).unwrap();
    executor.propagate(&mut graph, true).unwrap();
    executor.propagate(&mut graph, true).unwrap();
    assert_eq!(executor.gradient_of(a).unwrap(), Value::Scalar(8.0));
    assert_eq!(executor.last_gradient_of(a).unwrap(), Value::Scalar(4.0));

    executor.clear_gradient();
    assert_eq!(executor.gradient_of(a).unwrap(), Value::Scalar(0.0));
    // Clearing does not forget that gradients were computed.
    assert!(executor.has_gradient());
}

#[test]
fn test_gradient_of_matrix_sum() {
    let mut graph = Graph::new();
    let x = parameter(&mut graph, array![[1.0, 2.0], [3.0, 4.0]]);
    let y = mul(&mut graph, x, x).unwrap();
    let total = sum(&mut graph, y).unwrap();
    let mut executor = Executor::new(&graph, total).unwrap();
    let loss = executor.propagate(&mut graph, true).unwrap().as_scalar().unwrap();
    // [[7, 10], [15, 22]]
    assert_relative_eq!(loss, 54.0);

    // d/dX sum(X·X) = 1·Xᵀ + Xᵀ·1
    check_value_near(&executor.gradient_of(x).unwrap(), (2, 2), &[7.0, 11.0, 9.0, 13.0], 1e-12);
}

#[test]
fn test_check_numerics_rejects_infinity() {
    let mut graph = Graph::new();
    let a = constant(&mut graph, 1.0);
    let b = constant(&mut graph, 2.0);
    let q = div(&mut graph, a, b).unwrap();

    let mut executor = Executor::with_options(&graph, q, ExecutorOptions { check_numerics: true }).unwrap();
    assert!(executor.options().check_numerics);
    assert_eq!(executor.propagate(&mut graph, false).unwrap(), &Value::Scalar(0.5));

    graph.set(b, 0.0).unwrap();
    let result = executor.propagate(&mut graph, false);
    assert!(matches!(result, Err(DagradError::InvalidValue { node, phase: "forward", .. }) if node == q));
    // The failed propagation leaves the previous values in place.
    assert_eq!(executor.value_of(q).unwrap(), &Value::Scalar(0.5));

    executor.set_check_numerics(false);
    let value = executor.propagate(&mut graph, false).unwrap().as_scalar().unwrap();
    assert!(value.is_infinite());
}

#[test]
fn test_positions_follow_topological_order() {
    let (graph, a, b, c) = product_graph();
    let executor = Executor::new(&graph, c).unwrap();
    assert_eq!(executor.topo_order(), &[a, b, c]);
    assert_eq!(executor.position_of(c), Some(2));
}

#[test]
fn test_to_dot() {
    let mut graph = Graph::new();
    let a = constant(&mut graph, 1.0);
    let b = constant(&mut graph, 2.0);
    let c = add(&mut graph, a, b).unwrap();
    let executor = Executor::new(&graph, c).unwrap();
    let dot = executor.to_dot(&graph).unwrap();
    assert_eq!(
        dot,
        "digraph g {\n  1[label=\"Constant\"];\n  2[label=\"Constant\"];\n  3[label=\"ScalarSum\"];\n  1->3;\n  2->3;\n}"
    );
}

#[test]
fn test_failed_accumulation_keeps_previous_caches() {
    let mut graph = Graph::new();
    let x = parameter(&mut graph, array![[1.0, 2.0]]);
    let total = sum(&mut graph, x).unwrap();
    let mut executor = Executor::new(&graph, total).unwrap();
    executor.propagate(&mut graph, true).unwrap();

    graph.set(x, array![[1.0, 2.0, 3.0]]).unwrap();
    let result = executor.propagate(&mut graph, true);
    assert!(matches!(result, Err(DagradError::ShapeMismatch { .. })));

    assert_eq!(executor.value_of(total).unwrap(), &Value::Scalar(3.0));
    assert_eq!(executor.value_of(x).unwrap(), &Value::from(array![[1.0, 2.0]]));
    assert_eq!(executor.gradient_of(x).unwrap(), Value::from(array![[1.0, 1.0]]));
    assert_eq!(executor.last_gradient_of(x).unwrap(), Value::from(array![[1.0, 1.0]]));

    // Clearing lets the new shape through.
    executor.clear_gradient();
    assert_eq!(executor.propagate(&mut graph, true).unwrap(), &Value::Scalar(6.0));
    assert_eq!(executor.gradient_of(x).unwrap(), Value::from(array![[1.0, 1.0, 1.0]]));
}
