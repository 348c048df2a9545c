mod common;

use approx::assert_relative_eq;
use common::{init_logger, Probe};
use dagrad_core::ndarray::array;
use dagrad_core::ops::{add, constant, cos, mul, parameter, sin, sub, sum};
use dagrad_core::{DagradError, Executor, Graph, Value};

#[test]
fn test_diamond_gradient_sums_both_paths() {
    init_logger();
    let mut graph = Graph::new();
    let a = parameter(&mut graph, 2.0);
    let b = constant(&mut graph, 1.0);
    let c = add(&mut graph, a, b).unwrap();
    let d = mul(&mut graph, c, a).unwrap();
    let e = add(&mut graph, d, c).unwrap();

    let mut executor = Executor::new(&graph, e).unwrap();
    // e = (a + b)·a + (a + b) = 9
    assert_eq!(executor.propagate(&mut graph, true).unwrap(), &Value::Scalar(9.0));
    // de/da = (a + b) + a + 1
    assert_eq!(executor.gradient_of(a).unwrap(), Value::Scalar(6.0));
    // de/dc = a + 1
    assert_eq!(executor.gradient_of(c).unwrap(), Value::Scalar(3.0));
}

#[test]
fn test_shared_node_evaluated_once() {
    init_logger();
    let mut graph = Graph::new();
    let x = constant(&mut graph, 1.5);
    let probe = Probe::new(vec![x]);
    let evaluations = probe.evaluations.clone();
    let shared = graph.push(probe).unwrap();
    let left = sin(&mut graph, shared).unwrap();
    let right = cos(&mut graph, shared).unwrap();
    let root = add(&mut graph, left, right).unwrap();

    let mut executor = Executor::new(&graph, root).unwrap();
    executor.propagate(&mut graph, true).unwrap();
    assert_eq!(evaluations.get(), 1);
    executor.propagate(&mut graph, false).unwrap();
    assert_eq!(evaluations.get(), 2);

    let grad = executor.gradient_of(shared).unwrap().as_scalar().unwrap();
    assert_relative_eq!(grad, 1.5f64.cos() - 1.5f64.sin(), epsilon = 1e-12);
}

#[test]
fn test_repeated_input_receives_both_gradients() {
    let mut graph = Graph::new();
    let x = parameter(&mut graph, 3.0);
    let doubled = graph.push(Probe::new(vec![x, x])).unwrap();
    let mut executor = Executor::new(&graph, doubled).unwrap();
    assert_eq!(executor.propagate(&mut graph, true).unwrap(), &Value::Scalar(6.0));
    assert_eq!(executor.gradient_of(x).unwrap(), Value::Scalar(2.0));
}

#[test]
fn test_cycle_is_detected() {
    init_logger();
    let mut graph = Graph::new();
    let leaf = constant(&mut graph, 1.0);
    let first = Probe::new(vec![leaf]);
    let wiring = first.inputs.clone();
    let n1 = graph.push(first).unwrap();
    let n2 = graph.push(Probe::new(vec![n1])).unwrap();
    *wiring.borrow_mut() = vec![n2];

    let result = Executor::new(&graph, n2);
    assert!(matches!(result, Err(DagradError::CycleDetected { ordered: 0, reachable: 2 })));
}

#[test]
fn test_gradient_count_must_match_inputs() {
    let mut graph = Graph::new();
    let a = constant(&mut graph, 1.0);
    let b = constant(&mut graph, 2.0);
    let mut probe = Probe::new(vec![a, b]);
    probe.gradient_count = Some(1);
    let node = graph.push(probe).unwrap();

    let mut executor = Executor::new(&graph, node).unwrap();
    let result = executor.propagate(&mut graph, true);
    assert!(matches!(
        result,
        Err(DagradError::ArityMismatch { expected: 2, actual: 1, .. })
    ));
    // Forward-only propagation never calls differentiate.
    assert_eq!(executor.propagate(&mut graph, false).unwrap(), &Value::Scalar(3.0));
}

#[test]
fn test_cancelling_paths_give_matrix_zero() {
    let mut graph = Graph::new();
    let w = parameter(&mut graph, array![[1.0, 2.0], [3.0, 4.0]]);
    let x = constant(&mut graph, array![[1.0], [1.0]]);
    let lhs = mul(&mut graph, w, x).unwrap();
    // lhs - lhs does not depend on w.
    let diff = sub(&mut graph, lhs, lhs).unwrap();
    let total = sum(&mut graph, diff).unwrap();

    let mut executor = Executor::new(&graph, total).unwrap();
    executor.propagate(&mut graph, true).unwrap();
    assert_eq!(executor.gradient_of(w).unwrap(), Value::from(array![[0.0, 0.0], [0.0, 0.0]]));
}

#[test]
fn test_accumulation_matches_batch_sum() {
    let mut graph = Graph::new();
    let w = parameter(&mut graph, 0.5);
    let x = constant(&mut graph, 0.0);
    let y = mul(&mut graph, w, x).unwrap();

    let mut executor = Executor::new(&graph, y).unwrap();
    for sample in [1.0, 2.0, 3.0] {
        graph.set(x, sample).unwrap();
        executor.propagate(&mut graph, true).unwrap();
    }
    assert_eq!(executor.gradient_of(w).unwrap(), Value::Scalar(6.0));
    assert_eq!(executor.last_gradient_of(w).unwrap(), Value::Scalar(3.0));

    executor.clear_gradient();
    executor.propagate(&mut graph, true).unwrap();
    assert_eq!(executor.gradient_of(w).unwrap(), Value::Scalar(3.0));
}
