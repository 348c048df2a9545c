use super::*;
use crate::autograd::grad_check::check_gradients;
use crate::autograd::Executor;
use crate::ops::leaf::{constant, parameter};
use crate::value::Value;
use ndarray::array;

#[test]
fn test_sub_dispatch_keeps_operand_order() {
    let mut graph = Graph::new();
    let s = constant(&mut graph, 10.0);
    let m = constant(&mut graph, array![[1.0, 2.0]]);
    let ms = sub(&mut graph, m, s).unwrap();
    let sm = sub(&mut graph, s, m).unwrap();
    assert_eq!(graph.node(ms).unwrap().name(), "MatrixScalarDiff");
    assert_eq!(graph.node(sm).unwrap().name(), "ScalarMatrixDiff");

    let mut executor = Executor::new(&graph, sm).unwrap();
    assert_eq!(
        executor.propagate(&mut graph, false).unwrap(),
        &Value::from(array![[9.0, 8.0]])
    );
    let mut executor = Executor::new(&graph, ms).unwrap();
    assert_eq!(
        executor.propagate(&mut graph, false).unwrap(),
        &Value::from(array![[-9.0, -8.0]])
    );
}

#[test]
fn test_scalar_diff_gradient() {
    let mut graph = Graph::new();
    let a = parameter(&mut graph, 3.0);
    let b = parameter(&mut graph, 1.0);
    let d = sub(&mut graph, a, b).unwrap();
    let mut executor = Executor::new(&graph, d).unwrap();
    assert_eq!(executor.propagate(&mut graph, true).unwrap(), &Value::Scalar(2.0));
    assert_eq!(executor.gradient_of(a).unwrap(), Value::Scalar(1.0));
    assert_eq!(executor.gradient_of(b).unwrap(), Value::Scalar(-1.0));
}

#[test]
fn test_sub_gradients_numerically() {
    let mut graph = Graph::new();
    let s = parameter(&mut graph, 0.25);
    let m = parameter(&mut graph, array![[0.5, -1.5], [2.5, 0.1]]);
    let n = parameter(&mut graph, array![[1.0, 1.0], [0.0, -2.0]]);

    let mm = sub(&mut graph, m, n).unwrap();
    check_gradients(&mut graph, mm, &[m, n], 1e-6, 1e-4).unwrap();
    let ms = sub(&mut graph, m, s).unwrap();
    check_gradients(&mut graph, ms, &[m, s], 1e-6, 1e-4).unwrap();
    let sm = sub(&mut graph, s, m).unwrap();
    check_gradients(&mut graph, sm, &[s, m], 1e-6, 1e-4).unwrap();
}
