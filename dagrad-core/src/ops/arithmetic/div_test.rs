use super::*;
use crate::autograd::grad_check::check_gradients;
use crate::autograd::Executor;
use crate::ops::leaf::{constant, parameter};
use crate::value::Value;
use approx::assert_relative_eq;
use ndarray::array;

#[test]
fn test_div_rejects_matrix_divisor() {
    let mut graph = Graph::new();
    let s = constant(&mut graph, 2.0);
    let m = constant(&mut graph, array![[1.0]]);
    assert!(matches!(
        div(&mut graph, m, m),
        Err(DagradError::UnsupportedCombination { lhs: ValueKind::Matrix, rhs: ValueKind::Matrix, .. })
    ));
    assert!(div(&mut graph, s, m).is_err());
    assert!(div(&mut graph, m, s).is_ok());
}

#[test]
fn test_scalar_quotient_forward_and_gradient() {
    let mut graph = Graph::new();
    let a = parameter(&mut graph, 3.0);
    let b = parameter(&mut graph, 2.0);
    let q = div(&mut graph, a, b).unwrap();
    let mut executor = Executor::new(&graph, q).unwrap();
    assert_eq!(executor.propagate(&mut graph, true).unwrap(), &Value::Scalar(1.5));
    assert_relative_eq!(executor.gradient_of(a).unwrap().as_scalar().unwrap(), 0.5);
    assert_relative_eq!(executor.gradient_of(b).unwrap().as_scalar().unwrap(), -0.75);
}

#[test]
fn test_div_gradients_numerically() {
    let mut graph = Graph::new();
    let s = parameter(&mut graph, 1.3);
    let m = parameter(&mut graph, array![[0.5, -1.5], [2.5, 0.1]]);
    let n = parameter(&mut graph, array![[1.2, 0.9], [-0.7, 2.0]]);

    let ms = div(&mut graph, m, s).unwrap();
    check_gradients(&mut graph, ms, &[m, s], 1e-6, 1e-4).unwrap();
    let cq = cwise_quotient(&mut graph, m, n).unwrap();
    check_gradients(&mut graph, cq, &[m, n], 1e-6, 1e-4).unwrap();
    let ss = div(&mut graph, s, s).unwrap();
    check_gradients(&mut graph, ss, &[s], 1e-6, 1e-4).unwrap();
}
