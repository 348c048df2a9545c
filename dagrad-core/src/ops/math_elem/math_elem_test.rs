use super::*;
use crate::autograd::grad_check::check_gradients;
use crate::autograd::Executor;
use crate::ops::leaf::{constant, parameter};
use approx::assert_relative_eq;
use ndarray::array;

const ALL: [Function; 8] = [
    Function::Sin,
    Function::Cos,
    Function::Log,
    Function::Exp,
    Function::Tanh,
    Function::Sigmoid,
    Function::LeakyRelu,
    Function::Mish,
];

#[test]
fn test_known_values() {
    assert_relative_eq!(Function::Sigmoid.apply(0.0), 0.5);
    assert_relative_eq!(Function::LeakyRelu.apply(-2.0), -0.02);
    assert_relative_eq!(Function::LeakyRelu.apply(3.0), 3.0);
    assert_relative_eq!(Function::Log.apply(1.0), (1.0 + 1e-8f64).ln());
    assert!(Function::Log.apply(0.0).is_finite());
    assert_relative_eq!(Function::Mish.apply(0.0), 0.0);
    assert_relative_eq!(Function::Mish.apply(1.0), 0.8650983882673103, epsilon = 1e-12);
}

#[test]
fn test_derivatives_match_central_differences() {
    let h = 1e-6;
    for f in ALL {
        for &x in &[-1.3, -0.2, 0.4, 1.7] {
            if f == Function::Log && x <= 0.0 {
                continue;
            }
            let numeric = (f.apply(x + h) - f.apply(x - h)) / (2.0 * h);
            assert_relative_eq!(f.derivative(x), numeric, epsilon = 1e-5, max_relative = 1e-5);
        }
    }
}

#[test]
fn test_scalar_and_broadcast_kinds() {
    let mut graph = Graph::new();
    let s = constant(&mut graph, 0.5);
    let m = constant(&mut graph, array![[0.0, 1.0]]);
    let fs = exp(&mut graph, s).unwrap();
    let fm = exp(&mut graph, m).unwrap();
    assert_eq!(graph.kind_of(fs).unwrap(), ValueKind::Scalar);
    assert_eq!(graph.kind_of(fm).unwrap(), ValueKind::Matrix);
    assert_eq!(graph.node(fm).unwrap().name(), "Exp");

    let mut executor = Executor::new(&graph, fm).unwrap();
    let out = executor.propagate(&mut graph, false).unwrap().as_matrix().unwrap().clone();
    assert_relative_eq!(out[[0, 0]], 1.0);
    assert_relative_eq!(out[[0, 1]], std::f64::consts::E);
}

#[test]
fn test_cube_operand_is_rejected() {
    let mut graph = Graph::new();
    let c = constant(&mut graph, vec![array![[1.0]]]);
    assert!(matches!(
        mish(&mut graph, c),
        Err(DagradError::UnsupportedKind { kind: ValueKind::Cube, .. })
    ));
}

#[test]
fn test_every_function_gradient_numerically() {
    for f in ALL {
        let mut graph = Graph::new();
        let s = parameter(&mut graph, 0.7);
        let m = parameter(&mut graph, array![[0.3, 1.2], [2.1, 0.05]]);
        let fs = apply(&mut graph, s, f).unwrap();
        let fm = apply(&mut graph, m, f).unwrap();
        check_gradients(&mut graph, fs, &[s], 1e-6, 1e-4).unwrap();
        check_gradients(&mut graph, fm, &[m], 1e-6, 1e-4).unwrap();
    }
}
