use super::*;
use crate::autograd::Executor;
use ndarray::array;

#[test]
fn test_constant_is_settable_but_not_updatable() {
    let mut graph = Graph::new();
    let x = constant(&mut graph, 1.5);
    assert!(!graph.node(x).unwrap().is_updatable());

    graph.set(x, 4.0).unwrap();
    assert_eq!(graph.leaf_value(x).unwrap(), &Value::Scalar(4.0));

    let mut executor = Executor::new(&graph, x).unwrap();
    assert_eq!(executor.propagate(&mut graph, false).unwrap(), &Value::Scalar(4.0));
}

#[test]
fn test_set_rejects_other_kind() {
    let mut graph = Graph::new();
    let x = constant(&mut graph, array![[1.0, 2.0]]);
    let result = graph.set(x, 3.0);
    assert!(matches!(
        result,
        Err(DagradError::TypeMismatch { expected: ValueKind::Matrix, actual: ValueKind::Scalar, .. })
    ));
}

#[test]
fn test_parameter_applies_delta_in_place() {
    let mut graph = Graph::new();
    let w = parameter(&mut graph, array![[1.0, 2.0]]);
    let node = graph.node_mut(w).unwrap();
    assert!(node.is_updatable());
    node.apply_update(&Value::from(array![[0.5, -1.0]])).unwrap();
    assert_eq!(graph.leaf_value(w).unwrap(), &Value::from(array![[1.5, 1.0]]));
}

#[test]
fn test_parameter_rejects_mismatched_delta() {
    let mut param = Parameter::new(2.0);
    let result = param.apply_update(&Value::from(array![[1.0]]));
    assert!(result.is_err());
    assert_eq!(param.stored_value(), Some(&Value::Scalar(2.0)));
}

#[test]
fn test_assign_through_operator_trait() {
    let mut constant_node = Constant::new(array![[1.0]]);
    constant_node.assign(Value::from(array![[2.0]])).unwrap();
    assert_eq!(constant_node.stored_value(), Some(&Value::from(array![[2.0]])));
    assert!(matches!(
        constant_node.assign(Value::Scalar(1.0)),
        Err(DagradError::TypeMismatch { operation, .. }) if operation == "assign Constant"
    ));

    let mut param = Parameter::new(1.0);
    param.assign(Value::Scalar(-3.0)).unwrap();
    assert_eq!(param.stored_value(), Some(&Value::Scalar(-3.0)));
    assert!(matches!(
        param.assign(Value::from(array![[1.0]])),
        Err(DagradError::TypeMismatch { operation, .. }) if operation == "assign Parameter"
    ));
}
