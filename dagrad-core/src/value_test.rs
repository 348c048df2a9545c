use super::*;
use ndarray::array;

#[test]
fn test_kind_and_accessors() {
    let s = Value::from(2.5);
    let m = Value::from(array![[1.0, 2.0], [3.0, 4.0]]);
    assert_eq!(s.kind(), ValueKind::Scalar);
    assert_eq!(m.kind(), ValueKind::Matrix);
    assert_eq!(s.as_scalar().unwrap(), 2.5);
    assert!(matches!(
        m.as_scalar(),
        Err(DagradError::TypeMismatch { expected: ValueKind::Scalar, actual: ValueKind::Matrix, .. })
    ));
    assert!(s.as_matrix().is_err());
}

#[test]
fn test_ones_like_matches_shape() {
    let m = Value::from(Matrix::zeros((3, 2)));
    let ones = m.ones_like();
    assert_eq!(ones, Value::from(Matrix::ones((3, 2))));

    let cube = Value::from(vec![Matrix::zeros((1, 2)), Matrix::zeros((2, 2))]);
    match cube.ones_like() {
        Value::Cube(slices) => {
            assert_eq!(slices[0], Matrix::ones((1, 2)));
            assert_eq!(slices[1], Matrix::ones((2, 2)));
        }
        other => panic!("expected cube, got {:?}", other.kind()),
    }
    assert_eq!(Value::from(7.0).ones_like(), Value::Scalar(1.0));
}

#[test]
fn test_accumulate_scalar_and_matrix() {
    let mut s = Value::from(1.0);
    s.accumulate(&Value::from(2.0)).unwrap();
    assert_eq!(s, Value::Scalar(3.0));

    let mut m = Value::from(array![[1.0, 2.0]]);
    m.accumulate(&Value::from(array![[0.5, -2.0]])).unwrap();
    assert_eq!(m, Value::from(array![[1.5, 0.0]]));
}

#[test]
fn test_accumulate_cube_elementwise() {
    let mut c = Value::from(vec![array![[1.0]], array![[2.0, 3.0]]]);
    c.accumulate(&Value::from(vec![array![[1.0]], array![[1.0, 1.0]]]))
        .unwrap();
    assert_eq!(c, Value::from(vec![array![[2.0]], array![[3.0, 4.0]]]));
}

#[test]
fn test_accumulate_rejects_kind_and_shape_mismatch() {
    let mut s = Value::from(1.0);
    let result = s.accumulate(&Value::from(array![[1.0]]));
    assert!(matches!(result, Err(DagradError::TypeMismatch { .. })));

    let mut m = Value::from(Matrix::zeros((2, 2)));
    let result = m.accumulate(&Value::from(Matrix::zeros((2, 3))));
    assert!(matches!(result, Err(DagradError::ShapeMismatch { .. })));

    let mut c = Value::from(vec![Matrix::zeros((1, 1))]);
    let result = c.accumulate(&Value::from(Vec::<Matrix>::new()));
    assert!(matches!(result, Err(DagradError::ShapeMismatch { .. })));
}

#[test]
fn test_zip_map_and_scale() {
    let a = Value::from(array![[1.0, 4.0]]);
    let b = Value::from(array![[2.0, 2.0]]);
    let q = a.zip_map(&b, "div", |x, y| x / y).unwrap();
    assert_eq!(q, Value::from(array![[0.5, 2.0]]));
    assert_eq!(a.scale(-2.0), Value::from(array![[-2.0, -8.0]]));
}

#[test]
fn test_non_finite_detection() {
    assert_eq!(Value::from(1.0).non_finite(), None);
    assert_eq!(Value::from(f64::NAN).non_finite().as_deref(), Some("scalar nan"));
    let m = Value::from(array![[1.0, f64::INFINITY]]);
    assert_eq!(m.non_finite().as_deref(), Some("matrix inf"));
}

#[test]
fn test_sum_over_all_elements() {
    let c = Value::from(vec![array![[1.0, 2.0]], array![[3.0]]]);
    assert_eq!(c.sum(), 6.0);
}
