use crate::value::{Matrix, Value};

/// Checks if a matrix is approximately equal to `expected` (shape and data
/// within tolerance). Panics otherwise.
pub fn check_matrix_near(actual: &Matrix, expected_shape: (usize, usize), expected_data: &[f64], tolerance: f64) {
    assert_eq!(actual.dim(), expected_shape, "Shape mismatch");
    assert_eq!(actual.len(), expected_data.len(), "Data length mismatch");
    for (i, (a, e)) in actual.iter().zip(expected_data.iter()).enumerate() {
        let diff = (a - e).abs();
        if diff > tolerance {
            panic!(
                "Data mismatch at index {}: actual={:?}, expected={:?}, diff={:?}, tolerance={:?}",
                i, a, e, diff, tolerance
            );
        }
    }
}

/// [`check_matrix_near`] on a [`Value`] that must be a matrix.
pub fn check_value_near(actual: &Value, expected_shape: (usize, usize), expected_data: &[f64], tolerance: f64) {
    match actual {
        Value::Matrix(m) => check_matrix_near(m, expected_shape, expected_data, tolerance),
        other => panic!("expected a matrix, got {}", other.kind()),
    }
}
