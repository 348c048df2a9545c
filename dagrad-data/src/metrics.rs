use dagrad_core::Matrix;

/// Flat (row-major) index of the largest element. `None` for an empty matrix.
/// Ties resolve to the first occurrence.
pub fn argmax(m: &Matrix) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &x) in m.iter().enumerate() {
        match best {
            Some((_, b)) if x <= b => {}
            _ => best = Some((i, x)),
        }
    }
    best.map(|(i, _)| i)
}

/// True when the prediction and the one-hot target peak at the same index.
pub fn correct(prediction: &Matrix, target: &Matrix) -> bool {
    match (argmax(prediction), argmax(target)) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

#[cfg(test)]
#[path = "metrics_test.rs"]
mod tests;
