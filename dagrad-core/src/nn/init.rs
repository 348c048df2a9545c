use crate::error::DagradError;
use crate::value::{Matrix, Scalar};
use rand::Rng;
use rand_distr::{Distribution, Normal, Uniform};

/// A `rows × cols` matrix drawn from N(`mean`, `std_dev`²).
pub fn rand_normal<R: Rng + ?Sized>(
    rng: &mut R,
    rows: usize,
    cols: usize,
    std_dev: Scalar,
    mean: Scalar,
) -> Result<Matrix, DagradError> {
    if !(std_dev.is_finite() && std_dev >= 0.0 && mean.is_finite()) {
        return Err(DagradError::ConfigurationError(format!(
            "normal distribution needs a finite mean and a non-negative finite std_dev, got mean {} std_dev {}",
            mean, std_dev
        )));
    }
    let normal = Normal::new(mean, std_dev)
        .map_err(|e| DagradError::ConfigurationError(format!("normal distribution: {}", e)))?;
    Ok(Matrix::from_shape_fn((rows, cols), |_| normal.sample(rng)))
}

/// Column vector of length `len` drawn from N(`mean`, `std_dev`²).
pub fn rand_normal_vector<R: Rng + ?Sized>(
    rng: &mut R,
    len: usize,
    std_dev: Scalar,
    mean: Scalar,
) -> Result<Matrix, DagradError> {
    rand_normal(rng, len, 1, std_dev, mean)
}

/// A `rows × cols` matrix drawn uniformly from [`mean - margin`, `mean + margin`).
pub fn rand_uniform<R: Rng + ?Sized>(
    rng: &mut R,
    rows: usize,
    cols: usize,
    margin: Scalar,
    mean: Scalar,
) -> Result<Matrix, DagradError> {
    if !(margin.is_finite() && margin > 0.0 && mean.is_finite()) {
        return Err(DagradError::ConfigurationError(format!(
            "uniform range needs a finite mean and a positive finite margin, got mean {} margin {}",
            mean, margin
        )));
    }
    let uniform = Uniform::new(mean - margin, mean + margin);
    Ok(Matrix::from_shape_fn((rows, cols), |_| uniform.sample(rng)))
}

pub fn rand_uniform_vector<R: Rng + ?Sized>(
    rng: &mut R,
    len: usize,
    margin: Scalar,
    mean: Scalar,
) -> Result<Matrix, DagradError> {
    rand_uniform(rng, len, 1, margin, mean)
}

#[cfg(test)]
#[path = "init_test.rs"]
mod tests;
