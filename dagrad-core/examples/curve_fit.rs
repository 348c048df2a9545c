//! Fits `sin(x)` on [-π, π] with a one-hidden-layer network trained by Adam.
//!
//! Run with `RUST_LOG=info cargo run --example curve_fit`.

use dagrad_core::ndarray::array;
use dagrad_core::nn::dense;
use dagrad_core::ops::{constant, dot, sub, tanh};
use dagrad_core::optim::{AdamConfig, AdamOptimizer, Optimizer};
use dagrad_core::utils::random::rng_from_seed;
use dagrad_core::{DagradError, Graph, Matrix};
use log::info;
use rand::Rng;

const HIDDEN: usize = 16;
const EPOCHS: usize = 300;
const SAMPLES: usize = 64;

fn main() -> Result<(), DagradError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut rng = rng_from_seed(2024);
    let mut graph = Graph::new();
    let x = constant(&mut graph, Matrix::zeros((1, 1)));
    let y = constant(&mut graph, Matrix::zeros((1, 1)));
    let hidden = dense(&mut graph, x, 1, HIDDEN, 1.0, &mut rng)?;
    let hidden = tanh(&mut graph, hidden)?;
    let out = dense(&mut graph, hidden, HIDDEN, 1, 1.0, &mut rng)?;
    let residual = sub(&mut graph, out, y)?;
    let loss = dot(&mut graph, residual, residual)?;

    let data: Vec<(f64, f64)> = (0..SAMPLES)
        .map(|_| {
            let v = rng.gen_range(-std::f64::consts::PI..std::f64::consts::PI);
            (v, v.sin())
        })
        .collect();

    let mut optimizer = AdamOptimizer::new(&graph, loss, AdamConfig { alpha: 0.01, ..AdamConfig::default() })?;
    for epoch in 1..=EPOCHS {
        let mut total = 0.0;
        for &(input, target) in &data {
            graph.set(x, array![[input]])?;
            graph.set(y, array![[target]])?;
            total += optimizer.propagate(&mut graph, true)?.as_scalar()?;
        }
        optimizer.update(&mut graph)?;
        optimizer.clear_gradient();
        if epoch % 50 == 0 {
            info!("epoch {}: mean squared error {:.5}", epoch, total / SAMPLES as f64);
        }
    }

    for v in [-2.0, -1.0, 0.0, 1.0, 2.0] {
        graph.set(x, array![[v]])?;
        optimizer.propagate(&mut graph, false)?;
        let predicted = optimizer.value_of(out)?.as_matrix()?[[0, 0]];
        info!("sin({:+.1}) = {:+.4}, predicted {:+.4}", v, f64::sin(v), predicted);
    }
    Ok(())
}
