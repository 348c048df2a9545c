//! Trains a 784-H-10 perceptron on MNIST.
//!
//! Expects the four IDX files (`train-images.idx3-ubyte`, `train-labels.idx1-ubyte`,
//! `t10k-images.idx3-ubyte`, `t10k-labels.idx1-ubyte`) in `DAGRAD_DATA_DIR`.
//!
//! Environment variables:
//! - `DAGRAD_DATA_DIR` (default `data/mnist`)
//! - `DAGRAD_EPOCHS` (default 10)
//! - `DAGRAD_BATCH_SIZE` (default 32)
//! - `DAGRAD_HIDDEN` (default 128)
//! - `DAGRAD_SEED` (unset: seeded from entropy)
//!
//! Run with `cargo run --release --example mnist_mlp`.

use dagrad_core::nn::dense;
use dagrad_core::ops::{add, constant, dot, dropout_with_rng, log, mish, neg, softmax, sub};
use dagrad_core::optim::{AdamConfig, AdamOptimizer, Optimizer};
use dagrad_core::utils::random::{rng_from_seed, seeded_rng};
use dagrad_core::{Graph, Matrix, NodeId};
use dagrad_data::idx::NUM_CLASSES;
use dagrad_data::{correct, DataError, DataLoader, Dataset, IdxDataset, RandomSampler};
use log::{debug, info};
use std::str::FromStr;
use std::time::Instant;

const DROPOUT_RATE: f64 = 0.2;

#[derive(Debug)]
struct RunConfig {
    data_dir: String,
    epochs: usize,
    batch_size: usize,
    hidden: usize,
    seed: Option<u64>,
}

fn env_or<T: FromStr>(key: &str, default: T) -> Result<T, DataError> {
    match std::env::var(key) {
        Ok(raw) => raw
            .parse()
            .map_err(|_| DataError::Configuration(format!("{} has invalid value {:?}", key, raw))),
        Err(_) => Ok(default),
    }
}

impl RunConfig {
    fn from_env() -> Result<Self, DataError> {
        let seed = match std::env::var("DAGRAD_SEED") {
            Ok(raw) => Some(
                raw.parse()
                    .map_err(|_| DataError::Configuration(format!("DAGRAD_SEED has invalid value {:?}", raw)))?,
            ),
            Err(_) => None,
        };
        Ok(RunConfig {
            data_dir: env_or("DAGRAD_DATA_DIR", "data/mnist".to_string())?,
            epochs: env_or("DAGRAD_EPOCHS", 10)?,
            batch_size: env_or("DAGRAD_BATCH_SIZE", 32)?,
            hidden: env_or("DAGRAD_HIDDEN", 128)?,
            seed,
        })
    }
}

struct Model {
    graph: Graph,
    x: NodeId,
    y: NodeId,
    prediction: NodeId,
    loss: NodeId,
}

/// dense → mish → dropout → dense → softmax, with the binary cross-entropy
/// written out as `-y·log(ŷ) - (1 - y)·log(1 - ŷ)`.
fn build_model(input: usize, hidden: usize, seed: Option<u64>) -> Result<Model, DataError> {
    let (mut init_rng, dropout_rng) = match seed {
        Some(s) => (rng_from_seed(s), rng_from_seed(s.wrapping_add(1))),
        None => (seeded_rng(), seeded_rng()),
    };
    let mut graph = Graph::new();
    let x = constant(&mut graph, Matrix::zeros((input, 1)));
    let y = constant(&mut graph, Matrix::zeros((NUM_CLASSES, 1)));

    // Gain 2: Kaiming initialisation for the hidden layer.
    let h = dense(&mut graph, x, input, hidden, 2.0, &mut init_rng)?;
    let h = mish(&mut graph, h)?;
    let h = dropout_with_rng(&mut graph, h, DROPOUT_RATE, dropout_rng)?;
    let logits = dense(&mut graph, h, hidden, NUM_CLASSES, 1.0, &mut init_rng)?;
    let prediction = softmax(&mut graph, logits)?;

    let one = constant(&mut graph, 1.0);
    let log_p = log(&mut graph, prediction)?;
    let hit = dot(&mut graph, y, log_p)?;
    let not_y = sub(&mut graph, one, y)?;
    let not_p = sub(&mut graph, one, prediction)?;
    let log_not_p = log(&mut graph, not_p)?;
    let miss = dot(&mut graph, not_y, log_not_p)?;
    let total = add(&mut graph, hit, miss)?;
    let loss = neg(&mut graph, total)?;

    Ok(Model { graph, x, y, prediction, loss })
}

fn main() -> Result<(), DataError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let config = RunConfig::from_env()?;
    info!("configuration: {:?}", config);

    let train = IdxDataset::mnist(&config.data_dir, true)?;
    let test = IdxDataset::mnist(&config.data_dir, false)?;
    let input = train.input_size();

    let Model { mut graph, x, y, prediction, loss } = build_model(input, config.hidden, config.seed)?;
    let mut optimizer = AdamOptimizer::new(&graph, loss, AdamConfig::default())?;
    debug!("graph:\n{}", optimizer.executor().to_dot(&graph)?);

    let sampler = match config.seed {
        Some(s) => RandomSampler::with_seed(false, None, s),
        None => RandomSampler::new(false, None),
    };
    let train_len = train.len();
    let mut loader = DataLoader::new(train, config.batch_size, sampler, false)?;

    for epoch in 1..=config.epochs {
        let start = Instant::now();
        let mut total_loss = 0.0;
        let mut train_hits = 0usize;

        graph.set_training(true);
        for batch in loader.batches() {
            for (image, label) in batch? {
                graph.set(x, image)?;
                graph.set(y, label.clone())?;
                total_loss += optimizer.propagate(&mut graph, true)?.as_scalar()?;
                if correct(optimizer.value_of(prediction)?.as_matrix()?, &label) {
                    train_hits += 1;
                }
            }
            optimizer.update(&mut graph)?;
            optimizer.clear_gradient();
        }
        let elapsed = start.elapsed();

        graph.set_training(false);
        let mut test_hits = 0usize;
        for i in 0..test.len() {
            let (image, label) = test.get(i)?;
            graph.set(x, image)?;
            optimizer.propagate(&mut graph, false)?;
            if correct(optimizer.value_of(prediction)?.as_matrix()?, &label) {
                test_hits += 1;
            }
        }

        let train_len = train_len.max(1) as f64;
        info!(
            "epoch {:3}: avg loss {:6.3} train accuracy {:5.2}% test accuracy {:5.2}% ({:.1} us/sample)",
            epoch,
            total_loss / train_len,
            100.0 * train_hits as f64 / train_len,
            100.0 * test_hits as f64 / test.len().max(1) as f64,
            elapsed.as_micros() as f64 / train_len
        );
    }
    Ok(())
}
