//! Dataset loading and mini-batch iteration for dagrad models.

pub mod dataloader;
pub mod datasets;
pub mod error;
pub mod idx;
pub mod metrics;
pub mod samplers;

pub use dataloader::{BatchIter, DataLoader};
pub use datasets::{Dataset, IdxDataset, VecDataset};
pub use error::DataError;
pub use metrics::{argmax, correct};
pub use samplers::{RandomSampler, Sampler, SequentialSampler};
