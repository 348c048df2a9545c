use std::fmt::Debug;

/// Decides the order in which dataset indices are visited during one epoch.
pub trait Sampler: Debug + Send {
    /// Indices for one pass over a dataset of `dataset_len` samples. Samplers
    /// with internal randomness produce a fresh order on every call.
    fn iter(&mut self, dataset_len: usize) -> Box<dyn Iterator<Item = usize> + Send + Sync>;

    /// Number of indices [`Sampler::iter`] yields for `dataset_len` samples.
    fn len(&self, dataset_len: usize) -> usize;
}
