//! Mini-batch iteration over a [`Dataset`].
//!
//! [`BatchIter`] groups the indices produced by a [`Sampler`] into batches.
//! [`DataLoader`] owns a dataset and a sampler and hands out one epoch of
//! batches at a time, either as index lists or as fetched samples.

use crate::datasets::Dataset;
use crate::error::DataError;
use crate::samplers::Sampler;
use log::debug;

/// Groups an index stream into batches of `batch_size`.
///
/// The last batch may be shorter unless `drop_last` is set, in which case it
/// is skipped.
pub struct BatchIter {
    indices: Box<dyn Iterator<Item = usize> + Send + Sync>,
    batch_size: usize,
    drop_last: bool,
}

impl BatchIter {
    pub fn new(
        indices: Box<dyn Iterator<Item = usize> + Send + Sync>,
        batch_size: usize,
        drop_last: bool,
    ) -> Result<Self, DataError> {
        if batch_size == 0 {
            return Err(DataError::Configuration("batch size must be positive".to_string()));
        }
        Ok(BatchIter { indices, batch_size, drop_last })
    }
}

impl Iterator for BatchIter {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        let batch: Vec<usize> = self.indices.by_ref().take(self.batch_size).collect();
        if batch.is_empty() || (self.drop_last && batch.len() < self.batch_size) {
            return None;
        }
        Some(batch)
    }
}

/// Dataset plus sampling policy plus batch size.
#[derive(Debug)]
pub struct DataLoader<D: Dataset, S: Sampler> {
    dataset: D,
    sampler: S,
    batch_size: usize,
    drop_last: bool,
}

impl<D: Dataset, S: Sampler> DataLoader<D, S> {
    pub fn new(dataset: D, batch_size: usize, sampler: S, drop_last: bool) -> Result<Self, DataError> {
        if batch_size == 0 {
            return Err(DataError::Configuration("batch size must be positive".to_string()));
        }
        Ok(DataLoader { dataset, sampler, batch_size, drop_last })
    }

    pub fn dataset(&self) -> &D {
        &self.dataset
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Number of batches in one epoch.
    pub fn num_batches(&self) -> usize {
        let samples = self.sampler.len(self.dataset.len());
        if self.drop_last {
            samples / self.batch_size
        } else {
            (samples + self.batch_size - 1) / self.batch_size
        }
    }

    /// Index batches for a new epoch.
    pub fn index_batches(&mut self) -> BatchIter {
        debug!(
            "dataloader: new epoch over {} samples, batch size {}",
            self.dataset.len(),
            self.batch_size
        );
        BatchIter {
            indices: self.sampler.iter(self.dataset.len()),
            batch_size: self.batch_size,
            drop_last: self.drop_last,
        }
    }

    /// Fetched batches for a new epoch.
    pub fn batches(&mut self) -> impl Iterator<Item = Result<Vec<D::Item>, DataError>> + '_ {
        let batches = self.index_batches();
        let dataset = &self.dataset;
        batches.map(move |batch| batch.into_iter().map(|i| dataset.get(i)).collect::<Result<Vec<_>, _>>())
    }
}

#[cfg(test)]
#[path = "dataloader_test.rs"]
mod tests;
