use crate::error::DataError;

pub mod idx_dataset;
pub mod vec_dataset;

pub use idx_dataset::IdxDataset;
pub use vec_dataset::VecDataset;

/// Indexed collection of samples.
pub trait Dataset {
    /// The type of a single sample.
    type Item: Send + 'static;

    /// Returns the sample at `index`, or [`DataError::IndexOutOfBounds`].
    fn get(&self, index: usize) -> Result<Self::Item, DataError>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
