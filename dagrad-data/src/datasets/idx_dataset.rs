use super::Dataset;
use crate::error::DataError;
use crate::idx::{read_images_file, read_labels_file};
use dagrad_core::Matrix;
use log::info;
use std::path::Path;

/// Images paired with one-hot labels, as read from a pair of IDX files.
#[derive(Debug, Clone)]
pub struct IdxDataset {
    images: Vec<Matrix>,
    labels: Vec<Matrix>,
}

impl IdxDataset {
    /// Pairs `images[i]` with `labels[i]`. Both lists must have the same length.
    pub fn new(images: Vec<Matrix>, labels: Vec<Matrix>) -> Result<Self, DataError> {
        if images.len() != labels.len() {
            return Err(DataError::Format {
                file: "dataset".to_string(),
                detail: format!("{} images but {} labels", images.len(), labels.len()),
            });
        }
        Ok(IdxDataset { images, labels })
    }

    pub fn from_files(images: impl AsRef<Path>, labels: impl AsRef<Path>) -> Result<Self, DataError> {
        let images_path = images.as_ref();
        let dataset = Self::new(read_images_file(images_path)?, read_labels_file(labels)?)?;
        info!("loaded {} samples from {}", dataset.len(), images_path.display());
        Ok(dataset)
    }

    /// The standard MNIST file names under `dir`; `train` selects the training
    /// split, otherwise the test split.
    pub fn mnist(dir: impl AsRef<Path>, train: bool) -> Result<Self, DataError> {
        let dir = dir.as_ref();
        let prefix = if train { "train" } else { "t10k" };
        Self::from_files(
            dir.join(format!("{}-images.idx3-ubyte", prefix)),
            dir.join(format!("{}-labels.idx1-ubyte", prefix)),
        )
    }

    /// Size of each input column vector, 0 for an empty dataset.
    pub fn input_size(&self) -> usize {
        self.images.first().map_or(0, |m| m.nrows())
    }
}

impl Dataset for IdxDataset {
    type Item = (Matrix, Matrix);

    fn get(&self, index: usize) -> Result<Self::Item, DataError> {
        match (self.images.get(index), self.labels.get(index)) {
            (Some(image), Some(label)) => Ok((image.clone(), label.clone())),
            _ => Err(DataError::IndexOutOfBounds { index, len: self.images.len() }),
        }
    }

    fn len(&self) -> usize {
        self.images.len()
    }
}

#[cfg(test)]
#[path = "idx_dataset_test.rs"]
mod tests;
