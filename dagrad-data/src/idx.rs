//! Reader for the IDX binary format used by the MNIST distribution.
//!
//! Every header field is a big-endian `u32`. Image files start with magic 2051
//! followed by the image count, rows and columns, then one unsigned byte per
//! pixel. Label files start with magic 2049 and the label count, then one byte
//! per label.

use crate::error::DataError;
use dagrad_core::Matrix;
use log::debug;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

pub const IMAGE_MAGIC: u32 = 2051;
pub const LABEL_MAGIC: u32 = 2049;
/// Width of the one-hot label vectors.
pub const NUM_CLASSES: usize = 10;

fn read_u32<R: Read>(reader: &mut R) -> Result<u32, DataError> {
    let mut buf = [0u8; 4];
    reader.read_exact(&mut buf)?;
    Ok(u32::from_be_bytes(buf))
}

fn check_magic<R: Read>(reader: &mut R, expected: u32, file: &str) -> Result<(), DataError> {
    let magic = read_u32(reader)?;
    if magic != expected {
        return Err(DataError::Format {
            file: file.to_string(),
            detail: format!("magic number {} (expected {})", magic, expected),
        });
    }
    Ok(())
}

fn read_payload<R: Read>(reader: &mut R, len: usize, file: &str) -> Result<Vec<u8>, DataError> {
    // Grows with the data actually present instead of trusting the header size.
    let mut buf = Vec::new();
    reader.take(len as u64).read_to_end(&mut buf)?;
    if buf.len() != len {
        return Err(DataError::Format {
            file: file.to_string(),
            detail: format!("expected {} data bytes, found {}", len, buf.len()),
        });
    }
    Ok(buf)
}

fn checked_len(factors: &[usize], file: &str) -> Result<usize, DataError> {
    factors
        .iter()
        .try_fold(1usize, |acc, &f| acc.checked_mul(f))
        .ok_or_else(|| DataError::Format {
            file: file.to_string(),
            detail: format!("header sizes {:?} overflow", factors),
        })
}

/// Reads an image file. Each image becomes a `(rows·cols) × 1` column vector
/// with pixels scaled to [0, 1].
pub fn read_images<R: Read>(mut reader: R) -> Result<Vec<Matrix>, DataError> {
    check_magic(&mut reader, IMAGE_MAGIC, "image file")?;
    let count = read_u32(&mut reader)? as usize;
    let rows = read_u32(&mut reader)? as usize;
    let cols = read_u32(&mut reader)? as usize;
    let pixels = checked_len(&[rows, cols], "image file")?;
    let len = checked_len(&[count, pixels], "image file")?;
    let data = read_payload(&mut reader, len, "image file")?;
    debug!("idx: {} images of {}x{}", count, rows, cols);
    Ok(data
        .chunks_exact(pixels.max(1))
        .take(count)
        .map(|image| Matrix::from_shape_fn((pixels, 1), |(i, _)| f64::from(image[i]) / 255.0))
        .collect())
}

/// Reads a label file into one-hot column vectors of width [`NUM_CLASSES`].
pub fn read_labels<R: Read>(mut reader: R) -> Result<Vec<Matrix>, DataError> {
    check_magic(&mut reader, LABEL_MAGIC, "label file")?;
    let count = read_u32(&mut reader)? as usize;
    let data = read_payload(&mut reader, count, "label file")?;
    debug!("idx: {} labels", count);
    data.into_iter().map(one_hot).collect()
}

/// One-hot column vector for `label`.
pub fn one_hot(label: u8) -> Result<Matrix, DataError> {
    let class = usize::from(label);
    if class >= NUM_CLASSES {
        return Err(DataError::Format {
            file: "label file".to_string(),
            detail: format!("label {} outside 0..{}", label, NUM_CLASSES),
        });
    }
    let mut m = Matrix::zeros((NUM_CLASSES, 1));
    m[[class, 0]] = 1.0;
    Ok(m)
}

pub fn read_images_file(path: impl AsRef<Path>) -> Result<Vec<Matrix>, DataError> {
    read_images(BufReader::new(File::open(path)?))
}

pub fn read_labels_file(path: impl AsRef<Path>) -> Result<Vec<Matrix>, DataError> {
    read_labels(BufReader::new(File::open(path)?))
}

#[cfg(test)]
#[path = "idx_test.rs"]
mod tests;
