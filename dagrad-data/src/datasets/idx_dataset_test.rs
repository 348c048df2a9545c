use super::*;
use crate::idx::one_hot;
use std::io::Write;

#[test]
fn test_idx_dataset_pairs_samples() {
    let images = vec![Matrix::zeros((4, 1)), Matrix::ones((4, 1))];
    let labels = vec![one_hot(1).unwrap(), one_hot(7).unwrap()];
    let dataset = IdxDataset::new(images, labels).unwrap();
    assert_eq!(dataset.len(), 2);
    assert_eq!(dataset.input_size(), 4);

    let (image, label) = dataset.get(1).unwrap();
    assert_eq!(image, Matrix::ones((4, 1)));
    assert_eq!(label[[7, 0]], 1.0);
    assert!(matches!(dataset.get(2), Err(DataError::IndexOutOfBounds { index: 2, len: 2 })));
}

#[test]
fn test_idx_dataset_length_mismatch() {
    let result = IdxDataset::new(vec![Matrix::zeros((1, 1))], Vec::new());
    assert!(matches!(result, Err(DataError::Format { .. })));
}

#[test]
fn test_idx_dataset_from_files() {
    let dir = std::env::temp_dir().join(format!("dagrad-idx-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();

    let mut images = std::fs::File::create(dir.join("train-images.idx3-ubyte")).unwrap();
    for field in [2051u32, 1, 1, 2] {
        images.write_all(&field.to_be_bytes()).unwrap();
    }
    images.write_all(&[255, 0]).unwrap();
    let mut labels = std::fs::File::create(dir.join("train-labels.idx1-ubyte")).unwrap();
    for field in [2049u32, 1] {
        labels.write_all(&field.to_be_bytes()).unwrap();
    }
    labels.write_all(&[4]).unwrap();
    drop(images);
    drop(labels);

    let dataset = IdxDataset::mnist(&dir, true).unwrap();
    let (image, label) = dataset.get(0).unwrap();
    assert_eq!(image.column(0).to_vec(), vec![1.0, 0.0]);
    assert_eq!(label[[4, 0]], 1.0);
    assert!(IdxDataset::mnist(&dir, false).is_err());

    std::fs::remove_dir_all(&dir).unwrap();
}
