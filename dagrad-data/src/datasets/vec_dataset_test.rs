use super::*;

#[test]
fn test_vec_dataset_get_valid_index() {
    let dataset = VecDataset::new(vec![10, 20, 30]);
    assert_eq!(dataset.len(), 3);
    assert_eq!(dataset.get(0).unwrap(), 10);
    assert_eq!(dataset.get(2).unwrap(), 30);
}

#[test]
fn test_vec_dataset_get_invalid_index() {
    let dataset = VecDataset::new(vec![10, 20, 30]);
    assert!(matches!(dataset.get(3), Err(DataError::IndexOutOfBounds { index: 3, len: 3 })));
}

#[test]
fn test_vec_dataset_empty() {
    let dataset: VecDataset<i32> = VecDataset::new(Vec::new());
    assert!(dataset.is_empty());
    assert!(dataset.get(0).is_err());
}

#[test]
fn test_vec_dataset_tuple_items() {
    let dataset = VecDataset::new(vec![(1, "one"), (2, "two")]);
    assert_eq!(dataset.get(1).unwrap(), (2, "two"));
    assert_eq!(dataset.as_slice().len(), 2);
}
