use dagrad_core::DagradError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DataError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed {file}: {detail}")]
    Format { file: String, detail: String },

    #[error("Index {index} out of bounds for dataset of length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("Invalid loader configuration: {0}")]
    Configuration(String),

    #[error(transparent)]
    Graph(#[from] DagradError),
}
