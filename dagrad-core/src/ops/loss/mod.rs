pub mod cross_entropy;

pub use cross_entropy::{cross_entropy, CrossEntropy, CROSS_ENTROPY_EPSILON};
