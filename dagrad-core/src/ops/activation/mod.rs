pub mod dropout;
pub mod softmax;

pub use dropout::{dropout, dropout_with_rng, Dropout};
pub use softmax::{softmax, Softmax, SOFTMAX_EPSILON};
