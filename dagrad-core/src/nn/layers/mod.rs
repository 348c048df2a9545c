pub mod dense;
pub use dense::{dense, dense_layer};
