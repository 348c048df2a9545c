//! Network building blocks on top of the operator library.

pub mod init;
pub mod layers;

pub use layers::{dense, dense_layer};
