pub mod random;
pub mod testing;
