// crates/rf_io/src/drivers/mod.rs

//! 栅格驱动实现

pub mod ascii_grid;

pub use ascii_grid::AsciiGridDriver;
