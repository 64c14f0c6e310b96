//! Archive engine
//!
//! Zip packing and unpacking of files and directory subtrees.

pub mod operations;

pub use operations::{create_archive, extract_archive};
