//! Report rendering and README output.

pub mod generator;
pub mod readme;

pub use generator::generate_readme_block;
pub use readme::{prepend_timestamp, write_readme};
