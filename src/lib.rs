//! readme-stats - GitHub profile README generator
//!
//! Lists a user's repositories, sums language byte counts and recent
//! code-frequency activity, and renders them as a fixed-width block.

pub mod analysis;
pub mod cli;
pub mod config;
pub mod error;
pub mod github;
pub mod models;
pub mod report;

pub use config::Config;
pub use error::{Error, Result};
