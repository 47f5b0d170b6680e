//! GitHub API access.
//!
//! The client for the endpoints we read and the retry policy used for
//! lazily computed statistics.

pub mod client;
pub mod retry;

pub use client::GitHubClient;
pub use retry::{RetryPolicy, Sleeper, TokioSleeper};
