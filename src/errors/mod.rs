//! Centralized error handling for the playlist curator
//!
//! Errors are split by how far they are allowed to travel:
//!
//! - **Source Errors**: a single playlist download failed. These are recovered
//!   by the pipeline, logged, and never abort a run.
//! - **Application Errors**: startup failures (configuration, HTTP client
//!   construction) and unexpected failures while running the pipeline. These
//!   reach the process boundary, which maps them to an exit status.
//!
//! # Usage
//!
//! ```rust
//! use m3u_curator::errors::{AppError, AppResult};
//!
//! fn example_function() -> AppResult<String> {
//!     Ok("success".to_string())
//! }
//!
//! assert_eq!(AppError::configuration("bad").exit_code(), 1);
//! ```

pub mod types;

pub use types::*;

/// Convenience type alias for Results using AppError
pub type AppResult<T> = Result<T, AppError>;

/// Convenience type alias for Source Results
pub type SourceResult<T> = Result<T, SourceError>;
