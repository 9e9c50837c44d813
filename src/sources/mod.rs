//! Playlist source retrieval
//!
//! The pipeline only depends on the [`SourceFetcher`] trait; the HTTP
//! implementation lives in [`m3u`].

pub mod m3u;
pub mod traits;

pub use m3u::M3uSourceFetcher;
pub use traits::SourceFetcher;
