//! Playlist output side: keyword filtering and M3U generation

pub mod filter_engine;
pub mod generator;

pub use filter_engine::{FilterDecision, KeywordFilter};
pub use generator::{M3U_HEADER, M3uGenerator};
