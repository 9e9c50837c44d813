pub mod m3u_parser;

pub use m3u_parser::{EXTINF_MARKER, FilterOutcome, M3uParser, parse_and_filter};
