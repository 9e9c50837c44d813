use tracing::{debug, trace};

use crate::models::ChannelEntry;
use crate::proxy::filter_engine::{FilterDecision, KeywordFilter};

/// Marker that starts a channel metadata line
pub const EXTINF_MARKER: &str = "#EXTINF";

/// Any other line starting with this is a directive or comment
const COMMENT_MARKER: char = '#';

/// Line boundaries: LF, CR, VT, FF, FS, GS, RS, NEL, LS and PS.
/// CRLF splits twice and the empty piece is skipped as blank.
fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\x0b' | '\x0c' | '\x1c' | '\x1d' | '\x1e' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineKind {
    Metadata,
    CommentOrBlank,
    Locator,
}

fn classify(line: &str) -> LineKind {
    if line.starts_with(EXTINF_MARKER) {
        LineKind::Metadata
    } else if line.is_empty() || line.starts_with(COMMENT_MARKER) {
        LineKind::CommentOrBlank
    } else {
        LineKind::Locator
    }
}

enum ParseState<'a> {
    SeekingMetadata,
    SeekingUrl { metadata: &'a str },
}

/// Line-pairing parser for M3U playlist text.
///
/// An `#EXTINF` line opens an entry and the next line that is neither blank
/// nor a `#` line closes it. While waiting for the URL, further `#EXTINF`
/// lines are skipped like any other comment, so the first metadata line wins.
/// Metadata left open at end of input is dropped.
pub struct M3uParser;

impl M3uParser {
    pub fn parse(content: &str) -> Vec<ChannelEntry> {
        let mut entries = Vec::new();
        let mut state = ParseState::SeekingMetadata;

        for raw in content.split(is_line_break) {
            let line = raw.trim();
            let kind = classify(line);

            state = match (state, kind) {
                (ParseState::SeekingMetadata, LineKind::Metadata) => {
                    ParseState::SeekingUrl { metadata: line }
                }
                (ParseState::SeekingMetadata, _) => ParseState::SeekingMetadata,
                (ParseState::SeekingUrl { metadata }, LineKind::Locator) => {
                    entries.push(ChannelEntry::new(metadata, line));
                    ParseState::SeekingMetadata
                }
                (pending @ ParseState::SeekingUrl { .. }, _) => pending,
            };
        }

        if let ParseState::SeekingUrl { metadata } = state {
            debug!("Dropping metadata line without a stream URL: {}", metadata);
        }

        entries
    }
}

/// Entries that survived filtering, plus how many were parsed in total
#[derive(Debug, Clone, Default)]
pub struct FilterOutcome {
    pub kept: Vec<ChannelEntry>,
    pub parsed: usize,
}

/// Parse playlist text and keep only entries the filter includes, in order.
pub fn parse_and_filter(content: &str, filter: &KeywordFilter) -> FilterOutcome {
    let entries = M3uParser::parse(content);
    let parsed = entries.len();

    let kept = entries
        .into_iter()
        .filter(|entry| match filter.evaluate(entry) {
            FilterDecision::Included => true,
            decision => {
                trace!("{:?}: '{}' ({})", decision, entry.display_name(), entry.stream_url);
                false
            }
        })
        .collect();

    FilterOutcome { kept, parsed }
}
