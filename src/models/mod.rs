use std::path::PathBuf;

/// A single playlist channel: the `#EXTINF` metadata line and its stream URL.
///
/// Two entries are the same channel only when both lines match exactly; this
/// pair is the deduplication key used when merging sources.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChannelEntry {
    pub metadata_line: String,
    pub stream_url: String,
}

impl ChannelEntry {
    pub fn new<M: Into<String>, U: Into<String>>(metadata_line: M, stream_url: U) -> Self {
        Self {
            metadata_line: metadata_line.into(),
            stream_url: stream_url.into(),
        }
    }

    /// Channel name as shown by players, the text after the last comma
    pub fn display_name(&self) -> &str {
        self.metadata_line
            .rsplit_once(',')
            .map(|(_, name)| name.trim())
            .unwrap_or("")
    }
}

/// What happened to one configured source during a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Fetched { parsed: usize, kept: usize },
    Failed { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceReport {
    pub url: String,
    pub outcome: FetchOutcome,
}

impl SourceReport {
    pub fn is_failed(&self) -> bool {
        matches!(self.outcome, FetchOutcome::Failed { .. })
    }
}

/// Result of a completed run
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub output_path: PathBuf,
    pub total_entries: usize,
    pub duplicates_dropped: usize,
    pub sources: Vec<SourceReport>,
}

impl RunSummary {
    pub fn failed_sources(&self) -> usize {
        self.sources.iter().filter(|s| s.is_failed()).count()
    }
}
