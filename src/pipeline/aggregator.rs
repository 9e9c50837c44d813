use std::collections::HashSet;
use tracing::debug;

use crate::models::ChannelEntry;

/// Merges per-source entry lists into one first-seen-ordered, duplicate-free list.
#[derive(Debug, Default)]
pub struct ChannelAggregator {
    seen: HashSet<ChannelEntry>,
    entries: Vec<ChannelEntry>,
    duplicates: usize,
}

impl ChannelAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the entries not seen before, in order. Returns how many were added.
    pub fn extend<I>(&mut self, entries: I) -> usize
    where
        I: IntoIterator<Item = ChannelEntry>,
    {
        let before = self.entries.len();
        for entry in entries {
            if self.seen.contains(&entry) {
                debug!(
                    "Skipping duplicate channel '{}' with URL '{}'",
                    entry.display_name(),
                    entry.stream_url
                );
                self.duplicates += 1;
                continue;
            }
            self.seen.insert(entry.clone());
            self.entries.push(entry);
        }
        self.entries.len() - before
    }

    pub fn duplicates(&self) -> usize {
        self.duplicates
    }

    pub fn into_entries(self) -> Vec<ChannelEntry> {
        self.entries
    }
}
