use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::errors::{AppError, AppResult};
use crate::models::ChannelEntry;

/// Header line identifying an extended M3U playlist
pub const M3U_HEADER: &str = "#EXTM3U";

/// Serializes channel entries into an M3U playlist file.
pub struct M3uGenerator;

impl M3uGenerator {
    /// Render the playlist text: header, then metadata and URL line per entry.
    pub fn render(entries: &[ChannelEntry]) -> String {
        let capacity = entries
            .iter()
            .map(|e| e.metadata_line.len() + e.stream_url.len() + 2)
            .sum::<usize>()
            + M3U_HEADER.len()
            + 1;

        let mut m3u = String::with_capacity(capacity);
        m3u.push_str(M3U_HEADER);
        m3u.push('\n');
        for entry in entries {
            m3u.push_str(&entry.metadata_line);
            m3u.push('\n');
            m3u.push_str(&entry.stream_url);
            m3u.push('\n');
        }
        m3u
    }

    /// Write the playlist to `path` as UTF-8, creating missing parent
    /// directories and replacing any existing file.
    pub async fn save(entries: &[ChannelEntry], path: &Path) -> AppResult<PathBuf> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent).await?;
        }

        let content = Self::render(entries);

        // Write next to the destination and rename, so readers never see a half-written list
        let temp_path = temp_path_for(path)?;
        tokio::fs::write(&temp_path, content.as_bytes()).await?;
        tokio::fs::rename(&temp_path, path).await?;

        debug!("Wrote {} bytes to {}", content.len(), path.display());
        info!("Saved playlist with {} channels to {}", entries.len(), path.display());
        Ok(path.to_path_buf())
    }
}

fn temp_path_for(path: &Path) -> AppResult<PathBuf> {
    let file_name = path.file_name().ok_or_else(|| {
        AppError::internal(format!("Output path has no file name: {}", path.display()))
    })?;
    let mut temp_name = OsString::from(".");
    temp_name.push(file_name);
    temp_name.push(".tmp");
    Ok(path.with_file_name(temp_name))
}
