//! FFmpeg metadata tags for the output file.

use anyhow::{Context, Result};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Metadata applied to the encoded output file.
#[derive(Debug, Clone, Default)]
pub struct AudioTags {
    /// Track title
    pub title: String,
    /// Artist / narrator
    pub artist: String,
    /// Album (book title, for multi-part outputs)
    pub album: String,
    /// Track number within the album
    pub track: Option<u32>,
}

impl AudioTags {
    /// Create tags with the core fields set.
    pub fn new(
        title: impl Into<String>,
        artist: impl Into<String>,
        album: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            artist: artist.into(),
            album: album.into(),
            track: None,
        }
    }

    /// Set the track number.
    pub fn with_track(mut self, track: u32) -> Self {
        self.track = Some(track);
        self
    }
}

/// Write an FFMETADATA1 file carrying the tags.
///
/// FFmpeg's native metadata format; fed to the encoder via `-map_metadata`.
pub fn write_ffmetadata(tags: &AudioTags, output_path: &Path) -> Result<()> {
    let mut file = File::create(output_path).context("Failed to create metadata file")?;

    writeln!(file, ";FFMETADATA1")?;
    writeln!(file, "title={}", escape_metadata_value(&tags.title))?;
    writeln!(file, "artist={}", escape_metadata_value(&tags.artist))?;
    writeln!(file, "album={}", escape_metadata_value(&tags.album))?;
    if let Some(track) = tags.track {
        writeln!(file, "track={track}")?;
    }
    writeln!(file, "genre=Audiobook")?;

    Ok(())
}

/// Escape special characters in metadata values.
///
/// FFmpeg metadata values need to escape: = ; # \ and newlines
fn escape_metadata_value(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());

    for c in value.chars() {
        match c {
            '=' | ';' | '#' | '\\' => {
                escaped.push('\\');
                escaped.push(c);
            }
            '\n' => {
                escaped.push_str("\\n");
            }
            '\r' => {
                // Skip carriage returns
            }
            _ => {
                escaped.push(c);
            }
        }
    }

    escaped
}
