use std::{fs, io, path::Path};

use thiserror::Error;

use super::Midi;
use crate::reader::ReaderError;

/// Failure to load a MIDI file from disk
#[derive(Debug, Error)]
pub enum LoadError {
    /// The file could not be read
    #[error("Failed to read MIDI file: {0}")]
    Io(#[from] io::Error),
    /// The bytes are not a valid MIDI file
    #[error("Failed to parse MIDI file: {0}")]
    Read(#[from] ReaderError),
}

impl Midi {
    /// Read and decode the file at `path`.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        let bytes = fs::read(path.as_ref())?;
        #[cfg(feature = "tracing")]
        tracing::debug!("Loaded {} byte(s) from {}", bytes.len(), path.as_ref().display());
        Ok(Self::parse(&bytes)?)
    }
}
