// src/control/source.rs

//! Replayable control file source
//!
//! The file is read into memory once so that every scan pass sees the exact
//! same line sequence without reopening anything. Compressed inputs (the
//! `/var/backups/dpkg.status.*.gz` rotations, for instance) are detected by
//! magic bytes and decoded up front.

use super::scanner::{ScanOptions, Scanner};
use crate::error::{Error, Result};
use flate2::read::GzDecoder;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::Lines;
use tracing::{debug, warn};
use xz2::read::XzDecoder;

/// Compression applied to a control file on disk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compression {
    None,
    Gzip,
    Xz,
    Zstd,
}

impl Compression {
    /// Detect compression from the leading bytes of a file
    pub fn detect(magic: &[u8]) -> Self {
        if magic.starts_with(&[0x1F, 0x8B]) {
            Self::Gzip
        } else if magic.starts_with(&[0xFD, 0x37, 0x7A, 0x58, 0x5A, 0x00]) {
            Self::Xz
        } else if magic.starts_with(&[0x28, 0xB5, 0x2F, 0xFD]) {
            Self::Zstd
        } else {
            Self::None
        }
    }

    /// Human readable format name
    pub fn name(&self) -> &'static str {
        match self {
            Self::None => "plain",
            Self::Gzip => "gzip",
            Self::Xz => "xz",
            Self::Zstd => "zstd",
        }
    }
}

/// In-memory copy of a control file, replayable any number of times
#[derive(Debug, Clone)]
pub struct ControlSource {
    origin: String,
    compression: Compression,
    text: String,
}

impl ControlSource {
    /// Load a control file from disk
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Opening control file: {}", path.display());

        let file = File::open(path).map_err(|source| Error::SourceUnavailable {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_reader(file, path.display().to_string())
    }

    /// Load a control file from any reader
    ///
    /// `origin` only labels the source in log output.
    pub fn from_reader<R: Read>(mut reader: R, origin: impl Into<String>) -> Result<Self> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        Self::from_bytes(bytes, origin)
    }

    /// Build a source from raw (possibly compressed) bytes
    pub fn from_bytes(bytes: Vec<u8>, origin: impl Into<String>) -> Result<Self> {
        let origin = origin.into();
        let compression = Compression::detect(&bytes);
        debug!(
            "Read {} bytes from {} ({} format)",
            bytes.len(),
            origin,
            compression.name()
        );

        let raw = match compression {
            Compression::None => bytes,
            _ => Self::decompress(&bytes, compression)?,
        };

        let text = match String::from_utf8(raw) {
            Ok(text) => text,
            Err(e) => {
                warn!(
                    "Control file {} is not valid UTF-8, replacing invalid sequences",
                    origin
                );
                String::from_utf8_lossy(e.as_bytes()).into_owned()
            }
        };

        Ok(Self {
            origin,
            compression,
            text,
        })
    }

    /// Build a source from text already in memory
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            origin: "<memory>".to_string(),
            compression: Compression::None,
            text: text.into(),
        }
    }

    fn decompress(data: &[u8], compression: Compression) -> Result<Vec<u8>> {
        let to_error = |source| Error::Decompress {
            format: compression.name(),
            source,
        };

        let mut reader: Box<dyn Read + '_> = match compression {
            Compression::Gzip => Box::new(GzDecoder::new(data)),
            Compression::Xz => Box::new(XzDecoder::new(data)),
            Compression::Zstd => Box::new(zstd::Decoder::new(data).map_err(to_error)?),
            Compression::None => Box::new(data),
        };

        let mut decompressed = Vec::new();
        reader.read_to_end(&mut decompressed).map_err(to_error)?;

        debug!(
            "Decompressed {} control file: {} bytes",
            compression.name(),
            decompressed.len()
        );
        Ok(decompressed)
    }

    /// Where the source was loaded from
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Compression the source was stored with
    pub fn compression(&self) -> Compression {
        self.compression
    }

    /// Decoded text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// A fresh line iterator from the start of the source
    pub fn lines(&self) -> Lines<'_> {
        self.text.lines()
    }

    /// A fresh scanner from the start of the source
    pub fn scan(&self, options: ScanOptions) -> Scanner<Lines<'_>> {
        Scanner::with_options(self.lines(), options)
    }
}
