// src/control/mod.rs

//! Debian control file reading
//!
//! This module turns raw control file text into scanned records:
//! - `source`: loads the file once (decompressing if needed) for replay
//! - `scanner`: line-by-line state machine producing one record per paragraph
//! - `depends`: strips version constraints and alternation from `Depends:`

pub mod depends;
pub mod scanner;
pub mod source;

pub use depends::split_depends;
pub use scanner::{ScanOptions, ScannedRecord, Scanner};
pub use source::{Compression, ControlSource};
