//! Batch processing and output for tgarchive.
//!
//! This module contains:
//! - [`batch`] - Input resolution and per-file extraction
//! - [`output`] - Table writers (CSV) - requires `csv-output` feature
//!
//! # Quick Start
//!
//! ```rust,no_run
//! # #[cfg(feature = "csv-output")]
//! # fn example() -> tgarchive::Result<()> {
//! use std::path::Path;
//! use tgarchive::config::BatchConfig;
//! use tgarchive::core::{BatchRunner, InputSource};
//!
//! let resolution = InputSource::resolve(None, Some(Path::new("ChatExport")), || Ok(".".into()))?;
//! let report = BatchRunner::new(BatchConfig::new()).run(&resolution.source)?;
//! println!("{} records", report.records.len());
//! # Ok(())
//! # }
//! ```

pub mod batch;
#[cfg(feature = "csv-output")]
pub mod output;

pub use batch::{BatchReport, BatchRunner, InputSource, Resolution, SkippedFile, default_directory};

#[cfg(feature = "csv-output")]
pub use output::{to_csv, write_csv};
