//! Output table writers.
//!
//! - [`write_csv`] / [`to_csv`] - CSV with the eight record columns
//! - [`write_records`] - CSV into any [`std::io::Write`] sink
//!
//! # Example
//!
//! ```rust,no_run
//! # fn main() -> tgarchive::Result<()> {
//! use std::path::Path;
//! use tgarchive::MessageRecord;
//! use tgarchive::core::output::{to_csv, write_csv};
//!
//! let records = vec![
//!     MessageRecord::new("message1", "26.01.2021", "14:32:10", "Alice").with_message("Hello"),
//! ];
//!
//! write_csv(&records, Path::new("output.csv"), true)?;
//! let table = to_csv(&records, false)?;
//! assert!(table.starts_with("message1"));
//! # Ok(())
//! # }
//! ```

mod csv_writer;

pub use csv_writer::{to_csv, write_csv, write_records};
