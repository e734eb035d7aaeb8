//! CSV output writer.

use std::fs::File;
use std::io;
use std::path::Path;

use crate::error::Result;
use crate::record::{HEADER, MessageRecord};

/// Writes records to a CSV file, replacing any existing file.
///
/// # Format
/// - Delimiter: `,`
/// - Quoting: only when needed (delimiter, quote, or newline in the cell)
/// - Columns: `ID`, `Date`, `Time`, `Sender`, `Message`, `Attachment`,
///   `Responds_to`, `Forward_from`
/// - Encoding: UTF-8
pub fn write_csv(records: &[MessageRecord], output_path: &Path, include_header: bool) -> Result<()> {
    let file = File::create(output_path)?;
    write_records(records, file, include_header)?;

    tracing::debug!(
        path = %output_path.display(),
        rows = records.len(),
        include_header,
        "wrote CSV table"
    );
    Ok(())
}

/// Renders records as a CSV string.
pub fn to_csv(records: &[MessageRecord], include_header: bool) -> Result<String> {
    let mut buffer = Vec::new();
    write_records(records, &mut buffer, include_header)?;
    // The csv writer only emits the UTF-8 strings it was given.
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

/// Writes records to any [`io::Write`] sink.
pub fn write_records<W: io::Write>(
    records: &[MessageRecord],
    sink: W,
    include_header: bool,
) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(sink);

    if include_header {
        writer.write_record(HEADER)?;
    }
    for record in records {
        writer.write_record(record.fields().iter().map(|field| field.as_bytes()))?;
    }

    writer.flush()?;
    Ok(())
}
