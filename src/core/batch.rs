//! Input resolution and batch extraction.
//!
//! A run reads either one export file or every `.html` file of one
//! directory (non-recursive), and concatenates the extracted records.
//!
//! # Resolution order
//!
//! 1. `--directory` if given (a given `--file` is then ignored)
//! 2. `--file` if given
//! 3. the default directory, computed by the caller only when needed
//!
//! # Header row
//!
//! Directory mode writes the header row, single-file mode does not.
//! [`BatchConfig::include_header`] overrides either default.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;

use crate::config::BatchConfig;
use crate::error::{ArchiveError, Result};
use crate::parsers::TelegramHtmlParser;
use crate::record::MessageRecord;

/// Where records are read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    /// One export file.
    File(PathBuf),
    /// Every matching file directly inside a directory.
    Directory(PathBuf),
}

/// Outcome of [`InputSource::resolve`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// The source that takes effect
    pub source: InputSource,
    /// A file argument that lost to a directory argument
    pub file_ignored: Option<PathBuf>,
}

impl InputSource {
    /// Picks the input source from the command line arguments.
    ///
    /// `default_dir` is called only when neither a file nor a directory
    /// is given.
    ///
    /// # Errors
    ///
    /// Returns [`ArchiveError::InvalidArgument`] when the chosen path does not
    /// exist or is of the wrong kind.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::path::Path;
    /// use tgarchive::core::InputSource;
    ///
    /// let dir = std::env::temp_dir();
    /// let resolution = InputSource::resolve(None, None, || Ok(dir.clone()))?;
    /// assert_eq!(resolution.source, InputSource::Directory(dir));
    /// # Ok::<(), tgarchive::ArchiveError>(())
    /// ```
    pub fn resolve<F>(file: Option<&Path>, directory: Option<&Path>, default_dir: F) -> Result<Resolution>
    where
        F: FnOnce() -> Result<PathBuf>,
    {
        match (directory, file) {
            (Some(dir), ignored) => Ok(Resolution {
                source: Self::directory(dir)?,
                file_ignored: ignored.map(Path::to_path_buf),
            }),
            (None, Some(file)) => {
                if !file.is_file() {
                    return Err(ArchiveError::invalid_argument(format!(
                        "'{}' does not exist or is not a file",
                        file.display()
                    )));
                }
                Ok(Resolution {
                    source: InputSource::File(file.to_path_buf()),
                    file_ignored: None,
                })
            }
            (None, None) => Ok(Resolution {
                source: Self::directory(&default_dir()?)?,
                file_ignored: None,
            }),
        }
    }

    fn directory(dir: &Path) -> Result<Self> {
        if !dir.is_dir() {
            return Err(ArchiveError::invalid_argument(format!(
                "'{}' does not exist or is not a directory",
                dir.display()
            )));
        }
        Ok(InputSource::Directory(dir.to_path_buf()))
    }

    /// Returns the file or directory path.
    pub fn path(&self) -> &Path {
        match self {
            InputSource::File(path) | InputSource::Directory(path) => path,
        }
    }

    /// Returns `true` in directory mode.
    pub fn is_directory(&self) -> bool {
        matches!(self, InputSource::Directory(_))
    }

    /// Whether this mode writes the header row unless configured otherwise.
    pub fn default_header(&self) -> bool {
        self.is_directory()
    }
}

/// Returns the directory containing the running executable.
///
/// Used when neither a file nor a directory is given.
pub fn default_directory() -> Result<PathBuf> {
    let exe = std::env::current_exe()?;
    let exe = fs::canonicalize(&exe).unwrap_or(exe);
    exe.parent().map(Path::to_path_buf).ok_or_else(|| {
        ArchiveError::invalid_argument(format!(
            "cannot determine the directory of '{}'",
            exe.display()
        ))
    })
}

/// Lists the files directly inside `dir` whose name ends with `extension`,
/// in the order the filesystem enumerates them.
pub fn collect_files(dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if entry.file_name().to_string_lossy().ends_with(extension) && path.is_file() {
            files.push(path);
        }
    }
    Ok(files)
}

/// A file left out of a directory run.
#[derive(Debug)]
pub struct SkippedFile {
    /// The file that failed
    pub path: PathBuf,
    /// Why it failed
    pub error: ArchiveError,
}

/// Result of a batch run.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// All records, file by file, each file in document order
    pub records: Vec<MessageRecord>,
    /// Files that were extracted successfully
    pub files_processed: Vec<PathBuf>,
    /// Files that were skipped because extraction failed
    pub skipped: Vec<SkippedFile>,
    /// Whether the table gets a header row
    pub include_header: bool,
}

impl BatchReport {
    /// Returns `true` if any file was skipped.
    pub fn has_failures(&self) -> bool {
        !self.skipped.is_empty()
    }

    /// Earliest and latest parseable timestamp among the records.
    pub fn date_range(&self) -> Option<(NaiveDateTime, NaiveDateTime)> {
        self.records
            .iter()
            .filter_map(MessageRecord::timestamp)
            .fold(None, |range, ts| match range {
                None => Some((ts, ts)),
                Some((first, last)) => Some((first.min(ts), last.max(ts))),
            })
    }
}

/// Drives extraction over an [`InputSource`].
#[derive(Debug, Clone, Default)]
pub struct BatchRunner {
    config: BatchConfig,
    parser: TelegramHtmlParser,
}

impl BatchRunner {
    pub fn new(config: BatchConfig) -> Self {
        let parser = TelegramHtmlParser::with_config(config.parser.clone());
        Self { config, parser }
    }

    pub fn config(&self) -> &BatchConfig {
        &self.config
    }

    /// Extracts records from `source` without writing anything.
    ///
    /// In single-file mode any extraction error is returned. In directory
    /// mode a failing file is recorded in [`BatchReport::skipped`] and the
    /// run continues, unless [`BatchConfig::skip_malformed`] is off.
    pub fn collect(&self, source: &InputSource) -> Result<BatchReport> {
        let include_header = self
            .config
            .include_header
            .unwrap_or_else(|| source.default_header());
        let mut report = BatchReport {
            include_header,
            ..BatchReport::default()
        };

        match source {
            InputSource::File(path) => {
                report.records = self.parser.parse(path)?;
                report.files_processed.push(path.clone());
            }
            InputSource::Directory(dir) => {
                let files = collect_files(dir, &self.config.extension)?;
                tracing::debug!(dir = %dir.display(), files = files.len(), "collected export files");

                for path in files {
                    match self.parser.parse(&path) {
                        Ok(records) => {
                            report.records.extend(records);
                            report.files_processed.push(path);
                        }
                        Err(error) if self.config.skip_malformed => {
                            tracing::warn!(path = %path.display(), %error, "skipping file");
                            report.skipped.push(SkippedFile { path, error });
                        }
                        Err(error) => return Err(error),
                    }
                }
            }
        }

        Ok(report)
    }

    /// Writes the report's records to [`BatchConfig::output_path`].
    #[cfg(feature = "csv-output")]
    pub fn write(&self, report: &BatchReport) -> Result<()> {
        crate::core::output::write_csv(
            &report.records,
            &self.config.output_path,
            report.include_header,
        )
    }

    /// Extracts records from `source` and writes the table.
    #[cfg(feature = "csv-output")]
    pub fn run(&self, source: &InputSource) -> Result<BatchReport> {
        let report = self.collect(source)?;
        self.write(&report)?;
        Ok(report)
    }
}
