//! Command-line interface definition using clap.
//!
//! Two optional flags select the input; without either, the directory the
//! executable lives in is read.
//!
//! ```rust
//! use clap::Parser;
//! use tgarchive::cli::Args;
//!
//! let args = Args::parse_from(["tgarchive", "-d", "ChatExport_2021-01-26"]);
//! assert_eq!(args.directory.as_deref(), Some(std::path::Path::new("ChatExport_2021-01-26")));
//! assert!(args.file.is_none());
//! ```

use std::path::PathBuf;

use clap::Parser;

/// Parse a Telegram HTML chat export and write its messages to output.csv.
///
/// By default the .html files next to the executable are read.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "tgarchive")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    tgarchive -d ChatExport_2021-01-26
    tgarchive --file ChatExport_2021-01-26/messages.html
    tgarchive

When both --file and --directory are given, --directory is used.")]
pub struct Args {
    /// Single HTML file containing the messages to extract
    #[arg(short, long, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Directory containing the HTML files
    #[arg(short, long, value_name = "PATH")]
    pub directory: Option<PathBuf>,
}
