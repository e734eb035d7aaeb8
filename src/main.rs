//! # tgarchive CLI
//!
//! Command-line interface for the tgarchive library.

use std::process;
use std::time::Instant;

use clap::Parser as ClapParser;
use tracing_subscriber::EnvFilter;

use tgarchive::ArchiveError;
use tgarchive::cli::Args;
use tgarchive::config::BatchConfig;
use tgarchive::core::{BatchRunner, InputSource, default_directory};

fn main() {
    init_tracing();

    match run() {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            eprintln!("❌ Error: {}", e);
            process::exit(1);
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Runs one batch. Returns `Ok(false)` when some files had to be skipped.
fn run() -> Result<bool, ArchiveError> {
    let total_start = Instant::now();
    let args = <Args as ClapParser>::parse();

    let resolution =
        InputSource::resolve(args.file.as_deref(), args.directory.as_deref(), default_directory)?;
    let config = BatchConfig::new();

    println!("📦 tgarchive v{}", env!("CARGO_PKG_VERSION"));
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    match &resolution.source {
        InputSource::Directory(dir) => println!("📂 Directory: {}", dir.display()),
        InputSource::File(file) => println!("📄 File:      {}", file.display()),
    }
    println!("💾 Output:    {}", config.output_path.display());

    if let Some(ignored) = &resolution.file_ignored {
        tracing::warn!(file = %ignored.display(), "--file ignored because --directory was given");
        println!("⚠️  Ignoring --file {} (--directory takes precedence)", ignored.display());
    }
    if !resolution.source.default_header() {
        println!("ℹ️  Single-file mode: no header row is written");
    }
    println!();

    let runner = BatchRunner::new(config);

    println!("⏳ Extracting messages...");
    let parse_start = Instant::now();
    let report = runner.collect(&resolution.source)?;
    println!(
        "   Found {} messages in {} file(s) ({:.2}s)",
        report.records.len(),
        report.files_processed.len(),
        parse_start.elapsed().as_secs_f64()
    );

    for skipped in &report.skipped {
        eprintln!("⚠️  Skipped {}: {}", skipped.path.display(), skipped.error);
    }

    println!("💾 Writing CSV...");
    runner.write(&report)?;

    println!();
    println!("✅ Done! Output saved to {}", runner.config().output_path.display());

    // Summary
    println!();
    println!("📊 Summary:");
    println!("   Messages:  {}", report.records.len());
    println!("   Files:     {}", report.files_processed.len());
    if report.has_failures() {
        println!("   Skipped:   {}", report.skipped.len());
    }
    if let Some((first, last)) = report.date_range() {
        println!(
            "   Period:    {} → {}",
            first.format("%Y-%m-%d %H:%M"),
            last.format("%Y-%m-%d %H:%M")
        );
    }
    println!("   Time:      {:.2}s", total_start.elapsed().as_secs_f64());

    Ok(!report.has_failures())
}
