//! Main entry point for the fakezip CLI application.
//!
//! Reads the archive named by `-f`, then either reports whether it is
//! fake-encrypted or writes a copy with the encrypted bit set (`-g`) or
//! cleared (`-u`).

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;

use fakezip::cli::{derive_output_path, timestamp_now};
use fakezip::zip::{Detection, WalkOutcome, walk};
use fakezip::{Cli, LocalArchive, Mode, logging, write_archive};

/// Application entry point.
///
/// Parses command-line arguments, loads the archive and runs the selected
/// mode as a single walk over its bytes.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    logging::init();
    let cli = Cli::parse();

    let archive = LocalArchive::open(&cli.file).await?;
    let data = archive.read_all().await?;
    let mode = cli.mode();

    match walk(&data, mode.action()) {
        Ok(WalkOutcome::Inspected(detection)) => {
            if cli.verbose {
                print_entries(&detection);
            }
            println!("{}", detection.verdict());
        }
        Ok(WalkOutcome::Rewritten(rewritten)) => {
            let output = output_path(&archive, &mode);
            write_archive(&output, &rewritten).await?;

            if !cli.is_quiet() {
                match mode {
                    Mode::Generate(_) => {
                        println!("Generated fake-encrypted archive: {}", output.display())
                    }
                    _ => println!(
                        "Generated archive without fake encryption: {}",
                        output.display()
                    ),
                }
            }
        }
        // A decode failure during detection is reported, not treated as a verdict
        Err(e) if mode == Mode::Detect => {
            error!(path = %archive.path().display(), "detection failed: {e}");
            println!("Could not determine encryption status: {e}");
            return Ok(ExitCode::FAILURE);
        }
        Err(e) => {
            return Err(e)
                .with_context(|| format!("Failed to rewrite {}", archive.path().display()));
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// Explicit output path from the command line, or one derived from the source.
fn output_path(archive: &LocalArchive, mode: &Mode) -> PathBuf {
    match mode {
        Mode::Generate(Some(path)) | Mode::Unfake(Some(path)) => path.clone(),
        _ => derive_output_path(
            archive.path(),
            mode.marker().unwrap_or_default(),
            &timestamp_now(),
        ),
    }
}

/// Print one line per visited header, in file order.
fn print_entries(detection: &Detection) {
    println!(
        "{:<5}  {:>10}  {:>6}  {:>5}  {:>5}  {:>10}  Payload",
        "Kind", "Offset", "Flags", "Name", "Extra", "Size"
    );
    println!("{}", "-".repeat(62));

    for entry in &detection.entries {
        let header = &entry.header;
        println!(
            "{:<5}  {:>10}  0x{:04x}  {:>5}  {:>5}  {:>10}  {}",
            header.kind.short_name(),
            header.offset,
            header.flags,
            header.file_name_length,
            header.extra_field_length,
            header.body_length(),
            entry.payload.map(|p| p.as_str()).unwrap_or("-")
        );
    }

    println!("{}", "-".repeat(62));
    println!(
        "{} local, {} central, {} encrypted, {} fake",
        detection.local_headers,
        detection.central_headers,
        detection.encrypted_count,
        detection.fake_encrypted_count
    );
}
