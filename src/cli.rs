use chrono::Local;
use clap::Parser;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::zip::RecordAction;

/// File name marker for archives produced by `-g`.
pub const FAKE_MARKER: &str = "fake";
/// File name marker for archives produced by `-u`.
pub const UNFAKE_MARKER: &str = "unfake";

#[derive(Parser, Debug)]
#[command(name = "fakezip")]
#[command(version)]
#[command(about = "Detect, generate, or remove ZIP fake encryption", long_about = None)]
#[command(after_help = "Examples:\n  \
  fakezip -f data.zip               report whether data.zip is fake-encrypted\n  \
  fakezip -f data.zip -g            write data_<timestamp>_fake.zip with the flag set\n  \
  fakezip -f locked.zip -u out.zip  clear the flag and write out.zip")]
pub struct Cli {
    /// ZIP file path
    #[arg(short = 'f', long = "file", value_name = "FILE")]
    pub file: PathBuf,

    /// Generate a fake-encrypted copy (default output is derived from FILE)
    #[arg(
        short = 'g',
        long = "generate",
        value_name = "OUTPUT",
        num_args = 0..=1,
        default_missing_value = "",
        conflicts_with = "unfake"
    )]
    pub generate: Option<String>,

    /// Remove fake encryption into a copy (default output is derived from FILE)
    #[arg(
        short = 'u',
        long = "unfake",
        value_name = "OUTPUT",
        num_args = 0..=1,
        default_missing_value = ""
    )]
    pub unfake: Option<String>,

    /// List every header with its flags before the verdict
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Quiet mode
    #[arg(short = 'q', action = clap::ArgAction::Count)]
    pub quiet: u8,
}

/// The single operation an invocation performs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Detect,
    /// Set the encrypted bit; `None` means derive the output path
    Generate(Option<PathBuf>),
    /// Clear the encrypted bit; `None` means derive the output path
    Unfake(Option<PathBuf>),
}

impl Mode {
    /// Walk action performed for this mode.
    pub fn action(&self) -> RecordAction {
        match self {
            Mode::Detect => RecordAction::Inspect,
            Mode::Generate(_) => RecordAction::SetFlag,
            Mode::Unfake(_) => RecordAction::ClearFlag,
        }
    }

    /// File name marker used when deriving an output path.
    pub fn marker(&self) -> Option<&'static str> {
        match self {
            Mode::Detect => None,
            Mode::Generate(_) => Some(FAKE_MARKER),
            Mode::Unfake(_) => Some(UNFAKE_MARKER),
        }
    }
}

impl Cli {
    pub fn mode(&self) -> Mode {
        // A blank value behaves like a bare flag.
        let output = |value: &String| {
            let value = value.trim();
            (!value.is_empty()).then(|| PathBuf::from(value))
        };

        if let Some(ref value) = self.generate {
            Mode::Generate(output(value))
        } else if let Some(ref value) = self.unfake {
            Mode::Unfake(output(value))
        } else {
            Mode::Detect
        }
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet > 0
    }
}

/// Local time formatted for output file names.
pub fn timestamp_now() -> String {
    Local::now().format("%Y%m%d_%H%M%S").to_string()
}

/// Derive `<dir>/<stem>_<timestamp>_<marker><.ext>` from the source path.
///
/// # Examples
///
/// ```
/// use std::path::{Path, PathBuf};
/// use fakezip::cli::derive_output_path;
///
/// let out = derive_output_path(Path::new("dir/data.zip"), "fake", "20240102_030405");
/// assert_eq!(out, PathBuf::from("dir/data_20240102_030405_fake.zip"));
/// ```
pub fn derive_output_path(source: &Path, marker: &str, timestamp: &str) -> PathBuf {
    let mut name: OsString = source.file_stem().unwrap_or_default().to_os_string();
    name.push(format!("_{timestamp}_{marker}"));
    if let Some(ext) = source.extension() {
        name.push(".");
        name.push(ext);
    }
    source.with_file_name(name)
}
