//! # fakezip
//!
//! Detect, generate, or remove "fake encryption" in ZIP archives.
//!
//! A ZIP entry is marked as encrypted by bit 0 of the general purpose flags
//! in its Local File Header and Central Directory File Header. Setting that
//! bit without encrypting the data makes archive tools ask for a password
//! that does not exist. This crate walks the raw archive bytes, finds every
//! header and reads or rewrites that single bit, leaving all other bytes
//! untouched.
//!
//! ## Features
//!
//! - Detect archives whose encrypted entries are fake
//! - Set the encrypted bit on every header (`-g`)
//! - Clear the encrypted bit on every header (`-u`)
//! - Tolerates junk, data descriptors and truncated payloads between headers
//!
//! ## Example
//!
//! ```
//! use fakezip::zip::{Verdict, detect, set_encryption_flag};
//!
//! // A single empty stored entry: LFH followed by its CDFH.
//! let mut data = vec![0u8; 30 + 46];
//! data[..4].copy_from_slice(b"PK\x03\x04");
//! data[30..34].copy_from_slice(b"PK\x01\x02");
//!
//! assert_eq!(detect(&data)?.verdict(), Verdict::NotFakeEncrypted);
//!
//! let faked = set_encryption_flag(&data)?;
//! assert_eq!(detect(&faked)?.verdict(), Verdict::FakeEncrypted);
//! # Ok::<(), fakezip::zip::DecodeError>(())
//! ```

pub mod cli;
pub mod io;
pub mod logging;
pub mod zip;

pub use cli::{Cli, Mode};
pub use io::{LocalArchive, write_archive};
pub use zip::{DecodeError, Detection, RecordAction, Verdict, WalkOutcome, walk};
