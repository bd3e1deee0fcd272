//! ZIP header walking and encryption flag editing.
//!
//! This module finds every Local File Header and Central Directory File
//! Header in an in-memory archive and reads or rewrites bit 0 of their
//! general purpose flags (the "encrypted" bit). Compressed data, names,
//! extra fields and comments are never touched.
//!
//! ## Architecture
//!
//! - [`structures`]: header signatures, field offsets and [`RecordHeader`] decoding
//! - [`walker`]: the linear [`RecordWalker`] and the [`walk`] entry point
//! - [`detector`]: fake-encryption detection built on the walker
//!
//! ## ZIP Format Overview
//!
//! ```text
//! [LFH][name][extra][data] ... [CDFH][name][extra][comment] ... [EOCD]
//! ```
//!
//! Both header kinds carry the same 16-bit flag field, at offset 6 in the
//! LFH and offset 8 in the CDFH. Archive tools decide whether to ask for a
//! password from that bit alone, so setting it without encrypting anything
//! yields a "fake-encrypted" archive.
//!
//! ## Limitations
//!
//! - The end of central directory record and ZIP64 fields are not parsed
//! - No multi-disk archive support
//! - Payloads are never decompressed or CRC checked

mod detector;
mod error;
mod structures;
mod walker;

pub use detector::{Detection, EntryReport, PAYLOAD_SAMPLE_LEN, PayloadKind, Verdict, detect};
pub use error::DecodeError;
pub use structures::*;
pub use walker::{
    RecordAction, RecordWalker, WalkOutcome, clear_encryption_flag, set_encryption_flag, walk,
};
