//! Linear walk over the headers of an in-memory ZIP archive.
//!
//! The walker does not use the central directory to locate entries. It
//! scans the buffer from the start, decodes each local or central header it
//! finds, and jumps over the record using the lengths the header declares.
//! Anything else (data descriptors, the end of central directory record,
//! junk) is skipped while hunting for the next signature.
//!
//! ## Signature hunting
//!
//! Every header signature starts with `PK`, so the walker jumps directly to
//! the next occurrence of that pair instead of stepping one byte at a time.
//! Positions in between cannot match, so the set and order of visited
//! records is unchanged.

use byteorder::{ByteOrder, LittleEndian};
use memchr::memmem;
use tracing::{debug, trace};

use super::detector::{self, Detection};
use super::error::DecodeError;
use super::structures::{ENCRYPTED_FLAG, RecordHeader, RecordKind, SIGNATURE_PREFIX};

/// Iterator over every recognized header, in file order.
///
/// Yields at most one error, after which iteration stops.
///
/// ## Example
///
/// ```
/// use fakezip::zip::RecordWalker;
///
/// let data = b"no headers in here";
/// assert_eq!(RecordWalker::new(data).count(), 0);
/// ```
pub struct RecordWalker<'a> {
    data: &'a [u8],
    cursor: usize,
}

impl<'a> RecordWalker<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, cursor: 0 }
    }

    /// Current cursor position.
    pub fn position(&self) -> usize {
        self.cursor
    }

    /// Next position at or after `from` that could start a signature.
    fn next_candidate(&self, from: usize) -> usize {
        match self.data.get(from..) {
            Some(rest) => memmem::find(rest, SIGNATURE_PREFIX).map_or(self.data.len(), |i| from + i),
            None => self.data.len(),
        }
    }
}

impl Iterator for RecordWalker<'_> {
    type Item = Result<RecordHeader, DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        while self.cursor < self.data.len() {
            let Some(kind) = RecordKind::at(self.data, self.cursor) else {
                self.cursor = self.next_candidate(self.cursor + 1);
                continue;
            };

            return match RecordHeader::decode(self.data, self.cursor, kind) {
                Ok(header) => {
                    trace!(
                        kind = kind.short_name(),
                        offset = header.offset,
                        flags = header.flags,
                        length = header.total_length(),
                        "record"
                    );
                    self.cursor = header.next_offset();
                    Some(Ok(header))
                }
                Err(e) => {
                    self.cursor = self.data.len();
                    Some(Err(e))
                }
            };
        }

        None
    }
}

/// What to do with each recognized header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordAction {
    /// Read the flags and classify the archive
    Inspect,
    /// Set the encrypted bit on every header
    SetFlag,
    /// Clear the encrypted bit on every header
    ClearFlag,
}

impl RecordAction {
    /// New value of a flag field. Only bit 0 is ever changed.
    pub fn apply(&self, flags: u16) -> u16 {
        match self {
            RecordAction::Inspect => flags,
            RecordAction::SetFlag => flags | ENCRYPTED_FLAG,
            RecordAction::ClearFlag => flags & !ENCRYPTED_FLAG,
        }
    }
}

/// Result of a walk: counters for [`RecordAction::Inspect`], a new buffer otherwise.
#[derive(Debug, Clone)]
pub enum WalkOutcome {
    Inspected(Detection),
    Rewritten(Vec<u8>),
}

/// Walk `data` once, applying `action` to every recognized header.
///
/// The input is never modified. Rewrites return a copy of the same length
/// that differs only in bit 0 of the flag fields.
///
/// # Errors
///
/// Returns [`DecodeError`] if a header is cut off inside its fixed fields.
/// No partial output is produced.
pub fn walk(data: &[u8], action: RecordAction) -> Result<WalkOutcome, DecodeError> {
    debug!(?action, size = data.len(), "walking archive");

    match action {
        RecordAction::Inspect => detector::detect(data).map(WalkOutcome::Inspected),
        RecordAction::SetFlag | RecordAction::ClearFlag => {
            rewrite_flags(data, action).map(WalkOutcome::Rewritten)
        }
    }
}

/// Copy of `data` with the encrypted bit set on every header.
pub fn set_encryption_flag(data: &[u8]) -> Result<Vec<u8>, DecodeError> {
    rewrite_flags(data, RecordAction::SetFlag)
}

/// Copy of `data` with the encrypted bit cleared on every header.
pub fn clear_encryption_flag(data: &[u8]) -> Result<Vec<u8>, DecodeError> {
    rewrite_flags(data, RecordAction::ClearFlag)
}

fn rewrite_flags(data: &[u8], action: RecordAction) -> Result<Vec<u8>, DecodeError> {
    let mut out = data.to_vec();
    let mut changed = 0usize;

    for header in RecordWalker::new(data) {
        let header = header?;
        let flags = action.apply(header.flags);
        if flags != header.flags {
            let at = header.flags_position();
            LittleEndian::write_u16(&mut out[at..at + 2], flags);
            changed += 1;
        }
    }

    debug!(?action, changed, "rewrote flag fields");
    Ok(out)
}
