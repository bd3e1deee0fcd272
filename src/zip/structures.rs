use std::fmt;

use byteorder::{ByteOrder, LittleEndian};

use super::error::DecodeError;

/// General purpose bit 0: the entry is encrypted.
pub const ENCRYPTED_FLAG: u16 = 0x0001;

/// Local File Header (LFH) - 30 bytes
pub const LFH_SIGNATURE: &[u8] = b"PK\x03\x04";
pub const LFH_SIZE: usize = 30;

/// Central Directory File Header (CDFH) - 46 bytes minimum
pub const CDFH_SIGNATURE: &[u8] = b"PK\x01\x02";
pub const CDFH_MIN_SIZE: usize = 46;

/// Common two-byte prefix of every header signature.
pub(crate) const SIGNATURE_PREFIX: &[u8] = b"PK";

// LFH field offsets
const LFH_FLAGS: usize = 6;
const LFH_COMPRESSED_SIZE: usize = 18;
const LFH_FILE_NAME_LENGTH: usize = 26;
const LFH_EXTRA_FIELD_LENGTH: usize = 28;

// CDFH field offsets
const CDFH_FLAGS: usize = 8;
const CDFH_FILE_NAME_LENGTH: usize = 28;
const CDFH_EXTRA_FIELD_LENGTH: usize = 30;
const CDFH_COMMENT_LENGTH: usize = 32;

/// The two header types the walker recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    LocalFile,
    CentralDirectory,
}

impl RecordKind {
    /// Identify the header starting at `offset`, if any.
    ///
    /// A signature needs all four bytes in the buffer to match.
    pub fn at(data: &[u8], offset: usize) -> Option<Self> {
        let sig = data.get(offset..offset.checked_add(4)?)?;
        if sig == LFH_SIGNATURE {
            Some(RecordKind::LocalFile)
        } else if sig == CDFH_SIGNATURE {
            Some(RecordKind::CentralDirectory)
        } else {
            None
        }
    }

    pub fn signature(&self) -> &'static [u8] {
        match self {
            RecordKind::LocalFile => LFH_SIGNATURE,
            RecordKind::CentralDirectory => CDFH_SIGNATURE,
        }
    }

    /// Size of the fixed part of the header.
    pub fn fixed_size(&self) -> usize {
        match self {
            RecordKind::LocalFile => LFH_SIZE,
            RecordKind::CentralDirectory => CDFH_MIN_SIZE,
        }
    }

    /// Offset of the general purpose flags within the header.
    pub fn flags_offset(&self) -> usize {
        match self {
            RecordKind::LocalFile => LFH_FLAGS,
            RecordKind::CentralDirectory => CDFH_FLAGS,
        }
    }

    /// Number of header bytes that must be present to decode the record.
    ///
    /// The CDFH only needs its fields up to the comment length, not the
    /// full 46 byte header.
    pub fn decoded_len(&self) -> usize {
        match self {
            RecordKind::LocalFile => LFH_SIZE,
            RecordKind::CentralDirectory => CDFH_COMMENT_LENGTH + 2,
        }
    }

    pub fn short_name(&self) -> &'static str {
        match self {
            RecordKind::LocalFile => "LFH",
            RecordKind::CentralDirectory => "CDFH",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordKind::LocalFile => f.write_str("local file header"),
            RecordKind::CentralDirectory => f.write_str("central directory header"),
        }
    }
}

/// A header recognized during the walk, with the fields needed to skip it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordHeader {
    pub kind: RecordKind,
    /// Offset of the signature in the archive buffer
    pub offset: usize,
    pub flags: u16,
    pub file_name_length: u16,
    pub extra_field_length: u16,
    /// Declared compressed size (LFH only, zero for a CDFH)
    pub compressed_size: u32,
    /// File comment length (CDFH only, zero for an LFH)
    pub comment_length: u16,
}

impl RecordHeader {
    /// Decode the header of the given kind starting at `offset`.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::Truncated`] if the buffer ends before the
    /// last field the walker consumes.
    pub fn decode(data: &[u8], offset: usize, kind: RecordKind) -> Result<Self, DecodeError> {
        let needed = kind.decoded_len();
        let available = data.len().saturating_sub(offset);
        let fields = offset
            .checked_add(needed)
            .and_then(|end| data.get(offset..end))
            .ok_or(DecodeError::Truncated {
                kind,
                offset,
                needed,
                available,
            })?;

        let read_u16 = |at: usize| LittleEndian::read_u16(&fields[at..at + 2]);

        let header = match kind {
            RecordKind::LocalFile => Self {
                kind,
                offset,
                flags: read_u16(LFH_FLAGS),
                file_name_length: read_u16(LFH_FILE_NAME_LENGTH),
                extra_field_length: read_u16(LFH_EXTRA_FIELD_LENGTH),
                compressed_size: LittleEndian::read_u32(
                    &fields[LFH_COMPRESSED_SIZE..LFH_COMPRESSED_SIZE + 4],
                ),
                comment_length: 0,
            },
            RecordKind::CentralDirectory => Self {
                kind,
                offset,
                flags: read_u16(CDFH_FLAGS),
                file_name_length: read_u16(CDFH_FILE_NAME_LENGTH),
                extra_field_length: read_u16(CDFH_EXTRA_FIELD_LENGTH),
                compressed_size: 0,
                comment_length: read_u16(CDFH_COMMENT_LENGTH),
            },
        };

        Ok(header)
    }

    pub fn is_encrypted(&self) -> bool {
        self.flags & ENCRYPTED_FLAG != 0
    }

    /// Absolute position of the flag field in the archive buffer.
    pub fn flags_position(&self) -> usize {
        self.offset + self.kind.flags_offset()
    }

    /// Absolute position just past the fixed header, name and extra field.
    ///
    /// For an LFH this is where the compressed data begins.
    pub fn data_offset(&self) -> usize {
        self.offset
            .saturating_add(self.kind.fixed_size())
            .saturating_add(self.file_name_length as usize)
            .saturating_add(self.extra_field_length as usize)
    }

    /// Length of the trailing variable part: compressed data or comment.
    pub fn body_length(&self) -> u64 {
        match self.kind {
            RecordKind::LocalFile => self.compressed_size as u64,
            RecordKind::CentralDirectory => self.comment_length as u64,
        }
    }

    /// Total declared length of the record, from signature to the next record.
    pub fn total_length(&self) -> u64 {
        self.kind.fixed_size() as u64
            + self.file_name_length as u64
            + self.extra_field_length as u64
            + self.body_length()
    }

    /// Cursor position of the next record. Never moves backward.
    pub fn next_offset(&self) -> usize {
        let length = usize::try_from(self.total_length()).unwrap_or(usize::MAX);
        self.offset.saturating_add(length)
    }
}
