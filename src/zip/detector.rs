use std::fmt;

use tracing::debug;

use super::error::DecodeError;
use super::structures::{RecordHeader, RecordKind};
use super::walker::RecordWalker;

/// Number of payload bytes sampled after an encrypted local header.
pub const PAYLOAD_SAMPLE_LEN: usize = 12;

/// Rough shape of the first bytes of an entry's compressed data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadKind {
    /// Printable ASCII (or too short to tell)
    Plaintext,
    /// Anything else: real ciphertext or ordinary compressed data
    Opaque,
}

impl PayloadKind {
    /// Classify a payload sample.
    pub fn of(sample: &[u8]) -> Self {
        let printable = |b: &u8| matches!(*b, 32..=126 | b'\t' | b'\n' | b'\r');
        if sample.len() < PAYLOAD_SAMPLE_LEN || sample.iter().all(printable) {
            PayloadKind::Plaintext
        } else {
            PayloadKind::Opaque
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PayloadKind::Plaintext => "plaintext",
            PayloadKind::Opaque => "opaque",
        }
    }
}

/// One header visited during detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryReport {
    pub header: RecordHeader,
    /// Payload sample class, for encrypted local headers only
    pub payload: Option<PayloadKind>,
}

/// Counters gathered by a detection pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Detection {
    /// Local headers with the encrypted bit set
    pub encrypted_count: usize,
    /// Encrypted local headers classified as fake
    pub fake_encrypted_count: usize,
    pub local_headers: usize,
    pub central_headers: usize,
    pub entries: Vec<EntryReport>,
}

impl Detection {
    /// True if at least one entry claims encryption and every such entry is fake.
    pub fn is_fake_encrypted(&self) -> bool {
        self.encrypted_count > 0 && self.encrypted_count == self.fake_encrypted_count
    }

    pub fn verdict(&self) -> Verdict {
        if self.is_fake_encrypted() {
            Verdict::FakeEncrypted
        } else {
            Verdict::NotFakeEncrypted
        }
    }
}

/// Final answer of a detection pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    FakeEncrypted,
    NotFakeEncrypted,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::FakeEncrypted => f.write_str("This archive is fake-encrypted."),
            Verdict::NotFakeEncrypted => f.write_str("This archive is not fake-encrypted."),
        }
    }
}

/// Whether an encrypted entry with this payload counts as fake.
fn counts_as_fake(payload: PayloadKind) -> bool {
    match payload {
        PayloadKind::Plaintext => true,
        // Ciphertext and deflate output look alike in 12 bytes, so opaque
        // payloads are counted as fake too.
        PayloadKind::Opaque => true,
    }
}

/// Inspect every header in `data` without modifying it.
///
/// Only local headers contribute to the counters. Central directory
/// headers are visited and reported but never counted.
///
/// # Errors
///
/// Returns [`DecodeError`] if any header is truncated. No partial
/// result is returned.
pub fn detect(data: &[u8]) -> Result<Detection, DecodeError> {
    let mut detection = Detection::default();

    for header in RecordWalker::new(data) {
        let header = header?;
        let mut payload = None;

        match header.kind {
            RecordKind::LocalFile => {
                detection.local_headers += 1;
                if header.is_encrypted() {
                    detection.encrypted_count += 1;
                    let start = header.data_offset().min(data.len());
                    let end = start.saturating_add(PAYLOAD_SAMPLE_LEN).min(data.len());
                    let kind = PayloadKind::of(&data[start..end]);
                    if counts_as_fake(kind) {
                        detection.fake_encrypted_count += 1;
                    }
                    payload = Some(kind);
                }
            }
            RecordKind::CentralDirectory => detection.central_headers += 1,
        }

        detection.entries.push(EntryReport { header, payload });
    }

    debug!(
        local = detection.local_headers,
        central = detection.central_headers,
        encrypted = detection.encrypted_count,
        fake = detection.fake_encrypted_count,
        "detection finished"
    );

    Ok(detection)
}
