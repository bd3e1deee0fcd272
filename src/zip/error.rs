use thiserror::Error;

use super::structures::RecordKind;

/// Failure to decode a recognized header.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// A signature matched but the buffer ends before the fields the walker needs.
    #[error("truncated {kind} at offset {offset}: need {needed} bytes, {available} available")]
    Truncated {
        kind: RecordKind,
        offset: usize,
        needed: usize,
        available: usize,
    },
}
