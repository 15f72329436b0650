use thiserror::Error;

use super::mode::MessageMode;
use super::opcode::OpCode;

/// Errors returned by game message decoding.
///
/// # Examples
/// ```
/// use camwire_core::DecodeError;
///
/// let err = DecodeError::Truncated { offset: 3, needed: 2, available: 1 };
/// assert!(err.to_string().contains("truncated"));
/// assert!(err.is_recoverable());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("message truncated at byte {offset}: need {needed} bytes, {available} left")]
    Truncated {
        offset: usize,
        needed: usize,
        available: usize,
    },
    #[error("unknown message mode {mode}")]
    UnknownMessageMode { mode: MessageMode },
    #[error("non-printable byte {value} in {field} at byte {offset}")]
    IntegrityViolation {
        field: &'static str,
        offset: usize,
        value: u8,
    },
    #[error("decoder for {expected} invoked on {actual}")]
    OpcodeMismatch { expected: OpCode, actual: OpCode },
}

impl DecodeError {
    /// Whether the failure only affects the current message. Recoverable
    /// failures become resynchronization attempts or `Unhandled` events;
    /// anything else aborts decoding.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, DecodeError::OpcodeMismatch { .. })
    }
}
