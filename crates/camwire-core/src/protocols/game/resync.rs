//! Talk-based resynchronization.
//!
//! When a message cannot be decoded, the rest of the payload is searched for
//! an embedded talk message that validates as printable text. Matches are a
//! heuristic: a spurious hit is possible and accepted.

use tracing::debug;

use crate::packet::PacketView;

use super::opcode::OpCode;
use super::parser::{Decoded, TalkOptions, decode_talk_with};

/// Talk validation used while scanning.
pub const RESYNC_TALK_OPTIONS: TalkOptions = TalkOptions {
    lenient_modes: true,
    printable_only: true,
};

/// A talk message found inside a payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recovered {
    /// Bytes skipped before the talk message.
    pub skipped: usize,
    pub decoded: Decoded,
}

impl Recovered {
    /// Bytes of the original view covered by the skip and the message.
    pub fn consumed(&self) -> usize {
        self.skipped + self.decoded.consumed
    }
}

/// Scan `view` from its second byte for the first valid talk message.
pub fn find_talk(view: &PacketView) -> Option<Recovered> {
    let bytes = view.bytes();
    for skipped in 1..bytes.len() {
        if bytes[skipped] != OpCode::TALK.0 {
            continue;
        }
        let Some(candidate) = view.next(skipped) else {
            break;
        };
        if let Ok(decoded) = decode_talk_with(&candidate, RESYNC_TALK_OPTIONS) {
            debug!(
                offset = candidate.absolute_offset(),
                skipped, "resynchronized on talk message"
            );
            return Some(Recovered { skipped, decoded });
        }
    }
    None
}
