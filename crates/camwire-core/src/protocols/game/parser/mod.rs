//! Per-opcode decode routines.
//!
//! Every routine checks it was dispatched for its own opcode, reads the
//! message with a [`GameReader`] positioned after the opcode byte, and
//! reports how many bytes the message occupied so the caller can continue
//! with the rest of the payload.

mod creature;
mod login;
mod map;
mod player;
mod talk;
mod thing;

pub use creature::{decode_creature_health, decode_mark_creature};
pub use login::decode_login_or_pending_state;
pub use map::{decode_change_on_map, decode_move_creature};
pub use player::decode_player_data;
pub use talk::{decode_talk, decode_talk_with};

use crate::catalog::ItemAttributeLookup;
use crate::packet::PacketView;

use super::error::DecodeError;
use super::event::Event;
use super::layout;
use super::opcode::OpCode;
use super::reader::GameReader;

/// How strictly talk messages are validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TalkOptions {
    /// Accept message modes without a known layout, assuming no extra field.
    pub lenient_modes: bool,
    /// Require printable ASCII in the speaker name and message.
    pub printable_only: bool,
}

/// Inputs shared by every decode routine.
#[derive(Clone, Copy)]
pub struct DecodeContext<'a> {
    pub lookup: &'a dyn ItemAttributeLookup,
    pub talk: TalkOptions,
}

/// A decoded message and the number of payload bytes it occupied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    pub event: Event,
    pub consumed: usize,
}

pub type DecodeFn = fn(&PacketView, &DecodeContext<'_>) -> Result<Decoded, DecodeError>;

/// Check the opcode and return a reader positioned after it.
fn begin(view: &PacketView, expected: OpCode) -> Result<GameReader<'_>, DecodeError> {
    let actual = view.opcode();
    if actual != expected {
        return Err(DecodeError::OpcodeMismatch { expected, actual });
    }
    let mut reader = GameReader::new(view.bytes());
    reader.skip(layout::OPCODE_LEN)?;
    Ok(reader)
}

fn finish(event: Event, reader: &GameReader<'_>) -> Result<Decoded, DecodeError> {
    Ok(Decoded {
        event,
        consumed: reader.position(),
    })
}
