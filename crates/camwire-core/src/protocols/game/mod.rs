//! Game protocol decoding.
//!
//! A frame payload holds one or more server messages, each starting with an
//! opcode byte. The [`Decoder`] looks the opcode up in a [`Registry`], runs
//! the matching routine and continues after the bytes it consumed. Payloads
//! it cannot follow end in an `Unhandled` event, optionally after a
//! talk-based resynchronization attempt (see `resync`).
//!
//! Wire constants live in `layout`, little-endian reads and string rules in
//! `reader`, and per-opcode routines in `parser`.

pub mod decoder;
pub mod error;
pub mod event;
pub mod layout;
pub mod mode;
pub mod opcode;
pub mod parser;
pub mod reader;
pub mod registry;
pub mod resync;

pub use decoder::{Decoder, DecoderConfig};
pub use error::DecodeError;
pub use event::{
    ChangeOnMap, Creature, CreatureHealth, Event, LoginOrPendingState, MappedThing, MarkCreature,
    MoveCreature, Outfit, PlayerData, Position, Talk, TalkOrigin, Thing,
};
pub use mode::{MessageMode, ModeField};
pub use opcode::OpCode;
pub use parser::{DecodeContext, DecodeFn, Decoded, TalkOptions};
pub use registry::Registry;
