//! Camwire core library for offline `.cam` capture decoding.
//!
//! A capture is a sequence of timestamped frames, each holding one or more
//! game protocol messages. Frame sources read captures into shared buffers,
//! the decoder walks each payload with cheap [`PacketView`]s and dispatches
//! on the opcode, and the pipeline runs reading and decoding as separate
//! stages. Decoding is byte-oriented and side-effect free; all I/O is
//! isolated in `source` and `catalog`.
//!
//! Invariants:
//! - Events come out in capture order, and every frame yields at least one.
//! - Bytes the decoder cannot follow surface as [`Event::Unhandled`], never
//!   as silent loss.
//! - Decoding identical bytes with the same configuration is deterministic.
//!
//! # Examples
//! ```no_run
//! use std::path::Path;
//!
//! use camwire_core::{DecoderConfig, Event, NoAttributes, decode_capture_file};
//!
//! let config = DecoderConfig {
//!     resync: true,
//!     ..DecoderConfig::default()
//! };
//! for event in decode_capture_file(Path::new("session.cam"), &config, &NoAttributes)? {
//!     if let Event::Talk(talk) = event {
//!         println!("{}: {}", talk.name, talk.message);
//!     }
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod catalog;
mod packet;
mod pipeline;
mod protocols;
mod source;

pub use catalog::{
    AttributeSet, CatalogError, DatAttribute, DatCategory, ItemAttributeLookup, ItemCatalog,
    NoAttributes, parse_catalog,
};
pub use packet::PacketView;
pub use pipeline::{CaptureStream, PipelineError, decode_capture_file, decode_source};
pub use protocols::game::parser::{
    decode_change_on_map, decode_creature_health, decode_login_or_pending_state,
    decode_mark_creature, decode_move_creature, decode_player_data, decode_talk,
    decode_talk_with,
};
pub use protocols::game::resync::{Recovered, find_talk};
pub use protocols::game::{
    ChangeOnMap, Creature, CreatureHealth, DecodeContext, DecodeError, DecodeFn, Decoded, Decoder,
    DecoderConfig, Event, LoginOrPendingState, MappedThing, MarkCreature, MessageMode, ModeField,
    MoveCreature, OpCode, Outfit, PlayerData, Position, Registry, Talk, TalkOptions, TalkOrigin,
    Thing,
};
pub use source::{CamFileSource, Frame, FrameReader, FrameSource, SourceError};
