use crate::packet::PacketView;
use crate::protocols::game::error::DecodeError;
use crate::protocols::game::event::{Event, Talk, TalkOrigin};
use crate::protocols::game::mode::{MessageMode, ModeField};
use crate::protocols::game::opcode::OpCode;

use super::thing::read_position;
use super::{DecodeContext, Decoded, TalkOptions, begin, finish};

pub fn decode_talk(view: &PacketView, ctx: &DecodeContext<'_>) -> Result<Decoded, DecodeError> {
    decode_talk_with(view, ctx.talk)
}

/// Decode a talk message with explicit validation options.
pub fn decode_talk_with(view: &PacketView, options: TalkOptions) -> Result<Decoded, DecodeError> {
    let mut reader = begin(view, OpCode::TALK)?;
    let conversation_id = reader.read_u32_le()?;
    let name = reader.read_string("name", options.printable_only)?;
    let mode = MessageMode(reader.read_u8()?);

    let origin = match mode.field() {
        Some(ModeField::Position) => TalkOrigin::Position(read_position(&mut reader)?),
        Some(ModeField::Channel) => TalkOrigin::Channel(reader.read_u16_le()?),
        Some(ModeField::Nothing) => TalkOrigin::None,
        None if options.lenient_modes => TalkOrigin::None,
        None => return Err(DecodeError::UnknownMessageMode { mode }),
    };

    let message = reader.read_string("message", options.printable_only)?;

    finish(
        Event::Talk(Talk {
            conversation_id,
            name,
            mode,
            origin,
            message,
            offset: view.absolute_offset(),
            time_offset: view.time_offset,
        }),
        &reader,
    )
}
