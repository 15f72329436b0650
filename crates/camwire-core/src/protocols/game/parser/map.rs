use crate::packet::PacketView;
use crate::protocols::game::error::DecodeError;
use crate::protocols::game::event::{ChangeOnMap, Event, MoveCreature};
use crate::protocols::game::opcode::OpCode;

use super::thing::{read_mapped_thing, read_position, read_thing};
use super::{DecodeContext, Decoded, begin, finish};

pub fn decode_move_creature(
    view: &PacketView,
    _ctx: &DecodeContext<'_>,
) -> Result<Decoded, DecodeError> {
    let mut reader = begin(view, OpCode::MOVE_CREATURE)?;
    let from = read_mapped_thing(&mut reader)?;
    let to = read_position(&mut reader)?;
    finish(Event::MoveCreature(MoveCreature { from, to }), &reader)
}

pub fn decode_change_on_map(
    view: &PacketView,
    ctx: &DecodeContext<'_>,
) -> Result<Decoded, DecodeError> {
    let mut reader = begin(view, OpCode::CHANGE_ON_MAP)?;
    let target = read_mapped_thing(&mut reader)?;
    let thing = read_thing(&mut reader, ctx.lookup)?;
    finish(Event::ChangeOnMap(ChangeOnMap { target, thing }), &reader)
}
