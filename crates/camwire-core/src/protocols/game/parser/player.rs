use crate::packet::PacketView;
use crate::protocols::game::error::DecodeError;
use crate::protocols::game::event::{Event, PlayerData};
use crate::protocols::game::opcode::OpCode;

use super::{DecodeContext, Decoded, begin, finish};

pub fn decode_player_data(
    view: &PacketView,
    _ctx: &DecodeContext<'_>,
) -> Result<Decoded, DecodeError> {
    let mut reader = begin(view, OpCode::PLAYER_DATA)?;
    let data = PlayerData {
        health: reader.read_u16_le()?,
        max_health: reader.read_u16_le()?,
        free_capacity: reader.read_u16_le()?,
        experience: reader.read_u32_le()?,
        level: reader.read_u16_le()?,
        level_percent: reader.read_u8()?,
        mana: reader.read_u16_le()?,
        max_mana: reader.read_u16_le()?,
        magic_level: reader.read_u8()?,
        magic_level_percent: reader.read_u8()?,
        soul: reader.read_u8()?,
    };
    finish(Event::PlayerData(data), &reader)
}
