use crate::packet::PacketView;
use crate::protocols::game::error::DecodeError;
use crate::protocols::game::event::{Event, LoginOrPendingState};
use crate::protocols::game::opcode::OpCode;

use super::{DecodeContext, Decoded, begin, finish};

pub fn decode_login_or_pending_state(
    view: &PacketView,
    _ctx: &DecodeContext<'_>,
) -> Result<Decoded, DecodeError> {
    let mut reader = begin(view, OpCode::LOGIN_OR_PENDING_STATE)?;
    let player_id = reader.read_u32_le()?;
    let server_beat = reader.read_u16_le()?;
    let can_report_bugs = reader.read_u8()? != 0;

    finish(
        Event::LoginOrPendingState(LoginOrPendingState {
            player_id,
            server_beat,
            can_report_bugs,
        }),
        &reader,
    )
}
