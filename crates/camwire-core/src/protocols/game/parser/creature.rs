use crate::packet::PacketView;
use crate::protocols::game::error::DecodeError;
use crate::protocols::game::event::{CreatureHealth, Event, MarkCreature};
use crate::protocols::game::opcode::OpCode;

use super::{DecodeContext, Decoded, begin, finish};

pub fn decode_creature_health(
    view: &PacketView,
    _ctx: &DecodeContext<'_>,
) -> Result<Decoded, DecodeError> {
    let mut reader = begin(view, OpCode::CREATURE_HEALTH)?;
    let creature_id = reader.read_u32_le()?;
    let health_percent = reader.read_u8()?;
    finish(
        Event::CreatureHealth(CreatureHealth {
            creature_id,
            health_percent,
        }),
        &reader,
    )
}

pub fn decode_mark_creature(
    view: &PacketView,
    _ctx: &DecodeContext<'_>,
) -> Result<Decoded, DecodeError> {
    let mut reader = begin(view, OpCode::MARK_CREATURE)?;
    let creature_id = reader.read_u32_le()?;
    let color = reader.read_u8()?;
    finish(
        Event::MarkCreature(MarkCreature { creature_id, color }),
        &reader,
    )
}

#[cfg(test)]
mod tests {
    use super::{decode_creature_health, decode_mark_creature};
    use crate::protocols::game::event::{CreatureHealth, Event, MarkCreature};
    use crate::protocols::game::parser::testutil::{context, view};

    #[test]
    fn creature_health_golden_bytes() {
        let bytes = [140, 0x10, 0x00, 0x00, 0x40, 75];
        let decoded = decode_creature_health(&view(&bytes), &context()).unwrap();
        assert_eq!(decoded.consumed, 6);
        assert_eq!(
            decoded.event,
            Event::CreatureHealth(CreatureHealth {
                creature_id: 0x4000_0010,
                health_percent: 75,
            })
        );
    }

    #[test]
    fn creature_health_leaves_trailing_message() {
        let bytes = [140, 1, 0, 0, 0, 100, 134];
        let decoded = decode_creature_health(&view(&bytes), &context()).unwrap();
        assert_eq!(decoded.consumed, 6);
    }

    #[test]
    fn mark_creature_golden_bytes() {
        let bytes = [134, 0x02, 0x01, 0x00, 0x00, 215];
        let decoded = decode_mark_creature(&view(&bytes), &context()).unwrap();
        assert_eq!(decoded.consumed, 6);
        assert_eq!(
            decoded.event,
            Event::MarkCreature(MarkCreature {
                creature_id: 0x0102,
                color: 215,
            })
        );
    }
}
