//! Typed events produced by the game decoder.

use std::time::Duration;

use serde::Serialize;

use crate::packet::PacketView;

use super::mode::MessageMode;
use super::opcode::OpCode;

/// One decoded server message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    LoginOrPendingState(LoginOrPendingState),
    Talk(Talk),
    MoveCreature(MoveCreature),
    ChangeOnMap(ChangeOnMap),
    CreatureHealth(CreatureHealth),
    PlayerData(PlayerData),
    MarkCreature(MarkCreature),
    /// Message the decoder could not interpret; carries the raw bytes.
    Unhandled { opcode: OpCode, packet: PacketView },
}

impl Event {
    pub fn opcode(&self) -> OpCode {
        match self {
            Event::LoginOrPendingState(_) => OpCode::LOGIN_OR_PENDING_STATE,
            Event::Talk(_) => OpCode::TALK,
            Event::MoveCreature(_) => OpCode::MOVE_CREATURE,
            Event::ChangeOnMap(_) => OpCode::CHANGE_ON_MAP,
            Event::CreatureHealth(_) => OpCode::CREATURE_HEALTH,
            Event::PlayerData(_) => OpCode::PLAYER_DATA,
            Event::MarkCreature(_) => OpCode::MARK_CREATURE,
            Event::Unhandled { opcode, .. } => *opcode,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Position {
    pub x: u16,
    pub y: u16,
    pub z: u8,
}

/// Reference to something already on the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MappedThing {
    Creature { creature_id: u32 },
    Tile { position: Position, stack_position: u8 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Outfit {
    /// Creature rendered as an item.
    Item { look_type_ex: u16 },
    Look {
        look_type: u16,
        head: u8,
        body: u8,
        legs: u8,
        feet: u8,
    },
}

/// Full creature description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Creature {
    /// Creature evicted from the client's known set to make room.
    pub removed_id: Option<u32>,
    pub id: u32,
    /// Only sent the first time the client sees the creature.
    pub name: Option<String>,
    pub health_percent: u8,
    pub direction: u8,
    pub outfit: Outfit,
    pub light_intensity: u8,
    pub light_color: u8,
    pub speed: u16,
    pub skull: u8,
    pub shield: u8,
}

/// A creature or item embedded in a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Thing {
    Creature(Creature),
    CreatureTurn { creature_id: u32, direction: u8 },
    Item { id: u16, count: Option<u8> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LoginOrPendingState {
    pub player_id: u32,
    pub server_beat: u16,
    pub can_report_bugs: bool,
}

/// Where a talk message was said.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum TalkOrigin {
    Position(Position),
    Channel(u16),
    None,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Talk {
    pub conversation_id: u32,
    pub name: String,
    pub mode: MessageMode,
    pub origin: TalkOrigin,
    pub message: String,
    /// Absolute offset of the message within the capture.
    pub offset: u64,
    #[serde(rename = "time_offset_ms", serialize_with = "serialize_millis")]
    pub time_offset: Duration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MoveCreature {
    pub from: MappedThing,
    pub to: Position,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChangeOnMap {
    pub target: MappedThing,
    pub thing: Thing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CreatureHealth {
    pub creature_id: u32,
    pub health_percent: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MarkCreature {
    pub creature_id: u32,
    pub color: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PlayerData {
    pub health: u16,
    pub max_health: u16,
    pub free_capacity: u16,
    pub experience: u32,
    pub level: u16,
    pub level_percent: u8,
    pub mana: u16,
    pub max_mana: u16,
    pub magic_level: u8,
    pub magic_level_percent: u8,
    pub soul: u8,
}

fn serialize_millis<S: serde::Serializer>(value: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_u64(value.as_millis() as u64)
}
