use super::opcode::OpCode;
use super::parser::{
    DecodeFn, decode_change_on_map, decode_creature_health, decode_login_or_pending_state,
    decode_mark_creature, decode_move_creature, decode_player_data, decode_talk,
};

/// Opcode-indexed table of decode routines.
///
/// # Examples
/// ```
/// use camwire_core::{OpCode, Registry};
///
/// let registry = Registry::standard();
/// assert!(registry.get(OpCode::TALK).is_some());
/// assert!(registry.get(OpCode::MAP_LEFT_ROW).is_none());
/// ```
#[derive(Clone)]
pub struct Registry {
    routines: [Option<DecodeFn>; 256],
}

impl Registry {
    pub fn empty() -> Self {
        Self {
            routines: [None; 256],
        }
    }

    /// Registry with every routine this crate implements.
    pub fn standard() -> Self {
        let mut registry = Self::empty();
        registry
            .register(OpCode::LOGIN_OR_PENDING_STATE, decode_login_or_pending_state)
            .register(OpCode::TALK, decode_talk)
            .register(OpCode::MOVE_CREATURE, decode_move_creature)
            .register(OpCode::CHANGE_ON_MAP, decode_change_on_map)
            .register(OpCode::PLAYER_DATA, decode_player_data)
            .register(OpCode::MARK_CREATURE, decode_mark_creature)
            .register(OpCode::CREATURE_HEALTH, decode_creature_health);
        registry
    }

    pub fn register(&mut self, opcode: OpCode, routine: DecodeFn) -> &mut Self {
        self.routines[usize::from(opcode.0)] = Some(routine);
        self
    }

    pub fn get(&self, opcode: OpCode) -> Option<DecodeFn> {
        self.routines[usize::from(opcode.0)]
    }

    pub fn opcodes(&self) -> impl Iterator<Item = OpCode> + '_ {
        self.routines
            .iter()
            .enumerate()
            .filter(|(_, routine)| routine.is_some())
            .map(|(value, _)| OpCode(value as u8))
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::standard()
    }
}
