//! Field sizes and sentinel values of the game protocol.

pub const OPCODE_LEN: usize = 1;

/// Mapped-thing `x` value announcing a creature id instead of a tile.
pub const MAPPED_CREATURE_MARKER: u16 = 0xFFFF;

/// Thing type ids with special meaning; everything else is an item id.
pub const THING_INVALID: u16 = 0;
pub const THING_UNKNOWN_CREATURE: u16 = 97;
pub const THING_OUTDATED_CREATURE: u16 = 98;
pub const THING_CREATURE: u16 = 99;

/// Printable ASCII range accepted by the integrity check.
pub const PRINTABLE: std::ops::RangeInclusive<u8> = 32..=126;

/// Items whose trailing count byte disagrees with the catalog attributes.
/// Determined from captures; `true` forces the byte, `false` suppresses it.
pub const ITEM_COUNT_OVERRIDES: &[(u16, bool)] = &[
    (1644, false),
    (2887, true),
    (2888, true),
    (3031, true),
    (3277, true),
    (3577, true),
    (3582, true),
    (3606, true),
    (3725, true),
];

pub fn item_count_override(id: u16) -> Option<bool> {
    ITEM_COUNT_OVERRIDES
        .iter()
        .find(|(item, _)| *item == id)
        .map(|(_, forced)| *forced)
}
