//! `.dat` layout constants.

use super::DatAttribute;

pub const SIGNATURE_LEN: usize = 4;

pub const FIRST_ITEM_ID: u16 = 100;
pub const FIRST_OTHER_ID: u16 = 1;

pub const SPRITE_ID_LEN: usize = 2;

/// Bytes following an attribute marker, excluding variable-length parts.
pub fn attribute_payload_len(attribute: DatAttribute) -> usize {
    match attribute {
        DatAttribute::LIGHT | DatAttribute::DISPLACEMENT => 4,
        DatAttribute::ELEVATION | DatAttribute::LENS_HELP => 2,
        DatAttribute::BONES => 16,
        // category, trade-as, show-as; the name and trailing fields follow
        DatAttribute::MARKET => 6,
        _ => 0,
    }
}

/// Vocation restriction and required level after the market name.
pub const MARKET_TRAILER_LEN: usize = 4;
