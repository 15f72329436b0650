use crate::catalog::{DatAttribute, DatCategory, ItemAttributeLookup};
use crate::protocols::game::error::DecodeError;
use crate::protocols::game::event::{Creature, MappedThing, Outfit, Position, Thing};
use crate::protocols::game::layout;
use crate::protocols::game::reader::GameReader;

/// Attributes that make an item carry a trailing count/subtype byte.
const COUNT_ATTRIBUTES: [DatAttribute; 4] = [
    DatAttribute::STACKABLE,
    DatAttribute::CHARGEABLE,
    DatAttribute::FLUID_CONTAINER,
    DatAttribute::SPLASH,
];

pub(super) fn read_position(reader: &mut GameReader<'_>) -> Result<Position, DecodeError> {
    Ok(Position {
        x: reader.read_u16_le()?,
        y: reader.read_u16_le()?,
        z: reader.read_u8()?,
    })
}

pub(super) fn read_mapped_thing(reader: &mut GameReader<'_>) -> Result<MappedThing, DecodeError> {
    let x = reader.read_u16_le()?;
    if x == layout::MAPPED_CREATURE_MARKER {
        return Ok(MappedThing::Creature {
            creature_id: reader.read_u32_le()?,
        });
    }

    let y = reader.read_u16_le()?;
    let z = reader.read_u8()?;
    let stack_position = reader.read_u8()?;
    Ok(MappedThing::Tile {
        position: Position { x, y, z },
        stack_position,
    })
}

pub(super) fn read_thing(
    reader: &mut GameReader<'_>,
    lookup: &dyn ItemAttributeLookup,
) -> Result<Thing, DecodeError> {
    let kind = reader.read_u16_le()?;
    match kind {
        layout::THING_INVALID => {
            // Real type (2 bytes); the body is always a known creature.
            reader.read_u16_le()?;
            read_creature(reader, None, false).map(Thing::Creature)
        }
        layout::THING_UNKNOWN_CREATURE => {
            let removed_id = reader.read_u32_le()?;
            read_creature(reader, Some(removed_id), true).map(Thing::Creature)
        }
        layout::THING_OUTDATED_CREATURE => {
            read_creature(reader, None, false).map(Thing::Creature)
        }
        layout::THING_CREATURE => Ok(Thing::CreatureTurn {
            creature_id: reader.read_u32_le()?,
            direction: reader.read_u8()?,
        }),
        id => read_item(reader, id, lookup),
    }
}

fn read_creature(
    reader: &mut GameReader<'_>,
    removed_id: Option<u32>,
    with_name: bool,
) -> Result<Creature, DecodeError> {
    let id = reader.read_u32_le()?;
    let name = if with_name {
        Some(reader.read_string("creature name", false)?)
    } else {
        None
    };
    let health_percent = reader.read_u8()?;
    let direction = reader.read_u8()?;
    let outfit = read_outfit(reader)?;

    Ok(Creature {
        removed_id,
        id,
        name,
        health_percent,
        direction,
        outfit,
        light_intensity: reader.read_u8()?,
        light_color: reader.read_u8()?,
        speed: reader.read_u16_le()?,
        skull: reader.read_u8()?,
        shield: reader.read_u8()?,
    })
}

fn read_outfit(reader: &mut GameReader<'_>) -> Result<Outfit, DecodeError> {
    let look_type = reader.read_u16_le()?;
    if look_type == 0 {
        return Ok(Outfit::Item {
            look_type_ex: reader.read_u16_le()?,
        });
    }
    Ok(Outfit::Look {
        look_type,
        head: reader.read_u8()?,
        body: reader.read_u8()?,
        legs: reader.read_u8()?,
        feet: reader.read_u8()?,
    })
}

fn read_item(
    reader: &mut GameReader<'_>,
    id: u16,
    lookup: &dyn ItemAttributeLookup,
) -> Result<Thing, DecodeError> {
    let count = if item_has_count(id, lookup) {
        Some(reader.read_u8()?)
    } else {
        None
    };
    Ok(Thing::Item { id, count })
}

/// Whether an item id is followed by a count byte. The override table wins
/// over catalog attributes.
pub(crate) fn item_has_count(id: u16, lookup: &dyn ItemAttributeLookup) -> bool {
    if let Some(forced) = layout::item_count_override(id) {
        return forced;
    }
    lookup
        .attributes(DatCategory::Item, id)
        .contains_any(&COUNT_ATTRIBUTES)
}
