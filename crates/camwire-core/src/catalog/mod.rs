//! Item attribute catalog.
//!
//! Some messages only reveal their length once the item's attributes are
//! known: stackable, chargeable, fluid and splash items carry an extra count
//! byte. Decoders ask an [`ItemAttributeLookup`] for those attributes; the
//! usual implementation is an [`ItemCatalog`] loaded from the client's
//! `.dat` file.

pub mod error;
pub mod layout;
pub mod parser;
mod reader;

use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use serde::Serialize;

pub use error::CatalogError;
pub use parser::parse_catalog;

/// Sections of a `.dat` file, in file order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum DatCategory {
    Item = 0,
    Creature = 1,
    Effect = 2,
    Missile = 3,
}

impl DatCategory {
    pub const ALL: [DatCategory; 4] = [
        DatCategory::Item,
        DatCategory::Creature,
        DatCategory::Effect,
        DatCategory::Missile,
    ];
}

impl fmt::Display for DatCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DatCategory::Item => "Item",
            DatCategory::Creature => "Creature",
            DatCategory::Effect => "Effect",
            DatCategory::Missile => "Missile",
        };
        f.write_str(name)
    }
}

/// Attribute marker byte of a `.dat` entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct DatAttribute(pub u8);

macro_rules! dat_attributes {
    ($($name:ident = $value:literal => $label:literal,)*) => {
        impl DatAttribute {
            $(pub const $name: DatAttribute = DatAttribute($value);)*

            pub fn name(self) -> Option<&'static str> {
                match self.0 {
                    $($value => Some($label),)*
                    _ => None,
                }
            }
        }
    };
}

dat_attributes! {
    GROUND = 0 => "Ground",
    GROUND_BORDER = 1 => "GroundBorder",
    ON_BOTTOM = 2 => "OnBottom",
    ON_TOP = 3 => "OnTop",
    CONTAINER = 4 => "Container",
    STACKABLE = 5 => "Stackable",
    FORCE_USE = 6 => "ForceUse",
    MULTI_USE = 7 => "MultiUse",
    WRITABLE = 8 => "Writable",
    WRITABLE_ONCE = 9 => "WritableOnce",
    FLUID_CONTAINER = 10 => "FluidContainer",
    SPLASH = 11 => "Splash",
    NOT_WALKABLE = 12 => "NotWalkable",
    NOT_MOVEABLE = 13 => "NotMoveable",
    BLOCK_PROJECTILE = 14 => "BlockProjectile",
    NOT_PATHABLE = 15 => "NotPathable",
    PICKUPABLE = 16 => "Pickupable",
    HANGABLE = 17 => "Hangable",
    HOOK_SOUTH = 18 => "HookSouth",
    HOOK_EAST = 19 => "HookEast",
    ROTATEABLE = 20 => "Rotateable",
    LIGHT = 21 => "Light",
    DONT_HIDE = 22 => "DontHide",
    FLOOR_CHANGE = 23 => "FloorChange",
    DISPLACEMENT = 24 => "Displacement",
    ELEVATION = 25 => "Elevation",
    LYING_CORPSE = 26 => "LyingCorpse",
    ANIMATE_ALWAYS = 27 => "AnimateAlways",
    MINIMAP_COLOR = 28 => "MinimapColor",
    LENS_HELP = 29 => "LensHelp",
    FULL_GROUND = 30 => "FullGround",
    LOOK = 31 => "Look",
    CLOTH = 32 => "Cloth",
    MARKET = 33 => "Market",
    USABLE = 34 => "Usable",
    WRAPABLE = 35 => "Wrapable",
    UNWRAPABLE = 36 => "Unwrapable",
    TOP_EFFECT = 37 => "TopEffect",
    BONES = 38 => "Bones",
    OPACITY = 100 => "Opacity",
    NOT_PRE_WALKABLE = 101 => "NotPreWalkable",
    NO_MOVE_ANIMATION = 253 => "NoMoveAnimation",
    CHARGEABLE = 254 => "Chargeable",
    LAST = 255 => "Last",
}

impl fmt::Display for DatAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "{name}-{}", self.0),
            None => write!(f, "Unknown-{}", self.0),
        }
    }
}

/// Set of attribute markers present on one entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct AttributeSet([u64; 4]);

impl AttributeSet {
    pub fn insert(&mut self, attribute: DatAttribute) {
        let (word, bit) = Self::slot(attribute);
        self.0[word] |= 1u64 << bit;
    }

    pub fn contains(&self, attribute: DatAttribute) -> bool {
        let (word, bit) = Self::slot(attribute);
        self.0[word] & (1u64 << bit) != 0
    }

    pub fn contains_any(&self, attributes: &[DatAttribute]) -> bool {
        attributes.iter().any(|attribute| self.contains(*attribute))
    }

    pub fn is_empty(&self) -> bool {
        self.0.iter().all(|word| *word == 0)
    }

    pub fn iter(&self) -> impl Iterator<Item = DatAttribute> + '_ {
        (0..=u8::MAX)
            .map(DatAttribute)
            .filter(|attribute| self.contains(*attribute))
    }

    fn slot(attribute: DatAttribute) -> (usize, u32) {
        (usize::from(attribute.0 / 64), u32::from(attribute.0 % 64))
    }
}

impl FromIterator<DatAttribute> for AttributeSet {
    fn from_iter<I: IntoIterator<Item = DatAttribute>>(iter: I) -> Self {
        let mut set = AttributeSet::default();
        for attribute in iter {
            set.insert(attribute);
        }
        set
    }
}

/// Read-only attribute source consulted while decoding.
pub trait ItemAttributeLookup: Send + Sync {
    fn attributes(&self, category: DatCategory, id: u16) -> AttributeSet;
}

impl<F> ItemAttributeLookup for F
where
    F: Fn(DatCategory, u16) -> AttributeSet + Send + Sync,
{
    fn attributes(&self, category: DatCategory, id: u16) -> AttributeSet {
        self(category, id)
    }
}

/// Lookup that knows no attributes; only the built-in overrides apply.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAttributes;

impl ItemAttributeLookup for NoAttributes {
    fn attributes(&self, _category: DatCategory, _id: u16) -> AttributeSet {
        AttributeSet::default()
    }
}

/// Attributes loaded from a `.dat` file.
#[derive(Debug, Clone, Default)]
pub struct ItemCatalog {
    signature: u32,
    entries: HashMap<(DatCategory, u16), AttributeSet>,
}

impl ItemCatalog {
    pub fn new(signature: u32) -> Self {
        Self {
            signature,
            entries: HashMap::new(),
        }
    }

    /// Read and parse a `.dat` file.
    pub fn open(path: &Path) -> Result<Self, CatalogError> {
        let data = std::fs::read(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        parse_catalog(&data)
    }

    pub fn signature(&self) -> u32 {
        self.signature
    }

    pub fn insert(&mut self, category: DatCategory, id: u16, attributes: AttributeSet) {
        self.entries.insert((category, id), attributes);
    }

    pub fn get(&self, category: DatCategory, id: u16) -> Option<&AttributeSet> {
        self.entries.get(&(category, id))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ItemAttributeLookup for ItemCatalog {
    fn attributes(&self, category: DatCategory, id: u16) -> AttributeSet {
        self.get(category, id).copied().unwrap_or_default()
    }
}
