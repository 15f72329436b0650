use tracing::{debug, warn};

use super::error::CatalogError;
use super::layout;
use super::reader::DatReader;
use super::{AttributeSet, DatAttribute, DatCategory, ItemCatalog};

/// Parse a `.dat` buffer.
///
/// A buffer that ends mid-catalog yields the entries read so far; only a
/// missing signature is an error.
pub fn parse_catalog(data: &[u8]) -> Result<ItemCatalog, CatalogError> {
    let mut reader = DatReader::new(data);
    let signature = reader
        .read_u32_le()
        .ok_or(CatalogError::MissingSignature {
            needed: layout::SIGNATURE_LEN,
            actual: data.len(),
        })?;
    let mut catalog = ItemCatalog::new(signature);

    let mut max_ids = [0u16; DatCategory::ALL.len()];
    for category in DatCategory::ALL {
        let Some(max_id) = reader.read_u16_le() else {
            warn!(%category, "item catalog truncated in header");
            return Ok(catalog);
        };
        debug!(%category, entries = u32::from(max_id) + 1, "catalog section");
        max_ids[category as usize] = max_id;
    }

    for category in DatCategory::ALL {
        let first_id = match category {
            DatCategory::Item => layout::FIRST_ITEM_ID,
            _ => layout::FIRST_OTHER_ID,
        };
        for id in first_id..=max_ids[category as usize] {
            let Some(attributes) = read_entry(&mut reader) else {
                warn!(
                    %category,
                    id,
                    offset = reader.position(),
                    kept = catalog.len(),
                    "item catalog truncated"
                );
                return Ok(catalog);
            };
            catalog.insert(category, id, attributes);
        }
    }

    Ok(catalog)
}

fn read_entry(reader: &mut DatReader<'_>) -> Option<AttributeSet> {
    let mut attributes = AttributeSet::default();
    loop {
        let attribute = DatAttribute(reader.read_u8()?);
        if attribute == DatAttribute::LAST {
            break;
        }
        attributes.insert(attribute);
        reader.skip(layout::attribute_payload_len(attribute))?;
        if attribute == DatAttribute::MARKET {
            let name_len = reader.read_u16_le()?;
            reader.skip(usize::from(name_len))?;
            reader.skip(layout::MARKET_TRAILER_LEN)?;
        }
    }

    let width = reader.read_u8()?;
    let height = reader.read_u8()?;
    if width > 1 || height > 1 {
        // real size
        reader.skip(1)?;
    }

    // layers, pattern x/y/z, animation phases
    let mut sprites = usize::from(width) * usize::from(height);
    for _ in 0..5 {
        sprites *= usize::from(reader.read_u8()?);
    }
    reader.skip(sprites * layout::SPRITE_ID_LEN)?;

    Some(attributes)
}

#[cfg(test)]
mod tests {
    use super::parse_catalog;
    use crate::catalog::{CatalogError, DatAttribute, DatCategory};

    fn header(max_ids: [u16; 4]) -> Vec<u8> {
        let mut bytes = 0x4A10_u32.to_le_bytes().to_vec();
        for max_id in max_ids {
            bytes.extend_from_slice(&max_id.to_le_bytes());
        }
        bytes
    }

    /// 1x1 entry, one layer and phase, a single sprite id.
    fn plain_entry(attributes: &[u8]) -> Vec<u8> {
        let mut bytes = attributes.to_vec();
        bytes.push(255);
        bytes.extend_from_slice(&[1, 1, 1, 1, 1, 1, 1]);
        bytes.extend_from_slice(&[0x34, 0x12]);
        bytes
    }

    #[test]
    fn parses_items_and_creatures() {
        let mut bytes = header([101, 1, 0, 0]);
        bytes.extend(plain_entry(&[5]));
        // Light payload, then a 2x2 entry with real size byte and 4 sprites.
        bytes.extend_from_slice(&[21, 1, 0, 215, 0, 255, 2, 2, 64, 1, 1, 1, 1, 1]);
        bytes.extend_from_slice(&[0; 8]);
        bytes.extend(plain_entry(&[]));

        let catalog = parse_catalog(&bytes).unwrap();
        assert_eq!(catalog.signature(), 0x4A10);
        assert_eq!(catalog.len(), 3);
        assert!(
            catalog
                .get(DatCategory::Item, 100)
                .unwrap()
                .contains(DatAttribute::STACKABLE)
        );
        assert!(
            catalog
                .get(DatCategory::Item, 101)
                .unwrap()
                .contains(DatAttribute::LIGHT)
        );
        assert!(catalog.get(DatCategory::Creature, 1).unwrap().is_empty());
    }

    #[test]
    fn market_attribute_skips_name() {
        let mut bytes = header([100, 0, 0, 0]);
        let mut market = vec![33, 1, 0, 2, 0, 3, 0, 4, 0];
        market.extend_from_slice(b"rope");
        market.extend_from_slice(&[0, 0, 8, 0]);
        market.push(11);
        bytes.extend(plain_entry(&market));

        let catalog = parse_catalog(&bytes).unwrap();
        let attributes = catalog.get(DatCategory::Item, 100).unwrap();
        assert!(attributes.contains(DatAttribute::MARKET));
        assert!(attributes.contains(DatAttribute::SPLASH));
    }

    #[test]
    fn truncation_keeps_parsed_entries() {
        let mut bytes = header([102, 0, 0, 0]);
        bytes.extend(plain_entry(&[10]));
        bytes.extend(plain_entry(&[254]));
        bytes.extend_from_slice(&[5, 255, 1]);

        let catalog = parse_catalog(&bytes).unwrap();
        assert_eq!(catalog.len(), 2);
        assert!(catalog.get(DatCategory::Item, 102).is_none());
    }

    #[test]
    fn short_signature_is_an_error() {
        let err = parse_catalog(&[1, 2]).unwrap_err();
        assert!(matches!(
            err,
            CatalogError::MissingSignature {
                needed: 4,
                actual: 2
            }
        ));
    }

    #[test]
    fn truncated_header_yields_empty_catalog() {
        let mut bytes = header([100, 0, 0, 0]);
        bytes.truncate(7);
        let catalog = parse_catalog(&bytes).unwrap();
        assert!(catalog.is_empty());
    }
}
