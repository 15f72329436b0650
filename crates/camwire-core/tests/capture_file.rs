use std::io::Write;
use std::path::Path;
use std::time::Duration;

use camwire_core::{
    CamFileSource, DatAttribute, DatCategory, DecoderConfig, Event, FrameSource, ItemCatalog,
    MessageMode, NoAttributes, OpCode, PipelineError, SourceError, Thing, decode_capture_file,
};
use tempfile::NamedTempFile;

const HEADER: [u8; 12] = [0xCA, 0xFE, 0x00, 0x01, 1, 2, 3, 4, 5, 6, 7, 8];

fn frame(tick: u64, payload: &[u8]) -> Vec<u8> {
    let mut bytes = tick.to_le_bytes().to_vec();
    bytes.extend_from_slice(&(payload.len() as u16).to_le_bytes());
    bytes.extend_from_slice(payload);
    bytes
}

fn say(name: &[u8], message: &[u8]) -> Vec<u8> {
    let mut bytes = vec![170, 0, 0, 0, 0];
    bytes.extend_from_slice(&(name.len() as u16).to_le_bytes());
    bytes.extend_from_slice(name);
    bytes.push(1);
    bytes.extend_from_slice(&[0x64, 0x00, 0xC8, 0x00, 7]);
    bytes.extend_from_slice(&(message.len() as u16).to_le_bytes());
    bytes.extend_from_slice(message);
    bytes
}

fn write_capture(frames: &[Vec<u8>], trailer: &[u8]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(&HEADER).unwrap();
    for frame in frames {
        file.write_all(frame).unwrap();
    }
    file.write_all(trailer).unwrap();
    file.flush().unwrap();
    file
}

fn decode(path: &Path, config: DecoderConfig) -> Vec<Event> {
    decode_capture_file(path, &config, &NoAttributes).unwrap()
}

#[test]
fn frames_are_offset_from_first_tick() {
    let capture = write_capture(
        &[frame(1000, &[140, 1, 0, 0, 0, 90]), frame(1500, &say(b"X", b"hi"))],
        &[],
    );
    let mut source = CamFileSource::open(capture.path()).unwrap();

    let first = source.next_frame().unwrap().unwrap();
    let second = source.next_frame().unwrap().unwrap();
    assert_eq!(first.time_offset, Duration::ZERO);
    assert_eq!(second.time_offset, Duration::from_millis(500));
    assert_eq!(first.offset, 22);
    assert!(source.next_frame().unwrap().is_none());

    let events = decode(capture.path(), DecoderConfig::default());
    assert_eq!(events.len(), 2);
    match &events[1] {
        Event::Talk(talk) => {
            assert_eq!(talk.mode, MessageMode::SAY);
            assert_eq!(talk.offset, 38);
            assert_eq!(talk.time_offset, Duration::from_millis(500));
        }
        other => panic!("expected talk, got {other:?}"),
    }
}

#[test]
fn partial_trailing_frame_ends_cleanly() {
    let capture = write_capture(&[frame(7, &[140, 1, 0, 0, 0, 90])], &[1, 2, 3]);
    let events = decode(capture.path(), DecoderConfig::default());
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].opcode(), OpCode::CREATURE_HEALTH);
}

#[test]
fn missing_capture_reports_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.cam");
    let err = decode_capture_file(&path, &DecoderConfig::default(), &NoAttributes).unwrap_err();
    match err {
        PipelineError::Source(SourceError::Open { path: reported, .. }) => {
            assert_eq!(reported, path)
        }
        other => panic!("expected open error, got {other:?}"),
    }
}

#[test]
fn resync_recovers_talk_after_garbage() {
    let mut payload = vec![1, 2, 3, 4, 5, 6];
    payload.extend(say(b"X", b"hi"));
    let capture = write_capture(&[frame(0, &payload)], &[]);

    let recovered = decode(
        capture.path(),
        DecoderConfig {
            resync: true,
            strict_integrity: false,
        },
    );
    match recovered.as_slice() {
        [Event::Talk(talk)] => {
            assert_eq!(talk.name, "X");
            assert_eq!(talk.message, "hi");
        }
        other => panic!("expected one talk, got {other:?}"),
    }

    let plain = decode(capture.path(), DecoderConfig::default());
    match plain.as_slice() {
        [Event::Unhandled { packet, .. }] => assert_eq!(packet.bytes(), payload.as_slice()),
        other => panic!("expected one unhandled event, got {other:?}"),
    }
}

#[test]
fn decoding_is_deterministic() {
    let mut payload = say(b"Ann", b"buy rope");
    payload.extend([109, 0xFF, 0xFF, 1, 0, 0, 0x10, 0x64, 0x00, 0xC8, 0x00, 6]);
    payload.extend([0x33, 9, 9]);
    let capture = write_capture(&[frame(10, &payload), frame(20, &[10])], &[]);
    let config = DecoderConfig {
        resync: true,
        strict_integrity: true,
    };
    assert_eq!(decode(capture.path(), config), decode(capture.path(), config));
}

#[test]
fn catalog_attributes_drive_item_counts() {
    let mut dat = 0x4A10_u32.to_le_bytes().to_vec();
    for max_id in [101u16, 0, 0, 0] {
        dat.extend_from_slice(&max_id.to_le_bytes());
    }
    for attributes in [&[][..], &[5][..]] {
        dat.extend_from_slice(attributes);
        dat.extend_from_slice(&[255, 1, 1, 1, 1, 1, 1, 1, 0, 0]);
    }
    let mut dat_file = NamedTempFile::new().unwrap();
    dat_file.write_all(&dat).unwrap();
    dat_file.flush().unwrap();
    let catalog = ItemCatalog::open(dat_file.path()).unwrap();
    assert!(
        catalog
            .get(DatCategory::Item, 101)
            .unwrap()
            .contains(DatAttribute::STACKABLE)
    );

    let change = [107, 0xFF, 0xFF, 1, 0, 0, 0, 101, 0, 7];
    let capture = write_capture(&[frame(0, &change)], &[]);

    let with_catalog =
        decode_capture_file(capture.path(), &DecoderConfig::default(), &catalog).unwrap();
    match with_catalog.as_slice() {
        [Event::ChangeOnMap(change)] => assert_eq!(
            change.thing,
            Thing::Item {
                id: 101,
                count: Some(7)
            }
        ),
        other => panic!("expected one change, got {other:?}"),
    }

    let without = decode(capture.path(), DecoderConfig::default());
    assert_eq!(without.len(), 2);
    assert!(matches!(without[1], Event::Unhandled { opcode, .. } if opcode == OpCode(7)));
}
