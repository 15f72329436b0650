use tracing::trace;

use crate::catalog::ItemAttributeLookup;
use crate::packet::PacketView;

use super::error::DecodeError;
use super::event::Event;
use super::parser::{DecodeContext, Decoded, TalkOptions};
use super::registry::Registry;
use super::resync;

/// Decoder behavior switches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecoderConfig {
    /// Search undecodable payloads for embedded talk messages.
    pub resync: bool,
    /// Reject talk text outside printable ASCII.
    pub strict_integrity: bool,
}

impl DecoderConfig {
    fn talk_options(&self) -> TalkOptions {
        TalkOptions {
            lenient_modes: false,
            printable_only: self.strict_integrity,
        }
    }
}

/// Splits frame payloads into game events.
///
/// Every payload yields at least one event. A payload that cannot be
/// decoded ends in [`Event::Unhandled`] carrying the remaining bytes.
pub struct Decoder<'a> {
    config: DecoderConfig,
    lookup: &'a dyn ItemAttributeLookup,
    registry: Registry,
}

impl<'a> Decoder<'a> {
    pub fn new(config: DecoderConfig, lookup: &'a dyn ItemAttributeLookup) -> Self {
        Self::with_registry(config, lookup, Registry::standard())
    }

    pub fn with_registry(
        config: DecoderConfig,
        lookup: &'a dyn ItemAttributeLookup,
        registry: Registry,
    ) -> Self {
        Self {
            config,
            lookup,
            registry,
        }
    }

    pub fn config(&self) -> DecoderConfig {
        self.config
    }

    /// Decode every message in a frame payload, in order.
    ///
    /// Only an opcode mismatch inside a routine is returned as an error;
    /// every other failure is turned into resynchronization or
    /// [`Event::Unhandled`].
    pub fn decode_payload(&self, view: PacketView) -> Result<Vec<Event>, DecodeError> {
        let mut events = Vec::new();
        let mut current = Some(view);

        while let Some(view) = current.take() {
            if let Some(decoded) = self.decode_message(&view)? {
                current = view.next(decoded.consumed);
                events.push(decoded.event);
                continue;
            }

            if self.config.resync {
                if let Some(recovered) = resync::find_talk(&view) {
                    current = view.next(recovered.consumed());
                    events.push(recovered.decoded.event);
                    continue;
                }
            }

            trace!(packet = %view, "unhandled message");
            events.push(Event::Unhandled {
                opcode: view.opcode(),
                packet: view,
            });
        }

        Ok(events)
    }

    /// `Ok(None)` when the message has no routine or its routine failed
    /// recoverably.
    fn decode_message(&self, view: &PacketView) -> Result<Option<Decoded>, DecodeError> {
        let Some(routine) = self.registry.get(view.opcode()) else {
            return Ok(None);
        };
        let ctx = DecodeContext {
            lookup: self.lookup,
            talk: self.config.talk_options(),
        };
        match routine(view, &ctx) {
            Ok(decoded) => Ok(Some(decoded)),
            Err(err) if err.is_recoverable() => {
                trace!(packet = %view, error = %err, "decode failed");
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Decoder, DecoderConfig};
    use crate::catalog::NoAttributes;
    use crate::protocols::game::error::DecodeError;
    use crate::protocols::game::event::{CreatureHealth, Event};
    use crate::protocols::game::opcode::OpCode;
    use crate::protocols::game::parser::testutil::view;
    use crate::protocols::game::registry::Registry;

    const HEALTH: [u8; 6] = [140, 1, 0, 0, 0, 50];

    fn talk(message: &[u8]) -> Vec<u8> {
        let mut bytes = vec![170, 0, 0, 0, 0, 1, 0, b'A', 4];
        bytes.extend_from_slice(&(message.len() as u16).to_le_bytes());
        bytes.extend_from_slice(message);
        bytes
    }

    fn decode(config: DecoderConfig, bytes: &[u8]) -> Vec<Event> {
        Decoder::new(config, &NoAttributes)
            .decode_payload(view(bytes))
            .unwrap()
    }

    #[test]
    fn decodes_consecutive_messages() {
        let mut bytes = HEALTH.to_vec();
        bytes.extend(talk(b"hi"));
        let events = decode(DecoderConfig::default(), &bytes);
        assert_eq!(events.len(), 2);
        assert_eq!(
            events[0],
            Event::CreatureHealth(CreatureHealth {
                creature_id: 1,
                health_percent: 50,
            })
        );
        assert!(matches!(events[1], Event::Talk(_)));
    }

    #[test]
    fn unknown_opcode_ends_payload() {
        let mut bytes = HEALTH.to_vec();
        bytes.extend([0x7F, 1, 2, 3]);
        let events = decode(DecoderConfig::default(), &bytes);
        assert_eq!(events.len(), 2);
        match &events[1] {
            Event::Unhandled { opcode, packet } => {
                assert_eq!(*opcode, OpCode(0x7F));
                assert_eq!(packet.bytes(), &[0x7F, 1, 2, 3]);
                assert_eq!(packet.local_offset, 6);
            }
            other => panic!("expected unhandled event, got {other:?}"),
        }
    }

    #[test]
    fn empty_payload_is_unhandled() {
        let events = decode(DecoderConfig::default(), &[]);
        assert!(matches!(
            events.as_slice(),
            [Event::Unhandled { opcode, .. }] if *opcode == OpCode::NONE
        ));
    }

    #[test]
    fn truncated_message_is_unhandled() {
        let events = decode(DecoderConfig::default(), &HEALTH[..4]);
        assert!(matches!(events.as_slice(), [Event::Unhandled { .. }]));
    }

    #[test]
    fn resync_recovers_talk_after_garbage() {
        let mut bytes = vec![0x7F, 9, 9];
        bytes.extend(talk(b"hello"));
        bytes.extend(HEALTH);
        let events = decode(
            DecoderConfig {
                resync: true,
                ..DecoderConfig::default()
            },
            &bytes,
        );
        assert_eq!(events.len(), 2);
        match &events[0] {
            Event::Talk(talk) => assert_eq!(talk.message, "hello"),
            other => panic!("expected talk, got {other:?}"),
        }
        assert!(matches!(events[1], Event::CreatureHealth(_)));
    }

    #[test]
    fn resync_without_match_reports_original_view() {
        let bytes = [0x7F, 1, 2, 3];
        let events = decode(
            DecoderConfig {
                resync: true,
                ..DecoderConfig::default()
            },
            &bytes,
        );
        match events.as_slice() {
            [Event::Unhandled { packet, .. }] => assert_eq!(packet.bytes(), &bytes),
            other => panic!("unexpected events {other:?}"),
        }
    }

    #[test]
    fn resync_disabled_leaves_garbage_unhandled() {
        let mut bytes = vec![0x7F];
        bytes.extend(talk(b"hello"));
        let events = decode(DecoderConfig::default(), &bytes);
        assert!(matches!(events.as_slice(), [Event::Unhandled { .. }]));
    }

    #[test]
    fn strict_integrity_rejects_binary_talk() {
        let bytes = talk(&[b'o', 0xFF]);
        let lenient = decode(DecoderConfig::default(), &bytes);
        assert!(matches!(lenient.as_slice(), [Event::Talk(_)]));

        let strict = decode(
            DecoderConfig {
                strict_integrity: true,
                ..DecoderConfig::default()
            },
            &bytes,
        );
        assert!(matches!(strict.as_slice(), [Event::Unhandled { .. }]));
    }

    #[test]
    fn opcode_mismatch_is_fatal() {
        let mut registry = Registry::empty();
        registry.register(OpCode(200), crate::protocols::game::parser::decode_talk);
        let decoder = Decoder::with_registry(DecoderConfig::default(), &NoAttributes, registry);
        let err = decoder.decode_payload(view(&[200, 0])).unwrap_err();
        assert_eq!(
            err,
            DecodeError::OpcodeMismatch {
                expected: OpCode::TALK,
                actual: OpCode(200),
            }
        );
    }
}
