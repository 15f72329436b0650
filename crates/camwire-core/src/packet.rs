//! Zero-copy windows over frame payloads.
//!
//! A frame's payload is shared read-only by every view derived from it; a view
//! only records where it starts. Decoders chain views with [`PacketView::next`]
//! as they consume messages packed back to back in one payload.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use serde::ser::{Serialize, SerializeStruct, Serializer};

use crate::protocols::game::OpCode;
use crate::source::Frame;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PacketView {
    /// Absolute offset of the frame payload within the capture.
    pub frame_offset: u64,
    /// Offset of this view within the frame payload.
    pub local_offset: usize,
    pub time_offset: Duration,
    data: Arc<[u8]>,
}

impl PacketView {
    pub fn new(data: Arc<[u8]>, frame_offset: u64, time_offset: Duration) -> Self {
        Self {
            frame_offset,
            local_offset: 0,
            time_offset,
            data,
        }
    }

    pub fn from_frame(frame: &Frame) -> Self {
        Self::new(Arc::clone(&frame.payload), frame.offset, frame.time_offset)
    }

    pub fn bytes(&self) -> &[u8] {
        &self.data[self.local_offset..]
    }

    pub fn len(&self) -> usize {
        self.data.len() - self.local_offset
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Opcode of the message at the start of the view, or [`OpCode::NONE`] when
    /// the view is empty.
    pub fn opcode(&self) -> OpCode {
        self.bytes().first().copied().map_or(OpCode::NONE, OpCode)
    }

    /// View starting `consumed` bytes further, or `None` once everything has
    /// been consumed.
    pub fn next(&self, consumed: usize) -> Option<PacketView> {
        debug_assert!(
            consumed <= self.len(),
            "consumed {consumed} bytes of a {}-byte view",
            self.len()
        );
        if consumed >= self.len() {
            return None;
        }
        Some(PacketView {
            frame_offset: self.frame_offset,
            local_offset: self.local_offset + consumed,
            time_offset: self.time_offset,
            data: Arc::clone(&self.data),
        })
    }

    /// Absolute offset of the first byte of the view within the capture.
    pub fn absolute_offset(&self) -> u64 {
        self.frame_offset + self.local_offset as u64
    }
}

impl fmt::Display for PacketView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pos = self.absolute_offset();
        write!(
            f,
            "[{:8x} +{:2}] {}s {} {:?}",
            pos - pos % 16,
            pos % 16,
            self.time_offset.as_secs(),
            self.opcode(),
            self.bytes()
        )
    }
}

impl Serialize for PacketView {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("PacketView", 4)?;
        state.serialize_field("offset", &self.absolute_offset())?;
        state.serialize_field("time_offset_ms", &(self.time_offset.as_millis() as u64))?;
        state.serialize_field("opcode", &self.opcode())?;
        state.serialize_field("bytes", self.bytes())?;
        state.end()
    }
}
