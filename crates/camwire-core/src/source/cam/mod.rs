//! `.cam` capture source.
//!
//! A capture is a 12-byte header (magic + checksum, both ignored) followed by
//! frames of `[u64 LE tick][u16 LE length][payload]`. A truncated frame ends
//! the stream cleanly; only I/O failures other than end of input are errors.

pub mod error;
pub mod layout;
pub mod parser;
pub mod reader;

pub use parser::{CamFileSource, FrameReader};
