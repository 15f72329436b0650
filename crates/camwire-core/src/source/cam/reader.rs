use std::io::{ErrorKind, Read};
use std::time::Duration;

use super::error::CamSourceError;
use super::layout;

/// Fill `buf` completely, or report `false` if the input ends first.
///
/// A partially filled buffer counts as end of input: the capture was cut
/// mid-frame and everything before it is still usable.
///
/// # Errors
/// Returns `CamSourceError::Io` for failures other than end of input.
pub fn read_exact_or_end<R: Read>(
    reader: &mut R,
    buf: &mut [u8],
    context: &'static str,
) -> Result<bool, CamSourceError> {
    match reader.read_exact(buf) {
        Ok(()) => Ok(true),
        Err(err) if err.kind() == ErrorKind::UnexpectedEof => Ok(false),
        Err(source) => Err(CamSourceError::Io { context, source }),
    }
}

/// Consume the fixed capture header.
///
/// # Examples
/// This helper is part of an internal module, so the example is marked as
/// text example.
/// ```text
/// use std::io::Cursor;
///
/// let mut cursor = Cursor::new([0u8; 12]);
/// assert!(skip_header(&mut cursor).unwrap());
/// ```
pub fn skip_header<R: Read>(reader: &mut R) -> Result<bool, CamSourceError> {
    let mut header = [0u8; layout::HEADER_LEN];
    read_exact_or_end(reader, &mut header, "capture header")
}

pub fn read_tick<R: Read>(reader: &mut R) -> Result<Option<u64>, CamSourceError> {
    let mut buf = [0u8; layout::TICK_LEN];
    if !read_exact_or_end(reader, &mut buf, "frame tick")? {
        return Ok(None);
    }
    Ok(Some(u64::from_le_bytes(buf)))
}

pub fn read_payload_len<R: Read>(reader: &mut R) -> Result<Option<u16>, CamSourceError> {
    let mut buf = [0u8; layout::PAYLOAD_LEN_LEN];
    if !read_exact_or_end(reader, &mut buf, "frame length")? {
        return Ok(None);
    }
    Ok(Some(u16::from_le_bytes(buf)))
}

/// Time elapsed since the origin tick.
///
/// Ticks are expected to be non-decreasing; a decrease wraps instead of
/// panicking.
///
/// # Examples
/// ```text
/// assert_eq!(time_offset(1500, 1000), Duration::from_millis(500));
/// ```
pub fn time_offset(tick: u64, origin: u64) -> Duration {
    Duration::from_millis(tick.wrapping_sub(origin))
}
