use super::error::DecodeError;
use super::layout;

/// Sequential little-endian cursor over one message.
///
/// Every read is bounds checked and reports `DecodeError::Truncated` instead
/// of panicking.
pub struct GameReader<'a> {
    payload: &'a [u8],
    pos: usize,
}

impl<'a> GameReader<'a> {
    pub fn new(payload: &'a [u8]) -> Self {
        Self { payload, pos: 0 }
    }

    /// Bytes consumed so far.
    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.payload.len() - self.pos
    }

    pub fn require(&self, needed: usize) -> Result<(), DecodeError> {
        if self.remaining() < needed {
            return Err(DecodeError::Truncated {
                offset: self.pos,
                needed,
                available: self.remaining(),
            });
        }
        Ok(())
    }

    pub fn skip(&mut self, len: usize) -> Result<(), DecodeError> {
        self.read_slice(len).map(|_| ())
    }

    pub fn read_slice(&mut self, len: usize) -> Result<&'a [u8], DecodeError> {
        self.require(len)?;
        let bytes = &self.payload[self.pos..self.pos + len];
        self.pos += len;
        Ok(bytes)
    }

    pub fn read_u8(&mut self) -> Result<u8, DecodeError> {
        let bytes = self.read_slice(1)?;
        Ok(bytes[0])
    }

    pub fn read_u16_le(&mut self) -> Result<u16, DecodeError> {
        let bytes = self.read_slice(2)?;
        Ok(u16::from_le_bytes([bytes[0], bytes[1]]))
    }

    pub fn read_u32_le(&mut self) -> Result<u32, DecodeError> {
        let bytes = self.read_slice(4)?;
        Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    /// Length-prefixed string (u16 length + raw bytes).
    ///
    /// With `printable` set, every byte must be printable ASCII; otherwise
    /// bytes are decoded lossily.
    pub fn read_string(
        &mut self,
        field: &'static str,
        printable: bool,
    ) -> Result<String, DecodeError> {
        let len = usize::from(self.read_u16_le()?);
        let start = self.pos;
        let bytes = self.read_slice(len)?;
        if printable {
            if let Some(idx) = bytes.iter().position(|b| !layout::PRINTABLE.contains(b)) {
                return Err(DecodeError::IntegrityViolation {
                    field,
                    offset: start + idx,
                    value: bytes[idx],
                });
            }
        }
        Ok(String::from_utf8_lossy(bytes).into_owned())
    }
}
