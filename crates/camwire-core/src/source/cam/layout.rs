/// Magic/version word at the start of a capture (not validated).
pub const MAGIC_LEN: usize = 4;
/// Checksum following the magic (not validated).
pub const CHECKSUM_LEN: usize = 8;
pub const HEADER_LEN: usize = MAGIC_LEN + CHECKSUM_LEN;

pub const TICK_LEN: usize = 8;
pub const PAYLOAD_LEN_LEN: usize = 2;
pub const FRAME_HEADER_LEN: usize = TICK_LEN + PAYLOAD_LEN_LEN;

pub const CAM_READER_BUFFER_SIZE: usize = 64 * 1024;
