use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::sync::Arc;

use tracing::debug;

use crate::source::{Frame, FrameSource, SourceError};

use super::error::CamSourceError;
use super::layout;
use super::reader::{read_exact_or_end, read_payload_len, read_tick, skip_header, time_offset};

/// Forward-only frame stream over any byte reader.
///
/// The stream is single pass: once it reports the end (or an error) it stays
/// exhausted.
pub struct FrameReader<R> {
    reader: R,
    state: ReaderState,
    origin: Option<u64>,
    position: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReaderState {
    Header,
    Frames,
    Done,
}

/// Frame stream backed by a capture file on disk.
pub type CamFileSource = FrameReader<BufReader<File>>;

impl CamFileSource {
    pub fn open(path: &Path) -> Result<Self, SourceError> {
        let file = File::open(path).map_err(|source| CamSourceError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(FrameReader::new(BufReader::with_capacity(
            layout::CAM_READER_BUFFER_SIZE,
            file,
        )))
    }
}

impl<R: Read> FrameReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            state: ReaderState::Header,
            origin: None,
            position: 0,
        }
    }

    fn read_frame(&mut self) -> Result<Option<Frame>, CamSourceError> {
        if self.state == ReaderState::Header {
            if !skip_header(&mut self.reader)? {
                return Ok(None);
            }
            self.position = layout::HEADER_LEN as u64;
            self.state = ReaderState::Frames;
        }

        let Some(tick) = read_tick(&mut self.reader)? else {
            return Ok(None);
        };
        let Some(len) = read_payload_len(&mut self.reader)? else {
            return Ok(None);
        };

        let mut payload = vec![0u8; usize::from(len)];
        if !read_exact_or_end(&mut self.reader, &mut payload, "frame payload")? {
            debug!(
                offset = self.position,
                declared = len,
                "capture truncated inside frame payload"
            );
            return Ok(None);
        }

        let origin = *self.origin.get_or_insert(tick);
        let offset = self.position + layout::FRAME_HEADER_LEN as u64;
        self.position = offset + u64::from(len);

        Ok(Some(Frame {
            tick,
            time_offset: time_offset(tick, origin),
            offset,
            payload: Arc::from(payload),
        }))
    }
}

impl<R: Read> FrameSource for FrameReader<R> {
    fn next_frame(&mut self) -> Result<Option<Frame>, SourceError> {
        if self.state == ReaderState::Done {
            return Ok(None);
        }
        match self.read_frame() {
            Ok(Some(frame)) => Ok(Some(frame)),
            Ok(None) => {
                self.state = ReaderState::Done;
                Ok(None)
            }
            Err(err) => {
                self.state = ReaderState::Done;
                Err(err.into())
            }
        }
    }
}

impl<R: Read> Iterator for FrameReader<R> {
    type Item = Result<Frame, SourceError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_frame().transpose()
    }
}
