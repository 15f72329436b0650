//! Capture decoding pipeline.
//!
//! [`CaptureStream`] runs two stages per capture: a reader on the blocking
//! pool that produces frames, and a decoder task that turns them into events.
//! Stages hand off through capacity-1 channels and share one cancellation
//! token. [`decode_capture_file`] runs the same work inline for callers
//! without a runtime.

mod error;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::catalog::ItemAttributeLookup;
use crate::packet::PacketView;
use crate::protocols::game::{Decoder, DecoderConfig, Event, Registry};
use crate::source::{CamFileSource, Frame, FrameSource, SourceError};

pub use error::PipelineError;

const HANDOFF_CAPACITY: usize = 1;

/// Decode a whole capture on the calling thread.
///
/// # Examples
/// ```no_run
/// use std::path::Path;
///
/// use camwire_core::{DecoderConfig, NoAttributes, decode_capture_file};
///
/// let events = decode_capture_file(
///     Path::new("session.cam"),
///     &DecoderConfig::default(),
///     &NoAttributes,
/// )?;
/// println!("{} events", events.len());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn decode_capture_file(
    path: &Path,
    config: &DecoderConfig,
    lookup: &dyn ItemAttributeLookup,
) -> Result<Vec<Event>, PipelineError> {
    let source = CamFileSource::open(path)?;
    decode_source(source, &Decoder::new(*config, lookup))
}

/// Decode every frame of `source` in order.
pub fn decode_source<S: FrameSource>(
    mut source: S,
    decoder: &Decoder<'_>,
) -> Result<Vec<Event>, PipelineError> {
    let mut events = Vec::new();
    while let Some(frame) = source.next_frame()? {
        events.extend(decode_frame(decoder, &frame)?);
    }
    Ok(events)
}

fn decode_frame(decoder: &Decoder<'_>, frame: &Frame) -> Result<Vec<Event>, PipelineError> {
    debug!(
        offset = frame.offset,
        len = frame.payload.len(),
        time_ms = frame.time_offset.as_millis() as u64,
        "frame"
    );
    Ok(decoder.decode_payload(PacketView::from_frame(frame))?)
}

/// Events of one capture, produced by background stages.
///
/// Must be created inside a tokio runtime. Dropping the stream cancels both
/// stages.
pub struct CaptureStream {
    events: mpsc::Receiver<Result<Event, PipelineError>>,
    token: CancellationToken,
    reader: Option<JoinHandle<()>>,
    decoder: Option<JoinHandle<()>>,
    finished: bool,
}

impl CaptureStream {
    /// Start decoding the capture at `path`.
    pub fn open(
        path: impl Into<PathBuf>,
        config: DecoderConfig,
        lookup: Arc<dyn ItemAttributeLookup>,
    ) -> Self {
        Self::open_with_registry(path, config, lookup, Registry::standard())
    }

    /// Like [`CaptureStream::open`], dispatching through `registry`.
    pub fn open_with_registry(
        path: impl Into<PathBuf>,
        config: DecoderConfig,
        lookup: Arc<dyn ItemAttributeLookup>,
        registry: Registry,
    ) -> Self {
        let path = path.into();
        Self::spawn(move || CamFileSource::open(&path), config, lookup, registry)
    }

    /// Start decoding frames from an already opened source.
    pub fn from_source<S>(
        source: S,
        config: DecoderConfig,
        lookup: Arc<dyn ItemAttributeLookup>,
    ) -> Self
    where
        S: FrameSource + Send + 'static,
    {
        Self::from_source_with_registry(source, config, lookup, Registry::standard())
    }

    pub fn from_source_with_registry<S>(
        source: S,
        config: DecoderConfig,
        lookup: Arc<dyn ItemAttributeLookup>,
        registry: Registry,
    ) -> Self
    where
        S: FrameSource + Send + 'static,
    {
        Self::spawn(move || Ok(source), config, lookup, registry)
    }

    fn spawn<S, F>(
        open: F,
        config: DecoderConfig,
        lookup: Arc<dyn ItemAttributeLookup>,
        registry: Registry,
    ) -> Self
    where
        S: FrameSource,
        F: FnOnce() -> Result<S, SourceError> + Send + 'static,
    {
        let token = CancellationToken::new();
        let (frame_tx, frame_rx) = mpsc::channel(HANDOFF_CAPACITY);
        let (event_tx, event_rx) = mpsc::channel(HANDOFF_CAPACITY);

        let reader = tokio::task::spawn_blocking({
            let token = token.clone();
            move || run_reader(open, frame_tx, token)
        });
        let decoder = tokio::spawn(run_decoder(
            config,
            lookup,
            registry,
            frame_rx,
            event_tx,
            token.clone(),
        ));

        Self {
            events: event_rx,
            token,
            reader: Some(reader),
            decoder: Some(decoder),
            finished: false,
        }
    }

    /// Token that stops this stream when cancelled.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.token.clone()
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Next event in capture order.
    ///
    /// `Ok(None)` marks the clean end of the capture. An error is returned
    /// once; later calls return `Ok(None)`.
    pub async fn next_event(&mut self) -> Result<Option<Event>, PipelineError> {
        if self.finished {
            return Ok(None);
        }

        let received = tokio::select! {
            biased;
            _ = self.token.cancelled() => None,
            received = self.events.recv() => Some(received),
        };
        let Some(received) = received else {
            self.shutdown();
            return Err(PipelineError::Cancelled);
        };

        match received {
            Some(Ok(event)) => Ok(Some(event)),
            Some(Err(err)) => {
                self.shutdown();
                Err(err)
            }
            None => {
                self.finished = true;
                self.join().await?;
                Ok(None)
            }
        }
    }

    /// Drain the stream into a vector.
    pub async fn collect(mut self) -> Result<Vec<Event>, PipelineError> {
        let mut events = Vec::new();
        while let Some(event) = self.next_event().await? {
            events.push(event);
        }
        Ok(events)
    }

    fn shutdown(&mut self) {
        self.finished = true;
        self.token.cancel();
        self.events.close();
        while self.events.try_recv().is_ok() {}
    }

    async fn join(&mut self) -> Result<(), PipelineError> {
        for handle in [self.reader.take(), self.decoder.take()].into_iter().flatten() {
            handle
                .await
                .map_err(|err| PipelineError::Task(err.to_string()))?;
        }
        Ok(())
    }
}

impl Drop for CaptureStream {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

fn run_reader<S, F>(
    open: F,
    frames: mpsc::Sender<Result<Frame, SourceError>>,
    token: CancellationToken,
) where
    S: FrameSource,
    F: FnOnce() -> Result<S, SourceError>,
{
    let mut source = match open() {
        Ok(source) => source,
        Err(err) => {
            let _ = frames.blocking_send(Err(err));
            return;
        }
    };

    while !token.is_cancelled() {
        match source.next_frame() {
            Ok(Some(frame)) => {
                if frames.blocking_send(Ok(frame)).is_err() {
                    return;
                }
            }
            Ok(None) => return,
            Err(err) => {
                let _ = frames.blocking_send(Err(err));
                return;
            }
        }
    }
}

async fn run_decoder(
    config: DecoderConfig,
    lookup: Arc<dyn ItemAttributeLookup>,
    registry: Registry,
    mut frames: mpsc::Receiver<Result<Frame, SourceError>>,
    events: mpsc::Sender<Result<Event, PipelineError>>,
    token: CancellationToken,
) {
    let decoder = Decoder::with_registry(config, lookup.as_ref(), registry);

    loop {
        let received = tokio::select! {
            _ = token.cancelled() => return,
            received = frames.recv() => received,
        };
        let Some(frame) = received else {
            return;
        };

        let decoded = frame
            .map_err(PipelineError::from)
            .and_then(|frame| decode_frame(&decoder, &frame));
        match decoded {
            Ok(batch) => {
                for event in batch {
                    if !forward(&events, Ok(event), &token).await {
                        return;
                    }
                }
            }
            Err(err) => {
                forward(&events, Err(err), &token).await;
                return;
            }
        }
    }
}

/// Send unless cancelled first; false when the event cannot be delivered.
async fn forward<T>(tx: &mpsc::Sender<T>, item: T, token: &CancellationToken) -> bool {
    tokio::select! {
        _ = token.cancelled() => false,
        sent = tx.send(item) => sent.is_ok(),
    }
}
