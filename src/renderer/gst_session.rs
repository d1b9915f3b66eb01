use crate::renderer::asset::{load_asset, AudioAsset};
use crate::types::session::{clamp_time, PlaybackEngine, PlaybackEvent, SessionError};
use crate::types::settings::PlayerSettings;
use std::cell::Cell;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use gst::prelude::*;
use gstreamer as gst;
use gstreamer_app as gst_app;
use tracing::{debug, error, info, warn};

const AUDIO_SINK: &str = "autoaudiosink";

// Bytes handed to appsrc when it does not ask for a specific amount.
const CHUNK_SIZE: usize = 64 * 1024;

/// Playback session backed by a GStreamer pipeline fed from memory.
pub struct GstSession {
    pipeline: gst::Pipeline,
    bus: gst::Bus,
    duration: f64,
    playing: bool,
    gate: EventGate,
    last_position: Cell<f64>,
    pending: VecDeque<PlaybackEvent>,
}

impl GstSession {
    /// Load the bundled asset named in `settings` and prepare it for playback.
    pub fn open(settings: &PlayerSettings) -> Result<Self, SessionError> {
        let asset = load_asset(&settings.asset_dir, &settings.asset_name)?;
        Self::load(asset, settings.preroll_timeout())
    }

    /// Build a pipeline over the asset bytes and preroll it.
    ///
    /// Returns once the duration is known, or fails with
    /// [`SessionError::DecodeInit`] when the data cannot be decoded within
    /// `preroll_timeout`.
    pub fn load(asset: AudioAsset, preroll_timeout: Duration) -> Result<Self, SessionError> {
        Self::load_with_sink(asset, preroll_timeout, AUDIO_SINK)
    }

    fn load_with_sink(
        asset: AudioAsset,
        preroll_timeout: Duration,
        sink: &str,
    ) -> Result<Self, SessionError> {
        gst::init().map_err(|e| SessionError::DecodeInit(e.to_string()))?;

        let description = format!(
            "appsrc name=src ! decodebin ! audioconvert ! audioresample ! {}",
            sink
        );
        let pipeline = gst::parse::launch(&description)
            .map_err(|e| SessionError::DecodeInit(format!("failed to create pipeline: {}", e)))?
            .downcast::<gst::Pipeline>()
            .map_err(|_| SessionError::DecodeInit("launch did not yield a pipeline".to_string()))?;

        let appsrc = pipeline
            .by_name("src")
            .and_then(|e| e.downcast::<gst_app::AppSrc>().ok())
            .ok_or_else(|| SessionError::DecodeInit("pipeline has no appsrc".to_string()))?;
        attach_memory_source(&appsrc, Arc::new(asset.data));

        let bus = pipeline
            .bus()
            .ok_or_else(|| SessionError::DecodeInit("pipeline has no bus".to_string()))?;

        let mut session = Self {
            pipeline,
            bus,
            duration: 0.0,
            playing: false,
            gate: EventGate::default(),
            last_position: Cell::new(0.0),
            pending: VecDeque::new(),
        };
        session.preroll(preroll_timeout)?;

        let duration = session
            .pipeline
            .query_duration::<gst::ClockTime>()
            .map(clock_to_seconds)
            .filter(|d| *d > 0.0)
            .ok_or_else(|| SessionError::DecodeInit("stream duration is unknown".to_string()))?;

        info!(
            "Session ready for {} ({:?}), duration {:.2}s",
            asset.name, asset.path, duration
        );
        session.duration = duration;
        Ok(session)
    }

    fn preroll(&self, timeout: Duration) -> Result<(), SessionError> {
        self.pipeline
            .set_state(gst::State::Paused)
            .map_err(|e| SessionError::DecodeInit(format!("failed to preroll: {}", e)))?;

        let timeout = gst::ClockTime::from_mseconds(timeout.as_millis() as u64);
        let msg = self.bus.timed_pop_filtered(
            Some(timeout),
            &[gst::MessageType::AsyncDone, gst::MessageType::Error],
        );
        match msg.as_ref().map(|m| m.view()) {
            Some(gst::MessageView::AsyncDone(_)) => {
                debug!("Pipeline preroll complete");
                Ok(())
            }
            Some(gst::MessageView::Error(err)) => {
                Err(SessionError::DecodeInit(err.error().to_string()))
            }
            _ => Err(SessionError::DecodeInit("preroll timed out".to_string())),
        }
    }

    fn set_state(&mut self, state: gst::State) -> bool {
        match self.pipeline.set_state(state) {
            Ok(_) => true,
            Err(e) => {
                error!("Failed to set pipeline to {:?}: {}", state, e);
                self.pending.push_back(PlaybackEvent::DecodeError(Some(format!(
                    "could not change state to {:?}",
                    state
                ))));
                false
            }
        }
    }
}

/// Serve `data` to `appsrc` as a seekable byte stream.
fn attach_memory_source(appsrc: &gst_app::AppSrc, data: Arc<Vec<u8>>) {
    appsrc.set_format(gst::Format::Bytes);
    appsrc.set_stream_type(gst_app::AppStreamType::RandomAccess);
    appsrc.set_size(data.len() as i64);

    let cursor = Arc::new(AtomicU64::new(0));
    let read_cursor = cursor.clone();
    let read_data = data.clone();
    let callbacks = gst_app::AppSrcCallbacks::builder()
        .need_data(move |src, length| {
            let start = read_cursor.load(Ordering::SeqCst) as usize;
            if start >= read_data.len() {
                if let Err(e) = src.end_of_stream() {
                    debug!("appsrc refused end of stream: {:?}", e);
                }
                return;
            }
            let wanted = match length {
                0 | u32::MAX => CHUNK_SIZE,
                n => n as usize,
            };
            let end = (start + wanted).min(read_data.len());
            read_cursor.store(end as u64, Ordering::SeqCst);
            let buffer = gst::Buffer::from_slice(read_data[start..end].to_vec());
            if let Err(e) = src.push_buffer(buffer) {
                debug!("appsrc refused buffer: {:?}", e);
            }
        })
        .seek_data(move |_, offset| {
            if offset > data.len() as u64 {
                return false;
            }
            cursor.store(offset, Ordering::SeqCst);
            true
        })
        .build();
    appsrc.set_callbacks(callbacks);
}

fn clock_to_seconds(time: gst::ClockTime) -> f64 {
    time.nseconds() as f64 / 1_000_000_000.0
}

fn position_seconds(position: gst::ClockTime, duration: f64) -> f64 {
    clamp_time(clock_to_seconds(position), duration)
}

/// Turns bus messages into controller events.
///
/// End of stream yields `Finished` once until [`EventGate::rearm`] is called
/// for the next play cycle.
#[derive(Debug, Default)]
struct EventGate {
    finished_reported: bool,
}

impl EventGate {
    fn rearm(&mut self) {
        self.finished_reported = false;
    }

    fn end_of_stream(&mut self) -> Option<PlaybackEvent> {
        if self.finished_reported {
            return None;
        }
        self.finished_reported = true;
        Some(PlaybackEvent::Finished)
    }

    fn error(&self, detail: String) -> PlaybackEvent {
        PlaybackEvent::DecodeError((!detail.is_empty()).then_some(detail))
    }
}

impl PlaybackEngine for GstSession {
    fn duration(&self) -> f64 {
        self.duration
    }

    fn current_time(&self) -> f64 {
        if let Some(position) = self.pipeline.query_position::<gst::ClockTime>() {
            self.last_position
                .set(position_seconds(position, self.duration));
        }
        self.last_position.get()
    }

    fn is_playing(&self) -> bool {
        self.playing
    }

    fn play(&mut self) {
        if self.set_state(gst::State::Playing) {
            self.playing = true;
            self.gate.rearm();
        }
    }

    fn pause(&mut self) {
        if self.set_state(gst::State::Paused) {
            self.playing = false;
        }
    }

    fn seek(&mut self, time: f64) {
        let target = clamp_time(time, self.duration);
        let position = gst::ClockTime::from_nseconds((target * 1_000_000_000.0) as u64);
        match self
            .pipeline
            .seek_simple(gst::SeekFlags::FLUSH | gst::SeekFlags::ACCURATE, position)
        {
            Ok(()) => self.last_position.set(target),
            Err(e) => warn!("Seek to {:.2}s failed: {}", target, e),
        }
    }

    fn poll_event(&mut self) -> Option<PlaybackEvent> {
        if let Some(event) = self.pending.pop_front() {
            return Some(event);
        }
        while let Some(msg) = self
            .bus
            .pop_filtered(&[gst::MessageType::Eos, gst::MessageType::Error])
        {
            match msg.view() {
                gst::MessageView::Eos(_) => {
                    self.playing = false;
                    if let Some(event) = self.gate.end_of_stream() {
                        self.last_position.set(self.duration);
                        return Some(event);
                    }
                }
                gst::MessageView::Error(err) => {
                    self.playing = false;
                    return Some(self.gate.error(err.error().to_string()));
                }
                _ => {}
            }
        }
        None
    }
}

impl Drop for GstSession {
    fn drop(&mut self) {
        if let Err(e) = self.pipeline.set_state(gst::State::Null) {
            warn!("Failed to release pipeline: {}", e);
        }
    }
}
