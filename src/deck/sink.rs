//! Utilities for decoding in-memory audio bytes into `rodio` sinks.
//!
//! The helpers here encapsulate decoding a registered buffer and preparing
//! a paused `Sink`, plus a container probe for when the decoder cannot
//! report a duration itself.

use std::io::Cursor;
use std::sync::Arc;
use std::time::Duration;

use lofty::AudioFile;
use rodio::{Decoder, OutputStream, Sink, Source};

/// Cheap clone of a registered buffer, readable by the decoder.
pub(super) struct SharedBytes(pub Arc<Vec<u8>>);

impl AsRef<[u8]> for SharedBytes {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Decode `data`, returning the source and the duration when the decoder
/// knows it. Decode failures are returned as messages; nothing here unwinds.
pub(super) fn decode_source(
    data: &Arc<Vec<u8>>,
) -> Result<(Decoder<Cursor<SharedBytes>>, Option<Duration>), String> {
    let source = Decoder::new(Cursor::new(SharedBytes(data.clone())))
        .map_err(|e| format!("decode failed: {e}"))?;
    let duration = source.total_duration();
    Ok((source, duration))
}

/// Decode `data` into a paused `Sink` on `handle`'s mixer.
pub(super) fn create_sink(
    handle: &OutputStream,
    data: &Arc<Vec<u8>>,
) -> Result<(Sink, Option<Duration>), String> {
    let (source, duration) = decode_source(data)?;

    let sink = Sink::connect_new(handle.mixer());
    sink.append(source);
    sink.pause();
    Ok((sink, duration))
}

/// Probe container metadata for a duration. Fallback path for formats whose
/// decoded stream length is not known up front.
pub(super) fn probe_duration(data: &Arc<Vec<u8>>) -> Option<Duration> {
    let cursor = Cursor::new(SharedBytes(data.clone()));
    let tagged = lofty::Probe::new(cursor).guess_file_type().ok()?.read().ok()?;
    Some(tagged.properties().duration())
}
