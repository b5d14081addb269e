use std::sync::Arc;

use super::sink::{decode_source, probe_duration};
use super::types::{DeckInfo, DeckState};

/// Minimal mono 16-bit PCM WAV, `seconds` long at 8 kHz, all-silence.
fn wav_fixture(seconds: u32) -> Vec<u8> {
    let sample_rate: u32 = 8000;
    let data_len = sample_rate * 2 * seconds;

    let mut bytes = Vec::with_capacity(44 + data_len as usize);
    bytes.extend_from_slice(b"RIFF");
    bytes.extend_from_slice(&(36 + data_len).to_le_bytes());
    bytes.extend_from_slice(b"WAVE");
    bytes.extend_from_slice(b"fmt ");
    bytes.extend_from_slice(&16u32.to_le_bytes());
    bytes.extend_from_slice(&1u16.to_le_bytes()); // PCM
    bytes.extend_from_slice(&1u16.to_le_bytes()); // mono
    bytes.extend_from_slice(&sample_rate.to_le_bytes());
    bytes.extend_from_slice(&(sample_rate * 2).to_le_bytes()); // byte rate
    bytes.extend_from_slice(&2u16.to_le_bytes()); // block align
    bytes.extend_from_slice(&16u16.to_le_bytes()); // bits per sample
    bytes.extend_from_slice(b"data");
    bytes.extend_from_slice(&data_len.to_le_bytes());
    bytes.resize(44 + data_len as usize, 0);
    bytes
}

#[test]
fn decode_source_accepts_pcm_wav() {
    let data = Arc::new(wav_fixture(1));
    assert!(decode_source(&data).is_ok());
}

#[test]
fn decode_source_rejects_non_audio_bytes() {
    let data = Arc::new(b"definitely not an audio container".to_vec());
    let err = decode_source(&data).err().expect("garbage must not decode");
    assert!(err.contains("decode failed"));
}

#[test]
fn probe_duration_reads_wav_length() {
    let data = Arc::new(wav_fixture(2));
    let d = probe_duration(&data).expect("wav containers carry a length");
    assert_eq!(d.as_secs(), 2);
}

#[test]
fn deck_info_starts_empty() {
    let info = DeckInfo::default();
    assert_eq!(info.state, DeckState::Empty);
    assert_eq!(info.generation, 0);
    assert!(info.duration.is_none());
}
