//! Sound engine — note synthesis and playback via rodio
//!
//! Eight notes (one octave of C major) are synthesized once at startup
//! as mono 16-bit triangle-wave PCM, wrapped in a WAV container, and
//! decoded by rodio at trigger time. Each trigger gets its own sink, so
//! notes layer; finished sinks are swept once per frame.

use std::io::Cursor;

use byteorder::{LittleEndian, WriteBytesExt};
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};

const SAMPLE_RATE: u32 = 22_050;
const NOTE_SECONDS: f32 = 0.25;
const RELEASE_SECONDS: f32 = 0.015;
const AMPLITUDE: f32 = 0.35;

/// Fundamental frequencies of the pad notes, ascending: C4 to C5
pub const NOTE_FREQS_HZ: [f32; 8] = [
    261.63, 293.66, 329.63, 349.23, 392.00, 440.00, 493.88, 523.25,
];

/// Pre-built WAV buffers, one per pad note
pub struct NoteBank {
    notes: Vec<Vec<u8>>,
}

impl NoteBank {
    pub fn new() -> Self {
        let notes = NOTE_FREQS_HZ
            .iter()
            .map(|&freq| wav_from_pcm(&triangle_note(freq)))
            .collect();
        Self { notes }
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn wav(&self, index: usize) -> Option<&[u8]> {
        self.notes.get(index).map(|n| n.as_slice())
    }
}

impl Default for NoteBank {
    fn default() -> Self {
        Self::new()
    }
}

/// Triangle wave at the given pitch with a short linear release to
/// avoid an end-of-buffer click
fn triangle_note(freq_hz: f32) -> Vec<i16> {
    let total = (SAMPLE_RATE as f32 * NOTE_SECONDS) as usize;
    let release_start = total - (SAMPLE_RATE as f32 * RELEASE_SECONDS) as usize;
    let mut samples = Vec::with_capacity(total);
    for n in 0..total {
        let phase = (n as f32 * freq_hz / SAMPLE_RATE as f32).fract();
        let tri = if phase < 0.5 {
            4.0 * phase - 1.0
        } else {
            3.0 - 4.0 * phase
        };
        let env = if n >= release_start {
            (total - n) as f32 / (total - release_start).max(1) as f32
        } else {
            1.0
        };
        samples.push((tri * env * AMPLITUDE * i16::MAX as f32) as i16);
    }
    samples
}

/// Wrap mono 16-bit PCM in a WAV container
fn wav_from_pcm(samples: &[i16]) -> Vec<u8> {
    let channels: u16 = 1;
    let bits_per_sample: u16 = 16;
    let byte_rate = SAMPLE_RATE * channels as u32 * bits_per_sample as u32 / 8;
    let block_align = channels * bits_per_sample / 8;
    let data_len = (samples.len() * 2) as u32;
    let file_len = 36 + data_len;

    let mut wav = Vec::with_capacity(file_len as usize + 8);

    // RIFF header
    wav.extend_from_slice(b"RIFF");
    wav.write_u32::<LittleEndian>(file_len).unwrap();
    wav.extend_from_slice(b"WAVE");

    // fmt chunk
    wav.extend_from_slice(b"fmt ");
    wav.write_u32::<LittleEndian>(16).unwrap(); // chunk size
    wav.write_u16::<LittleEndian>(1).unwrap(); // PCM format
    wav.write_u16::<LittleEndian>(channels).unwrap();
    wav.write_u32::<LittleEndian>(SAMPLE_RATE).unwrap();
    wav.write_u32::<LittleEndian>(byte_rate).unwrap();
    wav.write_u16::<LittleEndian>(block_align).unwrap();
    wav.write_u16::<LittleEndian>(bits_per_sample).unwrap();

    // data chunk
    wav.extend_from_slice(b"data");
    wav.write_u32::<LittleEndian>(data_len).unwrap();
    for &s in samples {
        wav.write_i16::<LittleEndian>(s).unwrap();
    }

    wav
}

/// Central sound engine — output stream plus active playback sinks
pub struct SoundEngine {
    /// rodio output stream (must be kept alive)
    _stream: OutputStream,
    /// Handle for creating new sinks
    handle: OutputStreamHandle,
    /// One sink per sounding note (kept alive until finished)
    sinks: Vec<Sink>,
    bank: NoteBank,
    /// Master volume (0.0 – 1.0)
    volume: f32,
}

impl SoundEngine {
    /// Create a new sound engine. Returns None if no audio device is
    /// available; the demo then runs silently.
    pub fn new(bank: NoteBank) -> Option<Self> {
        match OutputStream::try_default() {
            Ok((stream, handle)) => {
                tracing::info!("Audio output initialized, {} notes", bank.len());
                Some(Self {
                    _stream: stream,
                    handle,
                    sinks: Vec::new(),
                    bank,
                    volume: 1.0,
                })
            }
            Err(e) => {
                tracing::warn!("Failed to initialize audio: {}", e);
                None
            }
        }
    }

    /// Trigger the note at `index`. Already-sounding notes keep playing.
    pub fn play_note(&mut self, index: usize) {
        let Some(wav) = self.bank.wav(index) else {
            tracing::warn!("No note at index {}", index);
            return;
        };
        match Decoder::new(Cursor::new(wav.to_vec())) {
            Ok(source) => match Sink::try_new(&self.handle) {
                Ok(sink) => {
                    sink.set_volume(self.volume);
                    sink.append(source);
                    self.sinks.push(sink);
                    tracing::debug!("Note {} triggered", index);
                }
                Err(e) => tracing::warn!("Failed to create sink: {}", e),
            },
            Err(e) => tracing::warn!("Failed to decode note {}: {}", index, e),
        }
    }

    /// Set master volume (0.0 – 1.0); applies to subsequent triggers
    pub fn set_volume(&mut self, vol: f32) {
        self.volume = vol.clamp(0.0, 1.0);
    }

    /// Drop finished sinks (called once per frame)
    pub fn gc(&mut self) {
        self.sinks.retain(|s| !s.empty());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bank_holds_one_note_per_pad() {
        let bank = NoteBank::new();
        assert_eq!(bank.len(), 8);
        assert!(bank.wav(7).is_some());
        assert!(bank.wav(8).is_none());
    }

    #[test]
    fn note_frequencies_ascend() {
        for pair in NOTE_FREQS_HZ.windows(2) {
            assert!(pair[0] < pair[1]);
        }
        // one octave: the last note is double the first
        assert!((NOTE_FREQS_HZ[7] / NOTE_FREQS_HZ[0] - 2.0).abs() < 0.01);
    }

    #[test]
    fn wav_container_is_valid_pcm() {
        let bank = NoteBank::new();
        let wav = bank.wav(0).unwrap();
        assert_eq!(&wav[0..4], b"RIFF");
        assert_eq!(&wav[8..12], b"WAVE");
        assert_eq!(&wav[12..16], b"fmt ");
        // format = PCM, mono, 16-bit
        assert_eq!(u16::from_le_bytes([wav[20], wav[21]]), 1);
        assert_eq!(u16::from_le_bytes([wav[22], wav[23]]), 1);
        assert_eq!(u16::from_le_bytes([wav[34], wav[35]]), 16);
        assert_eq!(u32::from_le_bytes([wav[24], wav[25], wav[26], wav[27]]), SAMPLE_RATE);
        // declared length matches the buffer
        let file_len = u32::from_le_bytes([wav[4], wav[5], wav[6], wav[7]]);
        assert_eq!(file_len as usize + 8, wav.len());
    }

    #[test]
    fn note_fades_out_at_the_end() {
        let samples = triangle_note(440.0);
        assert_eq!(samples.len(), (SAMPLE_RATE as f32 * NOTE_SECONDS) as usize);
        let peak = samples.iter().map(|s| s.unsigned_abs()).max().unwrap();
        assert!(peak > 8_000, "note should be audible, peak {}", peak);
        let tail = samples.last().unwrap().unsigned_abs();
        assert!(tail < 200, "release should end near silence, got {}", tail);
    }
}
