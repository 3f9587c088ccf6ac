//! Built-in 16-bit PCM mono WAV encoder.
//!
//! Used when the `hound` backend is not compiled in. Produces the canonical
//! 44-byte RIFF/WAVE header followed by little-endian samples.

use std::io::{self, Write};
use std::path::Path;

/// Size of the canonical PCM WAV header.
pub const HEADER_LEN: usize = 44;

const CHANNELS: u16 = 1;
const BITS_PER_SAMPLE: u16 = 16;
const BLOCK_ALIGN: u16 = CHANNELS * BITS_PER_SAMPLE / 8;

/// Quantize a float sample to a signed 16-bit value.
///
/// Input outside [-1.0, 1.0] is clamped first, so this never overflows.
pub fn quantize(sample: f32) -> i16 {
    (sample.clamp(-1.0, 1.0) * 32767.0).round() as i16
}

/// Convert float samples to little-endian 16-bit PCM bytes.
pub fn samples_to_pcm16(samples: &[f32]) -> Vec<u8> {
    let mut pcm = Vec::with_capacity(samples.len() * 2);
    for &sample in samples {
        pcm.extend_from_slice(&quantize(sample).to_le_bytes());
    }
    pcm
}

/// Build the 44-byte header for `data_len` bytes of mono PCM16 data.
pub fn header_bytes(sample_rate: u32, data_len: u32) -> [u8; HEADER_LEN] {
    let byte_rate = sample_rate * BLOCK_ALIGN as u32;
    let fields: [&[u8]; 13] = [
        // RIFF header
        b"RIFF",
        &(36 + data_len).to_le_bytes(),
        b"WAVE",
        // fmt chunk
        b"fmt ",
        &16u32.to_le_bytes(),
        &1u16.to_le_bytes(), // PCM
        &CHANNELS.to_le_bytes(),
        &sample_rate.to_le_bytes(),
        &byte_rate.to_le_bytes(),
        &BLOCK_ALIGN.to_le_bytes(),
        &BITS_PER_SAMPLE.to_le_bytes(),
        // data chunk
        b"data",
        &data_len.to_le_bytes(),
    ];

    let mut header = [0u8; HEADER_LEN];
    let mut pos = 0;
    for field in fields {
        header[pos..pos + field.len()].copy_from_slice(field);
        pos += field.len();
    }
    header
}

/// Write the 44-byte header for `data_len` bytes of mono PCM16 data.
pub fn write_header<W: Write>(writer: &mut W, sample_rate: u32, data_len: u32) -> io::Result<()> {
    writer.write_all(&header_bytes(sample_rate, data_len))
}

/// Encode samples as a complete WAV file in memory.
pub fn encode_pcm16(samples: &[f32], sample_rate: u32) -> Vec<u8> {
    let pcm = samples_to_pcm16(samples);
    let mut buffer = Vec::with_capacity(HEADER_LEN + pcm.len());
    buffer.extend_from_slice(&header_bytes(sample_rate, pcm.len() as u32));
    buffer.extend_from_slice(&pcm);
    buffer
}

/// Encode samples and write them to `path` in a single write.
pub fn write_pcm16_file(path: &Path, samples: &[f32], sample_rate: u32) -> io::Result<()> {
    std::fs::write(path, encode_pcm16(samples, sample_rate))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn u16_at(bytes: &[u8], offset: usize) -> u16 {
        u16::from_le_bytes([bytes[offset], bytes[offset + 1]])
    }

    fn u32_at(bytes: &[u8], offset: usize) -> u32 {
        u32::from_le_bytes([
            bytes[offset],
            bytes[offset + 1],
            bytes[offset + 2],
            bytes[offset + 3],
        ])
    }

    #[test]
    fn header_fields_match_pcm16_mono_layout() {
        let bytes = encode_pcm16(&[0.0; 10], 24_000);
        assert_eq!(&bytes[0..4], b"RIFF");
        assert_eq!(u32_at(&bytes, 4), 36 + 20);
        assert_eq!(&bytes[8..12], b"WAVE");
        assert_eq!(&bytes[12..16], b"fmt ");
        assert_eq!(u32_at(&bytes, 16), 16);
        assert_eq!(u16_at(&bytes, 20), 1);
        assert_eq!(u16_at(&bytes, 22), 1);
        assert_eq!(u32_at(&bytes, 24), 24_000);
        assert_eq!(u32_at(&bytes, 28), 48_000);
        assert_eq!(u16_at(&bytes, 32), 2);
        assert_eq!(u16_at(&bytes, 34), 16);
        assert_eq!(&bytes[36..40], b"data");
        assert_eq!(u32_at(&bytes, 40), 20);
        assert_eq!(bytes.len(), HEADER_LEN + 20);
    }

    #[test]
    fn header_fills_all_44_bytes() {
        let header = header_bytes(24_000, 144_000);
        assert_eq!(&header[0..4], b"RIFF");
        assert_eq!(u32_at(&header, 4), 144_036);
        assert_eq!(&header[36..40], b"data");
        assert_eq!(u32_at(&header, 40), 144_000);

        let mut written = Vec::new();
        write_header(&mut written, 24_000, 144_000).unwrap();
        assert_eq!(written, header.to_vec());
    }

    #[test]
    fn quantize_clamps_and_rounds() {
        assert_eq!(quantize(0.0), 0);
        assert_eq!(quantize(1.0), 32767);
        assert_eq!(quantize(-1.0), -32767);
        assert_eq!(quantize(4.0), 32767);
        assert_eq!(quantize(-4.0), -32767);
        assert_eq!(quantize(0.9), 29490);
        assert_eq!(quantize(-0.9), -29490);
    }

    #[test]
    fn samples_are_little_endian() {
        let pcm = samples_to_pcm16(&[1.0, -1.0]);
        assert_eq!(pcm, vec![0xFF, 0x7F, 0x01, 0x80]);
    }

    #[test]
    fn empty_buffer_is_header_only() {
        let bytes = encode_pcm16(&[], 24_000);
        assert_eq!(bytes.len(), HEADER_LEN);
        assert_eq!(u32_at(&bytes, 40), 0);
    }

    #[test]
    fn write_to_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.wav");
        assert!(write_pcm16_file(&path, &[0.0; 4], 24_000).is_err());
        assert!(!path.exists());
    }
}
