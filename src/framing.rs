// src/framing.rs
//! Generic section framing with CRC-32 (MPEG-2) validation.
//!
//! This is the boundary to the external section reassembler: it checks the
//! self-describing lengths and the trailing CRC, then hands the EIT
//! decoders a [`RawSection`] they can trust for bounds. The decoders never
//! read the CRC themselves.

use std::ops::Range;

use crc::{Crc, CRC_32_MPEG_2};

use crate::constants::{CRC_LEN, GENERIC_HEADER_LEN};

const CRC_MPEG: Crc<u32> = Crc::<u32>::new(&CRC_32_MPEG_2);

/// CRC-32/MPEG-2 over `data`, as carried in the last 4 section bytes.
pub fn mpeg_crc32(data: &[u8]) -> u32 {
    CRC_MPEG.checksum(data)
}

/// One reassembled section: the full `table_id .. CRC` byte range plus the
/// parsed generic long-form header. Borrowed for the duration of one decode.
#[derive(Debug, Clone)]
pub struct RawSection<'a> {
    pub data: &'a [u8],
    pub table_id: u8,
    /// table_id_extension; the service id for EIT tables
    pub table_id_ext: u16,
    pub version: u8,
    pub current_next: bool,
    pub section_number: u8,
    pub last_section_number: u8,
    /// Byte offset of the first payload byte after the generic header
    pub payload_start: usize,
}

/// Validates length and CRC-32 of one section starting at `table_id`.
pub fn read_section(buf: &[u8]) -> anyhow::Result<RawSection<'_>> {
    if buf.len() < GENERIC_HEADER_LEN + CRC_LEN {
        anyhow::bail!("short section");
    }
    if buf[1] & 0x80 == 0 {
        anyhow::bail!("short-form section");
    }
    let sec_len = ((buf[1] & 0x0F) as usize) << 8 | buf[2] as usize;
    if sec_len < GENERIC_HEADER_LEN - 3 + CRC_LEN {
        anyhow::bail!("invalid section_length");
    }
    let end = 3 + sec_len;
    if end > buf.len() {
        anyhow::bail!("truncated section");
    }

    let crc_calc = CRC_MPEG.checksum(&buf[..end - 4]);
    let crc_pkt = u32::from_be_bytes(buf[end - 4..end].try_into()?);
    if crc_calc != crc_pkt {
        anyhow::bail!("CRC-32 mismatch");
    }

    Ok(RawSection {
        data: &buf[..end],
        table_id: buf[0],
        table_id_ext: u16::from_be_bytes([buf[3], buf[4]]),
        version: (buf[5] & 0x3E) >> 1,
        current_next: buf[5] & 0x01 != 0,
        section_number: buf[6],
        last_section_number: buf[7],
        payload_start: GENERIC_HEADER_LEN,
    })
}

/// Byte ranges of the back-to-back sections in a dump, located via the
/// self-describing section_length. Stops at 0xFF stuffing or a length that
/// runs off the buffer.
pub fn section_spans(buf: &[u8]) -> Vec<Range<usize>> {
    let mut spans = Vec::new();
    let mut idx = 0usize;
    while idx + 3 <= buf.len() {
        if buf[idx] == 0xFF {
            break; // stuffing
        }
        let sec_len = ((buf[idx + 1] & 0x0F) as usize) << 8 | buf[idx + 2] as usize;
        let end = idx + 3 + sec_len;
        if end > buf.len() {
            break; // graceful exit on malformed length
        }
        spans.push(idx..end);
        idx = end;
    }
    spans
}
