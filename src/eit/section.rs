// eit/section.rs
//! EIT section decoder: header fields + event loop.

use crate::constants::*;
use crate::errors::{DecodeError, DecodeResult};
use crate::framing::RawSection;
use super::event::{decode_event, EitEvent};

/// EIT-specific header following the generic section header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EitSectionHeader {
    pub transport_stream_id: u16,
    pub original_network_id: u16,
    pub segment_last_section_number: u8,
    pub last_table_id: u8,
}

/// One fully decoded section: header, emitted events, and the number of
/// events dropped for carrying the undefined start-time pattern.
#[derive(Debug, Clone)]
pub struct EitSection {
    pub header: EitSectionHeader,
    pub events: Vec<EitEvent>,
    pub undefined_start: usize,
}

pub fn is_eit_table(table_id: u8) -> bool {
    (EIT_PF_ACTUAL..=EIT_SCHEDULE_LAST).contains(&table_id)
}

/// Decode only the EIT header — enough for the assembler's admission check.
pub fn decode_header(raw: &RawSection<'_>) -> DecodeResult<EitSectionHeader> {
    if !is_eit_table(raw.table_id) {
        return Err(DecodeError::NotEit(raw.table_id));
    }
    let b = raw.data;
    let p = raw.payload_start;
    if p + EIT_HEADER_LEN + CRC_LEN > b.len() {
        return Err(DecodeError::MalformedSection("truncated EIT header"));
    }
    Ok(EitSectionHeader {
        transport_stream_id: u16::from_be_bytes([b[p], b[p + 1]]),
        original_network_id: u16::from_be_bytes([b[p + 2], b[p + 3]]),
        segment_last_section_number: b[p + 4],
        last_table_id: b[p + 5],
    })
}

/// Decode the full section. The trailing 4 CRC bytes belong to the outer
/// framing and are never read here. Events with an undefined start time are
/// dropped but their buffer space is still consumed, so one such event
/// never desynchronizes the rest of the section.
pub fn decode_section(raw: &RawSection<'_>) -> DecodeResult<EitSection> {
    let header = decode_header(raw)?;
    let b = raw.data;
    let end = b.len() - CRC_LEN;

    let mut cursor = raw.payload_start + EIT_HEADER_LEN;
    let mut events = Vec::new();
    let mut undefined_start = 0usize;
    while cursor < end {
        let (ev, next) = decode_event(b, cursor, end)?;
        cursor = next;
        if ev.start_time.is_some() {
            events.push(ev);
        } else {
            undefined_start += 1;
        }
    }

    Ok(EitSection { header, events, undefined_start })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eit::testing::{event_bytes, raw_section, short_event_descriptor, START};

    #[test]
    fn header_fields() {
        let buf = raw_section(0x50, 0x0101, 0, &[]);
        let raw = crate::eit::testing::borrow(&buf);
        let hdr = decode_header(&raw).unwrap();
        assert_eq!(hdr.transport_stream_id, 0x0002);
        assert_eq!(hdr.original_network_id, 0x0003);
        assert_eq!(hdr.last_table_id, 0x50);
    }

    #[test]
    fn non_eit_table_rejected() {
        let buf = raw_section(0x42, 0x0101, 0, &[]);
        let raw = crate::eit::testing::borrow(&buf);
        assert_eq!(decode_header(&raw).unwrap_err(), DecodeError::NotEit(0x42));
    }

    #[test]
    fn two_events_in_order() {
        let mut body = event_bytes(1, START, &short_event_descriptor("One", ""));
        body.extend_from_slice(&event_bytes(2, START, &short_event_descriptor("Two", "")));
        let buf = raw_section(0x50, 0x0101, 0, &body);
        let raw = crate::eit::testing::borrow(&buf);
        let sec = decode_section(&raw).unwrap();
        assert_eq!(sec.events.len(), 2);
        assert_eq!(sec.events[0].event_name, "One");
        assert_eq!(sec.events[1].event_name, "Two");
    }

    #[test]
    fn undefined_start_dropped_but_cursor_advances() {
        let mut body = event_bytes(1, [0xFF; 5], &short_event_descriptor("Gone", ""));
        body.extend_from_slice(&event_bytes(2, START, &short_event_descriptor("Kept", "")));
        let buf = raw_section(0x50, 0x0101, 0, &body);
        let raw = crate::eit::testing::borrow(&buf);
        let sec = decode_section(&raw).unwrap();
        assert_eq!(sec.undefined_start, 1);
        assert_eq!(sec.events.len(), 1);
        assert_eq!(sec.events[0].event_name, "Kept");
    }

    #[test]
    fn truncation_never_panics() {
        let body = event_bytes(1, START, &short_event_descriptor("One", "Some text"));
        let buf = raw_section(0x50, 0x0101, 0, &body);
        // lie about the section end at every possible point: the decoder
        // must return a typed error or a short result, never panic
        for end in 0..buf.len() {
            let mut raw = crate::eit::testing::borrow(&buf);
            raw.data = &buf[..end];
            let _ = decode_section(&raw);
        }
    }
}
