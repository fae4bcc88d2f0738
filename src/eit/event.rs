// eit/event.rs
//! Decoder for one EIT event record: fixed header + descriptor loop.

use bitstream_io::{BigEndian, BitRead, BitReader};
use chrono::NaiveDateTime;

use crate::constants::*;
use crate::errors::{DecodeError, DecodeResult};
use super::descriptor::{
    decode_component, decode_content, decode_extended_event, decode_parental_rating,
    decode_short_event, ExtendedEventText,
};
use super::time::{decode_duration, decode_start_time};

/// One decoded EIT event. `start_time` is `None` for the broadcast
/// "undefined" pattern; such events are dropped by the section decoder but
/// still consume their declared buffer space.
#[derive(Debug, Clone)]
pub struct EitEvent {
    pub event_id: u16,
    pub start_time: Option<NaiveDateTime>,
    pub duration_secs: u32,
    pub running_status: u8,
    pub scrambled: bool,
    pub language: String,
    pub event_name: String,
    pub short_description: String,
    pub content_nibbles: Option<(u8, u8)>,
    pub component_type_video: Option<u8>,
    pub component_type_audio: Option<u8>,
    pub parental_rating: i32,
    pub extended: Option<ExtendedEventText>,
}

/// Decode the event starting at `cursor`; `end` is the first byte past the
/// section body (the CRC). Returns the event and the cursor just past it —
/// the returned cursor is valid even when the event is semantically empty,
/// so the caller stays synchronized with the rest of the buffer.
pub fn decode_event(buf: &[u8], cursor: usize, end: usize) -> DecodeResult<(EitEvent, usize)> {
    if cursor + EVENT_FIXED_LEN > end {
        return Err(DecodeError::MalformedSection("truncated event header"));
    }

    let event_id = u16::from_be_bytes([buf[cursor], buf[cursor + 1]]);
    let start_raw: [u8; 5] = buf[cursor + 2..cursor + 7].try_into().unwrap();
    let duration_raw: [u8; 3] = buf[cursor + 7..cursor + 10].try_into().unwrap();

    let mut br = BitReader::endian(&buf[cursor + 10..cursor + 12], BigEndian);
    let running_status = br
        .read::<3, u8>()
        .map_err(|_| DecodeError::MalformedSection("event flags"))?;
    let scrambled = br
        .read::<1, u8>()
        .map_err(|_| DecodeError::MalformedSection("event flags"))?
        != 0;
    let loop_len = br
        .read::<12, u16>()
        .map_err(|_| DecodeError::MalformedSection("event flags"))? as usize;

    let loop_end = cursor + EVENT_FIXED_LEN + loop_len;
    if loop_end > end {
        return Err(DecodeError::MalformedSection("descriptor loop overruns section"));
    }

    let mut ev = EitEvent {
        event_id,
        start_time: decode_start_time(&start_raw),
        duration_secs: decode_duration(&duration_raw),
        running_status,
        scrambled,
        language: String::new(),
        event_name: String::new(),
        short_description: String::new(),
        content_nibbles: None,
        component_type_video: None,
        component_type_audio: None,
        parental_rating: NONE_I32,
        extended: None,
    };

    let mut pos = cursor + EVENT_FIXED_LEN;
    while pos < loop_end {
        if pos + 2 > loop_end {
            return Err(DecodeError::MalformedSection("truncated descriptor header"));
        }
        let tag = buf[pos];
        let len = buf[pos + 1] as usize;
        if pos + 2 + len > loop_end {
            return Err(DecodeError::MalformedSection("descriptor overruns loop"));
        }
        let body = &buf[pos + 2..pos + 2 + len];

        match tag {
            DESC_SHORT_EVENT => {
                let se = decode_short_event(body)?;
                ev.language = se.language;
                ev.event_name = se.name;
                ev.short_description = se.text;
            }
            // chained extended descriptors: last write wins
            DESC_EXTENDED_EVENT => ev.extended = Some(decode_extended_event(body)?),
            DESC_CONTENT => {
                if let Some(n) = decode_content(body) {
                    ev.content_nibbles = Some(n);
                }
            }
            DESC_PARENTAL_RATING => {
                if let Some(r) = decode_parental_rating(body) {
                    ev.parental_rating = r;
                }
            }
            DESC_COMPONENT => {
                if let Some((sc, ct)) = decode_component(body) {
                    if STREAM_CONTENT_VIDEO.contains(&sc) {
                        ev.component_type_video = Some(ct);
                    } else if STREAM_CONTENT_AUDIO.contains(&sc) {
                        ev.component_type_audio = Some(ct);
                    }
                }
            }
            _ => {} // unknown tag: skip by declared length
        }
        pos += 2 + len;
    }

    Ok((ev, loop_end))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eit::testing::{event_bytes, short_event_descriptor, START};

    #[test]
    fn decodes_fixed_header_and_short_event() {
        let desc = short_event_descriptor("Film", "A drama");
        let buf = event_bytes(0x1234, START, &desc);
        let (ev, next) = decode_event(&buf, 0, buf.len()).unwrap();
        assert_eq!(ev.event_id, 0x1234);
        assert_eq!(ev.running_status, 4);
        assert!(!ev.scrambled);
        assert_eq!(ev.duration_secs, 5400);
        assert_eq!(ev.event_name, "Film");
        assert_eq!(ev.short_description, "A drama");
        assert_eq!(next, buf.len());
    }

    #[test]
    fn undefined_start_still_reports_end_offset() {
        let buf = event_bytes(1, [0xFF; 5], &short_event_descriptor("x", "y"));
        let (ev, next) = decode_event(&buf, 0, buf.len()).unwrap();
        assert!(ev.start_time.is_none());
        assert_eq!(next, buf.len());
    }

    #[test]
    fn unknown_descriptor_skipped_by_length() {
        let mut desc = vec![0x7F, 3, 0xAA, 0xBB, 0xCC]; // CRID-ish, not consumed
        desc.extend_from_slice(&short_event_descriptor("n", "t"));
        let buf = event_bytes(2, START, &desc);
        let (ev, next) = decode_event(&buf, 0, buf.len()).unwrap();
        assert_eq!(ev.event_name, "n");
        assert_eq!(next, buf.len());
    }

    #[test]
    fn descriptor_loop_overrun_is_error() {
        let mut buf = event_bytes(3, START, &short_event_descriptor("n", "t"));
        let flags = (4u16 << 13) | 0x200; // loop length far past the buffer
        buf[10..12].copy_from_slice(&flags.to_be_bytes());
        assert_eq!(
            decode_event(&buf, 0, buf.len()).unwrap_err(),
            DecodeError::MalformedSection("descriptor loop overruns section")
        );
    }

    #[test]
    fn truncated_header_is_error() {
        let buf = event_bytes(4, START, &[]);
        assert!(matches!(
            decode_event(&buf, 0, 5),
            Err(DecodeError::MalformedSection(_))
        ));
    }

    #[test]
    fn scrambled_flag_and_rating() {
        let mut desc = vec![DESC_PARENTAL_RATING, 4];
        desc.extend_from_slice(b"GBR");
        desc.push(0x09);
        let mut buf = event_bytes(5, START, &desc);
        let flags = (4u16 << 13) | (1 << 12) | desc.len() as u16;
        buf[10..12].copy_from_slice(&flags.to_be_bytes());
        let (ev, _) = decode_event(&buf, 0, buf.len()).unwrap();
        assert!(ev.scrambled);
        assert_eq!(ev.parental_rating, 9);
    }
}
