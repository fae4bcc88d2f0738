//! Constants for DVB EIT processing (ETSI EN 300 468 subset)

/// EIT table-id range
pub const EIT_PF_ACTUAL: u8 = 0x4E;
pub const EIT_PF_OTHER: u8 = 0x4F;
pub const EIT_SCHEDULE_FIRST: u8 = 0x50; // 0x50-0x5F actual, 0x60-0x6F other
pub const EIT_SCHEDULE_LAST: u8 = 0x6F;

/// Descriptor tags actually consumed; everything else is skipped by length
pub const DESC_SHORT_EVENT: u8 = 0x4D;
pub const DESC_EXTENDED_EVENT: u8 = 0x4E;
pub const DESC_COMPONENT: u8 = 0x50;
pub const DESC_CONTENT: u8 = 0x54;
pub const DESC_PARENTAL_RATING: u8 = 0x55;

/// Generic long-form section header: table_id(1) + length(2) + tid_ext(2)
/// + version(1) + section_number(1) + last_section_number(1)
pub const GENERIC_HEADER_LEN: usize = 8;
/// EIT-specific header that follows: TSID(2) ONID(2) seg_last(1) last_tid(1)
pub const EIT_HEADER_LEN: usize = 6;
/// Fixed part of one event: event_id(2) start(5) duration(3) flags(2)
pub const EVENT_FIXED_LEN: usize = 12;
/// Trailing CRC-32, owned by the outer framing
pub const CRC_LEN: usize = 4;

/// Broadcast "no value" pattern for the 5-byte start time
pub const START_TIME_UNDEFINED: [u8; 5] = [0xFF; 5];

/// Sentinel for absent numeric values (season, episode, rating, ...)
pub const NONE_I32: i32 = -1;

/// component_descriptor stream_content values mapped to video / audio
pub const STREAM_CONTENT_VIDEO: &[u8] = &[0x01, 0x05, 0x09];
pub const STREAM_CONTENT_AUDIO: &[u8] = &[0x02, 0x04, 0x06, 0x07];
