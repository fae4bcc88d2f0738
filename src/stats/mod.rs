//! Ingest run statistics
//!
//! Malformed sections are counted, never fatal: the broadcast carousel
//! retransmits tables, so a later well-formed delivery supersedes a
//! discarded one.

use serde::Serialize;

#[derive(Debug, Default, Clone, Serialize)]
pub struct IngestStats {
    pub sections_seen: u64,
    pub sections_admitted: u64,
    pub non_eit_sections: u64,
    /// Sections whose service was not in the registry (and synthesis off)
    pub unmatched_sections: u64,
    /// Carousel retransmissions rejected by the assembler
    pub duplicate_sections: u64,
    pub malformed_sections: u64,
    pub malformed_descriptors: u64,
    pub events_decoded: u64,
    /// Events carrying the undefined start-time pattern
    pub events_undefined_start: u64,
    pub programmes_emitted: u64,
}

impl IngestStats {
    /// Total sections that were discarded rather than committed.
    pub fn discarded(&self) -> u64 {
        self.non_eit_sections
            + self.unmatched_sections
            + self.duplicate_sections
            + self.malformed_sections
            + self.malformed_descriptors
    }
}
