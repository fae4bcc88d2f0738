// src/assembler.rs
//! Section assembly: service resolution and segmented-table dedup.
//!
//! EIT tables are segmented across sections and retransmitted on a
//! carousel; the per-service (table_id, section_number) gate here is what
//! keeps repeated deliveries from producing duplicate programme records.

use crate::eit::EitSectionHeader;
use crate::framing::RawSection;
use crate::types::{GrabberConfig, Service, ServiceRegistry};

/// Resolve the owning service for a section. Looks up by the
/// (ONID,TSID,SID) triple, or by SID alone when configured; unknown
/// services are synthesized from the header when `create_missing_services`
/// is set, otherwise the section is discarded.
pub fn resolve_service(
    registry: &mut ServiceRegistry,
    cfg: &GrabberConfig,
    raw: &RawSection<'_>,
    hdr: &EitSectionHeader,
) -> Option<usize> {
    let sid = raw.table_id_ext;
    let found = if cfg.match_by_sid_only {
        registry.find_service_by_sid(sid)
    } else {
        registry.find_service(hdr.original_network_id, hdr.transport_stream_id, sid)
    };
    match found {
        Some(idx) => Some(idx),
        None if cfg.create_missing_services => {
            registry.services.push(Service::new(
                hdr.original_network_id,
                hdr.transport_stream_id,
                sid,
            ));
            Some(registry.services.len() - 1)
        }
        None => None,
    }
}

/// True when this (table_id, section_number) was already admitted for the
/// service. Lets the pipeline skip the event decode for carousel repeats.
pub fn is_duplicate(service: &Service, raw: &RawSection<'_>) -> bool {
    service.table_state.seen.contains(&(raw.table_id, raw.section_number))
}

/// Admit a section for the service. Returns true exactly once per
/// (table_id, section_number); every later identical call returns false and
/// the caller must not re-emit programme records for that section.
pub fn admit(service: &mut Service, raw: &RawSection<'_>, hdr: &EitSectionHeader) -> bool {
    let st = &mut service.table_state;
    if !st.seen.insert((raw.table_id, raw.section_number)) {
        return false;
    }
    st.last_table_id = hdr.last_table_id;
    st.last_section_number = raw.last_section_number;
    st.segment_last_section_number = hdr.segment_last_section_number;
    true
}
