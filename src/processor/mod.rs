//! Per-section ingest pipeline
//!
//! Framing, admission, decode and normalization for one reassembled
//! section at a time. Every failure path increments a statistic and
//! returns; one corrupt section never terminates an ingestion run.

use tracing::{debug, trace};

use crate::assembler::{admit, is_duplicate, resolve_service};
use crate::eit::{decode_header, decode_section, is_eit_table};
use crate::errors::DecodeError;
use crate::framing;
use crate::normalizer::normalize;
use crate::types::{GrabberConfig, RunContext, ServiceRegistry};

pub struct EpgProcessor {
    pub cfg: GrabberConfig,
    pub registry: ServiceRegistry,
    pub ctx: RunContext,
}

impl EpgProcessor {
    pub fn new(cfg: GrabberConfig) -> Self {
        Self::with_registry(cfg, ServiceRegistry::default())
    }

    /// Start from a pre-seeded registry (services known from SDT scan or
    /// previous runs).
    pub fn with_registry(cfg: GrabberConfig, registry: ServiceRegistry) -> Self {
        Self { cfg, registry, ctx: RunContext::default() }
    }

    /// Ingest one reassembled section buffer.
    pub fn process_section(&mut self, buf: &[u8]) {
        let stats = &mut self.ctx.stats;
        stats.sections_seen += 1;

        let raw = match framing::read_section(buf) {
            Ok(raw) => raw,
            Err(e) => {
                debug!("section rejected by framing: {e}");
                stats.malformed_sections += 1;
                return;
            }
        };
        if !is_eit_table(raw.table_id) {
            stats.non_eit_sections += 1;
            return;
        }

        let hdr = match decode_header(&raw) {
            Ok(hdr) => hdr,
            Err(e) => {
                debug!("EIT header rejected: {e}");
                stats.malformed_sections += 1;
                return;
            }
        };

        let Some(idx) = resolve_service(&mut self.registry, &self.cfg, &raw, &hdr) else {
            trace!(
                service_id = raw.table_id_ext,
                "section for unknown service discarded"
            );
            stats.unmatched_sections += 1;
            return;
        };
        if is_duplicate(&self.registry.services[idx], &raw) {
            stats.duplicate_sections += 1;
            return;
        }

        // decode before admission so a malformed section does not consume
        // its dedup slot; the carousel's next delivery gets a fresh chance
        let section = match decode_section(&raw) {
            Ok(section) => section,
            Err(e) => {
                debug!("section decode failed: {e}");
                match e {
                    DecodeError::MalformedDescriptor(_) => stats.malformed_descriptors += 1,
                    _ => stats.malformed_sections += 1,
                }
                return;
            }
        };

        if !admit(&mut self.registry.services[idx], &raw, &hdr) {
            stats.duplicate_sections += 1;
            return;
        }
        stats.sections_admitted += 1;
        stats.events_decoded += section.events.len() as u64;
        stats.events_undefined_start += section.undefined_start as u64;

        let service = &self.registry.services[idx];
        let triple = (
            service.original_network_id,
            service.transport_stream_id,
            service.service_id,
        );
        for event in &section.events {
            if let Some(record) = normalize(triple, event, &self.cfg, &mut self.ctx) {
                self.registry.services[idx].programmes.push(record);
                self.ctx.stats.programmes_emitted += 1;
            }
        }
    }
}
