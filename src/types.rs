use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use chrono::NaiveDateTime;

use crate::stats::IngestStats;

/// Locale tag selecting the text-heuristic rule set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    Gbr,
    Egypt,
    /// Heuristics suppressed entirely
    Netherlands,
    #[default]
    Other,
}

impl Locale {
    /// ISO 3166 alpha-3 code; anything unrecognized falls back to the
    /// default rule set.
    pub fn from_code(code: &str) -> Self {
        match code.to_ascii_uppercase().as_str() {
            "GBR" => Locale::Gbr,
            "EGY" => Locale::Egypt,
            "NLD" => Locale::Netherlands,
            _ => Locale::Other,
        }
    }
}

/// Configuration consumed by the pipeline; read-only to the core
#[derive(Debug, Clone, Default)]
pub struct GrabberConfig {
    pub locale: Locale,
    /// Resolve services by SID alone instead of the (ONID,TSID,SID) triple
    pub match_by_sid_only: bool,
    /// Synthesize registry entries for unknown services instead of
    /// discarding their sections
    pub create_missing_services: bool,
    /// Keep matched season/episode text in the description (inverse of the
    /// heuristics' remove_data)
    pub preserve_matched_text: bool,
    pub use_content_subtype_for_category: bool,
    pub use_description_as_category: bool,
}

/// Per-service segmented-table assembly state. A (table_id, section_number)
/// pair is accepted at most once; carousel retransmissions are rejected.
#[derive(Debug, Clone, Default)]
pub struct TableState {
    pub seen: HashSet<(u8, u8)>,
    pub last_table_id: u8,
    pub last_section_number: u8,
    pub segment_last_section_number: u8,
}

#[derive(Debug, Clone)]
pub struct Service {
    pub original_network_id: u16,
    pub transport_stream_id: u16,
    pub service_id: u16,
    pub name: Option<String>,
    pub table_state: TableState,
    pub programmes: Vec<ProgrammeRecord>,
}

impl Service {
    pub fn new(original_network_id: u16, transport_stream_id: u16, service_id: u16) -> Self {
        Self {
            original_network_id,
            transport_stream_id,
            service_id,
            name: None,
            table_state: TableState::default(),
            programmes: Vec::new(),
        }
    }
}

/// Ordered, appendable service collection shared across the ingest run.
/// Exactly one task owns it at a time (see core::run).
#[derive(Debug, Clone, Default)]
pub struct ServiceRegistry {
    pub services: Vec<Service>,
}

impl ServiceRegistry {
    pub fn find_service(&self, onid: u16, tsid: u16, sid: u16) -> Option<usize> {
        self.services.iter().position(|s| {
            s.original_network_id == onid && s.transport_stream_id == tsid && s.service_id == sid
        })
    }

    pub fn find_service_by_sid(&self, sid: u16) -> Option<usize> {
        self.services.iter().position(|s| s.service_id == sid)
    }
}

/// Normalized programme record, appended to the owning service's ordered
/// list and never mutated afterwards. Numeric -1 means absent.
#[derive(Debug, Clone, Serialize)]
pub struct ProgrammeRecord {
    pub original_network_id: u16,
    pub transport_stream_id: u16,
    pub service_id: u16,
    #[serde(serialize_with = "ser_datetime")]
    pub start_time: NaiveDateTime,
    pub duration_secs: u32,
    pub event_name: String,
    pub short_description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_subtitle: Option<String>,
    pub season_number: i32,
    pub episode_number: i32,
    pub episode_count: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub cast: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub directors: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub producers: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub writers: Vec<String>,
    pub parental_rating: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

fn ser_datetime<S: serde::Serializer>(dt: &NaiveDateTime, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&dt.format("%Y-%m-%d %H:%M:%S").to_string())
}

/// Per-run accumulator state threaded through the decode calls, so
/// concurrent ingest sessions never share hidden state.
#[derive(Debug, Default)]
pub struct RunContext {
    pub stats: IngestStats,
    pub category_counts: HashMap<String, u64>,
}

impl RunContext {
    pub fn count_category(&mut self, category: &str) {
        *self.category_counts.entry(category.to_string()).or_default() += 1;
    }
}

/// Options for the ingest runtime
pub struct Options {
    /// Section dump file(s), one decode session each
    pub inputs: Vec<PathBuf>,
    pub config: GrabberConfig,
    /// Checked between sections only, never inside a decode
    pub abandon: Option<Arc<AtomicBool>>,
}
