//! Report generation for an ingest run

use std::collections::HashMap;

use serde::Serialize;

use crate::stats::IngestStats;
use crate::types::{ProgrammeRecord, RunContext, ServiceRegistry};

/// JSON structure for one service (internal serialization)
#[derive(Serialize)]
struct ServiceJson<'a> {
    original_network_id: u16,
    transport_stream_id: u16,
    service_id: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
    programme_count: usize,
    programmes: &'a [ProgrammeRecord],
}

/// JSON structure for the complete report (internal serialization)
#[derive(Serialize)]
struct ReportJson<'a> {
    generated: String,
    services: Vec<ServiceJson<'a>>,
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    categories: &'a HashMap<String, u64>,
    stats: &'a IngestStats,
}

pub struct Reporter;

impl Reporter {
    /// Pretty-printed JSON guide for CLI output.
    pub fn generate_json_report(registry: &ServiceRegistry, ctx: &RunContext) -> String {
        let services = registry
            .services
            .iter()
            .map(|s| ServiceJson {
                original_network_id: s.original_network_id,
                transport_stream_id: s.transport_stream_id,
                service_id: s.service_id,
                name: s.name.as_deref(),
                programme_count: s.programmes.len(),
                programmes: &s.programmes,
            })
            .collect();

        let report = ReportJson {
            generated: chrono::Utc::now().to_rfc3339(),
            services,
            categories: &ctx.category_counts,
            stats: &ctx.stats,
        };
        serde_json::to_string_pretty(&report)
            .unwrap_or_else(|_| "{\"error\": \"JSON serialization failed\"}".to_string())
    }
}
