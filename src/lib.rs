// src/lib.rs
pub mod grabber {
    pub use crate::types::{GrabberConfig, Locale, Options};

    /// Async entry-point; returns the JSON guide report when every input
    /// dump has been ingested (or the abandon flag was raised).
    pub async fn run(opts: Options) -> anyhow::Result<String> {
        crate::core::run(opts).await
    }
}

pub mod assembler;
pub mod constants;
pub mod eit;
pub mod errors;
pub mod framing;
pub mod heuristics;
pub mod normalizer;
pub mod processor;
pub mod report;
pub mod stats;
pub mod types;

mod core;
