use std::path::PathBuf;
use std::sync::atomic::Ordering;

use bytes::Bytes;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::framing;
use crate::processor::EpgProcessor;
use crate::report::Reporter;
use crate::types::Options;

/// Run one ingest: a decode session per input dump pre-frames sections and
/// hands them to the single registry-owner task below, which is the only
/// place the shared service registry is touched. Returns the JSON guide
/// report.
pub async fn run(opts: Options) -> anyhow::Result<String> {
    let (tx, mut rx) = mpsc::channel::<Bytes>(64);

    let mut sessions = Vec::new();
    for path in &opts.inputs {
        sessions.push(tokio::spawn(session(path.clone(), tx.clone())));
    }
    drop(tx); // owner loop ends when the last session hangs up

    let mut processor = EpgProcessor::new(opts.config);
    while let Some(section) = rx.recv().await {
        // the abandon flag is honored between sections, never inside one
        if let Some(flag) = &opts.abandon {
            if flag.load(Ordering::Relaxed) {
                info!("ingest abandoned");
                break;
            }
        }
        processor.process_section(&section);
    }

    for session in sessions {
        if let Err(e) = session.await? {
            warn!("decode session failed: {e:#}");
        }
    }

    let stats = &processor.ctx.stats;
    info!(
        sections = stats.sections_seen,
        admitted = stats.sections_admitted,
        duplicates = stats.duplicate_sections,
        malformed = stats.malformed_sections + stats.malformed_descriptors,
        programmes = stats.programmes_emitted,
        "ingest finished"
    );

    Ok(Reporter::generate_json_report(&processor.registry, &processor.ctx))
}

/// Read one dump and push its sections into the channel. Framing here is
/// pure computation over the in-memory buffer; the Bytes slices are
/// zero-copy views handed to the registry owner.
async fn session(path: PathBuf, tx: mpsc::Sender<Bytes>) -> anyhow::Result<()> {
    let data = Bytes::from(tokio::fs::read(&path).await?);
    let spans = framing::section_spans(&data);
    debug!(path = %path.display(), sections = spans.len(), "session framed dump");
    for span in spans {
        if tx.send(data.slice(span)).await.is_err() {
            break; // owner is gone, nothing left to do
        }
    }
    Ok(())
}
