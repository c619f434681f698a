//! Non-interactive subcommands: sweep summary, frame export, grid listing.

use std::path::Path;

use color_eyre::eyre::WrapErr;
use phenology_core::io::atomic_write_bytes;
use phenology_core::{CacheStatus, PhenologySession, Solver, SweepCache, SweepConfig, SweepProgress};

/// Report one solver call on stderr and in the log
pub fn report_progress(progress: SweepProgress) {
    tracing::info!(
        index = progress.index,
        total = progress.total,
        u_q = progress.u_q,
        "solving"
    );
    eprintln!(
        "[{}/{}] solving u_q = {}",
        progress.index + 1,
        progress.total,
        progress.u_q
    );
}

/// Load or compute the sweep and wrap it in a session.
///
/// A cache that could not be written is reported but does not stop the
/// session: the sweep in memory is still valid.
pub fn open_session<F>(
    cache: &SweepCache,
    solver: &mut dyn Solver,
    on_progress: F,
) -> color_eyre::Result<PhenologySession>
where
    F: FnMut(SweepProgress),
{
    let outcome = cache
        .load_or_compute(solver, on_progress)
        .wrap_err("could not obtain the parameter sweep")?;

    if let Some(err) = &outcome.persist_error {
        eprintln!(
            "Warning: sweep not cached at {}: {}",
            cache.file().path().display(),
            err
        );
    }

    Ok(PhenologySession::from_outcome(outcome))
}

/// Human-readable description of an opened session
pub fn summarize(session: &PhenologySession, cache_path: &Path) -> String {
    let config = session.config();
    let origin = match session.status() {
        CacheStatus::Loaded => "loaded from cache".to_string(),
        CacheStatus::Recomputed(reason) => format!("recomputed: {reason}"),
    };
    format!(
        "u_q {}..={} step {}: {} entries, {}\ncache: {} (computed {})",
        config.min,
        config.max,
        config.step,
        session.result().len(),
        origin,
        cache_path.display(),
        session.computed_at()
    )
}

/// The `{ u_q, line, patch }` JSON for one grid value
pub fn frame_json(session: &PhenologySession, u_q: f64) -> color_eyre::Result<String> {
    let frame = session.frame(u_q)?;
    Ok(serde_json::to_string_pretty(&frame)?)
}

/// Write export JSON to `output`, or stdout when absent
pub fn write_export(json: &str, output: Option<&Path>) -> color_eyre::Result<()> {
    match output {
        Some(path) => {
            atomic_write_bytes(path, json.as_bytes())
                .wrap_err_with(|| format!("could not write {}", path.display()))?;
            tracing::info!(path = %path.display(), "exported frame");
        }
        None => println!("{json}"),
    }
    Ok(())
}

/// One grid point per line
pub fn format_grid(config: &SweepConfig) -> String {
    config
        .grid()
        .iter()
        .map(|u_q| u_q.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}
