//! Scan request handlers

use crate::error::ApiError;
use crate::router::AppState;
use axum::{extract::rejection::JsonRejection, extract::State, Json};
use condscan_core::Unit;
use condscan_rule_engine::ScanStats;
use tracing::{debug, error, info};

/// `POST /remediate-array`
///
/// Returns only the units that produced at least one finding, in input
/// order. Large batches run on the blocking pool so the scan does not stall
/// the async workers.
pub async fn scan_batch(
    State(state): State<AppState>,
    payload: Result<Json<Vec<Unit>>, JsonRejection>,
) -> Result<Json<Vec<Unit>>, ApiError> {
    let Json(units) = payload?;
    let submitted = units.len();

    let scanned = if submitted >= state.blocking_batch_threshold {
        debug!("Scanning batch of {} units on blocking pool", submitted);
        let engine = state.engine;
        tokio::task::spawn_blocking(move || engine.scan_batch(&units))
            .await
            .map_err(|e| {
                error!("Blocking scan task failed: {}", e);
                ApiError::internal(format!("scan task failed: {e}"))
            })?
    } else {
        state.engine.scan_batch(&units)
    };

    let stats = ScanStats::from_units(submitted, &scanned);
    info!(
        units = stats.units_scanned,
        flagged = stats.units_flagged,
        findings = stats.total_findings(),
        "Batch scan complete"
    );

    Ok(Json(scanned))
}

/// `POST /remediate`
///
/// Always returns the unit; `findings` is null when nothing was found.
pub async fn scan_single(
    State(state): State<AppState>,
    payload: Result<Json<Unit>, JsonRejection>,
) -> Result<Json<Unit>, ApiError> {
    let Json(unit) = payload?;
    let scanned = state.engine.scan_unit(&unit);
    debug!(
        unit = %scanned.name,
        findings = scanned.finding_count(),
        "Single scan complete"
    );
    Ok(Json(scanned))
}
