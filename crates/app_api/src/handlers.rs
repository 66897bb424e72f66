use revisent_app::{RangeParams, RecordOutcome, Result, parse_rfc3339_utc};
use revisent_core::{
    DetectionEvent, DetectionFilter, DetectionSummary, ImpactFactor, Rollup, TimeFrame,
};

use crate::{
    AppContext, ClearedResponse, CsvExport, CsvRequest, DetectionsRequest, ImpactReplaceRequest,
    OkResponse, RangeRequest, RecordRequest, SettingsPutRequest, SettingsResponse,
    StationsClearDataRequest, StationsRequest, StationsResponse, UpdatedResponse,
};

fn resolve_frame(
    frame: Option<String>,
    start: Option<String>,
    end: Option<String>,
) -> Result<TimeFrame> {
    revisent_app::resolve_frame(&RangeParams {
        frame,
        start,
        end,
        device_ids: None,
    })
}

fn csv_filename(frame: &TimeFrame) -> String {
    let name = match frame {
        TimeFrame::Day => "day".to_string(),
        TimeFrame::Week => "week".to_string(),
        TimeFrame::Month => "month".to_string(),
        TimeFrame::YearToDate => "ytd".to_string(),
        TimeFrame::Custom { start, end } => {
            let start = filename_part(start);
            let end = filename_part(end);
            if start.is_empty() || end.is_empty() {
                "custom".to_string()
            } else {
                format!("{}_{}", start, end)
            }
        }
    };
    format!("revisent-detections-{}.csv", name)
}

/// Keeps only characters that are safe inside a quoted header parameter.
fn filename_part(value: &str) -> String {
    value
        .trim()
        .chars()
        .filter(|ch| ch.is_ascii_alphanumeric() || matches!(ch, '-' | '_'))
        .collect()
}

pub fn rollup(ctx: &AppContext, req: RangeRequest) -> Result<Rollup> {
    let frame = resolve_frame(req.frame, req.start, req.end)?;
    ctx.app_state
        .services
        .analytics
        .rollup(&frame, req.device_ids)
}

pub fn rollup_csv(ctx: &AppContext, req: CsvRequest) -> Result<CsvExport> {
    let frame = resolve_frame(req.frame, req.start, req.end)?;
    let body = ctx.app_state.services.analytics.export_csv(
        &frame,
        req.device_ids,
        req.include_diversion_rate,
    )?;
    Ok(CsvExport {
        filename: csv_filename(&frame),
        body,
    })
}

pub fn summary(ctx: &AppContext, req: RangeRequest) -> Result<DetectionSummary> {
    let frame = resolve_frame(req.frame, req.start, req.end)?;
    ctx.app_state
        .services
        .analytics
        .summary(&frame, req.device_ids)
}

pub fn detections(ctx: &AppContext, req: DetectionsRequest) -> Result<Vec<DetectionEvent>> {
    let filter = DetectionFilter {
        device_ids: req.device_ids,
        start_time: req.start.as_deref().map(parse_rfc3339_utc).transpose()?,
        end_time: req.end.as_deref().map(parse_rfc3339_utc).transpose()?,
    };
    let limit = req.limit.unwrap_or(200).min(1000);
    let offset = req.offset.unwrap_or(0);
    ctx.app_state
        .services
        .detections
        .list(&filter, limit, offset)
}

pub fn detections_record(ctx: &AppContext, req: RecordRequest) -> Result<RecordOutcome> {
    ctx.app_state.services.detections.record(&req.events)
}

pub fn stations(ctx: &AppContext, req: StationsRequest) -> Result<StationsResponse> {
    let active_minutes = match req.active_minutes {
        Some(minutes) => minutes,
        None => ctx.app_state.services.settings.get()?.station_active_minutes,
    };
    let stations = ctx
        .app_state
        .services
        .stations
        .list(Some(active_minutes))?;
    Ok(StationsResponse {
        active_minutes,
        stations,
    })
}

pub fn stations_clear_data(
    ctx: &AppContext,
    req: StationsClearDataRequest,
) -> Result<ClearedResponse> {
    let cleared = ctx
        .app_state
        .services
        .stations
        .clear_data(&req.device_id)?;
    Ok(ClearedResponse {
        device_id: req.device_id.trim().to_string(),
        cleared: cleared as i64,
    })
}

pub fn impact_factors_list(ctx: &AppContext) -> Result<Vec<ImpactFactor>> {
    ctx.app_state.services.impact.list_factors()
}

pub fn impact_factors_replace(
    ctx: &AppContext,
    req: ImpactReplaceRequest,
) -> Result<UpdatedResponse> {
    let count = ctx.app_state.services.impact.replace_factors(&req.factors)?;
    Ok(UpdatedResponse {
        updated: count as i64,
    })
}

pub fn settings_get(ctx: &AppContext) -> Result<SettingsResponse> {
    let snapshot = ctx.app_state.services.settings.get()?;
    Ok(SettingsResponse {
        station_active_minutes: snapshot.station_active_minutes,
        db_path: ctx.app_state.config.db_path.to_string_lossy().to_string(),
        impact_defaults_path: ctx
            .app_state
            .config
            .impact_defaults_path
            .to_string_lossy()
            .to_string(),
        app_data_dir: ctx.app_data_dir.to_string_lossy().to_string(),
    })
}

pub fn settings_put(ctx: &AppContext, req: SettingsPutRequest) -> Result<SettingsResponse> {
    ctx.app_state
        .services
        .settings
        .update(req.station_active_minutes)?;
    settings_get(ctx)
}

pub fn ok() -> OkResponse {
    OkResponse { ok: true }
}
