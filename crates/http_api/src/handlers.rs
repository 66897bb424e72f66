use axum::{
    extract::{Json, State},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};

use app_api::{
    CsvRequest, DetectionsRequest, EmptyRequest, ImpactReplaceRequest, RangeRequest,
    RecordRequest, SettingsPutRequest, StationsClearDataRequest, StationsRequest,
};

use crate::{
    errors::{ApiJson, HttpError},
    state::HttpState,
};

pub async fn rollup(
    State(state): State<HttpState>,
    ApiJson(req): ApiJson<RangeRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = app_api::rollup(&state.context, req)?;
    Ok(Json(response))
}

pub async fn rollup_csv(
    State(state): State<HttpState>,
    ApiJson(req): ApiJson<CsvRequest>,
) -> Result<Response, HttpError> {
    let export = app_api::rollup_csv(&state.context, req)?;
    let disposition = HeaderValue::from_str(&format!(
        "attachment; filename=\"{}\"",
        export.filename
    ))
    .map_err(|_| {
        HttpError::new(
            StatusCode::BAD_REQUEST,
            "invalid export file name",
            Some("invalid_input".to_string()),
        )
    })?;
    let mut response = export.body.into_response();
    let headers = response.headers_mut();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/csv; charset=utf-8"),
    );
    headers.insert(header::CONTENT_DISPOSITION, disposition);
    Ok(response)
}

pub async fn summary(
    State(state): State<HttpState>,
    ApiJson(req): ApiJson<RangeRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = app_api::summary(&state.context, req)?;
    Ok(Json(response))
}

pub async fn detections(
    State(state): State<HttpState>,
    ApiJson(req): ApiJson<DetectionsRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = app_api::detections(&state.context, req)?;
    Ok(Json(response))
}

pub async fn detections_record(
    State(state): State<HttpState>,
    ApiJson(req): ApiJson<RecordRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = app_api::detections_record(&state.context, req)?;
    Ok(Json(response))
}

pub async fn stations(
    State(state): State<HttpState>,
    ApiJson(req): ApiJson<StationsRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = app_api::stations(&state.context, req)?;
    Ok(Json(response))
}

pub async fn stations_clear_data(
    State(state): State<HttpState>,
    ApiJson(req): ApiJson<StationsClearDataRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = app_api::stations_clear_data(&state.context, req)?;
    Ok(Json(response))
}

pub async fn impact_factors_list(
    State(state): State<HttpState>,
    ApiJson(_): ApiJson<EmptyRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = app_api::impact_factors_list(&state.context)?;
    Ok(Json(response))
}

pub async fn impact_factors_replace(
    State(state): State<HttpState>,
    ApiJson(req): ApiJson<ImpactReplaceRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = app_api::impact_factors_replace(&state.context, req)?;
    Ok(Json(response))
}

pub async fn settings_get(
    State(state): State<HttpState>,
    ApiJson(_): ApiJson<EmptyRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = app_api::settings_get(&state.context)?;
    Ok(Json(response))
}

pub async fn settings_put(
    State(state): State<HttpState>,
    ApiJson(req): ApiJson<SettingsPutRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = app_api::settings_put(&state.context, req)?;
    Ok(Json(response))
}

pub async fn health() -> impl IntoResponse {
    Json(app_api::ok())
}

pub async fn not_found() -> HttpError {
    HttpError::new(StatusCode::NOT_FOUND, "not found", Some("not_found".to_string()))
}
