//! HTTP API for the duty store mock
//!
//! Thin translation layer: each handler parses the request, calls the
//! in-memory store, and wraps the outcome in the shared response
//! envelope with its numeric error code.

use crate::state::AppState;
use axum::{
    Router,
    extract::{Json, Path, State},
    routing::{get, post},
};
use serde::Serialize;
use shared::error::{ApiResponse, AppError, AppResult, ErrorCode};
use shared::models::{
    DutyRecord, MobileLookup, ProxyReportCreate, ReportCreate, StaffEntry, SubmissionCreate,
};
use std::sync::Arc;
use vigil_client::{ClientError, DutyStore, is_valid_mobile};

/// Translate store failures into wire errors
fn to_app_error(err: ClientError) -> AppError {
    match err {
        ClientError::UnknownMobile(m) | ClientError::UnknownStaff(m) => {
            AppError::with_message(ErrorCode::StaffNotFound, m)
        }
        ClientError::RecordNotFound(m) => AppError::duty_not_found(m),
        ClientError::Conflict(m) => AppError::already_reported(m),
        ClientError::NotReported(m) => AppError::not_reported(m),
        ClientError::Validation(m) => AppError::validation(m),
        other => AppError::internal(other.to_string()),
    }
}

fn require_mobile(mobile: &str) -> AppResult<()> {
    if !is_valid_mobile(mobile) {
        return Err(
            AppError::validation("mobile number must be exactly 10 digits")
                .with_detail("mobile", mobile),
        );
    }
    Ok(())
}

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
    duty_date: String,
    roster_size: usize,
}

async fn health(State(state): State<Arc<AppState>>) -> AppResult<ApiResponse<HealthResponse>> {
    let duty_date = state.store.duty_date().to_string();
    let roster = state
        .store
        .list_duty_for_date(&duty_date)
        .await
        .map_err(to_app_error)?;
    Ok(ApiResponse::success(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        duty_date,
        roster_size: roster.len(),
    }))
}

async fn check_mobile(
    State(state): State<Arc<AppState>>,
    Path(mobile): Path<String>,
) -> AppResult<ApiResponse<MobileLookup>> {
    require_mobile(&mobile)?;
    let lookup = state
        .store
        .lookup_mobile(&mobile)
        .await
        .map_err(to_app_error)?;
    Ok(ApiResponse::success(lookup))
}

async fn staff_by_mobile(
    State(state): State<Arc<AppState>>,
    Path(mobile): Path<String>,
) -> AppResult<ApiResponse<StaffEntry>> {
    require_mobile(&mobile)?;
    match state
        .store
        .lookup_staff(&mobile)
        .await
        .map_err(to_app_error)?
    {
        Some(entry) => Ok(ApiResponse::success(entry)),
        None => Err(AppError::staff_not_found(mobile)),
    }
}

async fn duty_for_date(
    State(state): State<Arc<AppState>>,
    Path(date): Path<String>,
) -> AppResult<ApiResponse<Vec<DutyRecord>>> {
    let records = state
        .store
        .list_duty_for_date(&date)
        .await
        .map_err(to_app_error)?;
    Ok(ApiResponse::success(records))
}

async fn all_duty(State(state): State<Arc<AppState>>) -> AppResult<ApiResponse<Vec<DutyRecord>>> {
    let records = state.store.list_all_duty().await.map_err(to_app_error)?;
    Ok(ApiResponse::success(records))
}

async fn report(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ReportCreate>,
) -> AppResult<ApiResponse<DutyRecord>> {
    require_mobile(&req.mobile_number)?;
    let record = state
        .store
        .create_report(&req)
        .await
        .map_err(to_app_error)?;
    tracing::info!(staff = ?record.reported_staff_name, hall = %record.hall, "duty reported");
    Ok(ApiResponse::success(record))
}

async fn proxy_report(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ProxyReportCreate>,
) -> AppResult<ApiResponse<DutyRecord>> {
    require_mobile(&req.proxy_mobile_number)?;
    if req.absent_staff_name.trim().is_empty() {
        return Err(AppError::validation("absent staff name is required"));
    }
    let record = state
        .store
        .create_proxy_report(&req)
        .await
        .map_err(to_app_error)?;
    tracing::info!(
        proxy = %req.proxy_staff_name,
        absentee = %req.absent_staff_name,
        reason = req.emergency_reason.as_str(),
        "proxy duty reported"
    );
    Ok(ApiResponse::success(record))
}

async fn submit(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SubmissionCreate>,
) -> AppResult<ApiResponse<DutyRecord>> {
    require_mobile(&req.mobile_number)?;
    let record = state
        .store
        .create_submission(&req)
        .await
        .map_err(to_app_error)?;
    tracing::info!(staff = ?record.reported_staff_name, "papers submitted");
    Ok(ApiResponse::success(record))
}

pub fn router(state: Arc<AppState>) -> Router {
    use tower::limit::ConcurrencyLimitLayer;

    // 并发限制：最多 64 个并发请求
    let concurrency_limit = ConcurrencyLimitLayer::new(64);

    Router::new()
        .route("/health", get(health))
        .route("/duty/check-mobile/{mobile}", get(check_mobile))
        .route("/staff/by-mobile/{mobile}", get(staff_by_mobile))
        .route("/duty/date/{date}", get(duty_for_date))
        .route("/duty/all", get(all_duty))
        .route("/duty/report", post(report))
        .route("/duty/proxy", post(proxy_report))
        .route("/duty/submit", post(submit))
        .layer(concurrency_limit)
        .with_state(state)
}
