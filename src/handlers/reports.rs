// src/handlers/reports.rs

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::{i18n::Locale, tenancy::TenantContext},
    models::report::{Report, ReportType, ReportTypeEntry},
};

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ReportQuery {
    /// custos | producao | estoque | fichas | rentabilidade | abc-insumos | desperdicio
    #[serde(rename = "type")]
    pub report_type: Option<String>,
}

// GET /api/reports?type=...
#[utoipa::path(
    get,
    path = "/api/reports",
    tag = "Reports",
    params(ReportQuery),
    responses(
        (status = 200, description = "Relatório gerado (ou vazio se a geração falhou)", body = Report),
        (status = 400, description = "Tipo de relatório inválido ou ausente"),
        (status = 401, description = "Não autorizado")
    ),
    security(
        ("api_jwt" = [])
    )
)]
pub async fn get_report(
    State(app_state): State<AppState>,
    locale: Locale,
    tenant: TenantContext,
    Query(query): Query<ReportQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let kind: ReportType = query
        .report_type
        .unwrap_or_default()
        .parse()
        .map_err(|e: AppError| e.to_api_error(&locale, &app_state.i18n_store))?;

    let report = app_state.report_service.dispatch(kind, tenant.0).await;

    Ok((StatusCode::OK, Json(report)))
}

// GET /api/reports/types
#[utoipa::path(
    get,
    path = "/api/reports/types",
    tag = "Reports",
    responses(
        (status = 200, description = "Tipos de relatório disponíveis", body = Vec<ReportTypeEntry>),
        (status = 401, description = "Não autorizado")
    ),
    security(
        ("api_jwt" = [])
    )
)]
pub async fn list_report_types(State(app_state): State<AppState>) -> impl IntoResponse {
    (StatusCode::OK, Json(app_state.report_service.report_types()))
}
