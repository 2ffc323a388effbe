//! Report table fragment and export download

use axum::extract::{Path, Query, State};
use axum::http::header;
use axum::response::{Html, IntoResponse, Response};
use kasweb_core::{ExportFormat, ReportFilter};
use serde::Deserialize;

use super::page::render_report;
use crate::error::{ApiError, ApiResult};
use crate::session::Session;
use crate::{render_or_alert, AppState};

/// Page of the ledger table, next to the filter fields in the query
#[derive(Debug, Default, Deserialize)]
pub struct ReportQuery {
    #[serde(default)]
    pub page: Option<usize>,
}

pub async fn htmx_reports_table(
    state: State<AppState>,
    session: Session,
    Query(filter): Query<ReportFilter>,
    Query(query): Query<ReportQuery>,
) -> ApiResult<Html<String>> {
    let result = session.client(&state).report(&filter).await;
    let html = render_or_alert(result, "Gagal memuat laporan", |report| {
        render_report(&state, &filter, query.page.unwrap_or(1), report)
    })?;
    Ok(Html(html))
}

/// Stream the backend's PDF or Excel file back to the browser
pub async fn report_export(
    state: State<AppState>,
    session: Session,
    Path(format): Path<String>,
    Query(filter): Query<ReportFilter>,
) -> ApiResult<Response> {
    let format = ExportFormat::parse(&format).ok_or_else(|| ApiError::NotFound {
        resource: format!("Format laporan '{}'", format),
    })?;

    let file = session
        .client(&state)
        .export_report(format, &filter)
        .await
        .map_err(|e| ApiError::backend(e, "Gagal mengekspor laporan"))?;

    log::info!(
        "Exported {} report ({} bytes) for {}",
        format.segment(),
        file.bytes.len(),
        session.display_name()
    );
    Ok((
        [
            (header::CONTENT_TYPE, file.content_type),
            (header::CONTENT_DISPOSITION, file.disposition),
        ],
        file.bytes,
    )
        .into_response())
}
