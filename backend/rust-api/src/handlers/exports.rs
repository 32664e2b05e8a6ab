use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::{
    error::ServiceError,
    metrics::EXPORTS_GENERATED_TOTAL,
    services::{export_service, AppState},
};

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Xlsx,
    Csv,
}

impl ExportFormat {
    fn label(self) -> &'static str {
        match self {
            Self::Xlsx => "xlsx",
            Self::Csv => "csv",
        }
    }

    fn content_type(self) -> &'static str {
        match self {
            Self::Xlsx => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
            Self::Csv => "text/csv; charset=utf-8",
        }
    }

    fn file_name(self) -> &'static str {
        match self {
            Self::Xlsx => "standings.xlsx",
            Self::Csv => "standings.csv",
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ExportParams {
    #[serde(default)]
    pub format: ExportFormat,
}

pub async fn export_results(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ExportParams>,
) -> Result<impl IntoResponse, ServiceError> {
    let officers = state.officers.list();
    let bytes = match params.format {
        ExportFormat::Xlsx => export_service::build_standings_xlsx(&officers)?,
        ExportFormat::Csv => export_service::build_standings_csv(&officers),
    };

    EXPORTS_GENERATED_TOTAL
        .with_label_values(&[params.format.label()])
        .inc();
    tracing::info!(
        "Generated {} standings export ({} bytes)",
        params.format.label(),
        bytes.len()
    );

    Ok((
        StatusCode::OK,
        [
            (
                header::CONTENT_TYPE,
                params.format.content_type().to_string(),
            ),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", params.format.file_name()),
            ),
        ],
        bytes,
    ))
}
