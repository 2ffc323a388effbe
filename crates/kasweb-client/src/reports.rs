//! Report, export and upload endpoints

use crate::error::{ClientError, Result};
use crate::BackendClient;
use kasweb_core::{ExportFormat, Report, ReportFilter, ReportSummary, Transaction, UploadedFile};
use reqwest::header::{HeaderName, CONTENT_DISPOSITION, CONTENT_TYPE};
use reqwest::multipart::{Form, Part};
use reqwest::Method;
use serde::Deserialize;

/// `/reports` puts the summary next to `data`
#[derive(Deserialize)]
struct ReportBody {
    #[serde(default)]
    data: Vec<Transaction>,
    #[serde(default)]
    summary: Option<ReportSummary>,
}

/// A generated report file, ready to stream back to the browser
#[derive(Debug, Clone)]
pub struct ExportFile {
    pub content_type: String,
    /// `Content-Disposition` value
    pub disposition: String,
    pub bytes: Vec<u8>,
}

impl BackendClient {
    /// Approved transactions matching `filter`, with the backend's totals
    pub async fn report(&self, filter: &ReportFilter) -> Result<Report> {
        let response = self
            .request(Method::GET, "/reports")
            .query(&filter.query_pairs())
            .send()
            .await?;

        let body: ReportBody = self.handle_json(response).await?;
        Ok(Report {
            transactions: body.data,
            summary: body.summary,
        })
    }

    /// Download the report as PDF or Excel
    pub async fn export_report(&self, format: ExportFormat, filter: &ReportFilter) -> Result<ExportFile> {
        let path = format!("/reports/export/{}", format.segment());
        let response = self
            .request(Method::GET, &path)
            .query(&filter.query_pairs())
            .send()
            .await?;
        let response = self.check_status(response).await?;

        let header = |name: HeaderName| {
            response
                .headers()
                .get(name)
                .and_then(|v| v.to_str().ok())
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };
        let content_type = header(CONTENT_TYPE).unwrap_or_else(|| format.default_content_type().to_string());
        let disposition = header(CONTENT_DISPOSITION)
            .filter(|v| v.contains("filename"))
            .unwrap_or_else(|| format!("attachment; filename=\"{}\"", format.default_filename()));

        let bytes = response.bytes().await?.to_vec();
        Ok(ExportFile {
            content_type,
            disposition,
            bytes,
        })
    }

    /// Store a receipt file and return its public URL
    pub async fn upload_receipt(
        &self,
        filename: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<UploadedFile> {
        let part = Part::bytes(bytes)
            .file_name(filename.to_string())
            .mime_str(content_type)
            .map_err(|e| ClientError::InvalidRequest(format!("Bad content type {}: {}", content_type, e)))?;
        let form = Form::new().part("file", part);

        let response = self
            .request(Method::POST, "/upload")
            .multipart(form)
            .send()
            .await?;

        self.handle_response(response).await
    }
}
