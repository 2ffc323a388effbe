//! Expense submission with optional receipt upload

use axum::extract::multipart::MultipartError;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::Redirect;
use kasweb_core::forms::TransactionForm;
use kasweb_core::TransactionType;

use crate::error::{ApiError, ApiResult};
use crate::session::Session;
use crate::{with_notice, AppState};

/// Receipt attached to an expense submission
#[derive(Debug, Clone)]
pub struct ReceiptFile {
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl ReceiptFile {
    /// Images of any kind and PDF documents
    pub fn is_accepted_type(&self) -> bool {
        self.content_type.starts_with("image/") || self.content_type == "application/pdf"
    }

    pub fn check(&self, max_bytes: usize) -> ApiResult<()> {
        if !self.is_accepted_type() {
            return Err(ApiError::BadRequest {
                message: "File harus berupa gambar atau PDF".to_string(),
            });
        }
        if self.bytes.len() > max_bytes {
            return Err(too_large(max_bytes));
        }
        Ok(())
    }
}

fn too_large(max_bytes: usize) -> ApiError {
    ApiError::BadRequest {
        message: format!("Ukuran file maksimal {}MB", max_bytes / (1024 * 1024)),
    }
}

fn multipart_error(err: MultipartError, max_bytes: usize) -> ApiError {
    log::warn!("Unreadable expense submission: {}", err);
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        too_large(max_bytes)
    } else {
        ApiError::BadRequest {
            message: "Form tidak dapat dibaca".to_string(),
        }
    }
}

/// Split the multipart body into form fields and the receipt, if any
///
/// An empty file input arrives as a part without a file name; it counts as
/// no receipt.
async fn read_submission(
    mut multipart: Multipart,
    max_bytes: usize,
) -> ApiResult<(TransactionForm, Option<ReceiptFile>)> {
    let mut form = TransactionForm::default();
    let mut receipt = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, max_bytes))?
    {
        let name = field.name().unwrap_or_default().to_string();
        if name == "file" {
            let filename = field.file_name().unwrap_or_default().to_string();
            let content_type = field
                .content_type()
                .unwrap_or("application/octet-stream")
                .to_string();
            let bytes = field.bytes().await.map_err(|e| multipart_error(e, max_bytes))?;
            if !filename.is_empty() && !bytes.is_empty() {
                receipt = Some(ReceiptFile {
                    filename,
                    content_type,
                    bytes: bytes.to_vec(),
                });
            }
            continue;
        }

        let value = field.text().await.map_err(|e| multipart_error(e, max_bytes))?;
        match name.as_str() {
            "event_name" => form.event_name = value,
            "category" => form.category = value,
            "amount" => form.amount = value,
            "date" => form.date = value,
            "description" => form.description = value,
            "fund_id" => form.fund_id = value,
            "payment_method" => form.payment_method = value,
            _ => {}
        }
    }

    Ok((form, receipt))
}

/// Submit an expense, uploading the receipt first when one is attached
pub async fn upload_submit(
    state: State<AppState>,
    session: Session,
    multipart: Multipart,
) -> ApiResult<Redirect> {
    let max_bytes = state.config.upload.max_bytes;
    let (form, receipt) = read_submission(multipart, max_bytes).await?;

    let mut payload = form.validate(TransactionType::Expense, "", false)?;
    let client = session.client(&state);

    if let Some(receipt) = receipt {
        receipt.check(max_bytes)?;
        let size = receipt.bytes.len();
        let uploaded = client
            .upload_receipt(&receipt.filename, &receipt.content_type, receipt.bytes)
            .await
            .map_err(|e| ApiError::backend(e, "Gagal membuat transaksi"))?;
        log::info!("Uploaded receipt {} ({} bytes)", uploaded.filename, size);
        payload.note_url = uploaded.url;
    }

    client
        .create_transaction(&payload)
        .await
        .map_err(|e| ApiError::backend(e, "Gagal membuat transaksi"))?;

    log::info!(
        "Expense {} for {} submitted by {}",
        payload.amount,
        payload.event_name,
        session.display_name()
    );
    Ok(Redirect::to(&with_notice("/dashboard/transactions", "Transaksi berhasil dibuat!")))
}
