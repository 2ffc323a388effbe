//! Transaction HTMX fragments and review actions

use axum::extract::{Path, Query, State};
use axum::response::{Html, IntoResponse, Response};
use axum::Form;
use kasweb_core::access::Action;
use kasweb_core::format::format_date;
use kasweb_core::forms::{RejectForm, TransactionForm};
use kasweb_core::{StatusUpdate, Transaction, TransactionFilter, TransactionType};
use kasweb_utils::escape_html;

use super::page::{render_transaction_table, status_badge, type_badge};
use crate::error::{ApiError, ApiResult};
use crate::session::Session;
use crate::{
    alert_html, category_options, fund_options, method_options, or_default, render_or_alert,
    triggered, AppState,
};

const CHANGED: &str = "transactions-changed";

/// Table fragment for filter changes, paging and refreshes
pub async fn htmx_transactions_list(
    state: State<AppState>,
    session: Session,
    Query(filter): Query<TransactionFilter>,
) -> ApiResult<Html<String>> {
    let result = session.client(&state).list_transactions().await;
    let html = render_or_alert(result, "Gagal memuat transaksi", |transactions| {
        render_transaction_table(&state, &session, &filter, transactions)
    })?;
    Ok(Html(html))
}

fn panel(title: &str, body: &str) -> String {
    format!(
        r#"<div class='bg-white rounded-xl shadow-sm p-4'>
            <div class='flex justify-between items-center mb-3'>
                <h3 class='font-semibold'>{}</h3>
                <button onclick="document.getElementById('transaction-panel').innerHTML=''" class='text-gray-400 hover:text-gray-600'>✕</button>
            </div>
            {}
        </div>"#,
        escape_html(title),
        body
    )
}

pub async fn htmx_transaction_detail(
    state: State<AppState>,
    session: Session,
    Path(id): Path<String>,
) -> ApiResult<Html<String>> {
    let tx = session
        .client(&state)
        .get_transaction(&id)
        .await
        .map_err(|e| ApiError::backend(e, "Gagal memuat transaksi"))?;

    Ok(Html(panel("Detail Transaksi", &render_detail(&state, &tx))))
}

fn render_detail(state: &AppState, tx: &Transaction) -> String {
    let row = |label: &str, value: String| {
        format!(
            "<div class='py-2 border-b'><dt class='text-xs text-gray-500'>{}</dt><dd class='text-sm'>{}</dd></div>",
            label, value
        )
    };

    let mut html = String::from("<dl>");
    html.push_str(&row("Jenis", type_badge(tx.tx_type)));
    html.push_str(&row("Kategori", escape_html(&tx.category)));
    html.push_str(&row("Kegiatan", escape_html(&tx.event_name)));
    html.push_str(&row("Jumlah", state.money(tx.amount)));
    html.push_str(&row("Metode", tx.payment_method.label().to_string()));
    if let Some(fund) = tx.fund_name() {
        html.push_str(&row("Fund/Proker", escape_html(fund)));
    }
    if !tx.description.trim().is_empty() {
        html.push_str(&row("Keterangan", escape_html(&tx.description)));
    }
    html.push_str(&row("Tanggal", format_date(&tx.date)));
    if let Some(url) = tx.note_link() {
        html.push_str(&row(
            "Nota",
            format!(
                "<a href='{}' target='_blank' rel='noopener' class='text-indigo-600 hover:underline'>Lihat nota</a>",
                escape_html(url)
            ),
        ));
    }
    html.push_str(&row("Status", status_badge(tx.status)));
    if let Some(reason) = tx.rejection() {
        html.push_str(&row(
            "Alasan Penolakan",
            format!("<span class='text-red-600'>{}</span>", escape_html(reason)),
        ));
    }
    if !tx.creator_name().is_empty() {
        html.push_str(&row("Dibuat Oleh", escape_html(tx.creator_name())));
    }
    html.push_str("</dl>");
    html
}

pub async fn transaction_approve(
    state: State<AppState>,
    session: Session,
    Path(id): Path<String>,
) -> ApiResult<Response> {
    session.require(Action::Approve)?;
    session
        .client(&state)
        .update_transaction_status(&id, &StatusUpdate::approve())
        .await
        .map_err(|e| ApiError::backend(e, "Gagal menyetujui transaksi"))?;

    log::info!("Transaction {} approved by {}", id, session.display_name());
    Ok(triggered(CHANGED, alert_html("success", "Transaksi berhasil disetujui")))
}

pub async fn htmx_reject_form(session: Session, Path(id): Path<String>) -> ApiResult<Html<String>> {
    session.require(Action::Reject)?;
    let body = format!(
        r#"<form hx-post='/dashboard/transactions/{}/reject' hx-target='#transaction-panel' hx-disabled-elt='find button[type=submit]' class='space-y-3'>
            <label class='block text-sm font-medium text-gray-700'>Alasan penolakan (opsional)</label>
            <textarea name='reason' rows='3' class='w-full px-3 py-2 border rounded-lg' placeholder='Contoh: nota tidak jelas'></textarea>
            <button type='submit' class='w-full px-4 py-2 bg-red-600 text-white rounded-lg hover:bg-red-700 disabled:opacity-50'>Tolak Transaksi</button>
        </form>"#,
        urlencoding::encode(&id)
    );
    Ok(Html(panel("Tolak Transaksi", &body)))
}

pub async fn transaction_reject(
    state: State<AppState>,
    session: Session,
    Path(id): Path<String>,
    Form(form): Form<RejectForm>,
) -> ApiResult<Response> {
    session.require(Action::Reject)?;
    session
        .client(&state)
        .update_transaction_status(&id, &form.into_update())
        .await
        .map_err(|e| ApiError::backend(e, "Gagal menolak transaksi"))?;

    log::info!("Transaction {} rejected by {}", id, session.display_name());
    Ok(triggered(CHANGED, alert_html("success", "Transaksi ditolak")))
}

pub async fn htmx_transaction_edit_form(
    state: State<AppState>,
    session: Session,
    Path(id): Path<String>,
) -> ApiResult<Html<String>> {
    session.require(Action::EditTransaction)?;
    let client = session.client(&state);
    let (tx, categories, funds) = tokio::join!(
        client.get_transaction(&id),
        client.list_categories(),
        client.list_funds(),
    );
    let tx = tx.map_err(|e| ApiError::backend(e, "Gagal memuat transaksi"))?;
    let mut categories: Vec<String> = or_default(categories, "categories")?
        .into_iter()
        .map(|c| c.name)
        .collect();
    if !categories.contains(&tx.category) {
        categories.insert(0, tx.category.clone());
    }
    let funds = or_default(funds, "funds")?;
    let fund_placeholder = match tx.tx_type {
        TransactionType::Income => None,
        TransactionType::Expense => Some("Tanpa fund"),
    };

    let body = format!(
        r#"<form hx-post='/dashboard/transactions/{}' hx-target='#edit-alert' hx-disabled-elt='find button[type=submit]' class='space-y-3'>
            <div id='edit-alert'></div>
            <p class='text-sm'>{}</p>
            <div>
                <label class='block text-sm font-medium text-gray-700 mb-1'>Nama Kegiatan</label>
                <input type='text' name='event_name' value='{}' required class='w-full px-3 py-2 border rounded-lg'>
            </div>
            <div>
                <label class='block text-sm font-medium text-gray-700 mb-1'>Kategori</label>
                <select name='category' class='w-full px-3 py-2 border rounded-lg'>{}</select>
            </div>
            <div>
                <label class='block text-sm font-medium text-gray-700 mb-1'>Jumlah</label>
                <input type='number' name='amount' min='0' step='any' value='{}' required class='w-full px-3 py-2 border rounded-lg'>
            </div>
            <div>
                <label class='block text-sm font-medium text-gray-700 mb-1'>Tanggal</label>
                <input type='date' name='date' value='{}' required class='w-full px-3 py-2 border rounded-lg'>
            </div>
            <div>
                <label class='block text-sm font-medium text-gray-700 mb-1'>Fund/Proker</label>
                <select name='fund_id' class='w-full px-3 py-2 border rounded-lg'>{}</select>
            </div>
            <div>
                <label class='block text-sm font-medium text-gray-700 mb-1'>Metode</label>
                <select name='payment_method' class='w-full px-3 py-2 border rounded-lg'>{}</select>
            </div>
            <div>
                <label class='block text-sm font-medium text-gray-700 mb-1'>Keterangan</label>
                <textarea name='description' rows='2' class='w-full px-3 py-2 border rounded-lg'>{}</textarea>
            </div>
            <button type='submit' class='w-full px-4 py-2 bg-indigo-600 text-white rounded-lg hover:bg-indigo-700 disabled:opacity-50'>Simpan Perubahan</button>
        </form>"#,
        urlencoding::encode(&tx.id),
        type_badge(tx.tx_type),
        escape_html(&tx.event_name),
        category_options(&categories, &tx.category),
        tx.amount.normalize(),
        tx.date.get(..10).unwrap_or(&tx.date),
        fund_options(&funds, &tx.fund_id, fund_placeholder),
        method_options(tx.payment_method),
        escape_html(&tx.description)
    );
    Ok(Html(panel("Edit Transaksi", &body)))
}

/// Save an admin edit; type and receipt stay as they were
pub async fn transaction_update(
    state: State<AppState>,
    session: Session,
    Path(id): Path<String>,
    Form(form): Form<TransactionForm>,
) -> ApiResult<Response> {
    session.require(Action::EditTransaction)?;
    let client = session.client(&state);
    let current = client
        .get_transaction(&id)
        .await
        .map_err(|e| ApiError::backend(e, "Gagal memuat transaksi"))?;

    let payload = form.validate(
        current.tx_type,
        current.note_link().unwrap_or(""),
        current.tx_type == TransactionType::Income,
    )?;
    client
        .update_transaction(&id, &payload)
        .await
        .map_err(|e| ApiError::backend(e, "Gagal memperbarui transaksi"))?;

    log::info!("Transaction {} edited by {}", id, session.display_name());
    Ok((
        [("hx-trigger", CHANGED), ("hx-retarget", "#transaction-panel")],
        Html(alert_html("success", "Transaksi berhasil diperbarui")),
    )
        .into_response())
}

#[cfg(test)]
mod tests {
    use crate::testing::*;
    use axum::{
        extract::{Path, State},
        http::StatusCode,
        routing::{get, put},
        Json, Router,
    };
    use kasweb_core::Role;
    use serde_json::{json, Value};
    use std::sync::{Arc, Mutex};

    type Calls = Arc<Mutex<Vec<(String, Value)>>>;

    fn transactions() -> Value {
        json!([
            {"id": "t1", "type": "income", "amount": 500000, "category": "Persembahan", "eventName": "Ibadah Minggu",
             "date": "2025-01-05", "paymentMethod": "cash", "status": "approved",
             "createdByUser": {"name": "Bendahara"}},
            {"id": "t2", "type": "expense", "amount": 150000, "category": "Konsumsi", "eventName": "Rapat Perkap",
             "date": "2025-01-07", "paymentMethod": "bank", "status": "pending",
             "noteUrl": "https://files.example/nota.jpg"},
            {"id": "t3", "type": "expense", "amount": 75000, "category": "Transport", "eventName": "Survey Lokasi",
             "date": "2025-01-09", "paymentMethod": "cash", "status": "rejected", "rejectionReason": "Nota hilang"}
        ])
    }

    fn backend(calls: Calls) -> Router {
        Router::new()
            .route("/api/transactions", get(|| async { Json(json!({"data": transactions()})) }))
            .route(
                "/api/transactions/:id",
                get(|Path(id): Path<String>| async move {
                    let found = transactions()
                        .as_array()
                        .and_then(|all| all.iter().find(|t| t["id"] == id.as_str()).cloned());
                    match found {
                        Some(tx) => (StatusCode::OK, Json(json!({"data": tx}))),
                        None => (StatusCode::NOT_FOUND, Json(json!({"error": "Transaction not found"}))),
                    }
                })
                .put(|State(calls): State<Calls>, Path(id): Path<String>, Json(body): Json<Value>| async move {
                    calls.lock().unwrap().push((format!("update {}", id), body));
                    Json(json!({"data": {}}))
                }),
            )
            .route(
                "/api/transactions/:id/status",
                put(|State(calls): State<Calls>, Path(id): Path<String>, Json(body): Json<Value>| async move {
                    calls.lock().unwrap().push((format!("status {}", id), body));
                    Json(json!({"data": {}}))
                }),
            )
            .route("/api/categories", get(|| async { Json(json!([{"id": "c1", "name": "Konsumsi"}])) }))
            .route("/api/funds", get(|| async { Json(json!({"data": []})) }))
            .with_state(calls)
    }

    #[tokio::test]
    async fn test_member_sees_list_without_review_controls() {
        let app = app_with_backend(backend(Calls::default())).await;
        let response = send(&app, get_request("/dashboard/transactions", Some(Role::Member))).await;
        assert_eq!(response.status(), StatusCode::OK);

        let html = body_text(response).await;
        assert!(html.contains("Ibadah Minggu"));
        assert!(html.contains("Rp 150.000"));
        assert!(html.contains("Bendahara"));
        assert!(!html.contains("/approve"));
        assert!(!html.contains("/edit"));
    }

    #[tokio::test]
    async fn test_admin_sees_approve_only_on_pending() {
        let app = app_with_backend(backend(Calls::default())).await;
        let html = body_text(send(&app, get_request("/dashboard/transactions", Some(Role::Admin))).await).await;
        assert!(html.contains("/dashboard/transactions/t2/approve"));
        assert!(!html.contains("/dashboard/transactions/t1/approve"));
        assert!(html.contains("/dashboard/transactions/t1/edit"));
    }

    #[tokio::test]
    async fn test_list_filters() {
        let app = app_with_backend(backend(Calls::default())).await;
        let request = htmx(get_request("/dashboard/transactions/list?status=pending", Some(Role::Member)));
        let html = body_text(send(&app, request).await).await;
        assert!(html.contains("Rapat Perkap"));
        assert!(!html.contains("Ibadah Minggu"));

        let request = get_request("/dashboard/transactions/list?q=survey", Some(Role::Member));
        let html = body_text(send(&app, request).await).await;
        assert!(html.contains("Survey Lokasi"));
        assert!(html.contains("dari 1 transaksi"));
    }

    #[tokio::test]
    async fn test_viewer_is_sent_back_to_dashboard() {
        let app = app_with_backend(backend(Calls::default())).await;
        let response = send(&app, get_request("/dashboard/transactions", Some(Role::Viewer))).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/dashboard");
    }

    #[tokio::test]
    async fn test_detail_shows_note_and_rejection() {
        let app = app_with_backend(backend(Calls::default())).await;
        let html = body_text(send(&app, get_request("/dashboard/transactions/t2/detail", Some(Role::Member))).await).await;
        assert!(html.contains("https://files.example/nota.jpg"));

        let html = body_text(send(&app, get_request("/dashboard/transactions/t3/detail", Some(Role::Member))).await).await;
        assert!(html.contains("Nota hilang"));
    }

    #[tokio::test]
    async fn test_missing_transaction_is_404() {
        let app = app_with_backend(backend(Calls::default())).await;
        let response = send(&app, get_request("/dashboard/transactions/zz/detail", Some(Role::Member))).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(body_text(response).await.contains("Transaction not found"));
    }

    #[tokio::test]
    async fn test_approve_and_reject() {
        let calls = Calls::default();
        let app = app_with_backend(backend(calls.clone())).await;

        let response = send(&app, form_request("POST", "/dashboard/transactions/t2/approve", Some(Role::Admin), "")).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["hx-trigger"], "transactions-changed");

        let response = send(
            &app,
            form_request("POST", "/dashboard/transactions/t2/reject", Some(Role::Admin), "reason=Nota+tidak+jelas"),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let calls = calls.lock().unwrap();
        assert_eq!(calls[0].0, "status t2");
        assert_eq!(calls[0].1, json!({"status": "approved"}));
        assert_eq!(calls[1].1, json!({"status": "rejected", "rejectionReason": "Nota tidak jelas"}));
    }

    #[tokio::test]
    async fn test_member_cannot_approve() {
        let calls = Calls::default();
        let app = app_with_backend(backend(calls.clone())).await;
        let response = send(&app, form_request("POST", "/dashboard/transactions/t2/approve", Some(Role::Member), "")).await;
        assert_eq!(location(&response), "/dashboard");
        assert!(calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_edit_keeps_type_and_validates() {
        let calls = Calls::default();
        let app = app_with_backend(backend(calls.clone())).await;

        let html = body_text(send(&app, get_request("/dashboard/transactions/t2/edit", Some(Role::Admin))).await).await;
        assert!(html.contains("value='Rapat Perkap'"));
        assert!(html.contains("<option value='Konsumsi' selected>"));

        let body = "event_name=Rapat+Perkap&category=Konsumsi&amount=-5&date=2025-01-07&payment_method=bank";
        let response = send(&app, form_request("POST", "/dashboard/transactions/t2", Some(Role::Admin), body)).await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body_text(response).await.contains("Jumlah tidak boleh negatif"));

        let body = "event_name=Rapat+Perkap&category=Konsumsi&amount=175000&date=2025-01-07&payment_method=bank";
        let response = send(&app, form_request("POST", "/dashboard/transactions/t2", Some(Role::Admin), body)).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["hx-retarget"], "#transaction-panel");

        let calls = calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "update t2");
        assert_eq!(calls[0].1["type"], "expense");
        assert_eq!(calls[0].1["noteUrl"], "https://files.example/nota.jpg");
        assert!(calls[0].1.get("fundId").is_none());
    }
}
