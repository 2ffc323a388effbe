//! Fund fragments and mutations

use axum::extract::{Path, State};
use axum::response::{Html, Redirect, Response};
use axum::Form;
use kasweb_core::forms::FundForm;

use super::page::{render_fund_form, render_fund_list};
use crate::error::{ApiError, ApiResult};
use crate::session::Session;
use crate::{alert_html, render_or_alert, triggered, with_notice, AppState};

const CHANGED: &str = "funds-changed";

pub async fn htmx_funds_list(state: State<AppState>, session: Session) -> ApiResult<Html<String>> {
    let result = session.client(&state).list_funds().await;
    let html = render_or_alert(result, "Gagal memuat fund", |funds| render_fund_list(&funds))?;
    Ok(Html(html))
}

/// Edit form for the form card, looked up in the fund list
pub async fn htmx_fund_edit_form(
    state: State<AppState>,
    session: Session,
    Path(id): Path<String>,
) -> ApiResult<Html<String>> {
    let funds = session
        .client(&state)
        .list_funds()
        .await
        .map_err(|e| ApiError::backend(e, "Gagal memuat fund"))?;
    let fund = funds.iter().find(|f| f.id == id).ok_or_else(|| ApiError::NotFound {
        resource: "Fund".to_string(),
    })?;
    Ok(Html(render_fund_form(Some(fund))))
}

pub async fn fund_create(
    state: State<AppState>,
    session: Session,
    Form(form): Form<FundForm>,
) -> ApiResult<Redirect> {
    let payload = form.for_create()?;
    session
        .client(&state)
        .create_fund(&payload)
        .await
        .map_err(|e| ApiError::backend(e, "Gagal menyimpan fund"))?;

    log::info!("Fund '{}' created by {}", payload.name, session.display_name());
    Ok(Redirect::to(&with_notice("/dashboard/funds", "Fund berhasil ditambahkan")))
}

pub async fn fund_update(
    state: State<AppState>,
    session: Session,
    Path(id): Path<String>,
    Form(form): Form<FundForm>,
) -> ApiResult<Redirect> {
    let payload = form.for_update()?;
    session
        .client(&state)
        .update_fund(&id, &payload)
        .await
        .map_err(|e| ApiError::backend(e, "Gagal menyimpan fund"))?;

    log::info!("Fund {} updated by {}", id, session.display_name());
    Ok(Redirect::to(&with_notice("/dashboard/funds", "Fund berhasil diperbarui")))
}

/// Delete a fund; a fund still in use is refused with the backend's hint
pub async fn fund_delete(
    state: State<AppState>,
    session: Session,
    Path(id): Path<String>,
) -> ApiResult<Response> {
    session
        .client(&state)
        .delete_fund(&id)
        .await
        .map_err(|e| ApiError::backend(e, "Gagal hapus fund"))?;

    log::info!("Fund {} deleted by {}", id, session.display_name());
    Ok(triggered(CHANGED, alert_html("success", "Fund berhasil dihapus")))
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

    fn backend(calls: Calls) -> Router {
        Router::new()
            .route(
                "/api/funds",
                get(|| async {
                    Json(json!({"data": [
                        {"id": "f1", "name": "Kas Umum", "description": "", "status": "active", "createdAt": "2025-01-02T00:00:00Z"},
                        {"id": "f2", "name": "Natal 2024", "description": "Panitia Natal", "status": "archived"}
                    ]}))
                })
                .post(|State(calls): State<Calls>, Json(body): Json<Value>| async move {
                    calls.lock().unwrap().push(("POST".to_string(), body));
                    (StatusCode::CREATED, Json(json!({"data": {}})))
                }),
            )
            .route(
                "/api/funds/:id",
                put(|State(calls): State<Calls>, Path(id): Path<String>, Json(body): Json<Value>| async move {
                    calls.lock().unwrap().push((format!("PUT {}", id), body));
                    Json(json!({"data": {}}))
                })
                .delete(|Path(id): Path<String>| async move {
                    if id == "f1" {
                        return (
                            StatusCode::BAD_REQUEST,
                            Json(json!({
                                "error": "Fund masih dipakai oleh transaksi",
                                "action": "Arsipkan fund ini agar tidak muncul di form"
                            })),
                        );
                    }
                    (StatusCode::OK, Json(json!({"message": "Fund deleted"})))
                }),
            )
            .with_state(calls)
    }

    #[tokio::test]
    async fn test_page_shows_funds_with_status() {
        let app = app_with_backend(backend(Calls::default())).await;
        let html = body_text(send(&app, get_request("/dashboard/funds", Some(Role::Admin))).await).await;
        assert!(html.contains("Kas Umum"));
        assert!(html.contains(">Arsip</span>"));
        assert!(html.contains("Panitia Natal"));
        assert!(html.contains("Fund Baru"));
    }

    #[tokio::test]
    async fn test_create_sends_name_and_description_only() {
        let calls = Calls::default();
        let app = app_with_backend(backend(calls.clone())).await;
        let body = "name=Paskah+2025&description=Ibadah+Paskah&status=archived";
        let response = send(&app, form_request("POST", "/dashboard/funds", Some(Role::Admin), body)).await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        let calls = calls.lock().unwrap();
        assert_eq!(calls[0].1, json!({"name": "Paskah 2025", "description": "Ibadah Paskah"}));
    }

    #[tokio::test]
    async fn test_create_requires_name() {
        let calls = Calls::default();
        let app = app_with_backend(backend(calls.clone())).await;
        let response = send(&app, form_request("POST", "/dashboard/funds", Some(Role::Admin), "name=&description=x")).await;

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body_text(response).await.contains("Nama proker/fund wajib diisi"));
        assert!(calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_sends_status() {
        let calls = Calls::default();
        let app = app_with_backend(backend(calls.clone())).await;
        let body = "name=Kas+Umum&description=&status=archived";
        let response = send(&app, form_request("PUT", "/dashboard/funds/f1", Some(Role::Admin), body)).await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        let calls = calls.lock().unwrap();
        assert_eq!(calls[0].0, "PUT f1");
        assert_eq!(calls[0].1["status"], "archived");
    }

    #[tokio::test]
    async fn test_edit_form_fragment() {
        let app = app_with_backend(backend(Calls::default())).await;
        let request = htmx(get_request("/dashboard/funds/f2/edit", Some(Role::Admin)));
        let html = body_text(send(&app, request).await).await;
        assert!(html.contains("hx-put='/dashboard/funds/f2'"));
        assert!(html.contains("<option value='archived' selected>"));

        let response = send(&app, htmx(get_request("/dashboard/funds/nope/edit", Some(Role::Admin)))).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_delete_in_use_shows_error_and_action() {
        let app = app_with_backend(backend(Calls::default())).await;
        let response = send(&app, htmx(form_request("DELETE", "/dashboard/funds/f1", Some(Role::Admin), ""))).await;

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let html = body_text(response).await;
        assert!(html.contains("Fund masih dipakai oleh transaksi. Arsipkan fund ini agar tidak muncul di form"));

        let response = send(&app, htmx(form_request("DELETE", "/dashboard/funds/f2", Some(Role::Admin), ""))).await;
        assert_eq!(response.headers()["hx-trigger"], "funds-changed");
    }
}
