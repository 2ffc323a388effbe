//! Income form submission

use axum::extract::State;
use axum::response::Redirect;
use axum::Form;
use kasweb_core::forms::TransactionForm;
use kasweb_core::TransactionType;

use crate::error::{ApiError, ApiResult};
use crate::session::Session;
use crate::{with_notice, AppState};

/// Record an income and go to the transactions list
pub async fn income_submit(
    state: State<AppState>,
    session: Session,
    Form(form): Form<TransactionForm>,
) -> ApiResult<Redirect> {
    let payload = form.validate(TransactionType::Income, "", true)?;
    session
        .client(&state)
        .create_transaction(&payload)
        .await
        .map_err(|e| ApiError::backend(e, "Gagal mencatat pemasukan"))?;

    log::info!(
        "Income {} for {} recorded by {}",
        payload.amount,
        payload.event_name,
        session.display_name()
    );
    Ok(Redirect::to(&with_notice("/dashboard/transactions", "Pemasukan berhasil dicatat!")))
}

#[cfg(test)]
mod tests {
    use crate::testing::*;
    use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
    use kasweb_core::Role;
    use serde_json::{json, Value};
    use std::sync::{Arc, Mutex};

    type Posted = Arc<Mutex<Vec<Value>>>;

    fn backend(posted: Posted, fail: bool) -> Router {
        Router::new()
            .route(
                "/api/transactions",
                get(|| async { Json(json!({"data": []})) }).post(
                    move |State(posted): State<Posted>, Json(body): Json<Value>| async move {
                        if fail {
                            return (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({})));
                        }
                        posted.lock().unwrap().push(body);
                        (StatusCode::CREATED, Json(json!({"data": {"id": "t9"}})))
                    },
                ),
            )
            .route(
                "/api/funds",
                get(|| async { Json(json!({"data": [{"id": "f1", "name": "Dana Kas", "status": "active"}]})) }),
            )
            .route(
                "/api/categories",
                get(|| async { Json(json!({"data": [{"id": "c1", "name": "Persembahan", "type": "income"}]})) }),
            )
            .with_state(posted)
    }

    const VALID: &str =
        "fund_id=f1&event_name=Ibadah+Minggu&category=Persembahan&payment_method=bank&amount=1500000&date=2025-03-02&description=Kolekte";

    #[tokio::test]
    async fn test_page_lists_funds_for_admin() {
        let app = app_with_backend(backend(Posted::default(), false)).await;
        let response = send(&app, get_request("/dashboard/income", Some(Role::Admin))).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response).await.contains("Dana Kas"));
    }

    #[tokio::test]
    async fn test_income_posted_and_redirected_with_notice() {
        let posted = Posted::default();
        let app = app_with_backend(backend(posted.clone(), false)).await;
        let response = send(&app, form_request("POST", "/dashboard/income", Some(Role::Admin), VALID)).await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert!(location(&response).starts_with("/dashboard/transactions?notice=Pemasukan%20berhasil"));

        let posted = posted.lock().unwrap();
        assert_eq!(posted[0]["type"], "income");
        assert_eq!(posted[0]["fundId"], "f1");
        assert_eq!(posted[0]["noteUrl"], "");
        assert_eq!(posted[0]["amount"], 1500000.0);
    }

    #[tokio::test]
    async fn test_missing_fund_is_rejected() {
        let posted = Posted::default();
        let app = app_with_backend(backend(posted.clone(), false)).await;
        let body = VALID.replace("fund_id=f1", "fund_id=");
        let response = send(&app, form_request("POST", "/dashboard/income", Some(Role::Admin), &body)).await;

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body_text(response).await.contains("Fund/Proker wajib dipilih"));
        assert!(posted.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_backend_failure_uses_fallback_message() {
        let app = app_with_backend(backend(Posted::default(), true)).await;
        let response = send(&app, form_request("POST", "/dashboard/income", Some(Role::Admin), VALID)).await;
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        assert!(body_text(response).await.contains("Gagal mencatat pemasukan"));
    }

    #[tokio::test]
    async fn test_member_cannot_record_income() {
        let posted = Posted::default();
        let app = app_with_backend(backend(posted.clone(), false)).await;
        let response = send(&app, form_request("POST", "/dashboard/income", Some(Role::Member), VALID)).await;
        assert_eq!(location(&response), "/dashboard");
        assert!(posted.lock().unwrap().is_empty());
    }
}
