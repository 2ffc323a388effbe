//! Category fragments and mutations

use axum::extract::{Path, State};
use axum::response::{Html, Redirect, Response};
use axum::Form;
use kasweb_core::forms::CategoryForm;
use kasweb_core::Category;

use super::page::{render_category_row, render_category_table, render_edit_row};
use crate::error::{ApiError, ApiResult};
use crate::session::Session;
use crate::{alert_html, render_or_alert, triggered, with_notice, AppState};

const CHANGED: &str = "categories-changed";

pub async fn htmx_categories_list(state: State<AppState>, session: Session) -> ApiResult<Html<String>> {
    let result = session.client(&state).list_categories().await;
    let html = render_or_alert(result, "Gagal memuat kategori", render_category_table)?;
    Ok(Html(html))
}

/// The backend has no single-category endpoint; look it up in the list
async fn find_category(state: &AppState, session: &Session, id: &str) -> ApiResult<Category> {
    session
        .client(state)
        .list_categories()
        .await
        .map_err(|e| ApiError::backend(e, "Gagal memuat kategori"))?
        .into_iter()
        .find(|c| c.id == id)
        .ok_or_else(|| ApiError::NotFound {
            resource: "Kategori".to_string(),
        })
}

pub async fn htmx_category_row(
    state: State<AppState>,
    session: Session,
    Path(id): Path<String>,
) -> ApiResult<Html<String>> {
    let category = find_category(&state, &session, &id).await?;
    Ok(Html(render_category_row(&category)))
}

pub async fn htmx_category_edit_row(
    state: State<AppState>,
    session: Session,
    Path(id): Path<String>,
) -> ApiResult<Html<String>> {
    let category = find_category(&state, &session, &id).await?;
    Ok(Html(render_edit_row(&category)))
}

pub async fn category_create(
    state: State<AppState>,
    session: Session,
    Form(form): Form<CategoryForm>,
) -> ApiResult<Redirect> {
    let payload = form.for_create()?;
    session
        .client(&state)
        .create_category(&payload)
        .await
        .map_err(|e| ApiError::backend(e, "Gagal menambah kategori"))?;

    log::info!("Category '{}' created by {}", payload.name, session.display_name());
    Ok(Redirect::to(&with_notice("/dashboard/categories", "Kategori berhasil ditambahkan")))
}

pub async fn category_update(
    state: State<AppState>,
    session: Session,
    Path(id): Path<String>,
    Form(form): Form<CategoryForm>,
) -> ApiResult<Redirect> {
    let payload = form.for_update()?;
    session
        .client(&state)
        .update_category(&id, &payload)
        .await
        .map_err(|e| ApiError::backend(e, "Gagal mengedit kategori"))?;

    log::info!("Category {} renamed to '{}' by {}", id, payload.name, session.display_name());
    Ok(Redirect::to(&with_notice("/dashboard/categories", "Kategori berhasil diperbarui")))
}

pub async fn category_delete(
    state: State<AppState>,
    session: Session,
    Path(id): Path<String>,
) -> ApiResult<Response> {
    session
        .client(&state)
        .delete_category(&id)
        .await
        .map_err(|e| ApiError::backend(e, "Gagal menghapus kategori"))?;

    log::info!("Category {} deleted by {}", id, session.display_name());
    Ok(triggered(CHANGED, alert_html("success", "Kategori berhasil dihapus")))
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
                "/api/categories",
                get(|| async {
                    Json(json!({"data": [
                        {"id": "c1", "name": "Transport", "type": "expense"},
                        {"id": "c2", "name": "persembahan"}
                    ]}))
                })
                .post(|State(calls): State<Calls>, Json(body): Json<Value>| async move {
                    calls.lock().unwrap().push(("POST".to_string(), body));
                    (StatusCode::CREATED, Json(json!({"data": {}})))
                }),
            )
            .route(
                "/api/categories/:id",
                put(|State(calls): State<Calls>, Path(id): Path<String>, Json(body): Json<Value>| async move {
                    calls.lock().unwrap().push((format!("PUT {}", id), body));
                    Json(json!({"data": {}}))
                })
                .delete(|Path(id): Path<String>| async move {
                    if id == "c1" {
                        return (
                            StatusCode::BAD_REQUEST,
                            Json(json!({"error": "Kategori masih digunakan transaksi"})),
                        );
                    }
                    (StatusCode::OK, Json(json!({"message": "deleted"})))
                }),
            )
            .with_state(calls)
    }

    #[tokio::test]
    async fn test_page_lists_sorted_with_general_type() {
        let app = app_with_backend(backend(Calls::default())).await;
        let response = send(&app, get_request("/dashboard/categories", Some(Role::Admin))).await;
        assert_eq!(response.status(), StatusCode::OK);

        let html = body_text(response).await;
        assert!(html.find("persembahan").unwrap() < html.find("Transport").unwrap());
        assert!(html.contains(">general</span>"));
        assert!(html.contains(">expense</span>"));
    }

    #[tokio::test]
    async fn test_create_trims_name() {
        let calls = Calls::default();
        let app = app_with_backend(backend(calls.clone())).await;
        let request = form_request("POST", "/dashboard/categories", Some(Role::Admin), "name=++Konsumsi++");
        let response = send(&app, request).await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert!(location(&response).starts_with("/dashboard/categories?notice="));
        let calls = calls.lock().unwrap();
        assert_eq!(calls[0], ("POST".to_string(), json!({"name": "Konsumsi"})));
    }

    #[tokio::test]
    async fn test_blank_names_rejected() {
        let calls = Calls::default();
        let app = app_with_backend(backend(calls.clone())).await;

        let response = send(&app, form_request("POST", "/dashboard/categories", Some(Role::Admin), "name=+")).await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body_text(response).await.contains("Kategori tidak boleh kosong"));

        let response = send(&app, form_request("PUT", "/dashboard/categories/c1", Some(Role::Admin), "name=")).await;
        assert!(body_text(response).await.contains("Nama kategori tidak boleh kosong"));
        assert!(calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_sends_name() {
        let calls = Calls::default();
        let app = app_with_backend(backend(calls.clone())).await;
        let request = htmx(form_request("PUT", "/dashboard/categories/c2", Some(Role::Admin), "name=Persembahan"));
        let response = send(&app, request).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers()["hx-redirect"].to_str().unwrap().starts_with("/dashboard/categories"));
        assert_eq!(calls.lock().unwrap()[0].0, "PUT c2");
    }

    #[tokio::test]
    async fn test_edit_row_and_unknown_id() {
        let app = app_with_backend(backend(Calls::default())).await;
        let request = htmx(get_request("/dashboard/categories/c1/edit", Some(Role::Admin)));
        let html = body_text(send(&app, request).await).await;
        assert!(html.contains("value='Transport'"));
        assert!(html.contains("hx-put='/dashboard/categories/c1'"));

        let response = send(&app, htmx(get_request("/dashboard/categories/zz", Some(Role::Admin)))).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_delete_refreshes_list_or_shows_backend_error() {
        let app = app_with_backend(backend(Calls::default())).await;

        let response = send(&app, htmx(form_request("DELETE", "/dashboard/categories/c2", Some(Role::Admin), ""))).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["hx-trigger"], "categories-changed");

        let response = send(&app, htmx(form_request("DELETE", "/dashboard/categories/c1", Some(Role::Admin), ""))).await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body_text(response).await.contains("Kategori masih digunakan transaksi"));
    }

    #[tokio::test]
    async fn test_member_cannot_manage_categories() {
        let calls = Calls::default();
        let app = app_with_backend(backend(calls.clone())).await;
        let response = send(&app, form_request("POST", "/dashboard/categories", Some(Role::Member), "name=X")).await;
        assert_eq!(location(&response), "/dashboard");
        assert!(calls.lock().unwrap().is_empty());
    }
}
