//! User modal forms and mutations

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Html, Redirect, Response};
use axum::Form;
use kasweb_core::forms::UserForm;
use kasweb_core::{Role, User};
use kasweb_utils::escape_html;

use super::page::render_user_table;
use crate::error::{ApiError, ApiResult};
use crate::session::Session;
use crate::{alert_html, option_html, render_or_alert, triggered, with_notice, AppState};

const CHANGED: &str = "users-changed";

pub async fn htmx_users_list(state: State<AppState>, session: Session) -> ApiResult<Html<String>> {
    let result = session.client(&state).list_users().await;
    let html = render_or_alert(result, "Gagal memuat user", |users| render_user_table(&users))?;
    Ok(Html(html))
}

/// Modal with the user form; `None` for a new account
fn render_user_modal(user: Option<&User>) -> String {
    let (title, action, password_hint) = match user {
        Some(u) => (
            "Edit User",
            format!("hx-put='/dashboard/users/{}'", urlencoding::encode(&u.id)),
            "Kosongkan jika tidak ingin mengubah password",
        ),
        None => ("Tambah User Baru", "hx-post='/dashboard/users'".to_string(), "Minimal 6 karakter"),
    };
    let role = user.map_or(Role::Member, |u| u.role);
    let role_options: String = Role::ASSIGNABLE
        .iter()
        .map(|r| option_html(&r.to_string(), r.label(), *r == role))
        .collect();

    format!(
        r#"<div class='fixed inset-0 bg-black/40 flex items-center justify-center z-50'>
    <div class='bg-white rounded-xl shadow-lg w-full max-w-md p-6'>
        <div class='flex justify-between items-center mb-4'>
            <h3 class='text-lg font-semibold'>{}</h3>
            <button onclick="document.getElementById('user-modal').innerHTML=''" class='text-gray-400 hover:text-gray-600'>✕</button>
        </div>
        <form {} hx-target='#user-form-alert' hx-disabled-elt='find button[type=submit]' class='space-y-4'>
            <div id='user-form-alert'></div>
            <div>
                <label class='block text-sm font-medium text-gray-700 mb-1'>Nama</label>
                <input type='text' name='name' value='{}' required class='w-full px-3 py-2 border rounded-lg'>
            </div>
            <div>
                <label class='block text-sm font-medium text-gray-700 mb-1'>Email</label>
                <input type='email' name='email' value='{}' required class='w-full px-3 py-2 border rounded-lg'>
            </div>
            <div>
                <label class='block text-sm font-medium text-gray-700 mb-1'>Password</label>
                <input type='password' name='password' class='w-full px-3 py-2 border rounded-lg'>
                <p class='text-xs text-gray-500 mt-1'>{}</p>
            </div>
            <div>
                <label class='block text-sm font-medium text-gray-700 mb-1'>Role</label>
                <select name='role' class='w-full px-3 py-2 border rounded-lg'>{}</select>
            </div>
            <div class='flex justify-end gap-2'>
                <button type='button' onclick="document.getElementById('user-modal').innerHTML=''" class='px-4 py-2 border rounded-lg hover:bg-gray-100'>Batal</button>
                <button type='submit' class='px-4 py-2 bg-indigo-600 text-white rounded-lg hover:bg-indigo-700 disabled:opacity-50'>Simpan</button>
            </div>
        </form>
    </div>
</div>"#,
        title,
        action,
        user.map(|u| escape_html(&u.name)).unwrap_or_default(),
        user.map(|u| escape_html(&u.email)).unwrap_or_default(),
        password_hint,
        role_options
    )
}

pub async fn htmx_user_new_form() -> Html<String> {
    Html(render_user_modal(None))
}

pub async fn htmx_user_edit_form(
    state: State<AppState>,
    session: Session,
    Path(id): Path<String>,
) -> ApiResult<Html<String>> {
    let user = session
        .client(&state)
        .get_user(&id)
        .await
        .map_err(|e| ApiError::backend(e, "Gagal memuat user"))?;
    Ok(Html(render_user_modal(Some(&user))))
}

pub async fn user_create(
    state: State<AppState>,
    session: Session,
    Form(form): Form<UserForm>,
) -> ApiResult<Redirect> {
    let payload = form.validate(true)?;
    session
        .client(&state)
        .create_user(&payload)
        .await
        .map_err(|e| ApiError::backend(e, "Failed to save user"))?;

    log::info!("User {} ({}) created by {}", payload.email, payload.role, session.display_name());
    Ok(Redirect::to(&with_notice("/dashboard/users", "User berhasil ditambahkan")))
}

/// Save an edit; an empty password leaves the current one in place
pub async fn user_update(
    state: State<AppState>,
    session: Session,
    Path(id): Path<String>,
    Form(form): Form<UserForm>,
) -> ApiResult<Redirect> {
    let payload = form.validate(false)?;
    session
        .client(&state)
        .update_user(&id, &payload)
        .await
        .map_err(|e| ApiError::backend(e, "Failed to save user"))?;

    log::info!("User {} updated by {}", id, session.display_name());
    Ok(Redirect::to(&with_notice("/dashboard/users", "User berhasil diperbarui")))
}

pub async fn user_delete(
    state: State<AppState>,
    session: Session,
    Path(id): Path<String>,
) -> ApiResult<Response> {
    match session.client(&state).delete_user(&id).await {
        Ok(()) => {
            log::info!("User {} deleted by {}", id, session.display_name());
            Ok(triggered(CHANGED, alert_html("success", "User berhasil dihapus")))
        }
        Err(e) if e.is_unauthorized() => Err(ApiError::Unauthorized),
        Err(e) => {
            log::warn!("Failed to delete user {}: {}", id, e);
            Err(ApiError::Backend {
                status: if e.is_server_error() {
                    StatusCode::BAD_GATEWAY
                } else {
                    StatusCode::UNPROCESSABLE_ENTITY
                },
                message: "Failed to delete user".to_string(),
            })
        }
    }
}
