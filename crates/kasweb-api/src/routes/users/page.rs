//! Users page rendering
//!
//! Endpoints:
//! - page_users: User table with the modal mount point
//!
//! Helper functions:
//! - render_user_table: Table fragment
//! - role_badge: Colored role label

use axum::extract::Query;
use axum::response::Html;
use kasweb_core::format::format_date;
use kasweb_core::{Role, User};
use kasweb_utils::escape_html;

use crate::error::ApiResult;
use crate::session::Session;
use crate::{notice_html, render_or_alert, AppState, NoticeQuery};

pub async fn page_users(
    state: axum::extract::State<AppState>,
    headers: axum::http::HeaderMap,
    session: Session,
    Query(notice): Query<NoticeQuery>,
) -> ApiResult<Html<String>> {
    let result = session.client(&state).list_users().await;
    let table = render_or_alert(result, "Gagal memuat user", |users| render_user_table(&users))?;

    let inner_content = format!(
        r#"{}
        <div class='flex items-center justify-between mb-6'>
            <div>
                <h2 class='text-2xl font-bold'>Manajemen User</h2>
                <p class='text-sm text-gray-500'>Kelola akses user sistem</p>
            </div>
            <button hx-get='/dashboard/users/new' hx-target='#user-modal' class='px-4 py-2 bg-indigo-600 text-white rounded-lg hover:bg-indigo-700'>+ Tambah User</button>
        </div>
        <div id='user-alert'></div>
        <div id='users-list' hx-get='/dashboard/users/list' hx-trigger='users-changed from:body'>{}</div>
        <div id='user-modal'></div>"#,
        notice_html(notice.notice.as_deref()),
        table
    );

    Ok(Html(crate::page_response(
        &headers,
        &session,
        "Kelola User",
        "/dashboard/users",
        &inner_content,
    )))
}

pub fn role_badge(role: Role) -> String {
    let (class, label) = match role {
        Role::Admin => ("bg-red-100 text-red-700", "Admin"),
        Role::Member => ("bg-indigo-100 text-indigo-700", "Member"),
        Role::Viewer => ("bg-gray-100 text-gray-600", "Viewer"),
        Role::Guest => ("bg-yellow-100 text-yellow-700", "Guest"),
    };
    format!("<span class='px-2 py-1 rounded-full text-xs {}'>{}</span>", class, label)
}

pub fn render_user_table(users: &[User]) -> String {
    let mut rows = String::new();
    for user in users {
        let id = urlencoding::encode(&user.id);
        rows.push_str(&format!(
            r#"<tr class='border-b hover:bg-gray-50'>
                <td class='px-4 py-3 font-medium'>{}</td>
                <td class='px-4 py-3'>{}</td>
                <td class='px-4 py-3'>{}</td>
                <td class='px-4 py-3 text-gray-500'>{}</td>
                <td class='px-4 py-3 text-right whitespace-nowrap'>
                    <button hx-get='/dashboard/users/{}/edit' hx-target='#user-modal' class='px-3 py-1 text-sm border rounded hover:bg-gray-100'>Edit</button>
                    <button hx-delete='/dashboard/users/{}' hx-confirm='Yakin ingin menghapus user ini?' hx-target='#user-alert' class='px-3 py-1 text-sm text-red-600 border border-red-200 rounded hover:bg-red-50'>Hapus</button>
                </td>
            </tr>"#,
            escape_html(&user.name),
            escape_html(&user.email),
            role_badge(user.role),
            format_date(&user.created_at),
            id,
            id
        ));
    }

    format!(
        r#"<div class='bg-white rounded-xl shadow-sm overflow-hidden'>
            <div class='px-4 py-3 border-b'>
                <h3 class='font-semibold'>Daftar User</h3>
                <p class='text-xs text-gray-500'>{} user terdaftar</p>
            </div>
            <table class='w-full text-sm'>
                <thead class='bg-gray-50 text-gray-600'>
                    <tr>
                        <th class='px-4 py-3 text-left'>Nama</th>
                        <th class='px-4 py-3 text-left'>Email</th>
                        <th class='px-4 py-3 text-left'>Role</th>
                        <th class='px-4 py-3 text-left'>Tanggal Dibuat</th>
                        <th class='px-4 py-3'></th>
                    </tr>
                </thead>
                <tbody>{}</tbody>
            </table>
        </div>"#,
        users.len(),
        rows
    )
}
