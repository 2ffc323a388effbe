//! Categories page rendering
//!
//! Endpoints:
//! - page_categories: Add form and the category table
//!
//! Helper functions:
//! - render_category_table: Sorted table fragment
//! - render_category_row / render_edit_row: Display and inline edit rows

use axum::extract::Query;
use axum::response::Html;
use kasweb_core::{Category, CategoryKind};
use kasweb_utils::escape_html;

use crate::error::ApiResult;
use crate::session::Session;
use crate::{notice_html, render_or_alert, AppState, NoticeQuery};

pub async fn page_categories(
    state: axum::extract::State<AppState>,
    headers: axum::http::HeaderMap,
    session: Session,
    Query(notice): Query<NoticeQuery>,
) -> ApiResult<Html<String>> {
    let result = session.client(&state).list_categories().await;
    let table = render_or_alert(result, "Gagal memuat kategori", render_category_table)?;

    let inner_content = format!(
        r#"{}
        <h2 class='text-2xl font-bold mb-1'>Kelola Kategori</h2>
        <p class='text-sm text-gray-500 mb-6'>Kategori yang dipakai saat mencatat transaksi</p>
        <div class='bg-white rounded-xl shadow-sm p-4 mb-4'>
            <form hx-post='/dashboard/categories' hx-target='#form-alert' hx-disabled-elt='find button[type=submit]' class='flex gap-2'>
                <input type='text' name='name' placeholder='Nama kategori baru' class='flex-1 px-3 py-2 border rounded-lg'>
                <button type='submit' class='px-4 py-2 bg-indigo-600 text-white rounded-lg hover:bg-indigo-700 disabled:opacity-50'>Tambah</button>
            </form>
        </div>
        <div id='form-alert'></div>
        <div id='categories-list' hx-get='/dashboard/categories/list' hx-trigger='categories-changed from:body'>{}</div>"#,
        notice_html(notice.notice.as_deref()),
        table
    );

    Ok(Html(crate::page_response(
        &headers,
        &session,
        "Kelola Kategori",
        "/dashboard/categories",
        &inner_content,
    )))
}

fn kind_badge(kind: CategoryKind) -> String {
    let class = match kind {
        CategoryKind::Income => "bg-green-100 text-green-700",
        CategoryKind::Expense => "bg-red-100 text-red-700",
        CategoryKind::General => "bg-gray-100 text-gray-600",
    };
    format!("<span class='px-2 py-1 rounded-full text-xs {}'>{}</span>", class, kind)
}

fn row_id(category: &Category) -> String {
    format!("category-{}", escape_html(&category.id))
}

pub fn render_category_row(category: &Category) -> String {
    let id = urlencoding::encode(&category.id);
    format!(
        r#"<tr id='{}' class='border-b hover:bg-gray-50'>
            <td class='px-4 py-3 font-medium'>{}</td>
            <td class='px-4 py-3'>{}</td>
            <td class='px-4 py-3 text-right whitespace-nowrap'>
                <button hx-get='/dashboard/categories/{}/edit' hx-target='closest tr' hx-swap='outerHTML' class='px-3 py-1 text-sm border rounded hover:bg-gray-100'>Edit</button>
                <button hx-delete='/dashboard/categories/{}' hx-confirm='Yakin ingin menghapus kategori ini?' hx-target='#form-alert' class='px-3 py-1 text-sm text-red-600 border border-red-200 rounded hover:bg-red-50'>Hapus</button>
            </td>
        </tr>"#,
        row_id(category),
        escape_html(&category.name),
        kind_badge(category.kind),
        id,
        id
    )
}

/// Edit row; saving reloads the page, cancelling restores the display row
pub fn render_edit_row(category: &Category) -> String {
    let id = urlencoding::encode(&category.id);
    format!(
        r#"<tr id='{}' class='border-b bg-indigo-50'>
            <td class='px-4 py-2'>
                <input type='text' name='name' value='{}' class='w-full px-3 py-1 border rounded-lg'>
            </td>
            <td class='px-4 py-2'>{}</td>
            <td class='px-4 py-2 text-right whitespace-nowrap'>
                <button hx-put='/dashboard/categories/{}' hx-include='closest tr' hx-target='#form-alert' hx-disabled-elt='this' class='px-3 py-1 text-sm bg-indigo-600 text-white rounded hover:bg-indigo-700 disabled:opacity-50'>Simpan</button>
                <button hx-get='/dashboard/categories/{}' hx-target='closest tr' hx-swap='outerHTML' class='px-3 py-1 text-sm border rounded hover:bg-gray-100'>Batal</button>
            </td>
        </tr>"#,
        row_id(category),
        escape_html(&category.name),
        kind_badge(category.kind),
        id,
        id
    )
}

/// Categories sorted by name, ignoring case
pub fn render_category_table(mut categories: Vec<Category>) -> String {
    if categories.is_empty() {
        return "<div class='bg-white rounded-xl shadow-sm p-6 text-center text-gray-500'>Belum ada kategori</div>"
            .to_string();
    }
    categories.sort_by_key(|c| c.name.to_lowercase());

    let rows: String = categories.iter().map(render_category_row).collect();
    format!(
        r#"<div class='bg-white rounded-xl shadow-sm overflow-hidden'>
            <table class='w-full text-sm'>
                <thead class='bg-gray-50 text-gray-600'>
                    <tr>
                        <th class='px-4 py-3 text-left'>Nama</th>
                        <th class='px-4 py-3 text-left'>Tipe</th>
                        <th class='px-4 py-3'></th>
                    </tr>
                </thead>
                <tbody>{}</tbody>
            </table>
            <p class='px-4 py-2 text-xs text-gray-500'>{} kategori</p>
        </div>"#,
        rows,
        categories.len()
    )
}
