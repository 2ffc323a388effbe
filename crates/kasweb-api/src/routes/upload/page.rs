//! Expense submission page

use axum::response::Html;
use kasweb_core::format::today_iso;
use kasweb_core::{Category, CategoryKind, Fund, PaymentMethod};

use crate::error::ApiResult;
use crate::session::Session;
use crate::{category_options, fund_options, method_options, or_default, AppState};

/// Offered when the backend has no categories to give
pub const FALLBACK_CATEGORIES: [&str; 6] =
    ["Perkap", "Konsumsi", "Transport", "Kegiatan", "Logistik", "Lain-lain"];

pub async fn page_upload(
    state: axum::extract::State<AppState>,
    headers: axum::http::HeaderMap,
    session: Session,
) -> ApiResult<Html<String>> {
    let client = session.client(&state);
    let (funds, categories) = tokio::join!(client.list_funds(), client.list_categories());
    let funds = or_default(funds, "funds")?;
    let categories = or_default(categories, "categories")?;

    let inner_content = format!(
        r#"<div class='max-w-2xl'>
            <h2 class='text-2xl font-bold mb-1'>Input Pengeluaran</h2>
            <p class='text-sm text-gray-500 mb-6'>Ajukan pengeluaran beserta nota; bendahara akan meninjau</p>
            <div class='bg-white rounded-xl shadow-sm p-6'>{}</div>
        </div>"#,
        render_upload_form(&funds, &categories, state.config.upload.max_bytes)
    );

    Ok(Html(crate::page_response(
        &headers,
        &session,
        "Input Pengeluaran",
        "/dashboard/upload",
        &inner_content,
    )))
}

/// Expense category names, or the built-in list when there are none
fn expense_categories(categories: &[Category]) -> Vec<String> {
    let names: Vec<String> = categories
        .iter()
        .filter(|c| c.kind != CategoryKind::Income)
        .map(|c| c.name.clone())
        .collect();
    if names.is_empty() {
        FALLBACK_CATEGORIES.iter().map(|s| s.to_string()).collect()
    } else {
        names
    }
}

pub fn render_upload_form(funds: &[Fund], categories: &[Category], max_bytes: usize) -> String {
    format!(
        r#"<form hx-post='/dashboard/upload' hx-encoding='multipart/form-data' hx-target='#form-alert' hx-disabled-elt='find button[type=submit]' class='space-y-4'>
    <div id='form-alert'></div>
    <div>
        <label class='block text-sm font-medium text-gray-700 mb-1'>Nama Kegiatan</label>
        <input type='text' name='event_name' required placeholder='Rapat Perkap' class='w-full px-3 py-2 border rounded-lg'>
    </div>
    <div class='grid grid-cols-2 gap-4'>
        <div>
            <label class='block text-sm font-medium text-gray-700 mb-1'>Kategori</label>
            <select name='category' required class='w-full px-3 py-2 border rounded-lg'>{}</select>
        </div>
        <div>
            <label class='block text-sm font-medium text-gray-700 mb-1'>Fund/Proker (opsional)</label>
            <select name='fund_id' class='w-full px-3 py-2 border rounded-lg'>{}</select>
        </div>
    </div>
    <div class='grid grid-cols-3 gap-4'>
        <div>
            <label class='block text-sm font-medium text-gray-700 mb-1'>Jumlah (Rp)</label>
            <input type='number' name='amount' min='0' step='any' required class='w-full px-3 py-2 border rounded-lg'>
        </div>
        <div>
            <label class='block text-sm font-medium text-gray-700 mb-1'>Tanggal</label>
            <input type='date' name='date' value='{}' required class='w-full px-3 py-2 border rounded-lg'>
        </div>
        <div>
            <label class='block text-sm font-medium text-gray-700 mb-1'>Metode</label>
            <select name='payment_method' class='w-full px-3 py-2 border rounded-lg'>{}</select>
        </div>
    </div>
    <div>
        <label class='block text-sm font-medium text-gray-700 mb-1'>Keterangan</label>
        <textarea name='description' rows='3' class='w-full px-3 py-2 border rounded-lg'></textarea>
    </div>
    <div>
        <label class='block text-sm font-medium text-gray-700 mb-1'>Nota (gambar atau PDF, maks {} MB)</label>
        <input type='file' name='file' accept='image/*,application/pdf' class='w-full text-sm'>
    </div>
    <button type='submit' class='w-full px-4 py-2 bg-indigo-600 text-white rounded-lg hover:bg-indigo-700 disabled:opacity-50'>Kirim Pengeluaran</button>
</form>"#,
        category_options(&expense_categories(categories), ""),
        fund_options(funds, "", Some("Tanpa fund")),
        today_iso(),
        method_options(PaymentMethod::Cash),
        max_bytes / (1024 * 1024)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_categories_when_none_fetched() {
        let html = render_upload_form(&[], &[], 5 * 1024 * 1024);
        for name in FALLBACK_CATEGORIES {
            assert!(html.contains(&format!("value='{}'", name)));
        }
        assert!(html.contains("<option value='' selected>Tanpa fund</option>"));
        assert!(html.contains("maks 5 MB"));
    }

    #[test]
    fn test_income_only_categories_hidden() {
        let categories = vec![
            Category { id: "1".into(), name: "Persembahan".into(), kind: CategoryKind::Income },
            Category { id: "2".into(), name: "Perkap".into(), kind: CategoryKind::Expense },
        ];
        let html = render_upload_form(&[], &categories, 1024);
        assert!(!html.contains("Persembahan"));
        assert!(!html.contains("Logistik"));
    }
}
