//! Income entry page

use axum::response::Html;
use kasweb_core::format::today_iso;
use kasweb_core::{Category, CategoryKind, Fund, PaymentMethod};

use crate::error::ApiResult;
use crate::session::Session;
use crate::{category_options, fund_options, method_options, or_default, AppState};

/// Income form with funds and categories fetched concurrently
pub async fn page_income(
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
            <h2 class='text-2xl font-bold mb-1'>Input Pemasukan</h2>
            <p class='text-sm text-gray-500 mb-6'>Catat persembahan, donasi dan kas masuk</p>
            <div class='bg-white rounded-xl shadow-sm p-6'>{}</div>
        </div>"#,
        render_income_form(&funds, &categories)
    );

    Ok(Html(crate::page_response(
        &headers,
        &session,
        "Input Pemasukan",
        "/dashboard/income",
        &inner_content,
    )))
}

/// Names of categories usable for income, in backend order
fn income_categories(categories: &[Category]) -> Vec<String> {
    categories
        .iter()
        .filter(|c| c.kind != CategoryKind::Expense)
        .map(|c| c.name.clone())
        .collect()
}

/// The entry form; first fund and first category preselected, date today
pub fn render_income_form(funds: &[Fund], categories: &[Category]) -> String {
    let categories = income_categories(categories);
    let no_funds = if funds.is_empty() {
        "<p class='text-xs text-yellow-600 mt-1'>Belum ada fund/proker. Tambahkan di menu Fund/Proker.</p>"
    } else {
        ""
    };

    format!(
        r#"<form hx-post='/dashboard/income' hx-target='#form-alert' hx-disabled-elt='find button[type=submit]' class='space-y-4'>
    <div id='form-alert'></div>
    <div>
        <label class='block text-sm font-medium text-gray-700 mb-1'>Fund/Proker</label>
        <select name='fund_id' required class='w-full px-3 py-2 border rounded-lg'>{}</select>
        {}
    </div>
    <div>
        <label class='block text-sm font-medium text-gray-700 mb-1'>Nama Kegiatan</label>
        <input type='text' name='event_name' required placeholder='Ibadah Minggu' class='w-full px-3 py-2 border rounded-lg'>
    </div>
    <div class='grid grid-cols-2 gap-4'>
        <div>
            <label class='block text-sm font-medium text-gray-700 mb-1'>Kategori</label>
            <select name='category' required class='w-full px-3 py-2 border rounded-lg'>{}</select>
        </div>
        <div>
            <label class='block text-sm font-medium text-gray-700 mb-1'>Metode</label>
            <select name='payment_method' class='w-full px-3 py-2 border rounded-lg'>{}</select>
        </div>
    </div>
    <div class='grid grid-cols-2 gap-4'>
        <div>
            <label class='block text-sm font-medium text-gray-700 mb-1'>Jumlah (Rp)</label>
            <input type='number' name='amount' min='0' step='any' required class='w-full px-3 py-2 border rounded-lg'>
        </div>
        <div>
            <label class='block text-sm font-medium text-gray-700 mb-1'>Tanggal</label>
            <input type='date' name='date' value='{}' required class='w-full px-3 py-2 border rounded-lg'>
        </div>
    </div>
    <div>
        <label class='block text-sm font-medium text-gray-700 mb-1'>Keterangan</label>
        <textarea name='description' rows='3' class='w-full px-3 py-2 border rounded-lg'></textarea>
    </div>
    <button type='submit' class='w-full px-4 py-2 bg-green-600 text-white rounded-lg hover:bg-green-700 disabled:opacity-50'>Simpan Pemasukan</button>
</form>"#,
        fund_options(funds, "", None),
        no_funds,
        category_options(&categories, ""),
        method_options(PaymentMethod::Cash),
        today_iso()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use kasweb_core::FundStatus;

    #[test]
    fn test_first_active_fund_and_income_category_preselected() {
        let funds = vec![
            Fund { id: "f0".into(), name: "Lama".into(), status: FundStatus::Archived, ..Default::default() },
            Fund { id: "f1".into(), name: "Dana Kas".into(), ..Default::default() },
            Fund { id: "f2".into(), name: "Natal".into(), ..Default::default() },
        ];
        let categories = vec![
            Category { id: "c1".into(), name: "Konsumsi".into(), kind: CategoryKind::Expense },
            Category { id: "c2".into(), name: "Persembahan".into(), kind: CategoryKind::Income },
            Category { id: "c3".into(), name: "Donasi".into(), kind: CategoryKind::General },
        ];
        let html = render_income_form(&funds, &categories);

        assert!(!html.contains("Lama"));
        assert!(html.contains("<option value='f1' selected>Dana Kas</option>"));
        assert!(html.contains("<option value='Persembahan' selected>"));
        assert!(!html.contains("Konsumsi"));
        assert!(html.contains("<option value='cash' selected>"));
        assert!(html.contains(&format!("value='{}'", today_iso())));
    }
}
