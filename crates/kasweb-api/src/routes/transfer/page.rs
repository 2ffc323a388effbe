//! Transfer page rendering

use axum::response::Html;
use kasweb_core::format::today_iso;
use kasweb_core::forms::TransferForm;
use kasweb_core::{Fund, PaymentMethod};

use crate::error::ApiResult;
use crate::session::Session;
use crate::{fund_options, method_options, or_default, AppState};

pub async fn page_transfer(
    state: axum::extract::State<AppState>,
    headers: axum::http::HeaderMap,
    session: Session,
) -> ApiResult<Html<String>> {
    let funds = or_default(session.client(&state).list_funds().await, "funds")?;

    let inner_content = format!(
        r#"<div class='max-w-2xl'>
            <h2 class='text-2xl font-bold mb-1'>Transfer Saldo</h2>
            <p class='text-sm text-gray-500 mb-6'>Pindahkan saldo antara kas tunai dan rekening bank</p>
            <div class='bg-white rounded-xl shadow-sm p-6'>{}</div>
        </div>"#,
        render_transfer_form(&TransferForm::default(), &funds)
    );

    Ok(Html(crate::page_response(
        &headers,
        &session,
        "Transfer Saldo",
        "/dashboard/transfer",
        &inner_content,
    )))
}

fn method(value: &str, fallback: PaymentMethod) -> PaymentMethod {
    value.parse().unwrap_or(fallback)
}

/// Source and destination selects with the swap button between them
pub fn render_method_pair(form: &TransferForm) -> String {
    format!(
        r#"<div id='transfer-methods' class='flex items-end gap-2'>
        <div class='flex-1'>
            <label class='block text-sm font-medium text-gray-700 mb-1'>Dari</label>
            <select name='from_method' class='w-full px-3 py-2 border rounded-lg'>{}</select>
        </div>
        <button type='button' hx-get='/dashboard/transfer/swap' hx-include='#transfer-methods' hx-target='#transfer-methods' hx-swap='outerHTML'
            class='px-3 py-2 bg-gray-100 rounded-lg hover:bg-gray-200' title='Tukar arah'>⇄</button>
        <div class='flex-1'>
            <label class='block text-sm font-medium text-gray-700 mb-1'>Ke</label>
            <select name='to_method' class='w-full px-3 py-2 border rounded-lg'>{}</select>
        </div>
    </div>"#,
        method_options(method(&form.from_method, PaymentMethod::Cash)),
        method_options(method(&form.to_method, PaymentMethod::Bank))
    )
}

pub fn render_transfer_form(form: &TransferForm, funds: &[Fund]) -> String {
    format!(
        r#"<form hx-post='/dashboard/transfer' hx-target='#form-alert' hx-disabled-elt='find button[type=submit]' class='space-y-4'>
    <div id='form-alert'></div>
    {}
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
        <label class='block text-sm font-medium text-gray-700 mb-1'>Fund/Proker</label>
        <select name='fund_id' class='w-full px-3 py-2 border rounded-lg'>{}</select>
    </div>
    <div>
        <label class='block text-sm font-medium text-gray-700 mb-1'>Keterangan</label>
        <input type='text' name='description' placeholder='Transfer dari Cash ke Bank' class='w-full px-3 py-2 border rounded-lg'>
    </div>
    <button type='submit' class='w-full px-4 py-2 bg-indigo-600 text-white rounded-lg hover:bg-indigo-700 disabled:opacity-50'>Transfer</button>
</form>"#,
        render_method_pair(form),
        today_iso(),
        fund_options(funds, &form.fund_id, None)
    )
}
