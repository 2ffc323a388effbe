//! Transactions page rendering
//!
//! Endpoints:
//! - page_transactions: Filter bar, table and side panel
//!
//! Helper functions:
//! - render_transaction_table: Filtered, paginated table fragment
//! - status_badge / type_badge: Colored labels shared with other pages

use axum::extract::Query;
use axum::response::Html;
use kasweb_core::access::Action;
use kasweb_core::format::format_date;
use kasweb_core::{paginate, Transaction, TransactionFilter, TransactionStatus, TransactionType};
use kasweb_utils::{escape_html, truncate};

use crate::error::ApiResult;
use crate::session::Session;
use crate::{notice_html, option_html, render_or_alert, AppState, NoticeQuery};

pub async fn page_transactions(
    state: axum::extract::State<AppState>,
    headers: axum::http::HeaderMap,
    session: Session,
    Query(filter): Query<TransactionFilter>,
    Query(notice): Query<NoticeQuery>,
) -> ApiResult<Html<String>> {
    let result = session.client(&state).list_transactions().await;
    let table = render_or_alert(result, "Gagal memuat transaksi", |transactions| {
        render_transaction_table(&state, &session, &filter, transactions)
    })?;

    let status_options: String = [
        ("", "Semua Status"),
        ("pending", "Pending"),
        ("approved", "Disetujui"),
        ("rejected", "Ditolak"),
    ]
    .iter()
    .map(|(value, label)| option_html(value, label, filter.status == *value))
    .collect();
    let type_options: String = [("", "Semua Jenis"), ("income", "Pemasukan"), ("expense", "Pengeluaran")]
        .iter()
        .map(|(value, label)| option_html(value, label, filter.tx_type == *value))
        .collect();

    let inner_content = format!(
        r#"{}
        <div class='flex items-center justify-between mb-4'>
            <h2 class='text-2xl font-bold'>Transaksi</h2>
            <a href='/dashboard/upload' class='px-4 py-2 bg-indigo-600 text-white rounded-lg hover:bg-indigo-700'>+ Input Pengeluaran</a>
        </div>
        <form id='transaction-filters' class='flex flex-wrap gap-2 mb-4'
            hx-get='/dashboard/transactions/list' hx-target='#transactions-content'
            hx-trigger='change, input changed delay:500ms from:input[name=q]'>
            <input type='text' name='q' value='{}' placeholder='Cari kegiatan, kategori, keterangan...' class='px-4 py-2 border rounded-lg flex-1 min-w-[200px]'>
            <select name='status' class='px-4 py-2 border rounded-lg'>{}</select>
            <select name='type' class='px-4 py-2 border rounded-lg'>{}</select>
        </form>
        <div class='grid grid-cols-1 xl:grid-cols-3 gap-4'>
            <div id='transactions-content' class='xl:col-span-2 bg-white rounded-xl shadow-sm p-4'
                hx-get='/dashboard/transactions/list' hx-trigger='transactions-changed from:body' hx-include='#transaction-filters'>
                {}
            </div>
            <div id='transaction-panel'></div>
        </div>"#,
        notice_html(notice.notice.as_deref()),
        escape_html(&filter.q),
        status_options,
        type_options,
        table
    );

    Ok(Html(crate::page_response(
        &headers,
        &session,
        "Transaksi",
        "/dashboard/transactions",
        &inner_content,
    )))
}

pub fn status_badge(status: TransactionStatus) -> String {
    let classes = match status {
        TransactionStatus::Pending => "bg-yellow-100 text-yellow-700",
        TransactionStatus::Approved => "bg-green-100 text-green-700",
        TransactionStatus::Rejected => "bg-red-100 text-red-700",
    };
    format!(
        "<span class='px-2 py-1 text-xs rounded-full {}'>{}</span>",
        classes,
        status.label()
    )
}

pub fn type_badge(tx_type: TransactionType) -> String {
    let classes = match tx_type {
        TransactionType::Income => "bg-green-50 text-green-600",
        TransactionType::Expense => "bg-red-50 text-red-600",
    };
    format!(
        "<span class='px-2 py-1 text-xs rounded {}'>{}</span>",
        classes,
        tx_type.label()
    )
}

/// Filter, paginate and render the fetched list
pub fn render_transaction_table(
    state: &AppState,
    session: &Session,
    filter: &TransactionFilter,
    transactions: Vec<Transaction>,
) -> String {
    let matching = filter.apply(transactions);
    let page = paginate(
        matching,
        filter.page.unwrap_or(1),
        state.config.pagination.records_per_page,
    );

    if page.items.is_empty() {
        return "<p class='text-gray-500 text-center py-8'>Tidak ada transaksi</p>".to_string();
    }

    let can_review = session.can(Action::Approve);
    let can_edit = session.can(Action::EditTransaction);

    let mut rows = String::new();
    for tx in &page.items {
        let id = urlencoding::encode(&tx.id);
        let mut actions = format!(
            "<button hx-get='/dashboard/transactions/{}/detail' hx-target='#transaction-panel' class='text-indigo-600 hover:underline'>Detail</button>",
            id
        );
        if can_review && tx.is_pending() {
            actions.push_str(&format!(
                "<button hx-post='/dashboard/transactions/{}/approve' hx-target='#transaction-panel' hx-disabled-elt='this' class='text-green-600 hover:underline'>Setujui</button>\
                 <button hx-get='/dashboard/transactions/{}/reject' hx-target='#transaction-panel' class='text-red-600 hover:underline'>Tolak</button>",
                id, id
            ));
        }
        if can_edit {
            actions.push_str(&format!(
                "<button hx-get='/dashboard/transactions/{}/edit' hx-target='#transaction-panel' class='text-gray-600 hover:underline'>Edit</button>",
                id
            ));
        }

        let amount_class = match tx.tx_type {
            TransactionType::Income => "text-green-600",
            TransactionType::Expense => "text-red-600",
        };
        rows.push_str(&format!(
            r#"<tr class='border-b hover:bg-gray-50'>
                <td class='px-3 py-2 whitespace-nowrap'>{}</td>
                <td class='px-3 py-2'>{}</td>
                <td class='px-3 py-2'>{}</td>
                <td class='px-3 py-2' title='{}'>{}</td>
                <td class='px-3 py-2 text-right font-medium {}'>{}</td>
                <td class='px-3 py-2'>{}</td>
                <td class='px-3 py-2'>{}</td>
                <td class='px-3 py-2'><div class='flex gap-2 text-sm'>{}</div></td>
            </tr>"#,
            format_date(&tx.date),
            type_badge(tx.tx_type),
            escape_html(&tx.category),
            escape_html(&tx.event_name),
            escape_html(&truncate(&tx.event_name, 40)),
            amount_class,
            state.money(tx.amount),
            escape_html(tx.creator_name()),
            status_badge(tx.status),
            actions
        ));
    }

    let mut pager = String::new();
    if page.has_prev() {
        pager.push_str(&format!(
            "<button hx-get='/dashboard/transactions/list?{}' hx-target='#transactions-content' class='px-3 py-1 border rounded'>Sebelumnya</button>",
            filter.query_for_page(page.page - 1)
        ));
    }
    if page.has_next() {
        pager.push_str(&format!(
            "<button hx-get='/dashboard/transactions/list?{}' hx-target='#transactions-content' class='px-3 py-1 border rounded'>Berikutnya</button>",
            filter.query_for_page(page.page + 1)
        ));
    }

    format!(
        r#"<div class='overflow-x-auto'>
            <table class='w-full text-sm'>
                <thead class='bg-gray-50 text-gray-600'>
                    <tr>
                        <th class='px-3 py-2 text-left'>Tanggal</th>
                        <th class='px-3 py-2 text-left'>Jenis</th>
                        <th class='px-3 py-2 text-left'>Kategori</th>
                        <th class='px-3 py-2 text-left'>Kegiatan</th>
                        <th class='px-3 py-2 text-right'>Jumlah</th>
                        <th class='px-3 py-2 text-left'>Dibuat Oleh</th>
                        <th class='px-3 py-2 text-left'>Status</th>
                        <th class='px-3 py-2 text-left'>Aksi</th>
                    </tr>
                </thead>
                <tbody>{}</tbody>
            </table>
        </div>
        <div class='flex items-center justify-between mt-4 text-sm text-gray-500'>
            <span>Menampilkan {}-{} dari {} transaksi (halaman {}/{})</span>
            <div class='flex gap-2'>{}</div>
        </div>"#,
        rows,
        page.first_index(),
        page.last_index(),
        page.total,
        page.page,
        page.total_pages,
        pager
    )
}
