//! Report page rendering
//!
//! Endpoints:
//! - page_reports: Filter form plus the first page of the report
//!
//! Helper functions:
//! - render_report: Summary, ledger table, pager and export links

use axum::extract::Query;
use axum::response::Html;
use kasweb_core::format::format_date;
use kasweb_core::{paginate, running_balance, summarize, Category, Fund, Report, ReportFilter};
use kasweb_utils::escape_html;
use rust_decimal::Decimal;

use crate::error::ApiResult;
use crate::session::Session;
use crate::{option_html, or_default, render_or_alert, AppState};

pub async fn page_reports(
    state: axum::extract::State<AppState>,
    headers: axum::http::HeaderMap,
    session: Session,
    Query(filter): Query<ReportFilter>,
) -> ApiResult<Html<String>> {
    let client = session.client(&state);
    // Categories and funds need a token; guests get the filter without those lists
    let catalog = async {
        if session.is_signed_in() {
            tokio::join!(client.list_categories(), client.list_funds())
        } else {
            (Ok(Vec::new()), Ok(Vec::new()))
        }
    };
    let (report, (categories, funds)) = tokio::join!(client.report(&filter), catalog);
    let categories = or_default(categories, "categories")?;
    let funds = or_default(funds, "funds")?;
    let content = render_or_alert(report, "Gagal memuat laporan", |report| {
        render_report(&state, &filter, 1, report)
    })?;

    let inner_content = format!(
        r#"<h2 class='text-2xl font-bold mb-4'>Laporan Keuangan</h2>
        {}
        <div id='report-content'>{}</div>"#,
        render_filter_form(&filter, &categories, &funds),
        content
    );

    Ok(Html(crate::page_response(
        &headers,
        &session,
        "Laporan",
        "/dashboard/reports",
        &inner_content,
    )))
}

fn render_filter_form(filter: &ReportFilter, categories: &[Category], funds: &[Fund]) -> String {
    let type_options: String = [("", "Semua"), ("income", "Pemasukan"), ("expense", "Pengeluaran")]
        .iter()
        .map(|(value, label)| option_html(value, label, filter.tx_type == *value))
        .collect();

    let mut category_options = option_html("", "Semua", filter.category.is_empty());
    for category in categories {
        category_options.push_str(&option_html(&category.name, &category.name, category.name == filter.category));
    }
    let mut fund_options = option_html("", "Semua", filter.fund_id.is_empty());
    for fund in funds {
        fund_options.push_str(&option_html(&fund.id, &fund.name, fund.id == filter.fund_id));
    }

    format!(
        r#"<form id='report-filters' hx-get='/dashboard/reports/table' hx-target='#report-content' hx-trigger='change, submit'
            class='bg-white rounded-xl shadow-sm p-4 mb-4 grid grid-cols-2 md:grid-cols-5 gap-3 items-end'>
            <div>
                <label class='block text-xs text-gray-500 mb-1'>Dari Tanggal</label>
                <input type='date' name='startDate' value='{}' class='w-full px-3 py-2 border rounded-lg'>
            </div>
            <div>
                <label class='block text-xs text-gray-500 mb-1'>Sampai Tanggal</label>
                <input type='date' name='endDate' value='{}' class='w-full px-3 py-2 border rounded-lg'>
            </div>
            <div>
                <label class='block text-xs text-gray-500 mb-1'>Jenis</label>
                <select name='type' class='w-full px-3 py-2 border rounded-lg'>{}</select>
            </div>
            <div>
                <label class='block text-xs text-gray-500 mb-1'>Kategori</label>
                <select name='category' class='w-full px-3 py-2 border rounded-lg'>{}</select>
            </div>
            <div>
                <label class='block text-xs text-gray-500 mb-1'>Fund/Proker</label>
                <select name='fundId' class='w-full px-3 py-2 border rounded-lg'>{}</select>
            </div>
        </form>"#,
        escape_html(&filter.start_date),
        escape_html(&filter.end_date),
        type_options,
        category_options,
        fund_options
    )
}

fn amount_cell(state: &AppState, amount: Decimal, class: &str) -> String {
    if amount.is_zero() {
        "<td class='px-3 py-2 text-right text-gray-300'>-</td>".to_string()
    } else {
        format!("<td class='px-3 py-2 text-right {}'>{}</td>", class, state.money(amount))
    }
}

/// Summary and one page of the ledger
///
/// The running balance is computed over the whole report before paging,
/// so a later page continues from where the previous one ended.
pub fn render_report(state: &AppState, filter: &ReportFilter, page: usize, report: Report) -> String {
    let rows = running_balance(report.transactions);
    let summary = report.summary.unwrap_or_else(|| summarize(&rows));
    let page = paginate(rows, page, state.config.pagination.records_per_page);
    let query = filter.query_string();
    let separator = if query.is_empty() { "" } else { "&" };
    let export_query = if query.is_empty() {
        String::new()
    } else {
        format!("?{}", escape_html(&query))
    };

    let cards = format!(
        r#"<div class='grid grid-cols-2 md:grid-cols-4 gap-4 mb-4'>
            <div class='bg-white p-4 rounded-xl shadow-sm'><p class='text-xs text-gray-500'>Total Pemasukan</p><p class='text-xl font-bold text-green-600'>{}</p></div>
            <div class='bg-white p-4 rounded-xl shadow-sm'><p class='text-xs text-gray-500'>Total Pengeluaran</p><p class='text-xl font-bold text-red-600'>{}</p></div>
            <div class='bg-white p-4 rounded-xl shadow-sm'><p class='text-xs text-gray-500'>Saldo</p><p class='text-xl font-bold text-indigo-600'>{}</p></div>
            <div class='bg-white p-4 rounded-xl shadow-sm'><p class='text-xs text-gray-500'>Jumlah Transaksi</p><p class='text-xl font-bold'>{}</p></div>
        </div>"#,
        state.money(summary.total_income),
        state.money(summary.total_expense),
        state.money(summary.balance),
        summary.count
    );

    let exports = format!(
        r#"<div class='flex justify-end gap-2 mb-4'>
            <a href='/dashboard/reports/export/pdf{}' class='px-4 py-2 bg-red-600 text-white rounded-lg hover:bg-red-700 text-sm'>Export PDF</a>
            <a href='/dashboard/reports/export/excel{}' class='px-4 py-2 bg-green-600 text-white rounded-lg hover:bg-green-700 text-sm'>Export Excel</a>
        </div>"#,
        export_query, export_query
    );

    if page.items.is_empty() {
        return format!(
            "{}{}<div class='bg-white rounded-xl shadow-sm p-6 text-center text-gray-500'>Tidak ada transaksi pada periode ini</div>",
            cards, exports
        );
    }

    let mut body = String::new();
    for row in &page.items {
        let tx = &row.transaction;
        body.push_str(&format!(
            r#"<tr class='border-b'>
                <td class='px-3 py-2 whitespace-nowrap'>{}</td>
                <td class='px-3 py-2'>{}</td>
                <td class='px-3 py-2'>{}</td>
                <td class='px-3 py-2 text-gray-500'>{}</td>
                {}
                {}
                <td class='px-3 py-2 text-right font-medium'>{}</td>
            </tr>"#,
            format_date(&tx.date),
            escape_html(&tx.event_name),
            escape_html(&tx.category),
            escape_html(&tx.description),
            amount_cell(state, row.income, "text-green-600"),
            amount_cell(state, row.expense, "text-red-600"),
            state.money(row.balance)
        ));
    }

    let mut pager = String::new();
    if page.has_prev() {
        pager.push_str(&format!(
            "<button hx-get='/dashboard/reports/table?{}{}page={}' hx-target='#report-content' class='px-3 py-1 border rounded'>Sebelumnya</button>",
            escape_html(&query),
            separator,
            page.page - 1
        ));
    }
    if page.has_next() {
        pager.push_str(&format!(
            "<button hx-get='/dashboard/reports/table?{}{}page={}' hx-target='#report-content' class='px-3 py-1 border rounded'>Berikutnya</button>",
            escape_html(&query),
            separator,
            page.page + 1
        ));
    }

    format!(
        r#"{}{}
        <div class='bg-white rounded-xl shadow-sm p-4 overflow-x-auto'>
            <table class='w-full text-sm'>
                <thead class='bg-gray-50 text-gray-600'>
                    <tr>
                        <th class='px-3 py-2 text-left'>Tanggal</th>
                        <th class='px-3 py-2 text-left'>Kegiatan</th>
                        <th class='px-3 py-2 text-left'>Kategori</th>
                        <th class='px-3 py-2 text-left'>Keterangan</th>
                        <th class='px-3 py-2 text-right'>Pemasukan</th>
                        <th class='px-3 py-2 text-right'>Pengeluaran</th>
                        <th class='px-3 py-2 text-right'>Saldo</th>
                    </tr>
                </thead>
                <tbody>{}</tbody>
            </table>
            <div class='flex items-center justify-between mt-4 text-sm text-gray-500'>
                <span>Menampilkan {}-{} dari {} baris (halaman {}/{})</span>
                <div class='flex gap-2'>{}</div>
            </div>
        </div>"#,
        cards,
        exports,
        body,
        page.first_index(),
        page.last_index(),
        page.total,
        page.page,
        page.total_pages,
        pager
    )
}
