//! Dashboard page rendering
//!
//! The three backend aggregates are fetched concurrently. Each widget
//! renders on its own, so one failing fetch leaves only that widget empty.

use axum::response::Html;
use kasweb_core::{CategoryData, DashboardStats, MonthlyData, TransactionType};
use kasweb_utils::escape_html;
use rust_decimal::Decimal;

use crate::error::ApiResult;
use crate::session::Session;
use crate::{or_default, AppState};

pub async fn page_dashboard(
    state: axum::extract::State<AppState>,
    headers: axum::http::HeaderMap,
    session: Session,
) -> ApiResult<Html<String>> {
    let client = session.client(&state);
    let (stats, monthly, categories) = tokio::join!(
        client.dashboard_stats(),
        client.dashboard_monthly(),
        client.dashboard_categories(TransactionType::Expense),
    );
    let stats = or_default(stats.map(Some), "dashboard stats")?;
    let monthly = or_default(monthly, "monthly chart")?;
    let categories = or_default(categories, "category breakdown")?;

    let greeting = match session.user() {
        Some(user) => format!("Selamat datang, {}", escape_html(&user.name)),
        None => "Ringkasan keuangan (mode tamu)".to_string(),
    };

    let inner_content = format!(
        r#"<div class='mb-6'>
            <h2 class='text-2xl font-bold'>Dashboard</h2>
            <p class='text-sm text-gray-500'>{}</p>
        </div>
        {}
        <div class='grid grid-cols-1 lg:grid-cols-2 gap-6 mt-6'>
            <div class='bg-white rounded-xl shadow-sm p-6'>
                <h3 class='font-semibold mb-4'>Pemasukan vs Pengeluaran (6 bulan)</h3>
                {}
            </div>
            <div class='bg-white rounded-xl shadow-sm p-6'>
                <h3 class='font-semibold mb-4'>Pengeluaran per Kategori</h3>
                {}
            </div>
        </div>"#,
        greeting,
        render_stat_cards(&state, stats.as_ref()),
        render_monthly_chart(&monthly),
        render_category_breakdown(&state, &categories),
    );

    Ok(Html(crate::page_response(&headers, &session, "Dashboard", "/dashboard", &inner_content)))
}

/// The four stat cards; `None` when the stats could not be loaded
pub fn render_stat_cards(state: &AppState, stats: Option<&DashboardStats>) -> String {
    let Some(stats) = stats else {
        return "<div class='bg-white rounded-xl shadow-sm p-6 text-center text-gray-500'>Statistik belum tersedia</div>".to_string();
    };

    format!(
        r#"<div class='grid grid-cols-1 md:grid-cols-2 lg:grid-cols-4 gap-4'>
            <div class='bg-white p-5 rounded-xl shadow-sm border-l-4 border-green-500'>
                <p class='text-sm text-gray-500'>Total Pemasukan</p>
                <p class='text-2xl font-bold text-green-600'>{}</p>
                <p class='text-xs text-gray-400 mt-1'>Bulan ini: {}</p>
            </div>
            <div class='bg-white p-5 rounded-xl shadow-sm border-l-4 border-red-500'>
                <p class='text-sm text-gray-500'>Total Pengeluaran</p>
                <p class='text-2xl font-bold text-red-600'>{}</p>
                <p class='text-xs text-gray-400 mt-1'>Bulan ini: {}</p>
            </div>
            <div class='bg-white p-5 rounded-xl shadow-sm border-l-4 border-indigo-500'>
                <p class='text-sm text-gray-500'>Saldo Saat Ini</p>
                <p class='text-2xl font-bold text-indigo-600'>{}</p>
            </div>
            <div class='bg-white p-5 rounded-xl shadow-sm border-l-4 border-yellow-500'>
                <p class='text-sm text-gray-500'>Menunggu Persetujuan</p>
                <p class='text-2xl font-bold text-yellow-600'>{}</p>
            </div>
        </div>"#,
        state.money(stats.total_income),
        state.money(stats.monthly_income),
        state.money(stats.total_expense),
        state.money(stats.monthly_expense),
        state.money(stats.current_balance),
        stats.pending_transactions,
    )
}

/// Bar height in percent of the tallest bar
fn bar_percent(value: Decimal, max: Decimal) -> Decimal {
    if max <= Decimal::ZERO || value <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    (value / max * Decimal::ONE_HUNDRED).round_dp(0)
}

/// Paired income/expense bars per month
pub fn render_monthly_chart(months: &[MonthlyData]) -> String {
    if months.is_empty() {
        return "<p class='text-gray-500 text-center py-8'>Belum ada data</p>".to_string();
    }

    let max = months
        .iter()
        .flat_map(|m| [m.income, m.expense])
        .max()
        .unwrap_or_default();

    let mut bars = String::new();
    for month in months {
        bars.push_str(&format!(
            r#"<div class='flex-1 flex flex-col items-center'>
                <div class='flex items-end gap-1 h-40 w-full justify-center'>
                    <div class='w-4 bg-green-500 rounded-t' style='height: {}%' title='Pemasukan'></div>
                    <div class='w-4 bg-red-500 rounded-t' style='height: {}%' title='Pengeluaran'></div>
                </div>
                <span class='text-xs text-gray-500 mt-2'>{}</span>
            </div>"#,
            bar_percent(month.income, max),
            bar_percent(month.expense, max),
            escape_html(&month.month)
        ));
    }

    format!(
        r#"<div class='flex gap-2'>{}</div>
        <div class='flex justify-center gap-4 mt-4 text-xs text-gray-500'>
            <span class='flex items-center gap-1'><span class='w-3 h-3 bg-green-500 rounded'></span>Pemasukan</span>
            <span class='flex items-center gap-1'><span class='w-3 h-3 bg-red-500 rounded'></span>Pengeluaran</span>
        </div>"#,
        bars
    )
}

pub fn render_category_breakdown(state: &AppState, categories: &[CategoryData]) -> String {
    if categories.is_empty() {
        return "<p class='text-gray-500 text-center py-8'>Belum ada pengeluaran bulan ini</p>".to_string();
    }

    let mut html = String::from("<div class='space-y-3'>");
    for item in categories {
        let width = item.percentage.clamp(0.0, 100.0);
        html.push_str(&format!(
            r#"<div>
                <div class='flex justify-between text-sm mb-1'>
                    <span>{}</span>
                    <span class='text-gray-500'>{} ({:.1}%)</span>
                </div>
                <div class='w-full bg-gray-100 rounded-full h-2'>
                    <div class='bg-indigo-500 h-2 rounded-full' style='width: {:.1}%'></div>
                </div>
            </div>"#,
            escape_html(&item.category),
            state.money(item.amount),
            item.percentage,
            width
        ));
    }
    html.push_str("</div>");
    html
}
