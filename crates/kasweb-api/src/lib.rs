//! Dashboard web server with HTMX support
//!
//! Routes are organized into modules:
//! - routes::auth: Login, register, logout
//! - routes::dashboard: Stat cards and charts
//! - routes::transactions: List, detail, approve/reject, edit
//! - routes::income: Income entry (admin)
//! - routes::upload: Expense submission with receipt
//! - routes::transfer: Cash/bank balance transfer
//! - routes::reports: Filtered cash-flow report and exports
//! - routes::categories, routes::funds, routes::users: Master data
//!
//! Every page is rendered here and backed by the finance backend through
//! [`kasweb_client::BackendClient`]; the server keeps no data of its own.

pub mod error;
pub mod routes;
pub mod session;

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    response::Redirect,
    routing::{get, post, put},
    Router,
};
use kasweb_client::BackendClient;
use kasweb_config::Config;
use kasweb_core::{access, Fund, FundStatus, PaymentMethod};
use kasweb_utils::escape_html;
use rust_decimal::Decimal;
use std::sync::Arc;
use tokio::net::TcpListener;

pub use error::{ApiError, ApiResult};
pub use session::Session;

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub client: BackendClient,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(client: BackendClient, config: Config) -> Self {
        Self {
            client,
            config: Arc::new(config),
        }
    }

    /// Format an amount with the configured currency
    pub fn money(&self, amount: Decimal) -> String {
        kasweb_core::format::format_currency(amount, &self.config.currency)
    }
}

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    use routes::auth::{login_submit, logout, page_login, page_register, register_submit};
    use routes::categories::{
        category_create, category_delete, category_update, htmx_category_edit_row, htmx_category_row,
        htmx_categories_list, page_categories,
    };
    use routes::dashboard::page_dashboard;
    use routes::funds::{fund_create, fund_delete, fund_update, htmx_fund_edit_form, htmx_funds_list, page_funds};
    use routes::income::{income_submit, page_income};
    use routes::reports::{htmx_reports_table, page_reports, report_export};
    use routes::transactions::{
        htmx_reject_form, htmx_transaction_detail, htmx_transaction_edit_form, htmx_transactions_list,
        page_transactions, transaction_approve, transaction_reject, transaction_update,
    };
    use routes::transfer::{htmx_transfer_swap, page_transfer, transfer_submit};
    use routes::upload::{page_upload, upload_submit};
    use routes::users::{
        htmx_user_edit_form, htmx_user_new_form, htmx_users_list, page_users, user_create, user_delete,
        user_update,
    };

    // Multipart framing on top of the largest accepted receipt
    let body_limit = state.config.upload.max_bytes + 64 * 1024;

    Router::new()
        .route("/health", get(health_check))
        .route("/", get(index_redirect))
        // Auth
        .route("/login", get(page_login).post(login_submit))
        .route("/register", get(page_register).post(register_submit))
        .route("/logout", get(logout).post(logout))
        // Dashboard
        .route("/dashboard", get(page_dashboard))
        // Transactions
        .route("/dashboard/transactions", get(page_transactions))
        .route("/dashboard/transactions/list", get(htmx_transactions_list))
        .route("/dashboard/transactions/:id", post(transaction_update))
        .route("/dashboard/transactions/:id/detail", get(htmx_transaction_detail))
        .route("/dashboard/transactions/:id/edit", get(htmx_transaction_edit_form))
        .route("/dashboard/transactions/:id/approve", post(transaction_approve))
        .route("/dashboard/transactions/:id/reject", get(htmx_reject_form).post(transaction_reject))
        // Entry forms
        .route("/dashboard/income", get(page_income).post(income_submit))
        .route("/dashboard/upload", get(page_upload).post(upload_submit))
        .route("/dashboard/transfer", get(page_transfer).post(transfer_submit))
        .route("/dashboard/transfer/swap", get(htmx_transfer_swap))
        // Reports
        .route("/dashboard/reports", get(page_reports))
        .route("/dashboard/reports/table", get(htmx_reports_table))
        .route("/dashboard/reports/export/:format", get(report_export))
        // Categories
        .route("/dashboard/categories", get(page_categories).post(category_create))
        .route("/dashboard/categories/list", get(htmx_categories_list))
        .route(
            "/dashboard/categories/:id",
            get(htmx_category_row).put(category_update).delete(category_delete),
        )
        .route("/dashboard/categories/:id/edit", get(htmx_category_edit_row))
        // Funds
        .route("/dashboard/funds", get(page_funds).post(fund_create))
        .route("/dashboard/funds/list", get(htmx_funds_list))
        .route("/dashboard/funds/:id", put(fund_update).delete(fund_delete))
        .route("/dashboard/funds/:id/edit", get(htmx_fund_edit_form))
        // Users
        .route("/dashboard/users", get(page_users).post(user_create))
        .route("/dashboard/users/list", get(htmx_users_list))
        .route("/dashboard/users/new", get(htmx_user_new_form))
        .route("/dashboard/users/:id", put(user_update).delete(user_delete))
        .route("/dashboard/users/:id/edit", get(htmx_user_edit_form))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(middleware::from_fn_with_state(state.clone(), session::guard))
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

async fn index_redirect() -> Redirect {
    Redirect::to("/dashboard")
}

// ==================== Template Functions ====================

/// Base HTML template
pub fn base_html(title: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="id">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{} - Kas GKJW</title>
    <script src="https://unpkg.com/htmx.org@1.9.10"></script>
    <script src="https://cdn.tailwindcss.com"></script>
    <style>
        .htmx-indicator {{ opacity: 0; transition: opacity 0.3s; }}
        .htmx-request .htmx-indicator {{ opacity: 1; }}
        .htmx-request.htmx-indicator {{ opacity: 1; }}
    </style>
    <script>
        // Error responses carry an alert fragment; swap it like a success
        document.addEventListener('htmx:beforeSwap', function (e) {{
            if (e.detail.xhr.status >= 400) {{
                e.detail.shouldSwap = true;
                e.detail.isError = false;
            }}
        }});
    </script>
</head>
<body class="bg-gray-50 text-gray-900">
    {}
</body>
</html>"#,
        escape_html(title),
        content
    )
}

/// Navigation sidebar with the entries the session's role may open
pub fn nav_sidebar(current_path: &str, session: &Session) -> String {
    let mut nav = String::from(
        "<div class='bg-white border-r h-screen flex flex-col'><div class='p-4 border-b'><h1 class='text-xl font-bold text-indigo-600'>Kas GKJW</h1><p class='text-xs text-gray-500'>Sistem Keuangan</p></div><ul class='flex-1 py-2 space-y-1 px-2'>",
    );

    for section in access::menu_for(session.role()) {
        let is_active = if section.path == "/dashboard" {
            current_path == "/dashboard"
        } else {
            current_path.starts_with(section.path)
        };
        let active_class = if is_active { "bg-indigo-50 text-indigo-600" } else { "text-gray-600 hover:bg-gray-50" };
        nav.push_str(&format!(
            r#"<li><a href='{}' class='flex items-center gap-2 px-3 py-2 rounded-lg {}'>{}<span>{}</span></a></li>"#,
            section.path, active_class, section.icon, section.label
        ));
    }
    nav.push_str("</ul>");

    let footer = if session.is_signed_in() {
        format!(
            r#"<div class='p-4 border-t'>
                <p class='text-sm font-medium'>{}</p>
                <p class='text-xs text-gray-500 capitalize'>{}</p>
                <form method='post' action='/logout' class='mt-2'>
                    <button type='submit' class='w-full px-3 py-2 text-sm text-red-600 bg-red-50 rounded-lg hover:bg-red-100'>Logout</button>
                </form>
            </div>"#,
            escape_html(session.display_name()),
            session.role()
        )
    } else {
        r#"<div class='p-4 border-t'>
                <p class='text-xs text-gray-500 mb-2'>Mode tamu: hanya dashboard dan laporan.</p>
                <a href='/login' class='block w-full text-center px-3 py-2 text-sm text-white bg-indigo-600 rounded-lg hover:bg-indigo-700'>Login</a>
            </div>"#
            .to_string()
    };
    nav.push_str(&footer);
    nav.push_str("</div>");
    nav
}

/// Check if request is from HTMX (partial page update)
pub fn is_htmx_request(headers: &axum::http::HeaderMap) -> bool {
    headers.get("hx-request").is_some()
}

/// Wrap content for full page or HTMX partial
pub fn page_response(
    headers: &axum::http::HeaderMap,
    session: &Session,
    title: &str,
    current_path: &str,
    inner_content: &str,
) -> String {
    if is_htmx_request(headers) && headers.get("hx-boosted").is_none() {
        format!("<main class='flex-1 overflow-auto bg-gray-50 p-6'>{}</main>", inner_content)
    } else {
        base_html(
            title,
            &format!(
                r#"<div class='flex flex-col h-screen'>
    <div class='flex flex-1 overflow-hidden'>
        <aside class='w-64 flex-shrink-0'>{}</aside>
        <main class='flex-1 overflow-auto bg-gray-50 p-6'>{}</main>
    </div>
</div>"#,
                nav_sidebar(current_path, session),
                inner_content
            ),
        )
    }
}

/// Bare page without sidebar, used by login and register
pub fn auth_page(title: &str, inner_content: &str) -> String {
    base_html(
        title,
        &format!(
            "<div class='min-h-screen flex items-center justify-center bg-gradient-to-br from-indigo-50 to-blue-100 p-4'><div class='w-full max-w-md bg-white rounded-xl shadow-lg p-8'>{}</div></div>",
            inner_content
        ),
    )
}

/// Alert box; `kind` is "error", "success" or "info"
pub fn alert_html(kind: &str, message: &str) -> String {
    let classes = match kind {
        "error" => "bg-red-50 border-red-200 text-red-700",
        "success" => "bg-green-50 border-green-200 text-green-700",
        _ => "bg-blue-50 border-blue-200 text-blue-700",
    };
    format!(
        "<div role='alert' class='p-3 mb-4 rounded-lg border {}'>{}</div>",
        classes,
        escape_html(message)
    )
}

/// `<option>` for a select, escaped
pub fn option_html(value: &str, label: &str, selected: bool) -> String {
    format!(
        "<option value='{}'{}>{}</option>",
        escape_html(value),
        if selected { " selected" } else { "" },
        escape_html(label)
    )
}

/// Category select options; the first one is chosen when nothing is selected
pub fn category_options(categories: &[String], selected: &str) -> String {
    let selected = if selected.is_empty() {
        categories.first().map(String::as_str).unwrap_or("")
    } else {
        selected
    };
    categories
        .iter()
        .map(|name| option_html(name, name, name == selected))
        .collect()
}

/// Fund select options, archived funds left out unless already selected
pub fn fund_options(funds: &[Fund], selected: &str, placeholder: Option<&str>) -> String {
    let mut html = placeholder
        .map(|label| option_html("", label, selected.is_empty()))
        .unwrap_or_default();
    let selected = match (selected, placeholder) {
        ("", None) => funds
            .iter()
            .find(|f| f.status == FundStatus::Active)
            .map(|f| f.id.as_str())
            .unwrap_or(""),
        (id, _) => id,
    };
    for fund in funds {
        if fund.status == FundStatus::Archived && fund.id != selected {
            continue;
        }
        html.push_str(&option_html(&fund.id, &fund.name, fund.id == selected));
    }
    html
}

pub fn method_options(selected: PaymentMethod) -> String {
    [PaymentMethod::Cash, PaymentMethod::Bank]
        .iter()
        .map(|m| option_html(&m.to_string(), m.label(), *m == selected))
        .collect()
}

/// Render fetched data, or an alert in its place
///
/// A rejected session is never rendered; it propagates so the browser is
/// sent to the login page.
pub fn render_or_alert<T>(
    result: kasweb_client::Result<T>,
    fallback: &str,
    render: impl FnOnce(T) -> String,
) -> ApiResult<String> {
    match result {
        Ok(value) => Ok(render(value)),
        Err(err) if err.is_unauthorized() => Err(ApiError::Unauthorized),
        Err(err) => {
            log::warn!("{}: {}", fallback, err);
            Ok(alert_html("error", &err.user_message(fallback)))
        }
    }
}

/// Fetched value, or its default after logging the failure
pub fn or_default<T: Default>(result: kasweb_client::Result<T>, what: &str) -> ApiResult<T> {
    match result {
        Ok(value) => Ok(value),
        Err(err) if err.is_unauthorized() => Err(ApiError::Unauthorized),
        Err(err) => {
            log::warn!("Failed to load {}: {}", what, err);
            Ok(T::default())
        }
    }
}

/// Fragment response that also fires a client-side HTMX event
pub fn triggered(event: &'static str, html: String) -> axum::response::Response {
    use axum::response::IntoResponse;
    ([("hx-trigger", event)], axum::response::Html(html)).into_response()
}

/// `?notice=` left by a redirect after a successful submission
#[derive(Debug, Default, serde::Deserialize)]
pub struct NoticeQuery {
    #[serde(default)]
    pub notice: Option<String>,
}

/// Success notice carried in `?notice=` after a redirect
pub fn notice_html(notice: Option<&str>) -> String {
    match notice.map(str::trim).filter(|n| !n.is_empty()) {
        Some(text) => alert_html("success", text),
        None => String::new(),
    }
}

/// `path?notice=<text>` for redirects after a successful submission
pub fn with_notice(path: &str, notice: &str) -> String {
    format!("{}?notice={}", path, urlencoding::encode(notice))
}

/// Start the HTTP server
pub async fn start_server(config: Config, client: BackendClient) -> std::io::Result<()> {
    let addr = config.bind_address();
    let backend = client.base_url().to_string();
    let state = AppState::new(client, config);

    let router = create_router(state);

    let listener = TcpListener::bind(&addr).await?;
    log::info!("Starting kasweb on http://{}", addr);
    log::info!("Using finance backend at {}", backend);

    axum::serve(listener, router).await?;
    log::info!("Server stopped");
    Ok(())
}
