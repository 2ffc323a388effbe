//! Report routes - Cash-flow report with running balance
//!
//! Features:
//! - Filter by date range, type, category and fund
//! - Summary cards (backend totals when given, local otherwise)
//! - Paginated ledger whose balance runs across pages
//! - PDF and Excel export proxied from the backend
//!
//! Structure:
//! - api.rs: Table fragment and export download
//! - page.rs: Filter form and report rendering

pub mod api;
pub mod page;

pub use api::{htmx_reports_table, report_export, ReportQuery};
pub use page::{page_reports, render_report};
