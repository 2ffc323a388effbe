//! Transaction routes - List, detail and admin review
//!
//! Features:
//! - Filter by status and type, free-text search
//! - Pagination of the fetched list
//! - Detail panel with receipt link and rejection reason
//! - Approve, reject with reason, and edit (admin only)
//!
//! Mutations answer with an alert for the side panel and fire a
//! `transactions-changed` event so the table refetches itself.
//!
//! Structure:
//! - api.rs: HTMX fragments and actions
//! - page.rs: Full page and table rendering

pub mod api;
pub mod page;

pub use api::{
    htmx_reject_form, htmx_transaction_detail, htmx_transaction_edit_form, htmx_transactions_list,
    transaction_approve, transaction_reject, transaction_update,
};
pub use page::{page_transactions, render_transaction_table, status_badge, type_badge};
