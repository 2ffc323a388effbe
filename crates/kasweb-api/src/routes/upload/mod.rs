//! Expense routes - Submitting an expense with its receipt
//!
//! Members and admins submit expenses here; they start out pending until
//! an admin reviews them on the transactions page.
//!
//! Structure:
//! - api.rs: Multipart submission
//! - page.rs: Submission form

pub mod api;
pub mod page;

pub use api::{upload_submit, ReceiptFile};
pub use page::{page_upload, render_upload_form, FALLBACK_CATEGORIES};
