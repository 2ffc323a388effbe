//! Transfer routes - Moving balance between cash and bank (admin only)
//!
//! A transfer is recorded as two transactions: an expense leaving the
//! source method, then an income arriving at the destination.
//!
//! Structure:
//! - api.rs: Submission and the swap fragment
//! - page.rs: Transfer form

pub mod api;
pub mod page;

pub use api::{htmx_transfer_swap, transfer_submit};
pub use page::{page_transfer, render_method_pair, render_transfer_form};
