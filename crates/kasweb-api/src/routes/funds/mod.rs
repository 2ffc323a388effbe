//! Fund routes - Budget buckets and programs (proker), admin only
//!
//! The page has one form card: empty for a new fund, swapped for the
//! edit form (with a status select) when a fund's Edit button is used.
//!
//! Structure:
//! - api.rs: Fragments and mutations
//! - page.rs: Full page, form and list rendering

pub mod api;
pub mod page;

pub use api::{fund_create, fund_delete, fund_update, htmx_fund_edit_form, htmx_funds_list};
pub use page::{page_funds, render_fund_form, render_fund_list};
