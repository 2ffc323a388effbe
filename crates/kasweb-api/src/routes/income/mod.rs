//! Income routes - Recording money received (admin only)
//!
//! Structure:
//! - api.rs: Form submission
//! - page.rs: Entry form

pub mod api;
pub mod page;

pub use api::income_submit;
pub use page::{page_income, render_income_form};
