//! User routes - Account management (admin only)
//!
//! Structure:
//! - api.rs: Modal forms and mutations
//! - page.rs: Full page and user table

pub mod api;
pub mod page;

pub use api::{htmx_user_edit_form, htmx_user_new_form, htmx_users_list, user_create, user_delete, user_update};
pub use page::{page_users, render_user_table, role_badge};
