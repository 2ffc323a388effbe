//! Auth routes - Login, self-registration and logout
//!
//! Structure:
//! - api.rs: Form submissions
//! - page.rs: Login and register pages

pub mod api;
pub mod page;

pub use api::{login_submit, logout, register_submit};
pub use page::{page_login, page_register, render_login_form, render_register_form};
