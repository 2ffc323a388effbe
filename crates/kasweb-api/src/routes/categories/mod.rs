//! Category routes - Master data for transaction labels (admin only)
//!
//! Features:
//! - Alphabetical list with the type each category is meant for
//! - Inline edit row, swapped in place of the display row
//! - Delete behind a browser confirmation
//!
//! Structure:
//! - api.rs: Fragments and mutations
//! - page.rs: Full page and table rendering

pub mod api;
pub mod page;

pub use api::{
    category_create, category_delete, category_update, htmx_categories_list, htmx_category_edit_row,
    htmx_category_row,
};
pub use page::{page_categories, render_category_row, render_category_table};
