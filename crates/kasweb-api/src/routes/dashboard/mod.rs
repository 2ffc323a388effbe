//! Dashboard routes - Headline numbers and charts
//!
//! Open to every visitor, guests included.

pub mod page;

pub use page::{page_dashboard, render_category_breakdown, render_monthly_chart, render_stat_cards};
