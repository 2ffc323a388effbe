//! Route modules for the dashboard server
//!
//! - auth: Login, register, logout
//! - dashboard: Stat cards and charts
//! - transactions: List, detail, approval and admin edit
//! - income: Income entry
//! - upload: Expense submission with receipt
//! - transfer: Moving balance between cash and bank
//! - reports: Cash-flow report and exports
//! - categories, funds, users: Master data management
//!
//! Each module follows a consistent structure:
//! - mod.rs: Module declaration and exports
//! - api.rs: Form submissions and HTMX fragments
//! - page.rs: Full page rendering

pub mod auth;
pub mod categories;
pub mod dashboard;
pub mod funds;
pub mod income;
pub mod reports;
pub mod transactions;
pub mod transfer;
pub mod upload;
pub mod users;
