//! Bookkeeping domain for the kasweb dashboard
//!
//! Everything here is pure: models mirrored from the finance backend, form
//! validation, transfer planning, the running balance of reports,
//! in-memory pagination and the role table behind menus and guards.

pub mod access;
pub mod error;
pub mod format;
pub mod forms;
pub mod models;
pub mod pagination;
pub mod reports;
pub mod types;

pub use error::{CoreError, CoreResult, ErrorCode};
pub use models::{
    Category, CategoryData, CategoryPayload, Credentials, DashboardStats, Fund, FundPayload,
    LoginResponse, MonthlyData, NewTransaction, RegisterRequest, Report, ReportSummary,
    StatusUpdate, Transaction, UploadedFile, User, UserPayload,
};
pub use pagination::{paginate, Page, TransactionFilter};
pub use reports::{running_balance, summarize, ExportFormat, LedgerRow, ReportFilter};
pub use types::{
    CategoryKind, FundStatus, PaymentMethod, Role, TransactionStatus, TransactionType,
};
