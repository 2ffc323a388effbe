//! Report filters, running balance and totals

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::models::{ReportSummary, Transaction};
use super::types::TransactionType;

/// Report query as submitted by the filter form
///
/// Field names match the backend's query parameters, so the same struct
/// is read from the dashboard URL and forwarded to `/reports`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReportFilter {
    pub start_date: String,
    pub end_date: String,
    #[serde(rename = "type")]
    pub tx_type: String,
    pub category: String,
    pub fund_id: String,
}

impl ReportFilter {
    /// Non-empty filters as query pairs, in a fixed order
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        [
            ("startDate", &self.start_date),
            ("endDate", &self.end_date),
            ("type", &self.tx_type),
            ("category", &self.category),
            ("fundId", &self.fund_id),
        ]
        .into_iter()
        .filter(|(_, value)| !value.trim().is_empty())
        .map(|(key, value)| (key, value.trim().to_string()))
        .collect()
    }

    /// Encoded query string without the leading `?`
    pub fn query_string(&self) -> String {
        self.query_pairs()
            .iter()
            .map(|(key, value)| format!("{}={}", key, urlencoding::encode(value)))
            .collect::<Vec<_>>()
            .join("&")
    }

    pub fn is_empty(&self) -> bool {
        self.query_pairs().is_empty()
    }
}

/// One line of the cash-flow table
#[derive(Debug, Clone)]
pub struct LedgerRow {
    pub transaction: Transaction,
    pub income: Decimal,
    pub expense: Decimal,
    /// Balance after this row, counted from the first row of the report
    pub balance: Decimal,
}

/// Sort by calendar date and accumulate the running balance
///
/// The sort is stable, so rows sharing a date keep the backend's order.
/// Rows with an unreadable date sort first.
pub fn running_balance(transactions: Vec<Transaction>) -> Vec<LedgerRow> {
    let mut sorted = transactions;
    sorted.sort_by_key(|tx| tx.date_naive());

    let mut balance = Decimal::ZERO;
    sorted
        .into_iter()
        .map(|tx| {
            let (income, expense) = match tx.tx_type {
                TransactionType::Income => (tx.amount, Decimal::ZERO),
                TransactionType::Expense => (Decimal::ZERO, tx.amount),
            };
            balance += income - expense;
            LedgerRow {
                transaction: tx,
                income,
                expense,
                balance,
            }
        })
        .collect()
}

/// Totals over already computed ledger rows
pub fn summarize(rows: &[LedgerRow]) -> ReportSummary {
    let total_income: Decimal = rows.iter().map(|r| r.income).sum();
    let total_expense: Decimal = rows.iter().map(|r| r.expense).sum();
    ReportSummary {
        total_income,
        total_expense,
        balance: total_income - total_expense,
        count: rows.len(),
    }
}

/// Export formats offered by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Pdf,
    Excel,
}

impl ExportFormat {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pdf" => Some(ExportFormat::Pdf),
            "excel" => Some(ExportFormat::Excel),
            _ => None,
        }
    }

    /// Path segment of `/reports/export/<segment>`
    pub fn segment(&self) -> &'static str {
        match self {
            ExportFormat::Pdf => "pdf",
            ExportFormat::Excel => "excel",
        }
    }

    pub fn default_filename(&self) -> &'static str {
        match self {
            ExportFormat::Pdf => "laporan-keuangan.pdf",
            ExportFormat::Excel => "laporan-keuangan.xlsx",
        }
    }

    pub fn default_content_type(&self) -> &'static str {
        match self {
            ExportFormat::Pdf => "application/pdf",
            ExportFormat::Excel => {
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            }
        }
    }
}
