//! Data models exchanged with the finance backend
//!
//! Entities are owned by the backend; the dashboard only keeps transient
//! copies for rendering. Field names follow the backend's camelCase JSON.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::types::{
    CategoryKind, FundStatus, PaymentMethod, Role, TransactionStatus, TransactionType,
};

// ==================== Entities ====================

/// Account of a person allowed to use the dashboard
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub created_at: String,
}

/// A single income or expense entry
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Transaction {
    pub id: String,
    #[serde(rename = "type")]
    pub tx_type: TransactionType,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub category: String,
    pub description: String,
    /// Name of the activity or event (e.g. "Ibadah Minggu")
    pub event_name: String,
    /// RFC 3339 timestamp or plain `YYYY-MM-DD`
    pub date: String,
    pub fund_id: String,
    pub fund: Option<Fund>,
    pub payment_method: PaymentMethod,
    pub status: TransactionStatus,
    /// Link to the uploaded receipt, if any
    pub note_url: Option<String>,
    pub rejection_reason: Option<String>,
    pub created_by: String,
    pub created_by_user: Option<User>,
    pub created_at: String,
    pub updated_at: String,
}

impl Transaction {
    /// Calendar date of the transaction
    pub fn date_naive(&self) -> Option<NaiveDate> {
        let prefix = self.date.get(..10)?;
        NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok()
    }

    /// Amount with the sign of its effect on the balance
    pub fn signed_amount(&self) -> Decimal {
        match self.tx_type {
            TransactionType::Income => self.amount,
            TransactionType::Expense => -self.amount,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.status == TransactionStatus::Pending
    }

    /// Receipt link when one was uploaded
    pub fn note_link(&self) -> Option<&str> {
        self.note_url.as_deref().filter(|url| !url.trim().is_empty())
    }

    pub fn rejection(&self) -> Option<&str> {
        self.rejection_reason.as_deref().filter(|r| !r.trim().is_empty())
    }

    /// Display name of the creator, empty when the backend did not embed it
    pub fn creator_name(&self) -> &str {
        self.created_by_user
            .as_ref()
            .map(|u| u.name.as_str())
            .unwrap_or("")
    }

    pub fn fund_name(&self) -> Option<&str> {
        self.fund.as_ref().map(|f| f.name.as_str())
    }
}

/// Transaction category label
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Category {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: CategoryKind,
}

/// Budget bucket or program (proker) transactions are attributed to
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Fund {
    pub id: String,
    pub name: String,
    pub description: String,
    pub status: FundStatus,
    pub created_at: String,
    pub updated_at: String,
}

// ==================== Aggregates ====================

/// Headline numbers for the dashboard cards
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DashboardStats {
    #[serde(with = "rust_decimal::serde::float")]
    pub total_income: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_expense: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub current_balance: Decimal,
    pub pending_transactions: i64,
    #[serde(with = "rust_decimal::serde::float")]
    pub monthly_income: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub monthly_expense: Decimal,
}

/// Income and expense totals of one month
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MonthlyData {
    /// Label such as "Jan 2025"
    pub month: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub income: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub expense: Decimal,
}

/// Share of one category in the month's total
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryData {
    pub category: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub percentage: f64,
}

/// Totals of a report query
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReportSummary {
    #[serde(with = "rust_decimal::serde::float")]
    pub total_income: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_expense: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub balance: Decimal,
    pub count: usize,
}

/// Approved transactions matching a report filter
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Report {
    pub transactions: Vec<Transaction>,
    /// Backend-computed totals, absent on older backends
    pub summary: Option<ReportSummary>,
}

/// Stored receipt returned by the upload endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadedFile {
    pub url: String,
    pub filename: String,
}

/// Result of a successful login
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: User,
}

// ==================== Request payloads ====================

/// Login credentials
#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Self-service account creation
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

/// Body of `POST /transactions` and `PUT /transactions/:id`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTransaction {
    #[serde(rename = "type")]
    pub tx_type: TransactionType,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub category: String,
    pub description: String,
    pub event_name: String,
    /// `YYYY-MM-DD`
    pub date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fund_id: Option<String>,
    pub payment_method: PaymentMethod,
    pub note_url: String,
}

/// Body of `PUT /transactions/:id/status`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusUpdate {
    pub status: TransactionStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,
}

impl StatusUpdate {
    pub fn approve() -> Self {
        Self {
            status: TransactionStatus::Approved,
            rejection_reason: None,
        }
    }

    pub fn reject(reason: impl Into<String>) -> Self {
        Self {
            status: TransactionStatus::Rejected,
            rejection_reason: Some(reason.into()),
        }
    }
}

/// Body of category create/update
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryPayload {
    pub name: String,
}

/// Body of fund create/update; status is only sent on update
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FundPayload {
    pub name: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<FundStatus>,
}

/// Body of user create/update; an absent password leaves it unchanged
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserPayload {
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    pub role: Role,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_transaction_from_backend_json() {
        let json = r#"{
            "id": "7f1c",
            "fundId": "a1",
            "fund": {"id": "a1", "name": "Dana Kas", "description": "", "status": "active"},
            "type": "income",
            "paymentMethod": "bank",
            "amount": 1500000,
            "category": "Persembahan",
            "description": "Kolekte",
            "eventName": "Ibadah Minggu",
            "date": "2025-03-02T00:00:00Z",
            "createdBy": "u1",
            "createdByUser": {"id": "u1", "name": "Bendahara", "email": "admin@gkjw.com", "role": "admin"},
            "status": "approved",
            "noteUrl": "",
            "createdAt": "2025-03-02T08:00:00Z",
            "updatedAt": "2025-03-02T08:00:00Z"
        }"#;
        let tx: Transaction = serde_json::from_str(json).unwrap();
        assert_eq!(tx.tx_type, TransactionType::Income);
        assert_eq!(tx.amount, dec!(1500000));
        assert_eq!(tx.payment_method, PaymentMethod::Bank);
        assert_eq!(tx.date_naive(), NaiveDate::from_ymd_opt(2025, 3, 2));
        assert_eq!(tx.creator_name(), "Bendahara");
        assert_eq!(tx.fund_name(), Some("Dana Kas"));
        assert!(tx.note_link().is_none());
    }

    #[test]
    fn test_transaction_minimal_json_uses_defaults() {
        let tx: Transaction =
            serde_json::from_str(r#"{"id": "1", "type": "expense", "amount": 12.5, "date": "2025-01-05"}"#)
                .unwrap();
        assert_eq!(tx.status, TransactionStatus::Pending);
        assert_eq!(tx.payment_method, PaymentMethod::Cash);
        assert_eq!(tx.signed_amount(), dec!(-12.5));
        assert_eq!(tx.date_naive(), NaiveDate::from_ymd_opt(2025, 1, 5));
    }

    #[test]
    fn test_bad_date_is_none() {
        let tx = Transaction {
            date: "yesterday".to_string(),
            ..Default::default()
        };
        assert!(tx.date_naive().is_none());
    }

    #[test]
    fn test_new_transaction_serializes_amount_as_number() {
        let payload = NewTransaction {
            tx_type: TransactionType::Expense,
            amount: dec!(50000),
            category: "Konsumsi".to_string(),
            description: String::new(),
            event_name: "Rapat".to_string(),
            date: "2025-02-01".to_string(),
            fund_id: None,
            payment_method: PaymentMethod::Cash,
            note_url: String::new(),
        };
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["type"], "expense");
        assert_eq!(value["amount"], serde_json::json!(50000.0));
        assert_eq!(value["eventName"], "Rapat");
        assert!(value.get("fundId").is_none());
    }

    #[test]
    fn test_status_update_payloads() {
        let approve = serde_json::to_value(StatusUpdate::approve()).unwrap();
        assert_eq!(approve, serde_json::json!({"status": "approved"}));

        let reject = serde_json::to_value(StatusUpdate::reject("Nota tidak jelas")).unwrap();
        assert_eq!(
            reject,
            serde_json::json!({"status": "rejected", "rejectionReason": "Nota tidak jelas"})
        );
    }

    #[test]
    fn test_user_payload_omits_empty_password() {
        let payload = UserPayload {
            name: "Budi".to_string(),
            email: "budi@gkjw.com".to_string(),
            password: None,
            role: Role::Member,
        };
        let value = serde_json::to_value(payload).unwrap();
        assert!(value.get("password").is_none());
        assert_eq!(value["role"], "member");
    }
}
