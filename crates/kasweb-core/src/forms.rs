//! Submitted HTML forms and their validation into backend payloads
//!
//! Every form arrives as plain strings. Validation trims input, parses
//! numbers and dates, and produces the request body the backend expects.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::str::FromStr;

use super::error::{CoreError, CoreResult};
use super::models::{
    CategoryPayload, Credentials, FundPayload, NewTransaction, RegisterRequest, StatusUpdate,
    UserPayload,
};
use super::types::{FundStatus, PaymentMethod, Role, TransactionType};

/// Category used for both legs of a balance transfer
pub const TRANSFER_CATEGORY: &str = "Transfer";
/// Event name used for both legs of a balance transfer
pub const TRANSFER_EVENT: &str = "Transfer Saldo";
/// Minimum length of a user password
pub const MIN_PASSWORD_LEN: usize = 6;

static EMAIL_CHECK: once_cell::sync::OnceCell<regex::Regex> = once_cell::sync::OnceCell::new();

/// Loose `local@domain.tld` check
pub fn is_valid_email(email: &str) -> bool {
    let re = EMAIL_CHECK.get_or_init(|| regex::Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());
    re.is_match(email)
}

fn required(value: &str, field: &str, message: &str) -> CoreResult<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(CoreError::validation(field, message));
    }
    Ok(value.to_string())
}

fn parse_date(value: &str) -> CoreResult<String> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map(|d| d.format("%Y-%m-%d").to_string())
        .map_err(|_| CoreError::invalid_format("date", "Tanggal tidak valid"))
}

fn parse_amount(value: &str) -> CoreResult<Decimal> {
    let value = value.trim();
    if value.is_empty() {
        return Err(CoreError::validation("amount", "Jumlah wajib diisi"));
    }
    Decimal::from_str(value).map_err(|_| CoreError::invalid_format("amount", "Jumlah tidak valid"))
}

fn parse_method(value: &str) -> PaymentMethod {
    value.parse().unwrap_or_default()
}

// ==================== Auth ====================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> CoreResult<Credentials> {
        let email = required(&self.email, "email", "Email wajib diisi")?;
        if self.password.is_empty() {
            return Err(CoreError::validation("password", "Password wajib diisi"));
        }
        Ok(Credentials {
            email,
            password: self.password.clone(),
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: String,
}

impl RegisterForm {
    pub fn validate(&self) -> CoreResult<RegisterRequest> {
        let name = required(&self.name, "name", "Nama wajib diisi")?;
        let email = required(&self.email, "email", "Email wajib diisi")?;
        if self.password.is_empty() {
            return Err(CoreError::validation("password", "Password wajib diisi"));
        }
        Ok(RegisterRequest {
            name,
            email,
            password: self.password.clone(),
            role: parse_assignable_role(&self.role)?,
        })
    }
}

/// Role picked in a form; empty means member
fn parse_assignable_role(value: &str) -> CoreResult<Role> {
    if value.trim().is_empty() {
        return Ok(Role::Member);
    }
    match value.parse::<Role>() {
        Ok(role) if Role::ASSIGNABLE.contains(&role) => Ok(role),
        _ => Err(CoreError::validation("role", "Role tidak valid")),
    }
}

// ==================== Transactions ====================

/// Income entry, expense submission and admin edit share this form
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TransactionForm {
    pub event_name: String,
    pub category: String,
    pub amount: String,
    pub date: String,
    pub description: String,
    pub fund_id: String,
    pub payment_method: String,
}

impl TransactionForm {
    /// Validate into a backend payload
    ///
    /// Income entries must name a fund; expense submissions may leave it
    /// empty, in which case no `fundId` is sent.
    pub fn validate(
        &self,
        tx_type: TransactionType,
        note_url: &str,
        require_fund: bool,
    ) -> CoreResult<NewTransaction> {
        let event_name = required(&self.event_name, "event_name", "Nama kegiatan wajib diisi")?;
        let category = required(&self.category, "category", "Kategori wajib dipilih")?;
        let fund_id = match self.fund_id.trim() {
            "" if require_fund => {
                return Err(CoreError::validation("fund_id", "Fund/Proker wajib dipilih"))
            }
            "" => None,
            id => Some(id.to_string()),
        };
        let date = parse_date(&self.date)?;
        let amount = parse_amount(&self.amount)?;
        if amount < Decimal::ZERO {
            return Err(CoreError::validation("amount", "Jumlah tidak boleh negatif"));
        }

        Ok(NewTransaction {
            tx_type,
            amount,
            category,
            description: self.description.trim().to_string(),
            event_name,
            date,
            fund_id,
            payment_method: parse_method(&self.payment_method),
            note_url: note_url.to_string(),
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RejectForm {
    pub reason: String,
}

impl RejectForm {
    pub fn into_update(self) -> StatusUpdate {
        StatusUpdate::reject(self.reason.trim())
    }
}

// ==================== Transfer ====================

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TransferForm {
    pub from_method: String,
    pub to_method: String,
    pub amount: String,
    pub date: String,
    pub description: String,
    pub fund_id: String,
}

impl Default for TransferForm {
    fn default() -> Self {
        Self {
            from_method: PaymentMethod::Cash.to_string(),
            to_method: PaymentMethod::Bank.to_string(),
            amount: String::new(),
            date: String::new(),
            description: String::new(),
            fund_id: String::new(),
        }
    }
}

/// The two postings a transfer is made of, in submission order
#[derive(Debug, Clone, PartialEq)]
pub struct TransferPlan {
    /// Expense leaving the source method
    pub outgoing: NewTransaction,
    /// Income arriving at the destination method
    pub incoming: NewTransaction,
}

impl TransferForm {
    /// Same form with source and destination exchanged
    pub fn swapped(&self) -> Self {
        Self {
            from_method: self.to_method.clone(),
            to_method: self.from_method.clone(),
            ..self.clone()
        }
    }

    pub fn plan(&self) -> CoreResult<TransferPlan> {
        let from = parse_method(&self.from_method);
        let to = parse_method(&self.to_method);
        if from == to {
            return Err(CoreError::validation("to_method", "Sumber dan tujuan tidak boleh sama!"));
        }

        let amount = Decimal::from_str(self.amount.trim()).unwrap_or_default();
        if amount <= Decimal::ZERO {
            return Err(CoreError::validation("amount", "Jumlah harus lebih dari 0!"));
        }
        let date = parse_date(&self.date)?;

        let description = match self.description.trim() {
            "" => format!("Transfer dari {} ke {}", from.name(), to.name()),
            desc => desc.to_string(),
        };
        let fund_id = Some(self.fund_id.trim().to_string()).filter(|id| !id.is_empty());

        let leg = |tx_type: TransactionType, method: PaymentMethod, suffix: &str| NewTransaction {
            tx_type,
            amount,
            category: TRANSFER_CATEGORY.to_string(),
            description: format!("{} ({})", description, suffix),
            event_name: TRANSFER_EVENT.to_string(),
            date: date.clone(),
            fund_id: fund_id.clone(),
            payment_method: method,
            note_url: String::new(),
        };

        Ok(TransferPlan {
            outgoing: leg(TransactionType::Expense, from, "Pengeluaran"),
            incoming: leg(TransactionType::Income, to, "Pemasukan"),
        })
    }
}

// ==================== Catalog ====================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CategoryForm {
    pub name: String,
}

impl CategoryForm {
    pub fn for_create(&self) -> CoreResult<CategoryPayload> {
        let name = required(&self.name, "name", "Kategori tidak boleh kosong")?;
        Ok(CategoryPayload { name })
    }

    pub fn for_update(&self) -> CoreResult<CategoryPayload> {
        let name = required(&self.name, "name", "Nama kategori tidak boleh kosong")?;
        Ok(CategoryPayload { name })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FundForm {
    pub name: String,
    pub description: String,
    pub status: String,
}

impl FundForm {
    pub fn for_create(&self) -> CoreResult<FundPayload> {
        Ok(FundPayload {
            name: required(&self.name, "name", "Nama proker/fund wajib diisi")?,
            description: self.description.trim().to_string(),
            status: None,
        })
    }

    pub fn for_update(&self) -> CoreResult<FundPayload> {
        let status = match self.status.trim() {
            "" => FundStatus::Active,
            s => s
                .parse()
                .map_err(|_| CoreError::validation("status", "Status tidak valid"))?,
        };
        Ok(FundPayload {
            status: Some(status),
            ..self.for_create()?
        })
    }
}

// ==================== Users ====================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UserForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: String,
}

impl UserForm {
    /// Validate for create (`creating`) or update
    ///
    /// On update an empty password means "keep the current one".
    pub fn validate(&self, creating: bool) -> CoreResult<UserPayload> {
        let name = required(&self.name, "name", "Nama wajib diisi")?;
        let email = required(&self.email, "email", "Email wajib diisi")?;
        if !is_valid_email(&email) {
            return Err(CoreError::invalid_format("email", "Format email tidak valid"));
        }

        let password = if self.password.is_empty() && !creating {
            None
        } else if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(CoreError::validation(
                "password",
                format!("Password minimal {} karakter", MIN_PASSWORD_LEN),
            ));
        } else {
            Some(self.password.clone())
        };

        Ok(UserPayload {
            name,
            email,
            password,
            role: parse_assignable_role(&self.role)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn income_form() -> TransactionForm {
        TransactionForm {
            event_name: " Ibadah Minggu ".to_string(),
            category: "Persembahan".to_string(),
            amount: "1500000".to_string(),
            date: "2025-03-02".to_string(),
            description: String::new(),
            fund_id: "f1".to_string(),
            payment_method: "bank".to_string(),
        }
    }

    #[test]
    fn test_income_form_valid() {
        let tx = income_form().validate(TransactionType::Income, "", true).unwrap();
        assert_eq!(tx.event_name, "Ibadah Minggu");
        assert_eq!(tx.amount, dec!(1500000));
        assert_eq!(tx.fund_id.as_deref(), Some("f1"));
        assert_eq!(tx.payment_method, PaymentMethod::Bank);
        assert_eq!(tx.note_url, "");
    }

    #[test]
    fn test_income_requires_fund() {
        let mut form = income_form();
        form.fund_id = String::new();
        let err = form.validate(TransactionType::Income, "", true).unwrap_err();
        assert_eq!(err.field(), "fund_id");

        let tx = form.validate(TransactionType::Expense, "", false).unwrap();
        assert!(tx.fund_id.is_none());
    }

    #[test]
    fn test_amount_rules() {
        let mut form = income_form();
        form.amount = "0".to_string();
        assert!(form.validate(TransactionType::Income, "", true).is_ok());

        form.amount = "-5".to_string();
        assert_eq!(
            form.validate(TransactionType::Income, "", true).unwrap_err().to_string(),
            "Jumlah tidak boleh negatif"
        );

        form.amount = "lima".to_string();
        assert_eq!(
            form.validate(TransactionType::Income, "", true).unwrap_err().field(),
            "amount"
        );
    }

    #[test]
    fn test_bad_date_rejected() {
        let mut form = income_form();
        form.date = "02/03/2025".to_string();
        assert_eq!(
            form.validate(TransactionType::Income, "", true).unwrap_err().field(),
            "date"
        );
    }

    #[test]
    fn test_expense_keeps_note_url() {
        let tx = income_form()
            .validate(TransactionType::Expense, "/uploads/nota.jpg", false)
            .unwrap();
        assert_eq!(tx.tx_type, TransactionType::Expense);
        assert_eq!(tx.note_url, "/uploads/nota.jpg");
    }

    fn transfer_form() -> TransferForm {
        TransferForm {
            amount: "250000".to_string(),
            date: "2025-04-01".to_string(),
            fund_id: "f1".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_transfer_plan_legs() {
        let plan = transfer_form().plan().unwrap();
        assert_eq!(plan.outgoing.tx_type, TransactionType::Expense);
        assert_eq!(plan.outgoing.payment_method, PaymentMethod::Cash);
        assert_eq!(plan.outgoing.description, "Transfer dari Cash ke Bank (Pengeluaran)");
        assert_eq!(plan.incoming.tx_type, TransactionType::Income);
        assert_eq!(plan.incoming.payment_method, PaymentMethod::Bank);
        assert_eq!(plan.incoming.description, "Transfer dari Cash ke Bank (Pemasukan)");
        for leg in [&plan.outgoing, &plan.incoming] {
            assert_eq!(leg.category, TRANSFER_CATEGORY);
            assert_eq!(leg.event_name, TRANSFER_EVENT);
            assert_eq!(leg.amount, dec!(250000));
        }
    }

    #[test]
    fn test_transfer_swapped_default_description() {
        let plan = transfer_form().swapped().plan().unwrap();
        assert_eq!(plan.outgoing.payment_method, PaymentMethod::Bank);
        assert_eq!(plan.incoming.description, "Transfer dari Bank ke Cash (Pemasukan)");
    }

    #[test]
    fn test_transfer_custom_description() {
        let mut form = transfer_form();
        form.description = "Setor kas".to_string();
        let plan = form.plan().unwrap();
        assert_eq!(plan.outgoing.description, "Setor kas (Pengeluaran)");
    }

    #[test]
    fn test_transfer_rejections() {
        let mut form = transfer_form();
        form.to_method = "cash".to_string();
        assert_eq!(form.plan().unwrap_err().to_string(), "Sumber dan tujuan tidak boleh sama!");

        for amount in ["0", "-10", "", "abc"] {
            let mut form = transfer_form();
            form.amount = amount.to_string();
            assert_eq!(form.plan().unwrap_err().to_string(), "Jumlah harus lebih dari 0!");
        }
    }

    #[test]
    fn test_category_form_messages() {
        let form = CategoryForm { name: "   ".to_string() };
        assert_eq!(form.for_create().unwrap_err().to_string(), "Kategori tidak boleh kosong");
        assert_eq!(form.for_update().unwrap_err().to_string(), "Nama kategori tidak boleh kosong");
        let form = CategoryForm { name: " Konsumsi ".to_string() };
        assert_eq!(form.for_create().unwrap().name, "Konsumsi");
    }

    #[test]
    fn test_fund_form() {
        let form = FundForm::default();
        assert_eq!(form.for_create().unwrap_err().to_string(), "Nama proker/fund wajib diisi");

        let form = FundForm {
            name: "Retreat".to_string(),
            description: "Retreat pemuda".to_string(),
            status: "archived".to_string(),
        };
        assert!(form.for_create().unwrap().status.is_none());
        assert_eq!(form.for_update().unwrap().status, Some(FundStatus::Archived));
    }

    #[test]
    fn test_user_form_validation() {
        let mut form = UserForm {
            name: "Budi".to_string(),
            email: "budi@gkjw.com".to_string(),
            password: "rahasia".to_string(),
            role: "viewer".to_string(),
        };
        let payload = form.validate(true).unwrap();
        assert_eq!(payload.role, Role::Viewer);
        assert_eq!(payload.password.as_deref(), Some("rahasia"));

        form.password = String::new();
        assert!(form.validate(true).is_err());
        assert!(form.validate(false).unwrap().password.is_none());

        form.password = "abc".to_string();
        assert_eq!(form.validate(false).unwrap_err().field(), "password");

        form.password = String::new();
        form.email = "budi-at-gkjw".to_string();
        assert_eq!(form.validate(false).unwrap_err().field(), "email");

        form.email = "budi@gkjw.com".to_string();
        form.role = "guest".to_string();
        assert_eq!(form.validate(false).unwrap_err().field(), "role");
    }

    #[test]
    fn test_register_defaults_to_member() {
        let form = RegisterForm {
            name: "Sari".to_string(),
            email: "sari@gkjw.com".to_string(),
            password: "x".to_string(),
            role: String::new(),
        };
        assert_eq!(form.validate().unwrap().role, Role::Member);
    }

    #[test]
    fn test_login_requires_fields() {
        let form = LoginForm {
            email: "admin@gkjw.com".to_string(),
            password: String::new(),
        };
        assert_eq!(form.validate().unwrap_err().field(), "password");
    }

    #[test]
    fn test_email_check() {
        assert!(is_valid_email("admin@gkjw.com"));
        assert!(!is_valid_email("admin@gkjw"));
        assert!(!is_valid_email("a b@c.d"));
    }
}
