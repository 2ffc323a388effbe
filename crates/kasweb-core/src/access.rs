//! Menu entries and route guards
//!
//! The sidebar and the guards read the same table, so a page is listed in
//! the menu exactly when the current role may open it.

use super::types::Role;

/// A dashboard section reachable from the sidebar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Section {
    pub path: &'static str,
    pub label: &'static str,
    pub icon: &'static str,
    /// Lowest role allowed to open the section
    pub min_role: Role,
}

pub const SECTIONS: &[Section] = &[
    Section { path: "/dashboard", label: "Dashboard", icon: "🏠", min_role: Role::Guest },
    Section { path: "/dashboard/transactions", label: "Transaksi", icon: "📋", min_role: Role::Member },
    Section { path: "/dashboard/income", label: "Input Pemasukan", icon: "💵", min_role: Role::Admin },
    Section { path: "/dashboard/upload", label: "Input Pengeluaran", icon: "📤", min_role: Role::Member },
    Section { path: "/dashboard/transfer", label: "Transfer Saldo", icon: "🔄", min_role: Role::Admin },
    Section { path: "/dashboard/reports", label: "Laporan", icon: "📈", min_role: Role::Guest },
    Section { path: "/dashboard/categories", label: "Kelola Kategori", icon: "📁", min_role: Role::Admin },
    Section { path: "/dashboard/funds", label: "Fund/Proker", icon: "💰", min_role: Role::Admin },
    Section { path: "/dashboard/users", label: "Kelola User", icon: "👥", min_role: Role::Admin },
];

/// Actions on a transaction that need more than read access
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Approve,
    Reject,
    EditTransaction,
}

impl Action {
    pub fn min_role(&self) -> Role {
        match self {
            Action::Approve | Action::Reject | Action::EditTransaction => Role::Admin,
        }
    }
}

/// Outcome of a guard check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Allow,
    /// No session; go sign in
    Login,
    /// Signed in but the role is too low
    Denied,
}

impl Access {
    /// Where a refused request is sent
    pub fn redirect_target(&self) -> Option<&'static str> {
        match self {
            Access::Allow => None,
            Access::Login => Some("/login"),
            Access::Denied => Some("/dashboard"),
        }
    }
}

/// Section owning `path`, by longest matching prefix
pub fn section_for(path: &str) -> Option<&'static Section> {
    SECTIONS
        .iter()
        .filter(|s| path == s.path || path.starts_with(&format!("{}/", s.path)))
        .max_by_key(|s| s.path.len())
}

fn decide(required: Role, role: Role, signed_in: bool) -> Access {
    if role >= required {
        Access::Allow
    } else if signed_in {
        Access::Denied
    } else {
        Access::Login
    }
}

/// Check whether `role` may open `path`
///
/// Paths outside the dashboard are not guarded here.
pub fn check_path(path: &str, role: Role, signed_in: bool) -> Access {
    match section_for(path) {
        Some(section) => decide(section.min_role, role, signed_in),
        None => Access::Allow,
    }
}

/// Check a section's own requirement
pub fn check_section(section: &Section, role: Role, signed_in: bool) -> Access {
    decide(section.min_role, role, signed_in)
}

pub fn check_action(action: Action, role: Role, signed_in: bool) -> Access {
    decide(action.min_role(), role, signed_in)
}

pub fn can(action: Action, role: Role) -> bool {
    role >= action.min_role()
}

/// Sidebar entries visible to `role`, in menu order
pub fn menu_for(role: Role) -> impl Iterator<Item = &'static Section> {
    SECTIONS.iter().filter(move |s| role >= s.min_role)
}
