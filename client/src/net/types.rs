//! Read models for backend-owned documents.
//!
//! DESIGN
//! ======
//! The backend owns every schema. These structs decode leniently
//! (`#[serde(default)]` everywhere, `other` catch-all enum variants) so a
//! document with missing or newer fields still renders instead of failing the
//! whole list.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

/// A customer account (`users` document with `role == "client"`).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClientAccount {
    pub id: String,
    pub display_name: String,
    pub email: String,
    pub company_name: Option<String>,
    pub phone: Option<String>,
    pub role: String,
    /// RFC 3339 signup time.
    pub created_at: Option<String>,
    pub subscription_status: Option<SubscriptionStatus>,
    pub disabled: bool,
    pub property_count: i64,
}

impl ClientAccount {
    /// Name to show in lists: display name, then company, then email.
    #[must_use]
    pub fn label(&self) -> &str {
        if !self.display_name.trim().is_empty() {
            return &self.display_name;
        }
        match self.company_name.as_deref() {
            Some(company) if !company.trim().is_empty() => company,
            _ => &self.email,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Property {
    pub id: String,
    pub owner_id: String,
    pub name: String,
    pub address: String,
    pub city: Option<String>,
    pub units: i64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatus {
    Active,
    Trialing,
    PastDue,
    Canceled,
    Incomplete,
    Unpaid,
    #[default]
    #[serde(other)]
    Unknown,
}

impl SubscriptionStatus {
    pub const ALL: [Self; 6] =
        [Self::Active, Self::Trialing, Self::PastDue, Self::Canceled, Self::Incomplete, Self::Unpaid];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Trialing => "trialing",
            Self::PastDue => "past_due",
            Self::Canceled => "canceled",
            Self::Incomplete => "incomplete",
            Self::Unpaid => "unpaid",
            Self::Unknown => "unknown",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Trialing => "Trialing",
            Self::PastDue => "Past due",
            Self::Canceled => "Canceled",
            Self::Incomplete => "Incomplete",
            Self::Unpaid => "Unpaid",
            Self::Unknown => "Unknown",
        }
    }

    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == raw)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BillingInterval {
    #[default]
    Month,
    Year,
    #[serde(other)]
    Unknown,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Subscription {
    pub id: String,
    pub user_id: String,
    pub customer_email: Option<String>,
    pub plan: String,
    pub status: SubscriptionStatus,
    pub amount_cents: i64,
    pub currency: String,
    pub interval: BillingInterval,
    pub current_period_end: Option<String>,
    pub created_at: Option<String>,
    pub cancel_at_period_end: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
    #[serde(other)]
    Unknown,
}

/// One line of a task checklist. Completion rules live in
/// `state::checklist`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChecklistItem {
    pub id: String,
    pub label: String,
    pub completed: bool,
    pub requires_photo: bool,
    pub proof_url: Option<String>,
    pub completed_at: Option<String>,
    pub completed_by: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Task {
    pub id: String,
    pub property_id: String,
    pub property_name: Option<String>,
    pub owner_id: String,
    pub title: String,
    pub status: TaskStatus,
    pub due_date: Option<String>,
    pub assignee_name: Option<String>,
    pub checklist: Vec<ChecklistItem>,
    pub completed_at: Option<String>,
}

/// Guest details attached to a booking document.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Booking {
    pub id: String,
    pub property_id: String,
    pub property_name: Option<String>,
    pub guest_name: String,
    pub guest_email: Option<String>,
    pub guest_phone: Option<String>,
    pub guest_count: i64,
    /// `YYYY-MM-DD`.
    pub check_in: Option<String>,
    /// `YYYY-MM-DD`.
    pub check_out: Option<String>,
    pub notes: Option<String>,
}
