//! Client-list filters for the super-admin console.

#[cfg(test)]
#[path = "clients_test.rs"]
mod clients_test;

use std::cmp::Reverse;

use crate::net::types::{ClientAccount, SubscriptionStatus};
use crate::util::time::parse_rfc3339_ms;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ClientSort {
    #[default]
    Newest,
    Oldest,
    NameAsc,
    NameDesc,
}

impl ClientSort {
    pub const ALL: [Self; 4] = [Self::Newest, Self::Oldest, Self::NameAsc, Self::NameDesc];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Newest => "newest",
            Self::Oldest => "oldest",
            Self::NameAsc => "name_asc",
            Self::NameDesc => "name_desc",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Newest => "Newest first",
            Self::Oldest => "Oldest first",
            Self::NameAsc => "Name A-Z",
            Self::NameDesc => "Name Z-A",
        }
    }

    #[must_use]
    pub fn parse(raw: &str) -> Self {
        Self::ALL.into_iter().find(|s| s.as_str() == raw).unwrap_or_default()
    }
}

/// Search box, status filter and sort order of the client list.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClientFilter {
    pub query: String,
    /// `None` shows every status, including clients without a subscription.
    pub status: Option<SubscriptionStatus>,
    pub sort: ClientSort,
}

impl ClientFilter {
    /// Case-insensitive match on name, email or company.
    #[must_use]
    pub fn matches(&self, client: &ClientAccount) -> bool {
        if let Some(status) = self.status
            && client.subscription_status != Some(status)
        {
            return false;
        }
        let needle = self.query.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        [Some(client.display_name.as_str()), Some(client.email.as_str()), client.company_name.as_deref()]
            .into_iter()
            .flatten()
            .any(|hay| hay.to_lowercase().contains(&needle))
    }

    /// Filtered and sorted copy of `clients`.
    #[must_use]
    pub fn apply(&self, clients: &[ClientAccount]) -> Vec<ClientAccount> {
        let mut rows: Vec<ClientAccount> = clients.iter().filter(|c| self.matches(c)).cloned().collect();
        let signup = |c: &ClientAccount| c.created_at.as_deref().and_then(parse_rfc3339_ms).unwrap_or(i64::MIN);
        match self.sort {
            ClientSort::Newest => rows.sort_by_key(|c| Reverse(signup(c))),
            ClientSort::Oldest => rows.sort_by_key(signup),
            ClientSort::NameAsc => rows.sort_by_key(|c| c.label().to_lowercase()),
            ClientSort::NameDesc => rows.sort_by_key(|c| Reverse(c.label().to_lowercase())),
        }
        rows
    }
}

/// Only `role == "client"` accounts belong in the list.
#[must_use]
pub fn only_clients(accounts: Vec<ClientAccount>) -> Vec<ClientAccount> {
    accounts.into_iter().filter(|a| a.role.eq_ignore_ascii_case("client")).collect()
}
