//! Shared read model behind the dashboard widgets.
//!
//! One polling loop fills [`DashboardData`]; every widget derives its view
//! from it so a refresh updates all panels at once.

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

use std::cmp::Reverse;

use super::billing::{BillingSummary, PlanRevenue, RENEWAL_WINDOW_DAYS, revenue_by_plan, summarize};
use crate::net::types::{ClientAccount, Subscription, SubscriptionStatus, Task, TaskStatus};
use crate::util::time::{DAY_MS, day_start_ms, parse_rfc3339_ms};

pub const RECENT_SIGNUPS_LIMIT: usize = 5;
pub const POLL_INTERVAL_MS: u32 = 10_000;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct DashboardData {
    pub clients: Vec<ClientAccount>,
    pub subscriptions: Vec<Subscription>,
    pub tasks: Vec<Task>,
    pub loaded: bool,
}

/// Headline numbers for the KPI strip.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Kpis {
    pub total_clients: usize,
    pub new_clients_30d: usize,
    pub active_subscriptions: usize,
    pub mrr_cents: i64,
    pub currency: String,
    pub open_tasks: usize,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TaskOverview {
    pub pending: usize,
    pub in_progress: usize,
    pub completed: usize,
    pub overdue: usize,
}

impl TaskOverview {
    #[must_use]
    pub fn total(&self) -> usize {
        self.pending + self.in_progress + self.completed
    }
}

impl DashboardData {
    #[must_use]
    pub fn billing(&self, now_ms: i64) -> BillingSummary {
        summarize(&self.subscriptions, now_ms, RENEWAL_WINDOW_DAYS)
    }

    #[must_use]
    pub fn kpis(&self, now_ms: i64) -> Kpis {
        let billing = self.billing(now_ms);
        let cutoff = now_ms - 30 * DAY_MS;
        Kpis {
            total_clients: self.clients.len(),
            new_clients_30d: self
                .clients
                .iter()
                .filter(|c| c.created_at.as_deref().and_then(parse_rfc3339_ms).is_some_and(|t| t >= cutoff))
                .count(),
            active_subscriptions: billing.count(SubscriptionStatus::Active),
            mrr_cents: billing.mrr_cents,
            currency: billing.currency,
            open_tasks: self.tasks.iter().filter(|t| t.status != TaskStatus::Completed).count(),
        }
    }

    #[must_use]
    pub fn revenue_by_plan(&self) -> Vec<PlanRevenue> {
        revenue_by_plan(&self.subscriptions)
    }

    /// Newest clients first; undated accounts are left out.
    #[must_use]
    pub fn recent_signups(&self, limit: usize) -> Vec<ClientAccount> {
        let mut dated: Vec<(i64, &ClientAccount)> = self
            .clients
            .iter()
            .filter_map(|c| Some((c.created_at.as_deref().and_then(parse_rfc3339_ms)?, c)))
            .collect();
        dated.sort_by_key(|(t, _)| Reverse(*t));
        dated.into_iter().take(limit).map(|(_, c)| c.clone()).collect()
    }

    /// Counts by status; a task is overdue when unfinished past its due date.
    #[must_use]
    pub fn task_overview(&self, now_ms: i64) -> TaskOverview {
        let mut overview = TaskOverview::default();
        for task in &self.tasks {
            match task.status {
                TaskStatus::Completed => overview.completed += 1,
                TaskStatus::InProgress => overview.in_progress += 1,
                TaskStatus::Pending | TaskStatus::Unknown => overview.pending += 1,
            }
            let due = task.due_date.as_deref().and_then(|d| {
                parse_rfc3339_ms(d).or_else(|| day_start_ms(d).map(|s| s + DAY_MS))
            });
            if task.status != TaskStatus::Completed && due.is_some_and(|d| d < now_ms) {
                overview.overdue += 1;
            }
        }
        overview
    }
}
