//! Subscription filters and billing summaries.
//!
//! DESIGN
//! ======
//! Monthly recurring revenue counts `active` and `past_due` subscriptions
//! (a past-due customer is still billed); `trialing` and every terminal
//! status are excluded. Yearly plans contribute a twelfth of their amount,
//! rounded to the nearest cent.
//!
//! TRADE-OFFS
//! ==========
//! Amounts are summed without currency conversion; the summary reports the
//! currency of the first subscription. Mixed-currency tenants would need a
//! per-currency breakdown.

#[cfg(test)]
#[path = "billing_test.rs"]
mod billing_test;

use std::cmp::Reverse;
use std::collections::BTreeMap;

use crate::net::types::{BillingInterval, Subscription, SubscriptionStatus};
use crate::util::time::{DAY_MS, day_start_ms, parse_rfc3339_ms};

pub const DEFAULT_CURRENCY: &str = "usd";
pub const RENEWAL_WINDOW_DAYS: i64 = 30;

/// Status and created-at range filter for the subscriptions table.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SubscriptionFilter {
    pub status: Option<SubscriptionStatus>,
    /// Inclusive `YYYY-MM-DD`; empty means unbounded.
    pub from_day: String,
    /// Inclusive `YYYY-MM-DD`; empty means unbounded.
    pub to_day: String,
}

impl SubscriptionFilter {
    #[must_use]
    pub fn matches(&self, sub: &Subscription) -> bool {
        if self.status.is_some_and(|s| s != sub.status) {
            return false;
        }
        let from = day_start_ms(&self.from_day);
        let to = day_start_ms(&self.to_day).map(|start| start + DAY_MS);
        if from.is_none() && to.is_none() {
            return true;
        }
        let Some(created) = sub.created_at.as_deref().and_then(parse_rfc3339_ms) else {
            return false;
        };
        from.is_none_or(|f| created >= f) && to.is_none_or(|t| created < t)
    }

    /// Matching subscriptions, newest first.
    #[must_use]
    pub fn apply(&self, subs: &[Subscription]) -> Vec<Subscription> {
        let mut rows: Vec<Subscription> = subs.iter().filter(|s| self.matches(s)).cloned().collect();
        rows.sort_by_key(|s| Reverse(s.created_at.as_deref().and_then(parse_rfc3339_ms).unwrap_or(i64::MIN)));
        rows
    }
}

#[must_use]
pub fn counts_toward_revenue(status: SubscriptionStatus) -> bool {
    matches!(status, SubscriptionStatus::Active | SubscriptionStatus::PastDue)
}

/// Amount normalized to one month.
#[must_use]
pub fn monthly_amount_cents(sub: &Subscription) -> i64 {
    match sub.interval {
        BillingInterval::Year => (sub.amount_cents + 6).div_euclid(12),
        BillingInterval::Month | BillingInterval::Unknown => sub.amount_cents,
    }
}

#[must_use]
pub fn mrr_cents(subs: &[Subscription]) -> i64 {
    subs.iter().filter(|s| counts_toward_revenue(s.status)).map(monthly_amount_cents).sum()
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlanRevenue {
    pub plan: String,
    pub subscribers: usize,
    pub mrr_cents: i64,
}

/// Revenue-bearing subscriptions grouped by plan, largest first.
#[must_use]
pub fn revenue_by_plan(subs: &[Subscription]) -> Vec<PlanRevenue> {
    let mut by_plan: BTreeMap<String, PlanRevenue> = BTreeMap::new();
    for sub in subs.iter().filter(|s| counts_toward_revenue(s.status)) {
        let plan = if sub.plan.trim().is_empty() { "Unnamed plan".to_owned() } else { sub.plan.clone() };
        let entry = by_plan
            .entry(plan.clone())
            .or_insert_with(|| PlanRevenue { plan, subscribers: 0, mrr_cents: 0 });
        entry.subscribers += 1;
        entry.mrr_cents += monthly_amount_cents(sub);
    }
    let mut rows: Vec<PlanRevenue> = by_plan.into_values().collect();
    rows.sort_by_key(|r| Reverse(r.mrr_cents));
    rows
}

/// Subscriptions that will bill again within `days` of `now_ms`, soonest first.
#[must_use]
pub fn upcoming_renewals(subs: &[Subscription], now_ms: i64, days: i64) -> Vec<Subscription> {
    let horizon = now_ms + days * DAY_MS;
    let mut rows: Vec<(i64, Subscription)> = subs
        .iter()
        .filter(|s| {
            !s.cancel_at_period_end
                && matches!(
                    s.status,
                    SubscriptionStatus::Active | SubscriptionStatus::Trialing | SubscriptionStatus::PastDue
                )
        })
        .filter_map(|s| {
            let end = s.current_period_end.as_deref().and_then(parse_rfc3339_ms)?;
            (end >= now_ms && end <= horizon).then(|| (end, s.clone()))
        })
        .collect();
    rows.sort_by_key(|(end, _)| *end);
    rows.into_iter().map(|(_, s)| s).collect()
}

#[derive(Clone, Debug, PartialEq)]
pub struct BillingSummary {
    pub total: usize,
    /// Every known status, in display order, with zero counts kept.
    pub by_status: Vec<(SubscriptionStatus, usize)>,
    pub mrr_cents: i64,
    pub currency: String,
    pub renewals: Vec<Subscription>,
}

impl BillingSummary {
    #[must_use]
    pub fn count(&self, status: SubscriptionStatus) -> usize {
        self.by_status.iter().find(|(s, _)| *s == status).map_or(0, |(_, n)| *n)
    }
}

#[must_use]
pub fn summarize(subs: &[Subscription], now_ms: i64, renewal_window_days: i64) -> BillingSummary {
    let by_status = SubscriptionStatus::ALL
        .into_iter()
        .map(|status| (status, subs.iter().filter(|s| s.status == status).count()))
        .collect();
    let currency = subs
        .iter()
        .map(|s| s.currency.trim())
        .find(|c| !c.is_empty())
        .unwrap_or(DEFAULT_CURRENCY)
        .to_ascii_lowercase();
    BillingSummary {
        total: subs.len(),
        by_status,
        mrr_cents: mrr_cents(subs),
        currency,
        renewals: upcoming_renewals(subs, now_ms, renewal_window_days),
    }
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// `$1,234.50` for dollars, `1,234.50 EUR` otherwise.
#[must_use]
pub fn format_cents(cents: i64, currency: &str) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    let amount = format!("{}.{:02}", group_thousands(abs / 100), abs % 100);
    let code = currency.trim().to_ascii_uppercase();
    match code.as_str() {
        "" | "USD" => format!("{sign}${amount}"),
        _ => format!("{sign}{amount} {code}"),
    }
}
