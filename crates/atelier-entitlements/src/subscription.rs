//! Subscription health state machine
//!
//! A pure function of the stored fields; there is no stored state beyond
//! the subscription row itself.

use atelier_common::model::{Subscription, SubscriptionStatus};
use chrono::{DateTime, Datelike, Duration, TimeZone, Utc};

/// Whether the subscription is commercially usable right now.
///
/// Healthy means the billing-side active flag is set and either the status
/// is `Active`/`Trialing`, or it is `PastDue` with a known period end that
/// lies within the grace window. Any other status, or a past-due row with
/// no period end, is unhealthy.
pub fn is_subscription_healthy(
    sub: &Subscription,
    now: DateTime<Utc>,
    grace: Duration,
) -> bool {
    if !sub.active {
        return false;
    }
    match sub.status {
        SubscriptionStatus::Active | SubscriptionStatus::Trialing => true,
        SubscriptionStatus::PastDue => match sub.current_period_end {
            Some(period_end) => now - period_end <= grace,
            None => false,
        },
        SubscriptionStatus::Canceled | SubscriptionStatus::Unpaid => false,
    }
}

/// Half-open `[start of current month, start of next month)` window in UTC.
///
/// Monthly quotas reset at calendar-month boundaries, so a request created
/// in the last second of month M never counts toward month M+1.
pub fn month_window(now: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = Utc
        .with_ymd_and_hms(now.year(), now.month(), 1, 0, 0, 0)
        .unwrap();
    let (next_year, next_month) = if now.month() == 12 {
        (now.year() + 1, 1)
    } else {
        (now.year(), now.month() + 1)
    };
    let end = Utc.with_ymd_and_hms(next_year, next_month, 1, 0, 0, 0).unwrap();
    (start, end)
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn past_due(period_end: Option<DateTime<Utc>>) -> Subscription {
        Subscription {
            id: Uuid::new_v4(),
            tenant_id: Uuid::new_v4(),
            plan_code: "starter".into(),
            status: SubscriptionStatus::PastDue,
            active: true,
            current_period_start: None,
            current_period_end: period_end,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_active_and_trialing_are_healthy() {
        let now = Utc::now();
        let mut sub = past_due(None);

        sub.status = SubscriptionStatus::Active;
        assert!(is_subscription_healthy(&sub, now, Duration::days(7)));

        sub.status = SubscriptionStatus::Trialing;
        assert!(is_subscription_healthy(&sub, now, Duration::days(7)));
    }

    #[test]
    fn test_inactive_flag_overrides_status() {
        let now = Utc::now();
        let mut sub = past_due(None);
        sub.status = SubscriptionStatus::Active;
        sub.active = false;

        assert!(!is_subscription_healthy(&sub, now, Duration::days(7)));
    }

    #[test]
    fn test_past_due_within_grace_is_healthy() {
        let now = Utc::now();
        let sub = past_due(Some(now - Duration::days(3)));

        // Three days overdue: healthy with a 7-day grace, unhealthy with 2
        assert!(is_subscription_healthy(&sub, now, Duration::days(7)));
        assert!(!is_subscription_healthy(&sub, now, Duration::days(2)));
    }

    #[test]
    fn test_past_due_without_period_end_is_unhealthy() {
        let now = Utc::now();
        let sub = past_due(None);

        assert!(!is_subscription_healthy(&sub, now, Duration::days(7)));
    }

    #[test]
    fn test_canceled_and_unpaid_are_unhealthy() {
        let now = Utc::now();
        let mut sub = past_due(Some(now));

        sub.status = SubscriptionStatus::Canceled;
        assert!(!is_subscription_healthy(&sub, now, Duration::days(7)));

        sub.status = SubscriptionStatus::Unpaid;
        assert!(!is_subscription_healthy(&sub, now, Duration::days(7)));
    }

    #[test]
    fn test_month_window_boundaries() {
        let mid_march = Utc.with_ymd_and_hms(2024, 3, 15, 12, 30, 0).unwrap();
        let (start, end) = month_window(mid_march);

        assert_eq!(start, Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap());
        assert_eq!(end, Utc.with_ymd_and_hms(2024, 4, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_month_window_december_rollover() {
        let december = Utc.with_ymd_and_hms(2024, 12, 31, 23, 59, 59).unwrap();
        let (start, end) = month_window(december);

        assert_eq!(start, Utc.with_ymd_and_hms(2024, 12, 1, 0, 0, 0).unwrap());
        assert_eq!(end, Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_last_second_of_month_stays_in_its_month() {
        let last_second = Utc.with_ymd_and_hms(2024, 5, 31, 23, 59, 59).unwrap();
        let june = Utc.with_ymd_and_hms(2024, 6, 10, 0, 0, 0).unwrap();

        let (june_start, june_end) = month_window(june);
        assert!(last_second < june_start);
        assert!(last_second < june_end);
    }
}
