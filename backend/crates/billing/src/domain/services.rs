//! Domain services
//!
//! Pricing and subscription extension rules.

use chrono::{DateTime, Utc};

use crate::domain::entity::Payment;

/// Whether `amount` covers every linked child at `price_per_child`
pub fn covers_children(amount: i64, children_count: i64, price_per_child: i64) -> bool {
    children_count.saturating_mul(price_per_child) <= amount
}

/// New expiry of a child covered by `payment`.
///
/// A subscription still running is extended from its current end, otherwise
/// the paid period starts at `max(payment.start_at, now)`. The child gets the
/// full length of the paid period either way. `None` when the new expiry
/// falls outside the representable range.
pub fn extend_subscription(
    current: Option<DateTime<Utc>>,
    payment: &Payment,
    now: DateTime<Utc>,
) -> Option<DateTime<Utc>> {
    let renewal_start = match current {
        Some(expires_at) if expires_at > now => expires_at,
        _ => payment.start_at.max(now),
    };
    renewal_start.checked_add_signed(payment.duration())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::UserId;
    use chrono::Duration;

    fn payment(start_at: DateTime<Utc>, days: i64) -> Payment {
        Payment::new(
            UserId::new(),
            9900,
            "Parent".into(),
            start_at,
            start_at + Duration::days(days),
        )
    }

    #[test]
    fn test_covers_children() {
        assert!(covers_children(9900, 1, 9900));
        assert!(covers_children(100, 0, 9900));
        assert!(!covers_children(19799, 2, 9900));
        assert!(covers_children(19800, 2, 9900));
    }

    #[test]
    fn test_running_subscription_is_extended_from_its_end() {
        let now = Utc::now();
        let current = now + Duration::days(10);
        let new_expiry = extend_subscription(Some(current), &payment(now, 30), now).unwrap();
        assert_eq!(new_expiry, current + Duration::days(30));
    }

    #[test]
    fn test_lapsed_subscription_starts_now() {
        let now = Utc::now();
        let lapsed = now - Duration::days(3);
        let old_start = now - Duration::days(7);

        let new_expiry = extend_subscription(Some(lapsed), &payment(old_start, 30), now).unwrap();
        assert_eq!(new_expiry, now + Duration::days(30));

        let new_expiry = extend_subscription(None, &payment(old_start, 30), now).unwrap();
        assert_eq!(new_expiry, now + Duration::days(30));
    }

    #[test]
    fn test_future_start_is_kept() {
        let now = Utc::now();
        let start = now + Duration::days(5);
        let new_expiry = extend_subscription(None, &payment(start, 30), now).unwrap();
        assert_eq!(new_expiry, start + Duration::days(30));
    }

    #[test]
    fn test_expiry_beyond_range_is_none() {
        let now = Utc::now();
        let current = DateTime::<Utc>::MAX_UTC - Duration::days(1);
        assert_eq!(extend_subscription(Some(current), &payment(now, 30), now), None);
    }
}
