//! Recent activity feed for the admin dashboard

use chrono::{DateTime, Utc};
use estate_shared::constants::{
    ACTIVITY_FEED_SIZE, RECENT_ALERTS, RECENT_BOOKINGS, RECENT_TRANSACTIONS,
};

use crate::domain::{ActivityItem, ActivityKind, Booking, Property, Transaction};

const ALERT_EXCERPT_CHARS: usize = 30;

/// Merge the newest payments, bookings and maintenance alerts into one feed,
/// newest first. Entries sharing a timestamp keep payment, booking, alert
/// order and then their input order.
pub fn recent_activity(
    transactions: &[Transaction],
    bookings: &[Booking],
    properties: &[Property],
    now: DateTime<Utc>,
) -> Vec<ActivityItem> {
    let mut payments: Vec<&Transaction> = transactions.iter().collect();
    payments.sort_by(|a, b| b.date.cmp(&a.date));

    let mut stays: Vec<&Booking> = bookings.iter().collect();
    stays.sort_by(|a, b| b.check_out_date.cmp(&a.check_out_date));

    let mut feed: Vec<ActivityItem> = payments
        .into_iter()
        .take(RECENT_TRANSACTIONS)
        .map(|t| ActivityItem {
            kind: ActivityKind::Payment,
            subject_id: t.id.clone(),
            action: format!("Payment for {}", t.property_name.as_deref().unwrap_or("property")),
            amount: Some(t.amount),
            occurred_at: t.date,
        })
        .chain(stays.into_iter().take(RECENT_BOOKINGS).map(|b| ActivityItem {
            kind: ActivityKind::Booking,
            subject_id: b.id.clone(),
            action: format!(
                "Booked {} from {} to {}",
                b.property_id,
                b.check_in_date.date_naive(),
                b.check_out_date.date_naive()
            ),
            amount: Some(b.total_amount),
            occurred_at: b.check_out_date,
        }))
        .chain(
            properties
                .iter()
                .filter(|p| p.is_inactive())
                .take(RECENT_ALERTS)
                .map(|p| ActivityItem {
                    kind: ActivityKind::Alert,
                    subject_id: p.id.clone(),
                    action: maintenance_notice(p),
                    amount: None,
                    occurred_at: now,
                }),
        )
        .collect();

    // Stable sort keeps input order within equal keys
    feed.sort_by(|a, b| b.occurred_at.cmp(&a.occurred_at).then(a.kind.cmp(&b.kind)));
    feed.truncate(ACTIVITY_FEED_SIZE);
    feed
}

fn maintenance_notice(property: &Property) -> String {
    let excerpt: String = property
        .description
        .as_deref()
        .unwrap_or(property.display_name())
        .chars()
        .take(ALERT_EXCERPT_CHARS)
        .collect();
    format!("Maintenance required: {}", excerpt)
}
