// ============================================================================
// Estate Core - Availability Calculator
// File: crates/estate-core/src/services/availability.rs
// ============================================================================
//! Per-day occupancy and occupancy rate over a calendar window.
//!
//! A property is occupied on a day when a pending or confirmed booking for
//! it covers that day, both ends inclusive, compared by calendar day.

use std::collections::{BTreeSet, HashSet};

use chrono::{Datelike, Days, NaiveDate};
use estate_shared::ExternalId;
use serde::Serialize;

use crate::domain::Booking;

/// Contiguous run of calendar days
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarWindow {
    start: NaiveDate,
    days: u32,
}

impl CalendarWindow {
    pub fn new(start: NaiveDate, days: u32) -> Self {
        Self { start, days }
    }

    /// Every day of the given month; `None` for an invalid month.
    pub fn month(year: i32, month: u32) -> Option<Self> {
        let start = NaiveDate::from_ymd_opt(year, month, 1)?;
        let next = if month == 12 {
            NaiveDate::from_ymd_opt(year + 1, 1, 1)?
        } else {
            NaiveDate::from_ymd_opt(year, month + 1, 1)?
        };
        let days = next.signed_duration_since(start).num_days() as u32;
        Some(Self { start, days })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn len(&self) -> u32 {
        self.days
    }

    pub fn is_empty(&self) -> bool {
        self.days == 0
    }

    /// Days in order. Stops early at the end of the supported calendar.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        (0..self.days).map_while(move |offset| self.start.checked_add_days(Days::new(offset as u64)))
    }
}

/// Occupancy detail for one calendar day
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayOccupancy {
    pub date: NaiveDate,
    pub weekday: u32,
    /// Properties held by a pending or confirmed booking
    pub occupied_property_ids: Vec<ExternalId>,
    /// Every booking touching the day, whatever its status
    pub booking_ids: Vec<ExternalId>,
}

/// Properties from `property_ids` occupied on `day`.
pub fn occupancy_for_day(
    day: NaiveDate,
    property_ids: &[ExternalId],
    bookings: &[Booking],
) -> BTreeSet<ExternalId> {
    let wanted: HashSet<&str> = property_ids.iter().map(String::as_str).collect();
    bookings
        .iter()
        .filter(|b| wanted.contains(b.property_id.as_str()))
        .filter(|b| b.holds_property() && b.covers_day(day))
        .map(|b| b.property_id.clone())
        .collect()
}

/// Percentage of (property, day) pairs in the window that are occupied,
/// rounded half up. Zero when there are no properties or no days.
pub fn occupancy_rate(window: &CalendarWindow, property_ids: &[ExternalId], bookings: &[Booking]) -> u32 {
    let distinct: BTreeSet<&str> = property_ids.iter().map(String::as_str).collect();
    let total = window.len() as u64 * distinct.len() as u64;
    if total == 0 {
        return 0;
    }

    let occupied: u64 = window
        .days()
        .map(|day| occupancy_for_day(day, property_ids, bookings).len() as u64)
        .sum();

    ((occupied * 200 + total) / (total * 2)) as u32
}

/// Day-by-day view used by the owner calendar.
pub fn occupancy_calendar(
    window: &CalendarWindow,
    property_ids: &[ExternalId],
    bookings: &[Booking],
) -> Vec<DayOccupancy> {
    let wanted: HashSet<&str> = property_ids.iter().map(String::as_str).collect();
    let relevant: Vec<&Booking> = bookings
        .iter()
        .filter(|b| wanted.contains(b.property_id.as_str()))
        .collect();

    window
        .days()
        .map(|day| {
            let touching: Vec<&&Booking> = relevant.iter().filter(|b| b.covers_day(day)).collect();
            let occupied: BTreeSet<ExternalId> = touching
                .iter()
                .filter(|b| b.holds_property())
                .map(|b| b.property_id.clone())
                .collect();

            DayOccupancy {
                date: day,
                weekday: day.weekday().num_days_from_sunday(),
                occupied_property_ids: occupied.into_iter().collect(),
                booking_ids: touching.iter().map(|b| b.id.clone()).collect(),
            }
        })
        .collect()
}
