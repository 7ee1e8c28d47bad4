//! Recurrence scheduling
//!
//! Projects the next due date of a recurring item from its anchor date and
//! frequency. Nothing is stored: the n-th occurrence is always computed as
//! `start + n periods`, so the series never drifts.
//!
//! ## Month-end rule
//!
//! Monthly and yearly periods add calendar months to the anchor. When the
//! anchor's day does not exist in the target month the occurrence is clamped
//! to that month's last day. Because every occurrence is computed from the
//! anchor rather than from the previous occurrence, a series anchored on the
//! 31st lands on Jan 31, Feb 29 (or 28), Mar 31, Apr 30, ... and a series
//! anchored on Feb 29 lands on Feb 28 in common years.

use chrono::{Datelike, Days, Months, NaiveDate};

use crate::models::{Frequency, RecurringTransaction};

/// The n-th occurrence of a series anchored at `start` (n = 0 is `start`)
///
/// Saturates to `NaiveDate::MAX` past the end of the calendar.
pub fn occurrence(start: NaiveDate, frequency: Frequency, n: u32) -> NaiveDate {
    let date = match frequency {
        Frequency::Weekly => start.checked_add_days(Days::new(7 * u64::from(n))),
        Frequency::Monthly => start.checked_add_months(Months::new(n)),
        Frequency::Yearly => n
            .checked_mul(12)
            .and_then(|months| start.checked_add_months(Months::new(months))),
    };
    date.unwrap_or(NaiveDate::MAX)
}

/// Index of the first occurrence that is not before `as_of`
fn next_occurrence_index(start: NaiveDate, frequency: Frequency, as_of: NaiveDate) -> u32 {
    if start >= as_of {
        return 0;
    }

    // Whole periods between the two dates; the occurrence at this index lies
    // in the same week/month/year as `as_of`, so at most one more step is needed.
    let candidate = match frequency {
        Frequency::Weekly => {
            let days = as_of.signed_duration_since(start).num_days();
            return to_index((days + 6) / 7);
        }
        Frequency::Monthly => {
            let months = i64::from(as_of.year() - start.year()) * 12
                + i64::from(as_of.month())
                - i64::from(start.month());
            to_index(months)
        }
        Frequency::Yearly => to_index(i64::from(as_of.year() - start.year())),
    };

    if occurrence(start, frequency, candidate) >= as_of {
        candidate
    } else {
        candidate.saturating_add(1)
    }
}

fn to_index(periods: i64) -> u32 {
    u32::try_from(periods.max(0)).unwrap_or(u32::MAX)
}

/// Next due date of a series anchored at `start`, as seen on `as_of`
///
/// Returns `start` itself while it is on or after `as_of`; otherwise the
/// smallest `start + n periods` that is on or after `as_of`.
pub fn next_due_date(start: NaiveDate, frequency: Frequency, as_of: NaiveDate) -> NaiveDate {
    occurrence(start, frequency, next_occurrence_index(start, frequency, as_of))
}

/// [`next_due_date`] relative to today's local calendar date
pub fn next_due_date_today(start: NaiveDate, frequency: Frequency) -> NaiveDate {
    next_due_date(start, frequency, chrono::Local::now().date_naive())
}

/// Next due date of a recurring item
pub fn next_due(item: &RecurringTransaction, as_of: NaiveDate) -> NaiveDate {
    next_due_date(item.start_date, item.frequency, as_of)
}

/// Every occurrence in the inclusive window `[from, to]`
pub fn occurrences_between(
    start: NaiveDate,
    frequency: Frequency,
    from: NaiveDate,
    to: NaiveDate,
) -> Vec<NaiveDate> {
    let mut dates = Vec::new();
    if from > to {
        return dates;
    }

    let mut n = next_occurrence_index(start, frequency, from);
    loop {
        let date = occurrence(start, frequency, n);
        if date > to {
            break;
        }
        dates.push(date);
        if date == NaiveDate::MAX || n == u32::MAX {
            break;
        }
        n += 1;
    }
    dates
}
