//! Time windows a limit aggregates over.
//!
//! A [`Window`] is either a recurring daily clock range or a rolling span
//! that ends at the candidate payment. Resolving it against a candidate
//! yields the concrete [`TimeRange`] to sum registered payments over.

use crate::domain::ports::PaymentRecord;
use crate::error::{LimitError, Result};
use chrono::{Months, NaiveDateTime, NaiveTime, TimeDelta};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unit of a rolling span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeUnit {
    Nanos,
    Micros,
    Millis,
    Seconds,
    Minutes,
    Hours,
    HalfDays,
    Days,
    Weeks,
    Months,
    Years,
}

impl TimeUnit {
    /// Steps `length` units back from `time`.
    ///
    /// Months and years are calendar steps; the day of month is clamped to
    /// the end of a shorter month. Returns `None` on overflow.
    pub fn subtract_from(self, time: NaiveDateTime, length: u32) -> Option<NaiveDateTime> {
        let n = i64::from(length);
        let delta = match self {
            TimeUnit::Nanos => Some(TimeDelta::nanoseconds(n)),
            TimeUnit::Micros => Some(TimeDelta::microseconds(n)),
            TimeUnit::Millis => TimeDelta::try_milliseconds(n),
            TimeUnit::Seconds => TimeDelta::try_seconds(n),
            TimeUnit::Minutes => TimeDelta::try_minutes(n),
            TimeUnit::Hours => TimeDelta::try_hours(n),
            TimeUnit::HalfDays => TimeDelta::try_hours(n * 12),
            TimeUnit::Days => TimeDelta::try_days(n),
            TimeUnit::Weeks => TimeDelta::try_weeks(n),
            TimeUnit::Months => return time.checked_sub_months(Months::new(length)),
            TimeUnit::Years => {
                return length
                    .checked_mul(12)
                    .and_then(|months| time.checked_sub_months(Months::new(months)));
            }
        };
        delta.and_then(|delta| time.checked_sub_signed(delta))
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TimeUnit::Nanos => "nanos",
            TimeUnit::Micros => "micros",
            TimeUnit::Millis => "millis",
            TimeUnit::Seconds => "seconds",
            TimeUnit::Minutes => "minutes",
            TimeUnit::Hours => "hours",
            TimeUnit::HalfDays => "half_days",
            TimeUnit::Days => "days",
            TimeUnit::Weeks => "weeks",
            TimeUnit::Months => "months",
            TimeUnit::Years => "years",
        };
        f.write_str(name)
    }
}

/// A concrete `[from, to)` interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    pub from: NaiveDateTime,
    pub to: NaiveDateTime,
}

impl TimeRange {
    pub fn new(from: NaiveDateTime, to: NaiveDateTime) -> Self {
        Self { from, to }
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.from, self.to)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Window {
    /// Daily recurring `[from, to)` time-of-day range. `to < from` crosses midnight.
    ClockRange { from: NaiveTime, to: NaiveTime },
    /// Trailing span of `length` units ending at the candidate's time.
    RollingSpan { unit: TimeUnit, length: u32 },
}

impl Window {
    /// Computes the interval to aggregate over for `candidate`.
    ///
    /// Returns `Ok(None)` when the candidate's time of day lies outside a
    /// clock range, in which case the limit does not apply to it.
    pub fn resolve<P: PaymentRecord>(&self, candidate: &P) -> Result<Option<TimeRange>> {
        match *self {
            Window::ClockRange { from, to } => {
                if !candidate.is_time_between_to(from, to) {
                    return Ok(None);
                }
                let day = candidate.time().date();
                if from <= to {
                    return Ok(Some(TimeRange::new(day.and_time(from), day.and_time(to))));
                }

                // Midnight wrap: pick the occurrence that contains the candidate.
                let (start_day, end_day) = if candidate.time().time() >= from {
                    (Some(day), day.succ_opt())
                } else {
                    (day.pred_opt(), Some(day))
                };
                match (start_day, end_day) {
                    (Some(start), Some(end)) => Ok(Some(TimeRange::new(
                        start.and_time(from),
                        end.and_time(to),
                    ))),
                    _ => Err(LimitError::ConfigurationError(format!(
                        "clock range {from}..{to} around {day} exceeds the representable dates"
                    ))),
                }
            }
            Window::RollingSpan { unit, length } => {
                let to = candidate.time();
                let from = unit.subtract_from(to, length).ok_or_else(|| {
                    LimitError::ConfigurationError(format!(
                        "rolling span of {length} {unit} before {to} is not representable"
                    ))
                })?;
                Ok(Some(TimeRange::new(from, to)))
            }
        }
    }
}

impl fmt::Display for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Window::ClockRange { from, to } => write!(f, "daily {from}..{to}"),
            Window::RollingSpan { unit, length } => write!(f, "last {length} {unit}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::payment::Payment;
    use chrono::NaiveDate;

    fn at(day: u32, h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, day)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn payment(t: NaiveDateTime) -> Payment {
        Payment::new(t, 100, "alice", "water").unwrap()
    }

    #[test]
    fn test_clock_range_anchors_to_candidate_day() {
        let window = Window::ClockRange {
            from: time(9, 0),
            to: time(17, 0),
        };
        let range = window.resolve(&payment(at(15, 10, 0))).unwrap();
        assert_eq!(range, Some(TimeRange::new(at(15, 9, 0), at(15, 17, 0))));
    }

    #[test]
    fn test_clock_range_outside_scope() {
        let window = Window::ClockRange {
            from: time(9, 0),
            to: time(17, 0),
        };
        assert_eq!(window.resolve(&payment(at(15, 18, 0))).unwrap(), None);
        assert_eq!(window.resolve(&payment(at(15, 17, 0))).unwrap(), None);
        assert!(window.resolve(&payment(at(15, 9, 0))).unwrap().is_some());
    }

    #[test]
    fn test_clock_range_wrapping_before_midnight() {
        let window = Window::ClockRange {
            from: time(22, 0),
            to: time(2, 0),
        };
        let range = window.resolve(&payment(at(15, 23, 0))).unwrap();
        assert_eq!(range, Some(TimeRange::new(at(15, 22, 0), at(16, 2, 0))));
    }

    #[test]
    fn test_clock_range_wrapping_after_midnight() {
        let window = Window::ClockRange {
            from: time(22, 0),
            to: time(2, 0),
        };
        let range = window.resolve(&payment(at(16, 1, 0))).unwrap();
        assert_eq!(range, Some(TimeRange::new(at(15, 22, 0), at(16, 2, 0))));
        assert_eq!(window.resolve(&payment(at(16, 12, 0))).unwrap(), None);
    }

    #[test]
    fn test_rolling_span_ends_at_candidate() {
        let window = Window::RollingSpan {
            unit: TimeUnit::Hours,
            length: 24,
        };
        let range = window.resolve(&payment(at(15, 10, 0))).unwrap();
        assert_eq!(range, Some(TimeRange::new(at(14, 10, 0), at(15, 10, 0))));
    }

    #[test]
    fn test_rolling_span_calendar_months() {
        let end = NaiveDate::from_ymd_opt(2024, 3, 31)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        let start = TimeUnit::Months.subtract_from(end, 1).unwrap();
        assert_eq!(
            start,
            NaiveDate::from_ymd_opt(2024, 2, 29)
                .unwrap()
                .and_hms_opt(12, 0, 0)
                .unwrap()
        );
    }

    #[test]
    fn test_fixed_units() {
        let end = at(15, 12, 0);
        assert_eq!(TimeUnit::HalfDays.subtract_from(end, 1), Some(at(15, 0, 0)));
        assert_eq!(TimeUnit::Weeks.subtract_from(end, 1), Some(at(8, 12, 0)));
        assert_eq!(TimeUnit::Minutes.subtract_from(end, 90), Some(at(15, 10, 30)));
        assert_eq!(TimeUnit::Seconds.subtract_from(end, 0), Some(end));
    }

    #[test]
    fn test_rolling_span_overflow_is_configuration_error() {
        let window = Window::RollingSpan {
            unit: TimeUnit::Years,
            length: u32::MAX,
        };
        let result = window.resolve(&payment(at(15, 10, 0)));
        assert!(matches!(result, Err(LimitError::ConfigurationError(_))));
    }
}
