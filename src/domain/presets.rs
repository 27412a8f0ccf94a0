//! Ready-made limit shapes for the common cases.

use super::limit::{LimitBuilder, LimitConfiguration};
use super::window::TimeUnit;
use chrono::NaiveTime;

/// Last representable instant of a day.
pub const END_OF_DAY: NaiveTime = match NaiveTime::from_hms_nano_opt(23, 59, 59, 999_999_999) {
    Some(time) => time,
    None => panic!("invalid end of day"),
};

/// Caps the total spent on one service during a daily clock range.
pub fn create_max_price_on_period_limit(
    max_total_price: u64,
    from: NaiveTime,
    to: NaiveTime,
) -> LimitConfiguration {
    LimitBuilder::clock_range(from, to)
        .max_total_price(max_total_price)
        .same_service_restriction(true)
        .build()
}

/// Caps the total spent on one service over a trailing span.
pub fn create_max_price_on_timespan_limit(
    max_total_price: u64,
    unit: TimeUnit,
    length: u32,
) -> LimitConfiguration {
    LimitBuilder::rolling_span(unit, length)
        .max_total_price(max_total_price)
        .same_service_restriction(true)
        .build()
}

/// Caps how many times a client may pay the same service in one calendar day.
pub fn create_max_count_on_day_limit(max_total_count: u64) -> LimitConfiguration {
    LimitBuilder::clock_range(NaiveTime::MIN, END_OF_DAY)
        .max_total_count(max_total_count)
        .same_service_restriction(true)
        .same_client_restriction(true)
        .build()
}

/// Caps both amount and count per client, across services, over a trailing span.
pub fn create_complex_limit(
    max_total_price: u64,
    max_total_count: u64,
    unit: TimeUnit,
    length: u32,
) -> LimitConfiguration {
    LimitBuilder::rolling_span(unit, length)
        .max_total_count(max_total_count)
        .max_total_price(max_total_price)
        .same_client_restriction(true)
        .build()
}
