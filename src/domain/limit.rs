use super::window::{TimeUnit, Window};
use chrono::NaiveTime;

/// Immutable description of one spending/volume limit.
///
/// A zero threshold disables that check. Build one with [`LimitBuilder`] or
/// one of the functions in [`crate::domain::presets`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LimitConfiguration {
    window: Window,
    max_total_price: u64,
    max_total_count: u64,
    same_client: bool,
    same_service: bool,
}

impl LimitConfiguration {
    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn max_total_price(&self) -> u64 {
        self.max_total_price
    }

    pub fn max_total_count(&self) -> u64 {
        self.max_total_count
    }

    pub fn same_client(&self) -> bool {
        self.same_client
    }

    pub fn same_service(&self) -> bool {
        self.same_service
    }

    /// Whether at least one threshold is enabled.
    pub fn is_enforcing(&self) -> bool {
        self.max_total_price > 0 || self.max_total_count > 0
    }
}

/// Step-by-step construction of a [`LimitConfiguration`].
///
/// The constructor picks the window, so a built configuration always has one.
#[derive(Debug, Clone)]
pub struct LimitBuilder {
    window: Window,
    max_total_price: u64,
    max_total_count: u64,
    same_client: bool,
    same_service: bool,
}

impl LimitBuilder {
    fn with_window(window: Window) -> Self {
        Self {
            window,
            max_total_price: 0,
            max_total_count: 0,
            same_client: false,
            same_service: false,
        }
    }

    /// Starts a limit over the daily `[from, to)` time-of-day range.
    pub fn clock_range(from: NaiveTime, to: NaiveTime) -> Self {
        Self::with_window(Window::ClockRange { from, to })
    }

    /// Starts a limit over the `length` units preceding each candidate.
    pub fn rolling_span(unit: TimeUnit, length: u32) -> Self {
        Self::with_window(Window::RollingSpan { unit, length })
    }

    pub fn max_total_price(mut self, price: u64) -> Self {
        self.max_total_price = price;
        self
    }

    pub fn max_total_count(mut self, count: u64) -> Self {
        self.max_total_count = count;
        self
    }

    pub fn same_client_restriction(mut self, enable: bool) -> Self {
        self.same_client = enable;
        self
    }

    pub fn same_service_restriction(mut self, enable: bool) -> Self {
        self.same_service = enable;
        self
    }

    pub fn build(self) -> LimitConfiguration {
        LimitConfiguration {
            window: self.window,
            max_total_price: self.max_total_price,
            max_total_count: self.max_total_count,
            same_client: self.same_client,
            same_service: self.same_service,
        }
    }
}
