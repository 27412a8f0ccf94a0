use super::payment::{Amount, Payment};
use crate::error::Result;
use chrono::{NaiveDateTime, NaiveTime};

/// Capability a payment must expose to be checked against a limit.
///
/// Implementors supply the accessors and identity checks; the range
/// predicates have default implementations built on [`PaymentRecord::time`].
pub trait PaymentRecord {
    fn time(&self) -> NaiveDateTime;
    fn amount(&self) -> Amount;
    fn is_same_client(&self, other: &Self) -> bool;
    fn is_same_service(&self, other: &Self) -> bool;

    /// Whether the payment happened in `[from, to)`.
    fn is_between_to(&self, from: NaiveDateTime, to: NaiveDateTime) -> bool {
        let time = self.time();
        from <= time && time < to
    }

    /// Whether the payment's time of day falls in `[from, to)`.
    ///
    /// A range with `to < from` crosses midnight. An equal pair is empty.
    fn is_time_between_to(&self, from: NaiveTime, to: NaiveTime) -> bool {
        let time = self.time().time();
        if from <= to {
            from <= time && time < to
        } else {
            time >= from || time < to
        }
    }
}

/// Decides whether admitting a candidate payment would exceed a limit.
pub trait PaymentLimit<P: PaymentRecord = Payment>: Send + Sync {
    fn is_payment_exceeded(&self, candidate: &P, registered: &[P]) -> Result<bool>;
}

pub type PaymentLimitBox<P = Payment> = Box<dyn PaymentLimit<P>>;
