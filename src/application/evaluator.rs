use crate::domain::limit::LimitConfiguration;
use crate::domain::ports::{PaymentLimit, PaymentRecord};
use crate::domain::window::TimeRange;
use crate::error::Result;
use tracing::{debug, trace};

/// Total amount and number of registered payments matching a limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Aggregate {
    pub total_amount: u128,
    pub count: u64,
}

impl Aggregate {
    /// Sums the registered payments inside `range` that pass the limit's
    /// client and service filters relative to `candidate`.
    pub fn collect<P: PaymentRecord>(
        limit: &LimitConfiguration,
        range: &TimeRange,
        candidate: &P,
        registered: &[P],
    ) -> Self {
        registered
            .iter()
            .filter(|p| p.is_between_to(range.from, range.to))
            .filter(|p| !limit.same_client() || p.is_same_client(candidate))
            .filter(|p| !limit.same_service() || p.is_same_service(candidate))
            .fold(Self::default(), |mut acc, p| {
                acc.total_amount += u128::from(p.amount().value());
                acc.count += 1;
                acc
            })
    }
}

/// Outcome of checking one candidate against one limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Assessment {
    /// Resolved window, or `None` if the candidate is outside the limit's clock range.
    pub window: Option<TimeRange>,
    pub aggregate: Aggregate,
    pub price_exceeded: bool,
    pub volume_exceeded: bool,
}

impl Assessment {
    fn out_of_scope() -> Self {
        Self {
            window: None,
            aggregate: Aggregate::default(),
            price_exceeded: false,
            volume_exceeded: false,
        }
    }

    pub fn is_exceeded(&self) -> bool {
        self.price_exceeded || self.volume_exceeded
    }
}

impl LimitConfiguration {
    /// Checks whether admitting `candidate` on top of `registered` would
    /// exceed this limit. The candidate always counts toward the totals.
    pub fn assess<P: PaymentRecord>(&self, candidate: &P, registered: &[P]) -> Result<Assessment> {
        let Some(range) = self.window().resolve(candidate)? else {
            trace!(window = %self.window(), "candidate outside clock range");
            return Ok(Assessment::out_of_scope());
        };

        let aggregate = Aggregate::collect(self, &range, candidate, registered);
        let max_price = u128::from(self.max_total_price());
        let price_exceeded = max_price > 0
            && aggregate.total_amount + u128::from(candidate.amount().value()) > max_price;
        let volume_exceeded =
            self.max_total_count() > 0 && aggregate.count.saturating_add(1) > self.max_total_count();

        debug!(
            range = %range,
            total_amount = aggregate.total_amount,
            count = aggregate.count,
            price_exceeded,
            volume_exceeded,
            "limit assessed"
        );

        Ok(Assessment {
            window: Some(range),
            aggregate,
            price_exceeded,
            volume_exceeded,
        })
    }
}

impl<P: PaymentRecord> PaymentLimit<P> for LimitConfiguration {
    fn is_payment_exceeded(&self, candidate: &P, registered: &[P]) -> Result<bool> {
        Ok(self.assess(candidate, registered)?.is_exceeded())
    }
}
