use crate::domain::limit::LimitConfiguration;
use crate::domain::ports::{PaymentLimit, PaymentRecord};
use crate::error::{LimitError, Result};
use std::collections::HashSet;
use tracing::debug;

/// A limit together with the name it is reported under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedLimit {
    pub name: String,
    pub limit: LimitConfiguration,
}

impl NamedLimit {
    pub fn new(name: impl Into<String>, limit: LimitConfiguration) -> Self {
        Self {
            name: name.into(),
            limit,
        }
    }
}

/// An ordered collection of limits checked together.
///
/// A candidate exceeds the set if it exceeds any member. Names are unique.
#[derive(Debug, Clone, Default)]
pub struct LimitSet {
    limits: Vec<NamedLimit>,
}

impl LimitSet {
    pub fn new(limits: Vec<NamedLimit>) -> Result<Self> {
        {
            let mut seen = HashSet::new();
            for entry in &limits {
                if !seen.insert(entry.name.as_str()) {
                    return Err(LimitError::ConfigurationError(format!(
                        "duplicate limit name '{}'",
                        entry.name
                    )));
                }
            }
        }
        Ok(Self { limits })
    }

    pub fn len(&self) -> usize {
        self.limits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.limits.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &NamedLimit> {
        self.limits.iter()
    }

    pub fn get(&self, name: &str) -> Option<&LimitConfiguration> {
        self.limits
            .iter()
            .find(|entry| entry.name == name)
            .map(|entry| &entry.limit)
    }

    /// Returns the name of the first limit `candidate` would exceed, in
    /// declaration order.
    pub fn first_exceeded<P: PaymentRecord>(
        &self,
        candidate: &P,
        registered: &[P],
    ) -> Result<Option<&str>> {
        for entry in &self.limits {
            if entry.limit.assess(candidate, registered)?.is_exceeded() {
                debug!(limit = %entry.name, "limit exceeded");
                return Ok(Some(entry.name.as_str()));
            }
        }
        Ok(None)
    }
}

impl<P: PaymentRecord> PaymentLimit<P> for LimitSet {
    fn is_payment_exceeded(&self, candidate: &P, registered: &[P]) -> Result<bool> {
        Ok(self.first_exceeded(candidate, registered)?.is_some())
    }
}
