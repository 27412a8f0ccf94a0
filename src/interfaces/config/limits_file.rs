//! JSON limit definitions.
//!
//! A limits file is an array of named entries, each picking a preset or a
//! fully custom configuration:
//!
//! ```json
//! [
//!   { "name": "office-hours", "preset": "max_price_on_period",
//!     "max_total_price": 1000, "from": "09:00:00", "to": "17:00:00" },
//!   { "name": "daily-count", "preset": "max_count_on_day", "max_total_count": 3 },
//!   { "name": "custom", "preset": "custom",
//!     "rolling_span": { "unit": "hours", "length": 6 },
//!     "max_total_count": 5, "same_client": true }
//! ]
//! ```

use crate::application::limit_set::{LimitSet, NamedLimit};
use crate::domain::limit::{LimitBuilder, LimitConfiguration};
use crate::domain::presets;
use crate::domain::window::TimeUnit;
use crate::error::{LimitError, Result};
use chrono::NaiveTime;
use serde::Deserialize;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ClockRangeDefinition {
    pub from: NaiveTime,
    pub to: NaiveTime,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RollingSpanDefinition {
    pub unit: TimeUnit,
    pub length: u32,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CustomLimitDefinition {
    #[serde(default)]
    pub clock_range: Option<ClockRangeDefinition>,
    #[serde(default)]
    pub rolling_span: Option<RollingSpanDefinition>,
    #[serde(default)]
    pub max_total_price: u64,
    #[serde(default)]
    pub max_total_count: u64,
    #[serde(default)]
    pub same_client: bool,
    #[serde(default)]
    pub same_service: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "preset", rename_all = "snake_case")]
pub enum LimitDefinition {
    MaxPriceOnPeriod {
        max_total_price: u64,
        from: NaiveTime,
        to: NaiveTime,
    },
    MaxPriceOnTimespan {
        max_total_price: u64,
        unit: TimeUnit,
        length: u32,
    },
    MaxCountOnDay {
        max_total_count: u64,
    },
    Complex {
        max_total_price: u64,
        max_total_count: u64,
        unit: TimeUnit,
        length: u32,
    },
    Custom(CustomLimitDefinition),
}

impl LimitDefinition {
    pub fn into_limit(self) -> Result<LimitConfiguration> {
        let limit = match self {
            LimitDefinition::MaxPriceOnPeriod {
                max_total_price,
                from,
                to,
            } => presets::create_max_price_on_period_limit(max_total_price, from, to),
            LimitDefinition::MaxPriceOnTimespan {
                max_total_price,
                unit,
                length,
            } => presets::create_max_price_on_timespan_limit(max_total_price, unit, length),
            LimitDefinition::MaxCountOnDay { max_total_count } => {
                presets::create_max_count_on_day_limit(max_total_count)
            }
            LimitDefinition::Complex {
                max_total_price,
                max_total_count,
                unit,
                length,
            } => presets::create_complex_limit(max_total_price, max_total_count, unit, length),
            LimitDefinition::Custom(custom) => {
                let builder = match (custom.clock_range, custom.rolling_span) {
                    (Some(clock), None) => LimitBuilder::clock_range(clock.from, clock.to),
                    (None, Some(span)) => LimitBuilder::rolling_span(span.unit, span.length),
                    (None, None) => {
                        return Err(LimitError::ConfigurationError(
                            "either a clock range or a rolling span must be configured"
                                .to_string(),
                        ));
                    }
                    (Some(_), Some(_)) => {
                        return Err(LimitError::ConfigurationError(
                            "a clock range and a rolling span cannot both be configured"
                                .to_string(),
                        ));
                    }
                };
                builder
                    .max_total_price(custom.max_total_price)
                    .max_total_count(custom.max_total_count)
                    .same_client_restriction(custom.same_client)
                    .same_service_restriction(custom.same_service)
                    .build()
            }
        };
        Ok(limit)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LimitEntry {
    pub name: String,
    #[serde(flatten)]
    pub definition: LimitDefinition,
}

/// Parses a limits document into a [`LimitSet`].
pub fn load_limits<R: Read>(source: R) -> Result<LimitSet> {
    let entries: Vec<LimitEntry> = serde_json::from_reader(source)?;
    if entries.is_empty() {
        return Err(LimitError::ConfigurationError(
            "limits file defines no limits".to_string(),
        ));
    }

    let mut limits = Vec::with_capacity(entries.len());
    for entry in entries {
        let limit = entry.definition.into_limit().map_err(|e| match e {
            LimitError::ConfigurationError(msg) => {
                LimitError::ConfigurationError(format!("limit '{}': {msg}", entry.name))
            }
            other => other,
        })?;
        if !limit.is_enforcing() {
            warn!(limit = %entry.name, "limit has no price or count threshold and never triggers");
        }
        limits.push(NamedLimit::new(entry.name, limit));
    }
    LimitSet::new(limits)
}

pub fn load_limits_file(path: &Path) -> Result<LimitSet> {
    let file = File::open(path)?;
    load_limits(BufReader::new(file))
}
