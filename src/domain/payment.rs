use crate::domain::ports::PaymentRecord;
use crate::error::LimitError;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A non-negative monetary amount in the smallest currency unit (e.g. cents).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Amount(u64);

impl Amount {
    pub const ZERO: Self = Self(0);

    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl From<u64> for Amount {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl From<Amount> for u64 {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn validate_identifier(kind: &str, value: String) -> Result<String, LimitError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(LimitError::ValidationError(format!(
            "{kind} identifier must not be empty"
        )))
    } else if trimmed.len() == value.len() {
        Ok(value)
    } else {
        Ok(trimmed.to_string())
    }
}

/// Opaque identifier of the paying client.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ClientId(String);

impl ClientId {
    pub fn new(value: impl Into<String>) -> Result<Self, LimitError> {
        validate_identifier("Client", value.into()).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque identifier of the service being paid for.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ServiceId(String);

impl ServiceId {
    pub fn new(value: impl Into<String>) -> Result<Self, LimitError> {
        validate_identifier("Service", value.into()).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ServiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Raw shape of a payment as it appears in CSV input.
#[derive(Debug, Deserialize)]
struct PaymentRow {
    time: NaiveDateTime,
    amount: u64,
    client: String,
    service: String,
}

/// A payment made by a client for a service at a point in time.
///
/// Payments are plain values: limits read them but never change them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PaymentRow")]
pub struct Payment {
    pub time: NaiveDateTime,
    pub amount: Amount,
    pub client: ClientId,
    pub service: ServiceId,
}

impl Payment {
    pub fn new(
        time: NaiveDateTime,
        amount: u64,
        client: impl Into<String>,
        service: impl Into<String>,
    ) -> Result<Self, LimitError> {
        Ok(Self {
            time,
            amount: Amount::new(amount),
            client: ClientId::new(client)?,
            service: ServiceId::new(service)?,
        })
    }
}

impl TryFrom<PaymentRow> for Payment {
    type Error = LimitError;

    fn try_from(row: PaymentRow) -> Result<Self, Self::Error> {
        Self::new(row.time, row.amount, row.client, row.service)
    }
}

impl PaymentRecord for Payment {
    fn time(&self) -> NaiveDateTime {
        self.time
    }

    fn amount(&self) -> Amount {
        self.amount
    }

    fn is_same_client(&self, other: &Self) -> bool {
        self.client == other.client
    }

    fn is_same_service(&self, other: &Self) -> bool {
        self.service == other.service
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 15)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_identifier_validation() {
        assert!(ClientId::new("c-1").is_ok());
        assert!(matches!(
            ClientId::new(""),
            Err(LimitError::ValidationError(_))
        ));
        assert!(matches!(
            ServiceId::new("   "),
            Err(LimitError::ValidationError(_))
        ));
        assert_eq!(ClientId::new(" c-1 ").unwrap().as_str(), "c-1");
    }

    #[test]
    fn test_payment_rejects_empty_client() {
        let result = Payment::new(at(10, 0), 100, "", "svc");
        assert!(matches!(result, Err(LimitError::ValidationError(_))));
    }

    #[test]
    fn test_same_client_and_service() {
        let a = Payment::new(at(10, 0), 100, "alice", "water").unwrap();
        let b = Payment::new(at(11, 0), 5, "alice", "power").unwrap();
        let c = Payment::new(at(12, 0), 5, "bob", "water").unwrap();

        assert!(a.is_same_client(&b));
        assert!(!a.is_same_service(&b));
        assert!(!a.is_same_client(&c));
        assert!(a.is_same_service(&c));
    }

    #[test]
    fn test_is_between_to_is_half_open() {
        let p = Payment::new(at(10, 0), 1, "alice", "water").unwrap();

        assert!(p.is_between_to(at(10, 0), at(11, 0)));
        assert!(!p.is_between_to(at(9, 0), at(10, 0)));
        assert!(!p.is_between_to(at(11, 0), at(12, 0)));
    }

    #[test]
    fn test_is_time_between_to_plain_range() {
        let p = Payment::new(at(10, 0), 1, "alice", "water").unwrap();

        assert!(p.is_time_between_to(time(9, 0), time(17, 0)));
        assert!(p.is_time_between_to(time(10, 0), time(17, 0)));
        assert!(!p.is_time_between_to(time(9, 0), time(10, 0)));
        assert!(!p.is_time_between_to(time(10, 0), time(10, 0)));
    }

    #[test]
    fn test_is_time_between_to_wraps_midnight() {
        let late = Payment::new(at(23, 0), 1, "alice", "water").unwrap();
        let early = Payment::new(at(1, 30), 1, "alice", "water").unwrap();
        let noon = Payment::new(at(12, 0), 1, "alice", "water").unwrap();

        assert!(late.is_time_between_to(time(22, 0), time(2, 0)));
        assert!(early.is_time_between_to(time(22, 0), time(2, 0)));
        assert!(!noon.is_time_between_to(time(22, 0), time(2, 0)));
    }

    #[test]
    fn test_payment_deserialization_validates_row() {
        let data = "time,amount,client,service\n2024-03-15T10:00:00,250,alice,water\n2024-03-15T10:00:00,250,,water";
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(data.as_bytes());
        let rows: Vec<Result<Payment, csv::Error>> = reader.deserialize().collect();

        let first = rows[0].as_ref().expect("Failed to deserialize payment");
        assert_eq!(first.amount, Amount::new(250));
        assert_eq!(first.client.as_str(), "alice");
        assert!(rows[1].is_err());
    }
}
