use crate::domain::payment::{Amount, ClientId, Payment, ServiceId};
use crate::error::Result;
use chrono::NaiveDateTime;
use serde::Serialize;
use std::io::Write;

/// Result of checking one candidate payment against a limit set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Verdict<'a> {
    pub time: NaiveDateTime,
    pub amount: Amount,
    pub client: &'a ClientId,
    pub service: &'a ServiceId,
    pub exceeded: bool,
    /// First limit the payment would exceed, empty when none.
    pub limit: Option<&'a str>,
}

impl<'a> Verdict<'a> {
    pub fn new(payment: &'a Payment, exceeded_limit: Option<&'a str>) -> Self {
        Self {
            time: payment.time,
            amount: payment.amount,
            client: &payment.client,
            service: &payment.service,
            exceeded: exceeded_limit.is_some(),
            limit: exceeded_limit,
        }
    }
}

/// Writes verdicts as CSV with a `time,amount,client,service,exceeded,limit` header.
pub struct VerdictWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> VerdictWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }

    pub fn write(&mut self, verdict: &Verdict<'_>) -> Result<()> {
        self.writer.serialize(verdict)?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
