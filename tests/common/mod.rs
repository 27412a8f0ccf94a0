#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use payment_limits::domain::payment::Payment;
use std::fs::File;
use std::io::Error;
use std::path::Path;

pub fn at(day: u32, hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 3, day)
        .unwrap()
        .and_hms_opt(hour, minute, 0)
        .unwrap()
}

pub fn clock(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
}

pub fn pay(time: NaiveDateTime, amount: u64, client: &str, service: &str) -> Payment {
    Payment::new(time, amount, client, service).unwrap()
}

pub fn write_payments_csv(path: &Path, rows: &[[&str; 4]]) -> Result<(), Error> {
    let file = File::create(path)?;
    let mut wtr = csv::WriterBuilder::new().from_writer(file);

    wtr.write_record(["time", "amount", "client", "service"])?;
    for row in rows {
        wtr.write_record(row)?;
    }

    wtr.flush()?;
    Ok(())
}

pub fn generate_payments_csv(path: &Path, rows: usize) -> Result<(), Error> {
    let file = File::create(path)?;
    let mut wtr = csv::WriterBuilder::new().from_writer(file);
    wtr.write_record(["time", "amount", "client", "service"])?;

    for i in 0..rows {
        let minute = i % 60;
        wtr.write_record([
            &format!("2024-03-15T08:{minute:02}:00"),
            "1",
            "alice",
            "water",
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
