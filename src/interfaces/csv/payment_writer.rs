use crate::domain::address::Address;
use crate::domain::payment::PaymentRecord;
use crate::error::Result;
use serde::Serialize;
use std::io::Write;

const HEADER: [&str; 4] = ["id", "sender", "receiver", "messages"];

/// Summary of a record; ciphertexts are left out of the report.
#[derive(Debug, Serialize)]
struct PaymentRow {
    id: u64,
    sender: Address,
    receiver: Address,
    messages: usize,
}

impl From<&PaymentRecord> for PaymentRow {
    fn from(record: &PaymentRecord) -> Self {
        Self {
            id: record.id.value(),
            sender: record.sender,
            receiver: record.receiver,
            messages: record.chat.len(),
        }
    }
}

/// Writes the ledger report as CSV: `id,sender,receiver,messages`.
pub struct PaymentWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> PaymentWriter<W> {
    pub fn new(sink: W) -> Self {
        let writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(sink);
        Self { writer }
    }

    /// Writes the header followed by one row per record, then flushes.
    pub fn write_payments(&mut self, payments: Vec<PaymentRecord>) -> Result<()> {
        self.writer.write_record(HEADER)?;
        for payment in &payments {
            self.writer.serialize(PaymentRow::from(payment))?;
        }
        self.writer.flush()?;
        Ok(())
    }
}
