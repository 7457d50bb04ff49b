use crate::domain::address::Address;
use crate::domain::amount::Wei;
use crate::domain::operation::{Operation, OperationType};
use crate::domain::payment::PaymentId;
use crate::domain::ports::Encryptor;
use crate::error::{LedgerError, Result};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::io::Read;

/// One CSV row as written by a human: plaintext values, optional columns.
#[derive(Debug, Deserialize)]
struct OperationRow {
    op: OperationType,
    caller: Address,
    id: Option<u64>,
    receiver: Option<Address>,
    /// Kept as text: numeric inference in `csv` would round it through `f64`.
    amount: Option<String>,
    payer_name: Option<String>,
    receiver_name: Option<String>,
    message: Option<String>,
}

impl OperationRow {
    fn into_operation<E: Encryptor>(self, encryptor: &E) -> Result<Operation> {
        let text = |value: Option<String>| encryptor.encrypt_text(value.as_deref().unwrap_or(""));

        let operation = match self.op {
            OperationType::Create => {
                let receiver = self.receiver.ok_or_else(|| missing("create", "receiver"))?;
                let raw = self.amount.ok_or_else(|| missing("create", "amount"))?;
                let amount = Wei::from_ether(parse_ether(&raw)?)?;
                Operation::Create {
                    caller: self.caller,
                    receiver,
                    amount: encryptor.encrypt_u256(amount.to_word()),
                    payer_name: text(self.payer_name),
                    receiver_name: text(self.receiver_name),
                    message: text(self.message),
                }
            }
            OperationType::Chat => Operation::Chat {
                caller: self.caller,
                id: self.id.map(PaymentId).ok_or_else(|| missing("chat", "id"))?,
                message: text(self.message),
            },
            OperationType::Details => Operation::Details {
                caller: self.caller,
                id: self.id.map(PaymentId).ok_or_else(|| missing("details", "id"))?,
            },
            OperationType::History => Operation::History {
                caller: self.caller,
                id: self.id.map(PaymentId).ok_or_else(|| missing("history", "id"))?,
            },
        };

        Ok(operation)
    }
}

fn parse_ether(raw: &str) -> Result<Decimal> {
    Decimal::from_str_exact(raw)
        .map_err(|e| LedgerError::ValidationError(format!("Invalid amount '{raw}': {e}")))
}

fn missing(op: &str, column: &str) -> LedgerError {
    LedgerError::ValidationError(format!("'{op}' requires a value for '{column}'"))
}

/// Reads ledger operations from a CSV source.
///
/// Expected header: `op, caller, id, receiver, amount, payer_name,
/// receiver_name, message`. Plaintext amounts (in ether) and texts are
/// encrypted with the given [`Encryptor`] as each row is read.
pub struct OperationReader<R: Read, E: Encryptor> {
    reader: csv::Reader<R>,
    encryptor: E,
}

impl<R: Read, E: Encryptor> OperationReader<R, E> {
    /// Creates a new `OperationReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R, encryptor: E) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader, encryptor }
    }

    /// Returns an iterator that lazily reads, validates and encrypts operations.
    pub fn operations(self) -> impl Iterator<Item = Result<Operation>> {
        let encryptor = self.encryptor;
        self.reader
            .into_deserialize::<OperationRow>()
            .map(move |row| row.map_err(LedgerError::from)?.into_operation(&encryptor))
    }
}
