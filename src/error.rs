use crate::domain::address::Address;
use crate::domain::payment::{Action, PaymentId};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("Unauthorized: Only sender or receiver can {action}")]
    Unauthorized { caller: Address, action: Action },
    #[error("Payment {0} does not exist")]
    PaymentNotFound(PaymentId),
    #[error("Validation error: {0}")]
    ValidationError(String),
    #[error("Permit error: {0}")]
    PermitError(String),
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Internal error: {0}")]
    InternalError(Box<dyn std::error::Error + Send + Sync>),
}

pub type Result<T> = std::result::Result<T, LedgerError>;
