use super::address::Address;
use super::ciphertext::{Ciphertext, EncryptedText};
use super::payment::{PaymentDetails, PaymentId};
use serde::Deserialize;

#[derive(Debug, Deserialize, PartialEq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum OperationType {
    Create,
    Chat,
    Details,
    History,
}

/// One call against the ledger, already encrypted.
#[derive(Debug, PartialEq, Clone)]
pub enum Operation {
    Create {
        caller: Address,
        receiver: Address,
        amount: Ciphertext,
        payer_name: EncryptedText,
        receiver_name: EncryptedText,
        message: EncryptedText,
    },
    Chat {
        caller: Address,
        id: PaymentId,
        message: EncryptedText,
    },
    Details {
        caller: Address,
        id: PaymentId,
    },
    History {
        caller: Address,
        id: PaymentId,
    },
}

impl Operation {
    pub fn caller(&self) -> Address {
        match self {
            Operation::Create { caller, .. }
            | Operation::Chat { caller, .. }
            | Operation::Details { caller, .. }
            | Operation::History { caller, .. } => *caller,
        }
    }
}

/// What a successfully applied operation produced.
#[derive(Debug, PartialEq, Clone)]
pub enum Outcome {
    Created(PaymentId),
    MessageAdded { id: PaymentId, messages: usize },
    Details(PaymentDetails),
    History(Vec<EncryptedText>),
}
