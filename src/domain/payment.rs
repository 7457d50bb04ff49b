use super::address::Address;
use super::ciphertext::{Ciphertext, EncryptedText};
use crate::error::LedgerError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a payment record. The first record gets id 1.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct PaymentId(pub u64);

impl PaymentId {
    pub const ZERO: Self = Self(0);

    pub fn next(self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for PaymentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for PaymentId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

/// The record operations that are restricted to the participants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    AccessDetails,
    AddMessage,
    ReadMessages,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let phrase = match self {
            Action::AccessDetails => "access payment details",
            Action::AddMessage => "add messages",
            Action::ReadMessages => "read messages",
        };
        f.write_str(phrase)
    }
}

/// The encrypted fields fixed when a payment is created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentDetails {
    pub amount: Ciphertext,
    pub payer_name: EncryptedText,
    pub receiver_name: EncryptedText,
    pub message: EncryptedText,
}

/// One confidential payment.
///
/// Core fields never change after creation. The chat list only grows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentRecord {
    pub id: PaymentId,
    pub sender: Address,
    pub receiver: Address,
    pub details: PaymentDetails,
    #[serde(default)]
    pub chat: Vec<EncryptedText>,
}

impl PaymentRecord {
    pub fn new(id: PaymentId, sender: Address, receiver: Address, details: PaymentDetails) -> Self {
        Self {
            id,
            sender,
            receiver,
            details,
            chat: Vec::new(),
        }
    }

    pub fn is_participant(&self, caller: &Address) -> bool {
        *caller == self.sender || *caller == self.receiver
    }

    /// Rejects callers other than the sender or the receiver.
    pub fn authorize(&self, caller: &Address, action: Action) -> Result<(), LedgerError> {
        if self.is_participant(caller) {
            Ok(())
        } else {
            Err(LedgerError::Unauthorized {
                caller: *caller,
                action,
            })
        }
    }

    pub fn append_chat(&mut self, caller: &Address, message: EncryptedText) -> Result<(), LedgerError> {
        self.authorize(caller, Action::AddMessage)?;
        self.chat.push(message);
        Ok(())
    }

    pub fn details_for(&self, caller: &Address) -> Result<&PaymentDetails, LedgerError> {
        self.authorize(caller, Action::AccessDetails)?;
        Ok(&self.details)
    }

    pub fn chat_for(&self, caller: &Address) -> Result<&[EncryptedText], LedgerError> {
        self.authorize(caller, Action::ReadMessages)?;
        Ok(&self.chat)
    }
}
