use super::ciphertext::{Ciphertext, EncryptedText};
use super::payment::{PaymentId, PaymentRecord};
use crate::error::Result;
use async_trait::async_trait;

#[async_trait]
pub trait PaymentStore: Send + Sync {
    /// Stores a new record and advances the counter to its id in one step.
    async fn insert(&self, payment: PaymentRecord) -> Result<()>;
    /// Replaces a record that already exists.
    async fn update(&self, payment: PaymentRecord) -> Result<()>;
    async fn get(&self, id: PaymentId) -> Result<Option<PaymentRecord>>;
    /// All records ordered by id.
    async fn get_all(&self) -> Result<Vec<PaymentRecord>>;
    /// Number of records created so far.
    async fn counter(&self) -> Result<PaymentId>;
}

pub type PaymentStoreBox = Box<dyn PaymentStore>;
pub type PaymentStoreFactory = Box<dyn Fn() -> PaymentStoreBox + Send + Sync>;

/// Produces ciphertext handles from plaintext values.
pub trait Encryptor: Send + Sync {
    fn encrypt_u8(&self, value: u8) -> Ciphertext;
    fn encrypt_u256(&self, word: [u8; 32]) -> Ciphertext;

    /// Encrypts every UTF-8 byte of `text` on its own.
    fn encrypt_text(&self, text: &str) -> EncryptedText {
        text.bytes().map(|b| self.encrypt_u8(b)).collect()
    }
}

pub type EncryptorBox = Box<dyn Encryptor>;
