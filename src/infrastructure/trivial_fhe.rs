use crate::domain::ciphertext::Ciphertext;
use crate::domain::ports::Encryptor;

/// Identity "encryption": the handle is the plaintext itself.
///
/// Stands in for a real FHE backend in tests and batch replays, where only
/// the ledger's bookkeeping matters. Never use it for data that must stay
/// confidential.
#[derive(Debug, Default, Clone, Copy)]
pub struct TrivialEncryptor;

impl TrivialEncryptor {
    pub fn new() -> Self {
        Self
    }
}

impl Encryptor for TrivialEncryptor {
    fn encrypt_u8(&self, value: u8) -> Ciphertext {
        Ciphertext::new(vec![value])
    }

    fn encrypt_u256(&self, word: [u8; 32]) -> Ciphertext {
        Ciphertext::new(word.to_vec())
    }
}
