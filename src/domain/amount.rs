use crate::error::LedgerError;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

/// Number of wei in one ether.
const WEI_PER_ETHER: Decimal = Decimal::from_parts(0xA764_0000, 0x0DE0_B6B3, 0, false, 0);

/// A payment amount in wei, the unit the ledger encrypts as a 256-bit word.
///
/// Built from a decimal ether amount the same way `parseEther` does:
/// `1 ether = 10^18 wei`. Only whole wei are representable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct Wei(u128);

impl Wei {
    pub const ZERO: Self = Self(0);

    pub fn new(value: u128) -> Self {
        Self(value)
    }

    pub fn from_ether(ether: Decimal) -> Result<Self, LedgerError> {
        if ether.is_sign_negative() && !ether.is_zero() {
            return Err(LedgerError::ValidationError(
                "Amount must not be negative".to_string(),
            ));
        }

        let wei = ether.checked_mul(WEI_PER_ETHER).ok_or_else(|| {
            LedgerError::ValidationError(format!("Amount {ether} is too large"))
        })?;

        if !wei.fract().is_zero() {
            return Err(LedgerError::ValidationError(format!(
                "Amount {ether} has more than 18 decimals"
            )));
        }

        wei.to_u128().map(Self).ok_or_else(|| {
            LedgerError::ValidationError(format!("Amount {ether} is too large"))
        })
    }

    pub fn value(&self) -> u128 {
        self.0
    }

    /// Big-endian 256-bit word, the plaintext shape of an `euint256`.
    pub fn to_word(&self) -> [u8; 32] {
        let mut word = [0u8; 32];
        word[16..].copy_from_slice(&self.0.to_be_bytes());
        word
    }
}
