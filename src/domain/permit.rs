//! Decryption permits.
//!
//! A permit binds a fresh sealing key to one ledger address and is signed by
//! the identity that wants to read that ledger's ciphertexts. The
//! [`Permission`] extracted from it carries only public material and is what
//! gets handed to the ledger.

use super::address::Address;
use crate::error::LedgerError;
use ed25519_dalek::{Signature, Signer, SigningKey, VerifyingKey};
use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

const PERMIT_DOMAIN: &[u8] = b"cipherpay.permit.v1";

fn permit_digest(contract: &Address, public_key: &[u8; 32]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(PERMIT_DOMAIN);
    hasher.update(contract.as_bytes());
    hasher.update(public_key);
    hasher.finalize().into()
}

/// Parses a 32-byte Ed25519 secret key given as hex.
pub fn signing_key_from_hex(raw: &str) -> Result<SigningKey, LedgerError> {
    let mut secret = [0u8; 32];
    hex::decode_to_slice(raw.trim().trim_start_matches("0x"), &mut secret)
        .map_err(|e| LedgerError::PermitError(format!("Invalid signer key: {e}")))?;
    Ok(SigningKey::from_bytes(&secret))
}

/// Key pair the permit binds to its contract.
///
/// Nothing in this crate seals or unseals with it: the public half only
/// travels in the signed [`Permission`] so an external sealing service can
/// encrypt results for the holder, who keeps the secret half.
#[derive(Clone)]
pub struct SealingKeyPair {
    secret: SigningKey,
}

impl SealingKeyPair {
    pub fn generate() -> Self {
        Self {
            secret: SigningKey::generate(&mut OsRng),
        }
    }

    pub fn public_key(&self) -> [u8; 32] {
        self.secret.verifying_key().to_bytes()
    }

    pub fn secret_key(&self) -> [u8; 32] {
        self.secret.to_bytes()
    }
}

impl fmt::Debug for SealingKeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SealingKeyPair")
            .field("public_key", &hex::encode(self.public_key()))
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone)]
pub struct Permit {
    pub contract: Address,
    pub issuer: Address,
    pub verifying_key: VerifyingKey,
    pub sealing_key: SealingKeyPair,
    pub signature: Signature,
}

impl Permit {
    pub fn generate(contract: Address, signer: &SigningKey) -> Self {
        let sealing_key = SealingKeyPair::generate();
        let verifying_key = signer.verifying_key();
        let digest = permit_digest(&contract, &sealing_key.public_key());

        Self {
            contract,
            issuer: Address::from_verifying_key(&verifying_key),
            verifying_key,
            signature: signer.sign(&digest),
            sealing_key,
        }
    }

    /// The shareable part of the permit; the sealing secret stays behind.
    pub fn permission(&self) -> Permission {
        Permission {
            contract: self.contract,
            issuer: self.issuer,
            verifying_key: self.verifying_key.to_bytes(),
            public_key: self.sealing_key.public_key(),
            signature: self.signature.to_bytes(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permission {
    pub contract: Address,
    pub issuer: Address,
    #[serde(with = "hex_array")]
    pub verifying_key: [u8; 32],
    /// Public half of the holder's [`SealingKeyPair`], covered by the signature.
    #[serde(with = "hex_array")]
    pub public_key: [u8; 32],
    #[serde(with = "hex_array")]
    pub signature: [u8; 64],
}

impl Permission {
    /// Checks the signature and that the issuer owns the verifying key.
    pub fn verify(&self) -> Result<(), LedgerError> {
        let key = VerifyingKey::from_bytes(&self.verifying_key)
            .map_err(|e| LedgerError::PermitError(format!("Invalid verifying key: {e}")))?;

        if Address::from_verifying_key(&key) != self.issuer {
            return Err(LedgerError::PermitError(
                "Issuer does not match verifying key".to_string(),
            ));
        }

        let digest = permit_digest(&self.contract, &self.public_key);
        key.verify_strict(&digest, &Signature::from_bytes(&self.signature))
            .map_err(|_| LedgerError::PermitError("Signature verification failed".to_string()))
    }

    /// Verifies the permission for `contract` and returns the issuer.
    pub fn verify_for(&self, contract: &Address) -> Result<Address, LedgerError> {
        if self.contract != *contract {
            return Err(LedgerError::PermitError(format!(
                "Permission targets {}, not {}",
                self.contract, contract
            )));
        }
        self.verify()?;
        Ok(self.issuer)
    }
}

/// Generates a permit for `contract` signed by `signer` and extracts its
/// permission.
pub fn create_permit_for_contract(contract: Address, signer: &SigningKey) -> Permission {
    Permit::generate(contract, signer).permission()
}

mod hex_array {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S, const N: usize>(bytes: &[u8; N], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&hex::encode(bytes))
    }

    pub fn deserialize<'de, D, const N: usize>(deserializer: D) -> Result<[u8; N], D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        let mut bytes = [0u8; N];
        hex::decode_to_slice(raw.trim_start_matches("0x"), &mut bytes)
            .map_err(serde::de::Error::custom)?;
        Ok(bytes)
    }
}
