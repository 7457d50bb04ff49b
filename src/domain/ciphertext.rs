use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// An opaque ciphertext handle.
///
/// The ledger stores and returns handles verbatim; it never looks inside them.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Ciphertext(Vec<u8>);

impl Ciphertext {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl From<Vec<u8>> for Ciphertext {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl fmt::Display for Ciphertext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(&self.0))
    }
}

impl Serialize for Ciphertext {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Ciphertext {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        let digits = raw.strip_prefix("0x").unwrap_or(&raw);
        hex::decode(digits)
            .map(Self)
            .map_err(serde::de::Error::custom)
    }
}

/// A text encrypted byte by byte: one handle per plaintext byte.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EncryptedText(pub Vec<Ciphertext>);

impl EncryptedText {
    pub fn new(handles: Vec<Ciphertext>) -> Self {
        Self(handles)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn handles(&self) -> &[Ciphertext] {
        &self.0
    }
}

impl FromIterator<Ciphertext> for EncryptedText {
    fn from_iter<I: IntoIterator<Item = Ciphertext>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
