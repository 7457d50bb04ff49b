//! Adapters for the domain ports: payment stores and the trivial encryptor.

pub mod in_memory;
#[cfg(feature = "storage-rocksdb")]
pub mod rocksdb;
pub mod trivial_fhe;
