//! Domain model of the confidential payment ledger: records, the values they
//! hold, permits, and the ports the application layer depends on.

pub mod address;
pub mod amount;
pub mod ciphertext;
pub mod operation;
pub mod payment;
pub mod permit;
pub mod ports;
