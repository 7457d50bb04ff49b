//! Application layer containing the ledger orchestration.
//!
//! This module defines the `PaymentLedger`, the entry point for creating
//! payments, appending chat messages and reading encrypted records. It relies
//! on the `PaymentStore` port for persistence.

pub mod ledger;
