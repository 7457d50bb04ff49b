//! Outer surfaces of the ledger: CSV batch input and report output.

pub mod csv;
