use crate::domain::payment::{PaymentId, PaymentRecord};
use crate::domain::ports::PaymentStore;
use crate::error::{LedgerError, Result};
use async_trait::async_trait;
use rocksdb::{ColumnFamily, ColumnFamilyDescriptor, DB, Options, WriteBatch};
use std::path::Path;
use std::sync::Arc;

/// Column Family for storing payment records.
pub const CF_PAYMENTS: &str = "payments";
/// Column Family for ledger metadata such as the payment counter.
pub const CF_META: &str = "meta";

const COUNTER_KEY: &[u8] = b"payment_counter";

impl From<rocksdb::Error> for LedgerError {
    fn from(e: rocksdb::Error) -> Self {
        LedgerError::InternalError(Box::new(e))
    }
}

/// A persistent store implementation using RocksDB.
///
/// Records are JSON encoded under their big-endian id, so iteration follows
/// id order. The counter lives in a separate Column Family and is written in
/// the same batch as each new record.
///
/// This struct is thread-safe (`Clone` shares the underlying `Arc<DB>`).
#[derive(Clone)]
pub struct RocksDBStore {
    db: Arc<DB>,
}

impl RocksDBStore {
    /// Opens or creates a RocksDB instance at the specified path.
    ///
    /// Ensures that the required column families ("payments" and "meta") exist.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_payments = ColumnFamilyDescriptor::new(CF_PAYMENTS, Options::default());
        let cf_meta = ColumnFamilyDescriptor::new(CF_META, Options::default());

        let db = DB::open_cf_descriptors(&opts, path, vec![cf_payments, cf_meta])?;

        Ok(Self { db: Arc::new(db) })
    }

    fn cf(&self, name: &str) -> Result<&ColumnFamily> {
        self.db.cf_handle(name).ok_or_else(|| {
            LedgerError::InternalError(
                std::io::Error::other(format!("{name} column family not found")).into(),
            )
        })
    }

    fn encode(payment: &PaymentRecord) -> Result<Vec<u8>> {
        serde_json::to_vec(payment).map_err(|e| {
            LedgerError::InternalError(Box::new(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("Serialization error: {}", e),
            )))
        })
    }

    fn decode(bytes: &[u8]) -> Result<PaymentRecord> {
        serde_json::from_slice(bytes).map_err(|e| {
            LedgerError::InternalError(Box::new(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("Deserialization error: {}", e),
            )))
        })
    }
}

#[async_trait]
impl PaymentStore for RocksDBStore {
    async fn insert(&self, payment: PaymentRecord) -> Result<()> {
        let counter = self.counter().await?.max(payment.id);
        let payments = self.cf(CF_PAYMENTS)?;
        let meta = self.cf(CF_META)?;

        let key = payment.id.value().to_be_bytes();
        if self.db.get_pinned_cf(payments, key)?.is_some() {
            return Err(LedgerError::InternalError(
                format!("Payment {} already exists", payment.id).into(),
            ));
        }

        let mut batch = WriteBatch::default();
        batch.put_cf(payments, key, Self::encode(&payment)?);
        batch.put_cf(meta, COUNTER_KEY, counter.value().to_be_bytes());
        self.db.write(batch)?;

        Ok(())
    }

    async fn update(&self, payment: PaymentRecord) -> Result<()> {
        let payments = self.cf(CF_PAYMENTS)?;

        let key = payment.id.value().to_be_bytes();
        if self.db.get_pinned_cf(payments, key)?.is_none() {
            return Err(LedgerError::PaymentNotFound(payment.id));
        }

        self.db.put_cf(payments, key, Self::encode(&payment)?)?;
        Ok(())
    }

    async fn get(&self, id: PaymentId) -> Result<Option<PaymentRecord>> {
        let payments = self.cf(CF_PAYMENTS)?;

        match self.db.get_cf(payments, id.value().to_be_bytes())? {
            Some(bytes) => Ok(Some(Self::decode(&bytes)?)),
            None => Ok(None),
        }
    }

    async fn get_all(&self) -> Result<Vec<PaymentRecord>> {
        let payments = self.cf(CF_PAYMENTS)?;

        let mut records = Vec::new();
        for item in self.db.iterator_cf(payments, rocksdb::IteratorMode::Start) {
            let (_key, value) = item?;
            records.push(Self::decode(&value)?);
        }

        Ok(records)
    }

    async fn counter(&self) -> Result<PaymentId> {
        let meta = self.cf(CF_META)?;

        let Some(bytes) = self.db.get_pinned_cf(meta, COUNTER_KEY)? else {
            return Ok(PaymentId::ZERO);
        };
        let raw: [u8; 8] = bytes.as_ref().try_into().map_err(|_| {
            LedgerError::InternalError(
                std::io::Error::other("Corrupted payment counter").into(),
            )
        })?;
        Ok(PaymentId(u64::from_be_bytes(raw)))
    }
}
