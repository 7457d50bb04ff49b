use crate::domain::payment::{PaymentId, PaymentRecord};
use crate::domain::ports::PaymentStore;
use crate::error::{LedgerError, Result};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Default)]
struct Ledger {
    counter: PaymentId,
    payments: BTreeMap<PaymentId, PaymentRecord>,
}

/// A thread-safe in-memory store for payment records.
///
/// Records and the counter live behind one `RwLock`, so an insert moves both
/// together. Cloning shares the underlying state.
#[derive(Default, Clone)]
pub struct InMemoryPaymentStore {
    inner: Arc<RwLock<Ledger>>,
}

impl InMemoryPaymentStore {
    /// Creates a new, empty in-memory payment store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PaymentStore for InMemoryPaymentStore {
    async fn insert(&self, payment: PaymentRecord) -> Result<()> {
        let mut ledger = self.inner.write().await;
        if ledger.payments.contains_key(&payment.id) {
            return Err(LedgerError::InternalError(
                format!("Payment {} already exists", payment.id).into(),
            ));
        }
        ledger.counter = ledger.counter.max(payment.id);
        ledger.payments.insert(payment.id, payment);
        Ok(())
    }

    async fn update(&self, payment: PaymentRecord) -> Result<()> {
        let mut ledger = self.inner.write().await;
        match ledger.payments.get_mut(&payment.id) {
            Some(existing) => {
                *existing = payment;
                Ok(())
            }
            None => Err(LedgerError::PaymentNotFound(payment.id)),
        }
    }

    async fn get(&self, id: PaymentId) -> Result<Option<PaymentRecord>> {
        let ledger = self.inner.read().await;
        Ok(ledger.payments.get(&id).cloned())
    }

    async fn get_all(&self) -> Result<Vec<PaymentRecord>> {
        let ledger = self.inner.read().await;
        Ok(ledger.payments.values().cloned().collect())
    }

    async fn counter(&self) -> Result<PaymentId> {
        Ok(self.inner.read().await.counter)
    }
}
