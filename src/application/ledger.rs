use crate::domain::address::Address;
use crate::domain::ciphertext::{Ciphertext, EncryptedText};
use crate::domain::operation::{Operation, Outcome};
use crate::domain::payment::{PaymentDetails, PaymentId, PaymentRecord};
use crate::domain::permit::Permission;
use crate::domain::ports::PaymentStoreBox;
use crate::error::{LedgerError, Result};
use tokio::sync::Mutex;
use tracing::debug;

/// The confidential payment ledger.
///
/// `PaymentLedger` stores encrypted payment records and gates every read and
/// chat append on the caller being one of the two participants. Mutations are
/// serialized behind a mutex, so every caller observes one total order of
/// creates and appends even when the ledger is shared between tasks.
pub struct PaymentLedger {
    address: Address,
    store: PaymentStoreBox,
    write_lock: Mutex<()>,
}

impl PaymentLedger {
    /// Creates a ledger living at `address` on top of `store`.
    ///
    /// The address is only used to check that decryption permissions target
    /// this ledger.
    pub fn new(address: Address, store: PaymentStoreBox) -> Self {
        Self {
            address,
            store,
            write_lock: Mutex::new(()),
        }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    /// Records a new payment from `caller` to `receiver` and returns its id.
    ///
    /// All ciphertexts are stored verbatim.
    pub async fn create_payment(
        &self,
        caller: Address,
        receiver: Address,
        amount: Ciphertext,
        payer_name: EncryptedText,
        receiver_name: EncryptedText,
        message: EncryptedText,
    ) -> Result<PaymentId> {
        let _guard = self.write_lock.lock().await;

        let id = self.store.counter().await?.next().ok_or_else(|| {
            LedgerError::InternalError("Payment counter overflow".into())
        })?;

        let record = PaymentRecord::new(
            id,
            caller,
            receiver,
            PaymentDetails {
                amount,
                payer_name,
                receiver_name,
                message,
            },
        );
        self.store.insert(record).await?;

        debug!(payment = %id, sender = %caller, receiver = %receiver, "payment created");
        Ok(id)
    }

    /// Appends an encrypted chat message and returns the new history length.
    pub async fn add_chat_message(
        &self,
        caller: Address,
        id: PaymentId,
        message: EncryptedText,
    ) -> Result<usize> {
        let _guard = self.write_lock.lock().await;

        let mut record = self.load(id).await?;
        record.append_chat(&caller, message)?;
        let messages = record.chat.len();
        self.store.update(record).await?;

        debug!(payment = %id, caller = %caller, messages, "chat message added");
        Ok(messages)
    }

    /// The full chat history of a payment, oldest first.
    pub async fn encrypted_chat_messages(
        &self,
        caller: Address,
        id: PaymentId,
    ) -> Result<Vec<EncryptedText>> {
        let record = self.load(id).await?;
        Ok(record.chat_for(&caller)?.to_vec())
    }

    /// The encrypted fields supplied when the payment was created.
    ///
    /// An id that was never assigned yields `PaymentNotFound`, not
    /// `Unauthorized`, whoever the caller is.
    pub async fn encrypted_payment_details(
        &self,
        caller: Address,
        id: PaymentId,
    ) -> Result<PaymentDetails> {
        let record = self.load(id).await?;
        Ok(record.details_for(&caller)?.clone())
    }

    /// Detail read on behalf of the issuer of a verified permission.
    pub async fn encrypted_payment_details_with_permission(
        &self,
        permission: &Permission,
        id: PaymentId,
    ) -> Result<PaymentDetails> {
        let issuer = permission.verify_for(&self.address)?;
        self.encrypted_payment_details(issuer, id).await
    }

    /// Number of payments created so far.
    pub async fn payment_counter(&self) -> Result<PaymentId> {
        self.store.counter().await
    }

    /// Applies one batch operation.
    pub async fn apply(&self, operation: Operation) -> Result<Outcome> {
        match operation {
            Operation::Create {
                caller,
                receiver,
                amount,
                payer_name,
                receiver_name,
                message,
            } => self
                .create_payment(caller, receiver, amount, payer_name, receiver_name, message)
                .await
                .map(Outcome::Created),
            Operation::Chat {
                caller,
                id,
                message,
            } => self
                .add_chat_message(caller, id, message)
                .await
                .map(|messages| Outcome::MessageAdded { id, messages }),
            Operation::Details { caller, id } => self
                .encrypted_payment_details(caller, id)
                .await
                .map(Outcome::Details),
            Operation::History { caller, id } => self
                .encrypted_chat_messages(caller, id)
                .await
                .map(Outcome::History),
        }
    }

    /// Consumes the ledger and returns every record ordered by id.
    pub async fn into_results(self) -> Result<Vec<PaymentRecord>> {
        self.store.get_all().await
    }

    async fn load(&self, id: PaymentId) -> Result<PaymentRecord> {
        self.store
            .get(id)
            .await?
            .ok_or(LedgerError::PaymentNotFound(id))
    }
}
