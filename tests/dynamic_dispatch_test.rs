use cipherpay::domain::address::Address;
use cipherpay::domain::ciphertext::{Ciphertext, EncryptedText};
use cipherpay::domain::payment::{PaymentDetails, PaymentId, PaymentRecord};
use cipherpay::domain::ports::{Encryptor, EncryptorBox, PaymentStoreBox};
use cipherpay::infrastructure::in_memory::InMemoryPaymentStore;
use cipherpay::infrastructure::trivial_fhe::TrivialEncryptor;

#[tokio::test]
async fn test_ports_as_trait_objects() {
    let store: PaymentStoreBox = Box::new(InMemoryPaymentStore::new());
    let encryptor: EncryptorBox = Box::new(TrivialEncryptor::new());

    let record = PaymentRecord::new(
        PaymentId(1),
        Address::new([1; 20]),
        Address::new([2; 20]),
        PaymentDetails {
            amount: encryptor.encrypt_u256([0; 32]),
            payer_name: encryptor.encrypt_text("A"),
            receiver_name: encryptor.encrypt_text("B"),
            message: EncryptedText::new(vec![Ciphertext::new(vec![67])]),
        },
    );

    // Verify Send + Sync by spawning tasks
    let store_handle = tokio::spawn(async move {
        store.insert(record).await.unwrap();
        store.get(PaymentId(1)).await.unwrap().unwrap()
    });

    let encryptor_handle = tokio::spawn(async move { encryptor.encrypt_text("Hi") });

    let retrieved = store_handle.await.unwrap();
    assert_eq!(retrieved.id, PaymentId(1));

    let text = encryptor_handle.await.unwrap();
    assert_eq!(text.len(), 2);
}
