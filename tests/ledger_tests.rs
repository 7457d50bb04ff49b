use cipherpay::application::ledger::PaymentLedger;
use cipherpay::domain::address::Address;
use cipherpay::domain::amount::Wei;
use cipherpay::domain::ciphertext::EncryptedText;
use cipherpay::domain::payment::{Action, PaymentId};
use cipherpay::domain::permit::create_permit_for_contract;
use cipherpay::domain::ports::Encryptor;
use cipherpay::error::LedgerError;
use cipherpay::infrastructure::in_memory::InMemoryPaymentStore;
use cipherpay::infrastructure::trivial_fhe::TrivialEncryptor;
use ed25519_dalek::SigningKey;
use rust_decimal_macros::dec;

const LEDGER: Address = Address([0xcc; 20]);
const OWNER: Address = Address([0x01; 20]);
const SENDER: Address = Address([0x02; 20]);
const RECEIVER: Address = Address([0x03; 20]);

const FHE: TrivialEncryptor = TrivialEncryptor;

fn ledger() -> PaymentLedger {
    PaymentLedger::new(LEDGER, Box::new(InMemoryPaymentStore::new()))
}

fn one_ether() -> cipherpay::domain::ciphertext::Ciphertext {
    FHE.encrypt_u256(Wei::from_ether(dec!(1)).unwrap().to_word())
}

async fn create_abc(ledger: &PaymentLedger) -> PaymentId {
    ledger
        .create_payment(
            SENDER,
            RECEIVER,
            one_ether(),
            FHE.encrypt_text("A"),
            FHE.encrypt_text("B"),
            FHE.encrypt_text("C"),
        )
        .await
        .unwrap()
}

#[tokio::test]
async fn test_create_payment() {
    let ledger = ledger();

    let id = ledger
        .create_payment(
            SENDER,
            RECEIVER,
            one_ether(),
            FHE.encrypt_text("Alice"),
            FHE.encrypt_text("Bob"),
            FHE.encrypt_text("Hello"),
        )
        .await
        .unwrap();

    assert_eq!(id, PaymentId(1));
    assert_eq!(ledger.payment_counter().await.unwrap(), PaymentId(1));
}

#[tokio::test]
async fn test_add_chat_message() {
    let ledger = ledger();
    let id = create_abc(&ledger).await;

    ledger
        .add_chat_message(SENDER, id, FHE.encrypt_text("Hi"))
        .await
        .unwrap();

    let history = ledger.encrypted_chat_messages(SENDER, id).await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].len(), 2);
}

#[tokio::test]
async fn test_chat_history_keeps_order() {
    let ledger = ledger();
    let id = create_abc(&ledger).await;

    let messages = ["Hi", "Hello back", "Paid?"];
    for (i, text) in messages.iter().enumerate() {
        let caller = if i % 2 == 0 { SENDER } else { RECEIVER };
        let len = ledger
            .add_chat_message(caller, id, FHE.encrypt_text(text))
            .await
            .unwrap();
        assert_eq!(len, i + 1);
    }

    let history = ledger.encrypted_chat_messages(RECEIVER, id).await.unwrap();
    let expected: Vec<EncryptedText> = messages.iter().map(|m| FHE.encrypt_text(m)).collect();
    assert_eq!(history, expected);
}

#[tokio::test]
async fn test_get_encrypted_payment_details() {
    let ledger = ledger();
    let amount = one_ether();
    let payer_name = FHE.encrypt_text("A");
    let receiver_name = FHE.encrypt_text("B");
    let message = FHE.encrypt_text("C");

    let id = ledger
        .create_payment(
            SENDER,
            RECEIVER,
            amount.clone(),
            payer_name.clone(),
            receiver_name.clone(),
            message.clone(),
        )
        .await
        .unwrap();

    let details = ledger.encrypted_payment_details(SENDER, id).await.unwrap();

    assert_eq!(details.amount, amount);
    assert_eq!(details.payer_name, payer_name);
    assert_eq!(details.receiver_name, receiver_name);
    assert_eq!(details.message, message);
}

#[tokio::test]
async fn test_unauthorized_details_rejected() {
    let ledger = ledger();
    let id = create_abc(&ledger).await;

    let err = ledger
        .encrypted_payment_details(OWNER, id)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        LedgerError::Unauthorized {
            caller: OWNER,
            action: Action::AccessDetails
        }
    ));
    assert_eq!(
        err.to_string(),
        "Unauthorized: Only sender or receiver can access payment details"
    );
}

#[tokio::test]
async fn test_unauthorized_chat_rejected() {
    let ledger = ledger();
    let id = create_abc(&ledger).await;

    let err = ledger
        .add_chat_message(OWNER, id, FHE.encrypt_text("Hi"))
        .await
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        "Unauthorized: Only sender or receiver can add messages"
    );

    let history = ledger.encrypted_chat_messages(SENDER, id).await.unwrap();
    assert!(history.is_empty());
}

#[tokio::test]
async fn test_empty_fields_are_stored() {
    let ledger = ledger();
    let id = ledger
        .create_payment(
            SENDER,
            RECEIVER,
            one_ether(),
            EncryptedText::default(),
            EncryptedText::default(),
            EncryptedText::default(),
        )
        .await
        .unwrap();

    let details = ledger.encrypted_payment_details(RECEIVER, id).await.unwrap();
    assert!(details.payer_name.is_empty());
    assert!(details.message.is_empty());
}

#[tokio::test]
async fn test_details_with_permission() {
    let ledger = ledger();
    let id = create_abc(&ledger).await;

    let receiver_key = SigningKey::from_bytes(&[42u8; 32]);
    let receiver = Address::from_verifying_key(&receiver_key.verifying_key());
    let outsider_key = SigningKey::from_bytes(&[43u8; 32]);

    let id_for_receiver = ledger
        .create_payment(
            SENDER,
            receiver,
            one_ether(),
            FHE.encrypt_text("A"),
            FHE.encrypt_text("B"),
            FHE.encrypt_text("C"),
        )
        .await
        .unwrap();

    let permission = create_permit_for_contract(LEDGER, &receiver_key);
    let details = ledger
        .encrypted_payment_details_with_permission(&permission, id_for_receiver)
        .await
        .unwrap();
    assert_eq!(details.amount, one_ether());

    // Valid permission, but the issuer is not part of payment `id`.
    assert!(matches!(
        ledger
            .encrypted_payment_details_with_permission(&permission, id)
            .await,
        Err(LedgerError::Unauthorized { .. })
    ));

    let outsider_permission = create_permit_for_contract(LEDGER, &outsider_key);
    assert!(matches!(
        ledger
            .encrypted_payment_details_with_permission(&outsider_permission, id_for_receiver)
            .await,
        Err(LedgerError::Unauthorized { .. })
    ));

    let foreign_permission = create_permit_for_contract(Address([0xdd; 20]), &receiver_key);
    assert!(matches!(
        ledger
            .encrypted_payment_details_with_permission(&foreign_permission, id_for_receiver)
            .await,
        Err(LedgerError::PermitError(_))
    ));
}
