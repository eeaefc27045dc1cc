//! Integration tests for the cached repositories.
//!
//! These tests run against real PostgreSQL and Redis instances using
//! testcontainers. Requires Docker; run with `--ignored`.

mod common;

use chrono::NaiveDate;
use common::TestEnv;
use depublic_core::{
    Cart, Category, DepublicError, EventId, Notification, NotificationKind, Ticket, Transaction,
    TransactionStatus, User, UserRole, Wishlist,
};
use depublic_repository::cache::{cache_keys, CacheCodec, JsonCodec};
use depublic_repository::CacheStore;

fn user(name: &str) -> User {
    User::new(name, format!("{}@example.com", name.to_lowercase()), UserRole::User)
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_health_check() {
    let env = TestEnv::new().await;
    env.module.health_check().await.expect("Health check failed");
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_categories_read_through_redis() {
    let env = TestEnv::new().await;
    let categories = env.module.categories();
    let redis = env.redis();

    for name in ["Music", "Sports", "Theatre"] {
        categories.create(&Category::new(name)).await.unwrap();
    }
    assert_eq!(categories.find_all().await.unwrap().len(), 3);

    let cached = redis
        .get(cache_keys::ALL_CATEGORIES)
        .await
        .unwrap()
        .expect("collection not cached");
    let decoded: Vec<Category> = JsonCodec.decode(&cached).unwrap();
    assert_eq!(decoded.len(), 3);

    categories.create(&Category::new("Comedy")).await.unwrap();
    assert!(redis.get(cache_keys::ALL_CATEGORIES).await.unwrap().is_none());
    assert_eq!(categories.find_all().await.unwrap().len(), 4);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_corrupt_redis_entry_is_replaced() {
    let env = TestEnv::new().await;
    let categories = env.module.categories();
    let redis = env.redis();

    categories.create(&Category::new("Music")).await.unwrap();
    redis
        .set(cache_keys::ALL_CATEGORIES, b"garbage", std::time::Duration::from_secs(300))
        .await
        .unwrap();

    assert_eq!(categories.find_all().await.unwrap().len(), 1);
    let cached = redis.get(cache_keys::ALL_CATEGORIES).await.unwrap().unwrap();
    assert!(JsonCodec.decode::<Vec<Category>>(&cached).is_ok());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_user_lifecycle() {
    let env = TestEnv::new().await;
    let users = env.module.users();

    let mut alice = users.create(&user("Alice"), "$argon2id$hash").await.unwrap();
    assert!(users.email_exists("ALICE@example.com").await.unwrap());

    let credentials = users
        .find_credentials("alice@example.com")
        .await
        .unwrap()
        .expect("credentials missing");
    assert_eq!(credentials.password_hash, "$argon2id$hash");

    assert_eq!(users.find_by_id(alice.user_id).await.unwrap(), Some(alice.clone()));

    alice.update_profile(Some("Alice Liddell".into()), None, Some("Jakarta".into()));
    users.update(&alice).await.unwrap();
    let refreshed = users.find_by_id(alice.user_id).await.unwrap().unwrap();
    assert_eq!(refreshed.fullname, "Alice Liddell");
    assert_eq!(refreshed.address.as_deref(), Some("Jakarta"));

    let duplicate = users.create(&user("Alice"), "x").await;
    assert!(matches!(duplicate, Err(DepublicError::Conflict(_))));

    assert!(users.delete(alice.user_id).await.unwrap());
    assert!(users.find_by_id(alice.user_id).await.unwrap().is_none());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_wishlist_pair_is_unique() {
    let env = TestEnv::new().await;
    let alice = env.module.users().create(&user("Alice"), "h").await.unwrap();
    let wishlists = env.module.wishlists();
    let event = EventId::new();

    wishlists.create(&Wishlist::new(alice.user_id, event)).await.unwrap();
    assert_eq!(wishlists.find_all().await.unwrap().len(), 1);

    let again = wishlists.create(&Wishlist::new(alice.user_id, event)).await;
    assert!(matches!(again, Err(DepublicError::Conflict(_))));

    assert!(wishlists.remove(event, alice.user_id).await.unwrap());
    assert!(wishlists.find_all().await.unwrap().is_empty());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_checkout_flow() {
    let env = TestEnv::new().await;
    let alice = env.module.users().create(&user("Alice"), "h").await.unwrap();
    let carts = env.module.carts();
    let transactions = env.module.transactions();
    let tickets = env.module.tickets();
    let date = NaiveDate::from_ymd_opt(2026, 12, 31).unwrap();

    let line = carts
        .create(&Cart::new(alice.user_id, EventId::new(), 2, date, 150_000))
        .await
        .unwrap();
    assert_eq!(carts.find_by_user(alice.user_id).await.unwrap().len(), 1);

    let trx = transactions
        .create(&Transaction::new(line.cart_id, alice.user_id, &alice.fullname, "bank_transfer", line.price))
        .await
        .unwrap();
    assert_eq!(carts.clear_for_user(alice.user_id).await.unwrap(), 1);
    assert!(carts.find_by_user(alice.user_id).await.unwrap().is_empty());

    assert_eq!(
        transactions.find_by_id(trx.transaction_id).await.unwrap().unwrap().status,
        TransactionStatus::Unpaid
    );
    transactions
        .update_status(trx.transaction_id, TransactionStatus::Paid, Some("https://pay.example.com/1"))
        .await
        .unwrap();
    let paid = transactions.find_by_id(trx.transaction_id).await.unwrap().unwrap();
    assert_eq!(paid.status, TransactionStatus::Paid);
    assert_eq!(paid.payment_url.as_deref(), Some("https://pay.example.com/1"));

    let ticket = tickets
        .create(&Ticket::new(trx.transaction_id, line.event_id, "Jazz Night", date, 2))
        .await
        .unwrap();
    assert_eq!(tickets.find_by_transaction(trx.transaction_id).await.unwrap(), vec![ticket.clone()]);
    assert_eq!(tickets.find_by_id(ticket.ticket_id).await.unwrap(), Some(ticket));
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_notifications_include_broadcasts() {
    let env = TestEnv::new().await;
    let alice = env.module.users().create(&user("Alice"), "h").await.unwrap();
    let bob = env.module.users().create(&user("Bob"), "h").await.unwrap();
    let notifications = env.module.notifications();

    notifications
        .create(&Notification::for_user(alice.user_id, NotificationKind::Account, "Welcome"))
        .await
        .unwrap();
    notifications
        .create(&Notification::for_user(bob.user_id, NotificationKind::Account, "Welcome"))
        .await
        .unwrap();
    let broadcast = notifications
        .create(&Notification::broadcast(NotificationKind::General, "New events"))
        .await
        .unwrap();

    assert_eq!(notifications.find_all().await.unwrap().len(), 3);
    assert_eq!(notifications.find_for_user(alice.user_id).await.unwrap().len(), 2);

    notifications.mark_read(broadcast.notification_id).await.unwrap();
    let all = notifications.find_all().await.unwrap();
    assert!(all
        .iter()
        .any(|n| n.notification_id == broadcast.notification_id && n.is_read));
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_user_delete_clears_cascaded_views() {
    let env = TestEnv::new().await;
    let users = env.module.users();
    let carts = env.module.carts();
    let wishlists = env.module.wishlists();
    let notifications = env.module.notifications();
    let date = NaiveDate::from_ymd_opt(2026, 12, 31).unwrap();

    let alice = users.create(&user("Alice"), "h").await.unwrap();
    carts
        .create(&Cart::new(alice.user_id, EventId::new(), 1, date, 75_000))
        .await
        .unwrap();
    wishlists
        .create(&Wishlist::new(alice.user_id, EventId::new()))
        .await
        .unwrap();
    notifications
        .create(&Notification::for_user(alice.user_id, NotificationKind::Account, "Welcome"))
        .await
        .unwrap();

    assert_eq!(carts.find_all().await.unwrap().len(), 1);
    assert_eq!(carts.find_by_user(alice.user_id).await.unwrap().len(), 1);
    assert_eq!(wishlists.find_all().await.unwrap().len(), 1);
    assert_eq!(notifications.find_all().await.unwrap().len(), 1);

    assert!(users.delete(alice.user_id).await.unwrap());

    assert!(carts.find_all().await.unwrap().is_empty());
    assert!(carts.find_by_user(alice.user_id).await.unwrap().is_empty());
    assert!(wishlists.find_all().await.unwrap().is_empty());
    assert!(notifications.find_all().await.unwrap().is_empty());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_transaction_update_and_delete() {
    let env = TestEnv::new().await;
    let alice = env.module.users().create(&user("Alice"), "h").await.unwrap();
    let transactions = env.module.transactions();
    let tickets = env.module.tickets();
    let date = NaiveDate::from_ymd_opt(2026, 12, 31).unwrap();

    let line = env
        .module
        .carts()
        .create(&Cart::new(alice.user_id, EventId::new(), 2, date, 150_000))
        .await
        .unwrap();
    let mut trx = transactions
        .create(&Transaction::new(line.cart_id, alice.user_id, &alice.fullname, "bank_transfer", line.price))
        .await
        .unwrap();
    let ticket = tickets
        .create(&Ticket::new(trx.transaction_id, line.event_id, "Jazz Night", date, 2))
        .await
        .unwrap();

    assert_eq!(transactions.find_all().await.unwrap().len(), 1);
    assert_eq!(tickets.find_all().await.unwrap().len(), 1);
    assert!(tickets.find_by_id(ticket.ticket_id).await.unwrap().is_some());

    trx.payment = "credit_card".to_string();
    transactions.update(&trx).await.unwrap();
    assert_eq!(
        transactions.find_by_id(trx.transaction_id).await.unwrap().unwrap().payment,
        "credit_card"
    );
    assert_eq!(transactions.find_all().await.unwrap()[0].payment, "credit_card");

    assert!(transactions.delete(trx.transaction_id).await.unwrap());
    assert!(transactions.find_by_id(trx.transaction_id).await.unwrap().is_none());
    assert!(transactions.find_all().await.unwrap().is_empty());
    assert!(tickets.find_all().await.unwrap().is_empty());
    assert!(tickets.find_by_id(ticket.ticket_id).await.unwrap().is_none());
    assert!(!transactions.delete(trx.transaction_id).await.unwrap());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_check_constraint_is_validation_error() {
    let env = TestEnv::new().await;
    let alice = env.module.users().create(&user("Alice"), "h").await.unwrap();
    let date = NaiveDate::from_ymd_opt(2026, 12, 31).unwrap();

    let result = env
        .module
        .carts()
        .create(&Cart::new(alice.user_id, EventId::new(), 0, date, 150_000))
        .await;
    assert!(matches!(result, Err(DepublicError::Validation(_))));
}
