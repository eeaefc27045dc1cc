//! In-memory DAOs and a fault-injecting cache store for repository tests.

use crate::cache::{CacheError, CacheStore, InMemoryCacheStore};
use crate::dao::{
    CartDao, CategoryDao, NotificationDao, TicketDao, TransactionDao, UserDao, WishlistDao,
};
use async_trait::async_trait;
use chrono::Utc;
use depublic_core::{
    Cart, CartId, Category, CategoryId, DepublicError, DepublicResult, EventId, Notification,
    NotificationId, Ticket, TicketId, Transaction, TransactionId, TransactionStatus, User,
    UserCredentials, UserId, Wishlist,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// Rows of one table plus a read counter and a kill switch.
pub(crate) struct MockTable<T> {
    rows: Mutex<Vec<T>>,
    reads: AtomicUsize,
    broken: AtomicBool,
}

impl<T: Clone> MockTable<T> {
    fn new(rows: Vec<T>) -> Self {
        Self {
            rows: Mutex::new(rows),
            reads: AtomicUsize::new(0),
            broken: AtomicBool::new(false),
        }
    }

    /// Number of read queries that reached this table.
    pub(crate) fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    /// Makes every subsequent query fail with a database error.
    pub(crate) fn break_connection(&self) {
        self.broken.store(true, Ordering::SeqCst);
    }

    pub(crate) fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    fn check(&self) -> DepublicResult<()> {
        if self.broken.load(Ordering::SeqCst) {
            return Err(DepublicError::Database("connection reset by peer".into()));
        }
        Ok(())
    }

    fn read<R>(&self, f: impl FnOnce(&Vec<T>) -> R) -> DepublicResult<R> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        Ok(f(&self.rows.lock().unwrap()))
    }

    fn write<R>(&self, f: impl FnOnce(&mut Vec<T>) -> DepublicResult<R>) -> DepublicResult<R> {
        self.check()?;
        f(&mut self.rows.lock().unwrap())
    }
}

macro_rules! mock_dao {
    ($name:ident, $entity:ty) => {
        pub(crate) struct $name {
            pub(crate) table: MockTable<$entity>,
        }

        impl $name {
            pub(crate) fn new() -> Self {
                Self::with_rows(Vec::new())
            }

            pub(crate) fn with_rows(rows: Vec<$entity>) -> Self {
                Self {
                    table: MockTable::new(rows),
                }
            }
        }
    };
}

mock_dao!(MockUserDao, User);
mock_dao!(MockCategoryDao, Category);
mock_dao!(MockWishlistDao, Wishlist);
mock_dao!(MockCartDao, Cart);
mock_dao!(MockTicketDao, Ticket);
mock_dao!(MockNotificationDao, Notification);

/// Transactions plus the ids of the tickets that cascade with them.
pub(crate) struct MockTransactionDao {
    pub(crate) table: MockTable<Transaction>,
    tickets: Mutex<Vec<(TransactionId, TicketId)>>,
}

impl MockTransactionDao {
    pub(crate) fn new() -> Self {
        Self::with_rows(Vec::new())
    }

    pub(crate) fn with_rows(rows: Vec<Transaction>) -> Self {
        Self {
            table: MockTable::new(rows),
            tickets: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn with_tickets(self, transaction_id: TransactionId, ticket_ids: &[TicketId]) -> Self {
        self.tickets
            .lock()
            .unwrap()
            .extend(ticket_ids.iter().map(|&ticket_id| (transaction_id, ticket_id)));
        self
    }
}

fn replace<T, F>(rows: &mut [T], matches: F, row: T, resource: &'static str, id: String) -> DepublicResult<T>
where
    T: Clone,
    F: Fn(&T) -> bool,
{
    match rows.iter_mut().find(|r| matches(r)) {
        Some(slot) => {
            *slot = row;
            Ok(slot.clone())
        }
        None => Err(DepublicError::not_found(resource, id)),
    }
}

fn remove_where<T>(rows: &mut Vec<T>, matches: impl Fn(&T) -> bool) -> usize {
    let before = rows.len();
    rows.retain(|r| !matches(r));
    before - rows.len()
}

#[async_trait]
impl UserDao for MockUserDao {
    async fn find_all(&self) -> DepublicResult<Vec<User>> {
        self.table.read(Clone::clone)
    }

    async fn find_by_id(&self, id: UserId) -> DepublicResult<Option<User>> {
        self.table.read(|rows| rows.iter().find(|u| u.user_id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> DepublicResult<Option<User>> {
        let email = email.to_lowercase();
        self.table.read(|rows| rows.iter().find(|u| u.email == email).cloned())
    }

    async fn find_credentials(&self, email: &str) -> DepublicResult<Option<UserCredentials>> {
        Ok(self.find_by_email(email).await?.map(|u| UserCredentials {
            user_id: u.user_id,
            email: u.email,
            password_hash: "hashed".to_string(),
            role: u.role,
            verified: u.verified,
        }))
    }

    async fn email_exists(&self, email: &str) -> DepublicResult<bool> {
        Ok(self.find_by_email(email).await?.is_some())
    }

    async fn create(&self, user: &User, _password_hash: &str) -> DepublicResult<User> {
        self.table.write(|rows| {
            if rows.iter().any(|u| u.email == user.email) {
                return Err(DepublicError::conflict("email already registered"));
            }
            rows.push(user.clone());
            Ok(user.clone())
        })
    }

    async fn update(&self, user: &User) -> DepublicResult<User> {
        let id = user.user_id;
        self.table.write(|rows| {
            replace(rows, |u| u.user_id == id, user.clone(), "User", id.to_string())
        })
    }

    async fn update_password(&self, id: UserId, _password_hash: &str) -> DepublicResult<()> {
        self.table.write(|rows| {
            if rows.iter().any(|u| u.user_id == id) {
                Ok(())
            } else {
                Err(DepublicError::not_found("User", id))
            }
        })
    }

    async fn delete(&self, id: UserId) -> DepublicResult<bool> {
        self.table.write(|rows| Ok(remove_where(rows, |u| u.user_id == id) > 0))
    }
}

#[async_trait]
impl CategoryDao for MockCategoryDao {
    async fn find_all(&self) -> DepublicResult<Vec<Category>> {
        self.table.read(Clone::clone)
    }

    async fn find_by_id(&self, id: CategoryId) -> DepublicResult<Option<Category>> {
        self.table.read(|rows| rows.iter().find(|c| c.category_id == id).cloned())
    }

    async fn create(&self, category: &Category) -> DepublicResult<Category> {
        self.table.write(|rows| {
            rows.push(category.clone());
            Ok(category.clone())
        })
    }

    async fn update(&self, category: &Category) -> DepublicResult<Category> {
        let id = category.category_id;
        self.table.write(|rows| {
            replace(rows, |c| c.category_id == id, category.clone(), "Category", id.to_string())
        })
    }

    async fn delete(&self, id: CategoryId) -> DepublicResult<bool> {
        self.table.write(|rows| Ok(remove_where(rows, |c| c.category_id == id) > 0))
    }
}

#[async_trait]
impl WishlistDao for MockWishlistDao {
    async fn find_all(&self) -> DepublicResult<Vec<Wishlist>> {
        self.table.read(Clone::clone)
    }

    async fn find_by_event_and_user(
        &self,
        event_id: EventId,
        user_id: UserId,
    ) -> DepublicResult<Option<Wishlist>> {
        self.table.read(|rows| {
            rows.iter()
                .find(|w| w.event_id == event_id && w.user_id == user_id)
                .cloned()
        })
    }

    async fn create(&self, wishlist: &Wishlist) -> DepublicResult<Wishlist> {
        self.table.write(|rows| {
            if rows
                .iter()
                .any(|w| w.event_id == wishlist.event_id && w.user_id == wishlist.user_id)
            {
                return Err(DepublicError::conflict("event already wishlisted"));
            }
            rows.push(wishlist.clone());
            Ok(wishlist.clone())
        })
    }

    async fn remove(&self, event_id: EventId, user_id: UserId) -> DepublicResult<bool> {
        self.table.write(|rows| {
            Ok(remove_where(rows, |w| w.event_id == event_id && w.user_id == user_id) > 0)
        })
    }
}

#[async_trait]
impl CartDao for MockCartDao {
    async fn find_all(&self) -> DepublicResult<Vec<Cart>> {
        self.table.read(Clone::clone)
    }

    async fn find_by_id(&self, id: CartId) -> DepublicResult<Option<Cart>> {
        self.table.read(|rows| rows.iter().find(|c| c.cart_id == id).cloned())
    }

    async fn find_by_user(&self, user_id: UserId) -> DepublicResult<Vec<Cart>> {
        self.table
            .read(|rows| rows.iter().filter(|c| c.user_id == user_id).cloned().collect())
    }

    async fn create(&self, cart: &Cart) -> DepublicResult<Cart> {
        self.table.write(|rows| {
            rows.push(cart.clone());
            Ok(cart.clone())
        })
    }

    async fn update(&self, cart: &Cart) -> DepublicResult<Cart> {
        let id = cart.cart_id;
        self.table
            .write(|rows| replace(rows, |c| c.cart_id == id, cart.clone(), "Cart", id.to_string()))
    }

    async fn delete(&self, id: CartId) -> DepublicResult<Option<Cart>> {
        self.table.write(|rows| {
            let removed = rows.iter().position(|c| c.cart_id == id).map(|i| rows.remove(i));
            Ok(removed)
        })
    }

    async fn clear_for_user(&self, user_id: UserId) -> DepublicResult<u64> {
        self.table
            .write(|rows| Ok(remove_where(rows, |c| c.user_id == user_id) as u64))
    }
}

#[async_trait]
impl TransactionDao for MockTransactionDao {
    async fn find_all(&self) -> DepublicResult<Vec<Transaction>> {
        self.table.read(Clone::clone)
    }

    async fn find_by_id(&self, id: TransactionId) -> DepublicResult<Option<Transaction>> {
        self.table
            .read(|rows| rows.iter().find(|t| t.transaction_id == id).cloned())
    }

    async fn find_by_user(&self, user_id: UserId) -> DepublicResult<Vec<Transaction>> {
        self.table
            .read(|rows| rows.iter().filter(|t| t.user_id == user_id).cloned().collect())
    }

    async fn create(&self, transaction: &Transaction) -> DepublicResult<Transaction> {
        self.table.write(|rows| {
            rows.push(transaction.clone());
            Ok(transaction.clone())
        })
    }

    async fn update_status(
        &self,
        id: TransactionId,
        status: TransactionStatus,
        payment_url: Option<&str>,
    ) -> DepublicResult<Transaction> {
        self.table.write(|rows| {
            let Some(trx) = rows.iter_mut().find(|t| t.transaction_id == id) else {
                return Err(DepublicError::not_found("Transaction", id));
            };
            trx.status = status;
            if let Some(url) = payment_url {
                trx.payment_url = Some(url.to_string());
            }
            trx.updated_at = Utc::now();
            Ok(trx.clone())
        })
    }

    async fn update(&self, transaction: &Transaction) -> DepublicResult<Transaction> {
        let id = transaction.transaction_id;
        self.table.write(|rows| {
            replace(
                rows,
                |t| t.transaction_id == id,
                transaction.clone(),
                "Transaction",
                id.to_string(),
            )
        })
    }

    async fn delete(&self, id: TransactionId) -> DepublicResult<Option<Vec<TicketId>>> {
        let removed = self
            .table
            .write(|rows| Ok(remove_where(rows, |t| t.transaction_id == id)))?;
        if removed == 0 {
            return Ok(None);
        }
        let mut tickets = self.tickets.lock().unwrap();
        let ticket_ids = tickets
            .iter()
            .filter(|(trx, _)| *trx == id)
            .map(|&(_, ticket_id)| ticket_id)
            .collect();
        tickets.retain(|(trx, _)| *trx != id);
        Ok(Some(ticket_ids))
    }
}

#[async_trait]
impl TicketDao for MockTicketDao {
    async fn find_all(&self) -> DepublicResult<Vec<Ticket>> {
        self.table.read(Clone::clone)
    }

    async fn find_by_id(&self, id: TicketId) -> DepublicResult<Option<Ticket>> {
        self.table.read(|rows| rows.iter().find(|t| t.ticket_id == id).cloned())
    }

    async fn find_by_transaction(&self, transaction_id: TransactionId) -> DepublicResult<Vec<Ticket>> {
        self.table.read(|rows| {
            rows.iter()
                .filter(|t| t.transaction_id == transaction_id)
                .cloned()
                .collect()
        })
    }

    async fn create(&self, ticket: &Ticket) -> DepublicResult<Ticket> {
        self.table.write(|rows| {
            rows.push(ticket.clone());
            Ok(ticket.clone())
        })
    }

    async fn update(&self, ticket: &Ticket) -> DepublicResult<Ticket> {
        let id = ticket.ticket_id;
        self.table.write(|rows| {
            replace(rows, |t| t.ticket_id == id, ticket.clone(), "Ticket", id.to_string())
        })
    }

    async fn delete(&self, id: TicketId) -> DepublicResult<bool> {
        self.table.write(|rows| Ok(remove_where(rows, |t| t.ticket_id == id) > 0))
    }
}

#[async_trait]
impl NotificationDao for MockNotificationDao {
    async fn find_all(&self) -> DepublicResult<Vec<Notification>> {
        self.table.read(Clone::clone)
    }

    async fn find_for_user(&self, user_id: UserId) -> DepublicResult<Vec<Notification>> {
        self.table.read(|rows| {
            rows.iter()
                .filter(|n| n.is_visible_to(user_id))
                .cloned()
                .collect()
        })
    }

    async fn create(&self, notification: &Notification) -> DepublicResult<Notification> {
        self.table.write(|rows| {
            rows.push(notification.clone());
            Ok(notification.clone())
        })
    }

    async fn mark_read(&self, id: NotificationId) -> DepublicResult<Notification> {
        self.table.write(|rows| {
            let Some(n) = rows.iter_mut().find(|n| n.notification_id == id) else {
                return Err(DepublicError::not_found("Notification", id));
            };
            n.is_read = true;
            Ok(n.clone())
        })
    }

    async fn delete(&self, id: NotificationId) -> DepublicResult<bool> {
        self.table
            .write(|rows| Ok(remove_where(rows, |n| n.notification_id == id) > 0))
    }
}

/// [`InMemoryCacheStore`] whose operations can be switched to fail.
#[derive(Default)]
pub(crate) struct FlakyCacheStore {
    inner: InMemoryCacheStore,
    fail_gets: AtomicBool,
    fail_sets: AtomicBool,
    fail_deletes: AtomicBool,
    deletes: Mutex<HashMap<String, usize>>,
}

impl FlakyCacheStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn fail_gets(&self, fail: bool) {
        self.fail_gets.store(fail, Ordering::SeqCst);
    }

    pub(crate) fn fail_sets(&self, fail: bool) {
        self.fail_sets.store(fail, Ordering::SeqCst);
    }

    pub(crate) fn fail_deletes(&self, fail: bool) {
        self.fail_deletes.store(fail, Ordering::SeqCst);
    }

    /// How many times `key` was passed to `delete`, failed or not.
    pub(crate) fn delete_calls(&self, key: &str) -> usize {
        self.deletes.lock().unwrap().get(key).copied().unwrap_or(0)
    }

    pub(crate) fn inner(&self) -> &InMemoryCacheStore {
        &self.inner
    }
}

fn refused() -> CacheError {
    CacheError::Unavailable("connection refused".into())
}

#[async_trait]
impl CacheStore for FlakyCacheStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        if self.fail_gets.load(Ordering::SeqCst) {
            return Err(refused());
        }
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &[u8], ttl: Duration) -> Result<(), CacheError> {
        if self.fail_sets.load(Ordering::SeqCst) {
            return Err(refused());
        }
        self.inner.set(key, value, ttl).await
    }

    async fn delete(&self, key: &str) -> Result<bool, CacheError> {
        *self.deletes.lock().unwrap().entry(key.to_string()).or_default() += 1;
        if self.fail_deletes.load(Ordering::SeqCst) {
            return Err(refused());
        }
        self.inner.delete(key).await
    }
}
