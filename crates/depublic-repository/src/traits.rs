//! Repository trait definitions.
//!
//! These are the interfaces services depend on. Reads may be answered from
//! the cache; writes always reach the database first.

use async_trait::async_trait;
use depublic_core::{
    Cart, CartId, Category, CategoryId, DepublicResult, EventId, Notification, NotificationId,
    Ticket, TicketId, Transaction, TransactionId, TransactionStatus, User, UserCredentials,
    UserId, Wishlist,
};

/// User repository trait.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Lists every user.
    async fn find_all(&self) -> DepublicResult<Vec<User>>;

    /// Finds a user by ID.
    async fn find_by_id(&self, id: UserId) -> DepublicResult<Option<User>>;

    /// Finds a user by email. Always reads the database.
    async fn find_by_email(&self, email: &str) -> DepublicResult<Option<User>>;

    /// Loads login material. Never cached.
    async fn find_credentials(&self, email: &str) -> DepublicResult<Option<UserCredentials>>;

    /// Checks if an email is already registered.
    async fn email_exists(&self, email: &str) -> DepublicResult<bool>;

    /// Registers a new user.
    async fn create(&self, user: &User, password_hash: &str) -> DepublicResult<User>;

    /// Updates profile fields.
    async fn update(&self, user: &User) -> DepublicResult<User>;

    /// Replaces the stored password hash.
    async fn update_password(&self, id: UserId, password_hash: &str) -> DepublicResult<()>;

    /// Deletes a user by ID.
    async fn delete(&self, id: UserId) -> DepublicResult<bool>;
}

/// Category repository trait.
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    async fn find_all(&self) -> DepublicResult<Vec<Category>>;

    async fn find_by_id(&self, id: CategoryId) -> DepublicResult<Option<Category>>;

    async fn create(&self, category: &Category) -> DepublicResult<Category>;

    async fn update(&self, category: &Category) -> DepublicResult<Category>;

    async fn delete(&self, id: CategoryId) -> DepublicResult<bool>;
}

/// Wishlist repository trait.
#[async_trait]
pub trait WishlistRepository: Send + Sync {
    async fn find_all(&self) -> DepublicResult<Vec<Wishlist>>;

    /// Looks up one `(event, user)` pair. Always reads the database.
    async fn find_by_event_and_user(
        &self,
        event_id: EventId,
        user_id: UserId,
    ) -> DepublicResult<Option<Wishlist>>;

    async fn create(&self, wishlist: &Wishlist) -> DepublicResult<Wishlist>;

    async fn remove(&self, event_id: EventId, user_id: UserId) -> DepublicResult<bool>;
}

/// Cart repository trait.
#[async_trait]
pub trait CartRepository: Send + Sync {
    async fn find_all(&self) -> DepublicResult<Vec<Cart>>;

    async fn find_by_id(&self, id: CartId) -> DepublicResult<Option<Cart>>;

    /// Lists one user's cart lines.
    async fn find_by_user(&self, user_id: UserId) -> DepublicResult<Vec<Cart>>;

    async fn create(&self, cart: &Cart) -> DepublicResult<Cart>;

    async fn update(&self, cart: &Cart) -> DepublicResult<Cart>;

    async fn delete(&self, id: CartId) -> DepublicResult<bool>;

    /// Empties a user's cart, typically after checkout.
    async fn clear_for_user(&self, user_id: UserId) -> DepublicResult<u64>;
}

/// Transaction repository trait.
#[async_trait]
pub trait TransactionRepository: Send + Sync {
    async fn find_all(&self) -> DepublicResult<Vec<Transaction>>;

    async fn find_by_id(&self, id: TransactionId) -> DepublicResult<Option<Transaction>>;

    /// Lists one user's transactions. Always reads the database.
    async fn find_by_user(&self, user_id: UserId) -> DepublicResult<Vec<Transaction>>;

    async fn create(&self, transaction: &Transaction) -> DepublicResult<Transaction>;

    /// Records a payment gateway callback.
    async fn update_status(
        &self,
        id: TransactionId,
        status: TransactionStatus,
        payment_url: Option<&str>,
    ) -> DepublicResult<Transaction>;

    async fn update(&self, transaction: &Transaction) -> DepublicResult<Transaction>;

    /// Deletes a transaction. Its tickets go with it.
    async fn delete(&self, id: TransactionId) -> DepublicResult<bool>;
}

/// Ticket repository trait.
#[async_trait]
pub trait TicketRepository: Send + Sync {
    async fn find_all(&self) -> DepublicResult<Vec<Ticket>>;

    async fn find_by_id(&self, id: TicketId) -> DepublicResult<Option<Ticket>>;

    /// Lists the tickets of one transaction. Always reads the database.
    async fn find_by_transaction(&self, transaction_id: TransactionId) -> DepublicResult<Vec<Ticket>>;

    async fn create(&self, ticket: &Ticket) -> DepublicResult<Ticket>;

    async fn update(&self, ticket: &Ticket) -> DepublicResult<Ticket>;

    async fn delete(&self, id: TicketId) -> DepublicResult<bool>;
}

/// Notification repository trait.
#[async_trait]
pub trait NotificationRepository: Send + Sync {
    async fn find_all(&self) -> DepublicResult<Vec<Notification>>;

    /// Lists a user's notifications including broadcasts. Always reads the database.
    async fn find_for_user(&self, user_id: UserId) -> DepublicResult<Vec<Notification>>;

    async fn create(&self, notification: &Notification) -> DepublicResult<Notification>;

    async fn mark_read(&self, id: NotificationId) -> DepublicResult<Notification>;

    async fn delete(&self, id: NotificationId) -> DepublicResult<bool>;
}
