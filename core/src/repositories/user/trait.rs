//! User repository trait defining the interface for user data persistence.
//!
//! The trait is async-first and returns `DomainResult` so implementations can
//! surface database failures and unique-key conflicts uniformly.

use async_trait::async_trait;
use dc_shared::{PageQuery, Paginated};
use uuid::Uuid;

use crate::domain::entities::user::User;
use crate::errors::DomainResult;

/// Repository trait for User entity persistence operations
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by their unique identifier
    ///
    /// # Returns
    /// * `Ok(Some(User))` - User found
    /// * `Ok(None)` - No user with the given ID
    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<User>>;

    /// Find a user by email. Emails are stored lower-cased.
    async fn find_by_email(&self, email: &str) -> DomainResult<Option<User>>;

    /// Find the user holding an outstanding email verification token
    async fn find_by_verify_token(&self, token: &str) -> DomainResult<Option<User>>;

    /// Create a new user
    ///
    /// # Returns
    /// * `Err(DomainError::Conflict)` - Email already registered
    async fn create(&self, user: User) -> DomainResult<User>;

    /// Update an existing user
    ///
    /// # Returns
    /// * `Err(DomainError::NotFound)` - User does not exist
    /// * `Err(DomainError::Conflict)` - New email belongs to another user
    async fn update(&self, user: User) -> DomainResult<User>;

    /// Delete a user, returning whether a row was removed
    async fn delete(&self, id: Uuid) -> DomainResult<bool>;

    /// Page through users, searching name and email
    async fn list(&self, query: &PageQuery) -> DomainResult<Paginated<User>>;

    /// Count all users
    async fn count(&self) -> DomainResult<u64>;
}
