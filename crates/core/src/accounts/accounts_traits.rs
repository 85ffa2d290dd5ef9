//! Account repository and service traits.
//!
//! These traits define the contract for account operations without any
//! database-specific types. Mutations are async; reads are sync.

use async_trait::async_trait;

use super::accounts_model::{Account, AccountType, NewAccount, Portfolio};
use crate::errors::Result;

/// Trait defining the contract for Account repository operations.
#[async_trait]
pub trait AccountRepositoryTrait: Send + Sync {
    async fn create(&self, new_account: NewAccount) -> Result<Account>;

    /// Deletes an account by its ID. Returns the number of deleted records.
    async fn delete(&self, account_id: &str) -> Result<usize>;

    fn get_by_id(&self, account_id: &str) -> Result<Account>;

    fn list_for_user(&self, user_id: &str) -> Result<Vec<Account>>;

    fn list_account_types(&self) -> Result<Vec<AccountType>>;

    fn get_portfolio(&self, portfolio_id: &str) -> Result<Portfolio>;
}

/// Trait defining the contract for Account service operations.
#[async_trait]
pub trait AccountServiceTrait: Send + Sync {
    /// Creates a new account with business validation.
    async fn create_account(&self, new_account: NewAccount) -> Result<Account>;

    async fn delete_account(&self, account_id: &str) -> Result<()>;

    fn get_account(&self, account_id: &str) -> Result<Account>;

    fn list_accounts(&self, user_id: &str) -> Result<Vec<Account>>;
}
