//! Account service.
//!
//! Accounts are kept as one JSON array under the `accounts` key-value entry;
//! every write loads the array, changes it, and stores it back whole.

use async_trait::async_trait;
use tracing::info;
use uuid::Uuid;

use common::{AppError, AppResult};
use domain::{Account, Accounts, CreateAccount, Deleted, UpdateAccount};

use crate::store::KeyValueStore;

const EMAIL_TAKEN: &str = "An account with this email";

/// Account service trait for dependency injection.
#[async_trait]
pub trait AccountService: Send + Sync {
    /// List accounts, optionally filtered by name or email
    async fn list(&self, needle: Option<&str>) -> AppResult<Accounts>;

    async fn get(&self, id: &str) -> AppResult<Account>;

    /// Create an account; emails are unique ignoring case
    async fn create(&self, payload: CreateAccount) -> AppResult<Account>;

    async fn update(&self, payload: UpdateAccount) -> AppResult<Account>;

    /// Remove an account and return the ones left
    async fn delete(&self, id: &str) -> AppResult<Accounts>;

    async fn bulk_delete(&self, ids: &[String]) -> AppResult<Deleted>;
}

/// Concrete implementation of AccountService over the key-value store.
pub struct AccountManager {
    kv: KeyValueStore,
}

impl AccountManager {
    pub fn new(kv: KeyValueStore) -> Self {
        Self { kv }
    }
}

fn email_taken(accounts: &[Account], email: &str, except: Option<&str>) -> bool {
    accounts
        .iter()
        .filter(|a| Some(a.id.as_str()) != except)
        .any(|a| a.email.eq_ignore_ascii_case(email))
}

#[async_trait]
impl AccountService for AccountManager {
    async fn list(&self, needle: Option<&str>) -> AppResult<Accounts> {
        let mut accounts = self.kv.load_accounts().await?;
        if let Some(needle) = needle {
            accounts.retain(|a| a.matches(needle));
        }
        Ok(Accounts { accounts })
    }

    async fn get(&self, id: &str) -> AppResult<Account> {
        self.kv
            .load_accounts()
            .await?
            .into_iter()
            .find(|a| a.id == id)
            .ok_or(AppError::NotFound)
    }

    async fn create(&self, payload: CreateAccount) -> AppResult<Account> {
        let (Some(name), Some(email), Some(role)) = (payload.name, payload.email, payload.role)
        else {
            return Err(AppError::MissingFields(vec!["name", "email", "role"]));
        };

        let mut accounts = self.kv.load_accounts().await?;
        if email_taken(&accounts, &email, None) {
            return Err(AppError::conflict(EMAIL_TAKEN));
        }

        let account = Account {
            id: Uuid::new_v4().to_string(),
            name,
            email,
            role,
            address: payload.address,
            contact_number: payload.contact_number,
        };
        accounts.push(account.clone());
        self.kv.save_accounts(&accounts).await?;

        info!("Created account {}", account.id);
        Ok(account)
    }

    async fn update(&self, payload: UpdateAccount) -> AppResult<Account> {
        let id = payload
            .id
            .clone()
            .ok_or_else(|| AppError::MissingFields(vec!["id"]))?;

        let mut accounts = self.kv.load_accounts().await?;
        if let Some(email) = payload.email.as_deref() {
            if email_taken(&accounts, email, Some(&id)) {
                return Err(AppError::conflict(EMAIL_TAKEN));
            }
        }

        let account = accounts
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or(AppError::NotFound)?;
        account.apply(payload);
        let account = account.clone();

        self.kv.save_accounts(&accounts).await?;
        info!("Updated account {}", id);
        Ok(account)
    }

    async fn delete(&self, id: &str) -> AppResult<Accounts> {
        let mut accounts = self.kv.load_accounts().await?;
        let index = accounts
            .iter()
            .position(|a| a.id == id)
            .ok_or(AppError::NotFound)?;

        accounts.remove(index);
        self.kv.save_accounts(&accounts).await?;

        info!("Deleted account {}", id);
        Ok(Accounts { accounts })
    }

    async fn bulk_delete(&self, ids: &[String]) -> AppResult<Deleted> {
        let (removed, kept): (Vec<Account>, Vec<Account>) = self
            .kv
            .load_accounts()
            .await?
            .into_iter()
            .partition(|a| ids.contains(&a.id));

        self.kv.save_accounts(&kept).await?;
        info!("Bulk deleted {} accounts", removed.len());
        Ok(Deleted {
            ids: removed.into_iter().map(|a| a.id).collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::Role;

    fn payload(name: &str, email: &str) -> CreateAccount {
        CreateAccount {
            name: Some(name.into()),
            email: Some(email.into()),
            role: Some(Role::Agent),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_duplicate_email_conflicts_ignoring_case() {
        let service = AccountManager::new(KeyValueStore::in_memory());
        service.create(payload("Lito", "lito@example.com")).await.unwrap();

        let result = service.create(payload("Lito Two", "LITO@example.com")).await;
        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_delete_returns_remaining_accounts() {
        let service = AccountManager::new(KeyValueStore::in_memory());
        let first = service.create(payload("A", "a@example.com")).await.unwrap();
        let second = service.create(payload("B", "b@example.com")).await.unwrap();

        let remaining = service.delete(&first.id).await.unwrap();
        assert_eq!(remaining.accounts, vec![second]);

        assert!(matches!(
            service.delete(&first.id).await,
            Err(AppError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_update_keeps_own_email() {
        let service = AccountManager::new(KeyValueStore::in_memory());
        let account = service.create(payload("Nena", "nena@example.com")).await.unwrap();

        let updated = service
            .update(UpdateAccount {
                id: Some(account.id.clone()),
                email: Some("nena@example.com".into()),
                address: Some("Baguio".into()),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(updated.address.as_deref(), Some("Baguio"));
        assert_eq!(service.get(&account.id).await.unwrap(), updated);
    }

    #[tokio::test]
    async fn test_list_filters_by_name() {
        let service = AccountManager::new(KeyValueStore::in_memory());
        service.create(payload("Carmela", "c@example.com")).await.unwrap();
        service.create(payload("Ramon", "r@example.com")).await.unwrap();

        let found = service.list(Some("carm")).await.unwrap();
        assert_eq!(found.accounts.len(), 1);
        assert_eq!(found.accounts[0].name, "Carmela");
    }
}
