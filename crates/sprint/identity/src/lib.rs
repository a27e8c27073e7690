//! Account directory - the delegated identity and role check
//!
//! Authentication lives outside this platform; callers arrive with an
//! account reference they obtained elsewhere. This crate only answers two
//! questions: does the account exist, and does it hold the role an
//! operation requires. A single lecturer role covers all verification work;
//! there is no per-project reviewer assignment.

#![deny(unsafe_code)]

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sprint_types::{AccountId, LecturerId, ReviewerIdentity, SprintError, StudentId};
use std::collections::HashMap;
use std::sync::RwLock;
use thiserror::Error;

/// The role an account holds
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Student,
    Lecturer,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Student => write!(f, "student"),
            Role::Lecturer => write!(f, "lecturer"),
        }
    }
}

/// Whether an account may act at all
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountStatus {
    Active,
    Suspended,
}

/// A registered account
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Account {
    pub id: AccountId,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub status: AccountStatus,
    pub registered_at: DateTime<Utc>,
}

/// Request to register an account
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RegistrationRequest {
    pub id: AccountId,
    pub name: String,
    pub email: String,
    pub role: Role,
}

/// Identity-related errors
#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("Unknown account: {0}")]
    UnknownAccount(AccountId),

    #[error("Account {id} is a {actual}, operation requires a {required}")]
    RoleMismatch {
        id: AccountId,
        actual: Role,
        required: Role,
    },

    #[error("Account {0} is suspended")]
    Suspended(AccountId),

    #[error("Account already registered: {0}")]
    AlreadyRegistered(AccountId),

    #[error("Directory lock poisoned")]
    LockPoisoned,
}

impl From<IdentityError> for SprintError {
    fn from(err: IdentityError) -> Self {
        match err {
            IdentityError::LockPoisoned => {
                SprintError::Storage("directory lock poisoned".into())
            }
            IdentityError::AlreadyRegistered(id) => {
                SprintError::InvalidTransition(format!("account {id} is already registered"))
            }
            other => SprintError::Unauthorized(other.to_string()),
        }
    }
}

/// Directory of student and lecturer accounts
pub struct AccountDirectory {
    accounts: RwLock<HashMap<AccountId, Account>>,
}

impl AccountDirectory {
    /// Create an empty directory
    pub fn new() -> Self {
        Self {
            accounts: RwLock::new(HashMap::new()),
        }
    }

    /// Register an account under a caller-supplied id
    pub fn register(&self, request: RegistrationRequest) -> Result<Account, IdentityError> {
        let account = Account {
            id: request.id,
            name: request.name,
            email: request.email,
            role: request.role,
            status: AccountStatus::Active,
            registered_at: Utc::now(),
        };

        let mut accounts = self
            .accounts
            .write()
            .map_err(|_| IdentityError::LockPoisoned)?;
        if accounts.contains_key(&account.id) {
            return Err(IdentityError::AlreadyRegistered(account.id));
        }

        tracing::info!(account_id = %account.id, role = %account.role, "Registered account");
        accounts.insert(account.id.clone(), account.clone());
        Ok(account)
    }

    /// Lookup an account by id
    pub fn lookup(&self, id: &AccountId) -> Result<Option<Account>, IdentityError> {
        let accounts = self
            .accounts
            .read()
            .map_err(|_| IdentityError::LockPoisoned)?;
        Ok(accounts.get(id).cloned())
    }

    /// Suspend an account; suspended accounts fail every authorization
    pub fn suspend(&self, id: &AccountId) -> Result<(), IdentityError> {
        let mut accounts = self
            .accounts
            .write()
            .map_err(|_| IdentityError::LockPoisoned)?;
        let account = accounts
            .get_mut(id)
            .ok_or_else(|| IdentityError::UnknownAccount(id.clone()))?;
        account.status = AccountStatus::Suspended;
        tracing::warn!(account_id = %id, "Suspended account");
        Ok(())
    }

    /// The role held by an account, if it exists and is active
    pub fn role_of(&self, id: &AccountId) -> Result<Role, IdentityError> {
        let account = self.active_account(id)?;
        Ok(account.role)
    }

    /// Authorize an account for sprint work as a student
    pub fn authorize_student(&self, id: &StudentId) -> Result<Account, IdentityError> {
        self.require_role(&AccountId::new(id.0.clone()), Role::Student)
    }

    /// Authorize an account as a lecturer and return the identity
    /// verification rows are recorded under
    pub fn reviewer_identity(&self, id: &LecturerId) -> Result<ReviewerIdentity, IdentityError> {
        let account = self.require_role(&AccountId::new(id.0.clone()), Role::Lecturer)?;
        Ok(ReviewerIdentity {
            lecturer_id: id.clone(),
            name: account.name,
            email: account.email,
        })
    }

    fn require_role(&self, id: &AccountId, required: Role) -> Result<Account, IdentityError> {
        let account = self.active_account(id)?;
        if account.role != required {
            return Err(IdentityError::RoleMismatch {
                id: id.clone(),
                actual: account.role,
                required,
            });
        }
        Ok(account)
    }

    fn active_account(&self, id: &AccountId) -> Result<Account, IdentityError> {
        let account = self
            .lookup(id)?
            .ok_or_else(|| IdentityError::UnknownAccount(id.clone()))?;
        if account.status == AccountStatus::Suspended {
            return Err(IdentityError::Suspended(id.clone()));
        }
        Ok(account)
    }
}

impl Default for AccountDirectory {
    fn default() -> Self {
        Self::new()
    }
}
