//! Sprint storage abstractions.
//!
//! This crate defines the storage contract for the submission core:
//! - one submission record per `(project, student)` pair (system of record)
//! - one append-only verification record per submission
//!
//! Design stance:
//! - The store is the unit of atomicity. Idempotent create, version
//!   compare-and-swap, and the verification-plus-terminal-flip composite are
//!   all decided under the store's own locks, so callers never race.
//! - The in-memory adapter is the reference implementation; a transactional
//!   backend slots in behind the same traits.

#![deny(unsafe_code)]

mod error;
pub mod memory;
mod traits;

pub use error::{StorageError, StorageResult};
pub use memory::InMemorySprintStorage;
pub use traits::{CreateOutcome, SprintStorage, SubmissionStore, VerificationStore};
