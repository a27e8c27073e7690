//! Sprint Domain Types
//!
//! A sprint is a bounded unit of simulated project work a student performs
//! against a fixed brief. This crate holds the shared vocabulary for the
//! platform:
//!
//! - **Project**: the immutable brief — ordered deliverables, stakeholder
//!   feedback (revealed only after an explicit gate), detailed requirements.
//! - **ProjectSubmission**: one student's run at one project. At most one
//!   exists per `(project, student)` pair, ever.
//! - **LecturerVerification**: the single, immutable reviewer decision that
//!   moves a submission into a terminal state.
//! - **SprintError**: the full error taxonomy. Every failure has a stable
//!   kind and one actionable message; nothing is downgraded to a generic
//!   success.
//!
//! # Design Principles
//!
//! 1. Submissions move through a fixed, small state machine. No user-defined
//!    workflow configuration.
//! 2. Terminal states are terminal. There is no re-open path after
//!    `verified` or `rejected`.
//! 3. The deliverable checklist is a personal tracker, never a gate.
//! 4. Certificate linkage is an opaque reference; validating it is the
//!    credential service's contract.

#![deny(unsafe_code)]

mod errors;
mod ids;
mod project;
mod submission;
mod verification;

pub use errors::*;
pub use ids::*;
pub use project::*;
pub use submission::*;
pub use verification::*;
