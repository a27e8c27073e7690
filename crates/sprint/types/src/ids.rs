//! Identifier newtypes
//!
//! Every entity is addressed by a string-backed ID. Generated IDs are v4
//! UUIDs; externally-owned IDs (students, lecturers, certificates) are
//! accepted as whatever reference the owning service hands out.

use serde::{Deserialize, Serialize};

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(pub String);

        impl $name {
            /// Generate a new random id
            pub fn generate() -> Self {
                Self(uuid::Uuid::new_v4().to_string())
            }

            /// Create an id from a known string
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Short display form (first 8 chars)
            pub fn short(&self) -> String {
                self.0.chars().take(8).collect()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }
    };
}

string_id!(
    /// Unique identifier for a project brief
    ProjectId
);

string_id!(
    /// Identifier of one deliverable within a project brief
    DeliverableId
);

string_id!(
    /// Unique identifier for a project submission
    SubmissionId
);

string_id!(
    /// Identifier of a student account (owned by the identity service)
    StudentId
);

string_id!(
    /// Identifier of a lecturer account (owned by the identity service)
    LecturerId
);

string_id!(
    /// Identifier of a registered account of either role
    AccountId
);

string_id!(
    /// Unique identifier for a lecturer verification record
    VerificationId
);

string_id!(
    /// Opaque reference to an externally-issued certificate.
    ///
    /// Never validated here; whether the certificate exists is the
    /// credential service's contract.
    CertificateId
);
