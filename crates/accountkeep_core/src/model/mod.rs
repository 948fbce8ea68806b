//! Domain model for account credential records.
//!
//! # Responsibility
//! - Define the canonical record shape shared by the store and front-ends.
//! - Keep the persisted JSON field names stable (`id`, `tags`, `type`,
//!   `login`, `password`).
//!
//! # Invariants
//! - Every record is identified by an opaque string `RecordId`.
//! - LDAP records never carry a password after an update.

pub mod account;
