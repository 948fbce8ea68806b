//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate key-value persistence into record-level operations.
//! - Keep front-ends decoupled from storage details.

pub mod record_store;
