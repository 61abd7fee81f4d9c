//! Repository layer for catalog items.
//!
//! # Responsibility
//! - Own the item collection and issue item identities.
//! - Answer CRUD and filtered reads through the query translator.
//!
//! # Invariants
//! - Item ids are unique within one repository.
//! - Repositories never trigger persistence; callers snapshot explicitly.

pub mod item_repo;
