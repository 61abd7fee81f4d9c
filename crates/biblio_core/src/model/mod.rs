//! Catalog domain model.
//!
//! # Responsibility
//! - Define the item records held by the catalog repository.
//! - Keep variant-specific fields in one closed tagged enum.
//!
//! # Invariants
//! - Every stored item carries a positive, repository-issued `ItemId`.
//! - Repository operations compare items by `id` only.

pub mod item;
