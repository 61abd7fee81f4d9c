//! Catalog use-case services.
//!
//! # Responsibility
//! - Pair the item repository with the snapshot store chain.
//! - Keep menu/CLI layers decoupled from persistence details.

pub mod catalog_service;
