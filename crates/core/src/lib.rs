//! Aurora Goods Core - Shared types library.
//!
//! This crate provides common types used across all Aurora Goods components:
//! - `storefront` - Cart service backing the public storefront
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access, no HTTP
//! clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, sessions, and cart data

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
