//! Core types for Aurora Goods.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod cart;
pub mod customer;
pub mod id;
pub mod session;

pub use cart::{CartItem, Product};
pub use customer::CustomerInfo;
pub use id::*;
pub use session::{SessionId, SessionIdError};
