//! Outbound adapters implementing the driven ports.
//!
//! - **persistence**: PostgreSQL repositories and session store via Diesel
//! - **memory**: in-process stores for development and tests
//! - **security**: bcrypt password hashing
//!
//! Adapters translate between domain types and storage representations and
//! hold no business rules.

pub mod memory;
pub mod persistence;
pub mod security;
