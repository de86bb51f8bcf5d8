//! Security core: token codec, route classification, principal store and
//! the gate error taxonomy.
//!
//! The request-processing gates themselves live in [`crate::middleware`];
//! everything here is pure or store-backed logic the gates delegate to.

pub mod error;
pub mod principal;
pub mod routes;
pub mod token;
