//! Request-processing gates and their composer.
//!
//! Every inbound request runs through [`pipeline::security_pipeline`],
//! which drives the gates in a fixed order: authentication, password
//! policy, admin privilege. Each gate either lets the chain continue or
//! produces a terminal response that short-circuits everything after it,
//! including the handler.

pub mod admin;
pub mod authn;
pub mod password;
pub mod pipeline;
