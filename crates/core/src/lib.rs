//! Agrow Core - Shared domain types.
//!
//! This crate provides the types used by the Agrow web application:
//! - validated newtypes for emails, phone numbers and user IDs
//! - supported UI languages
//! - market prices as reported by the government price feed
//! - the static crop and region catalogs used during onboarding
//!
//! # Architecture
//!
//! The core crate contains only types and static data - no I/O, no sessions,
//! no HTTP clients. This keeps it lightweight and easy to test.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers and catalogs

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
