//! Core types for Agrow.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod catalog;
pub mod email;
pub mod id;
pub mod language;
pub mod phone;
pub mod price;

pub use catalog::{CROPS, Crop, REGIONS, Region, Season, cities_of, districts_of, find_crop, region};
pub use email::{Email, EmailError};
pub use id::{DetectionId, UserId};
pub use language::Language;
pub use phone::{PhoneError, PhoneNumber};
pub use price::Price;
