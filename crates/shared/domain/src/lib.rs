//! # Domain Models
//!
//! Wire types shared between the license server and its clients, plus the configuration schema.
//! Keep it lean: no I/O, networking, or registry logic, just data and simple helpers.
//!
//! JSON field names are part of the public contract and must not change:
//! a [`features::FeatureStatus`] serializes as `entitled`, `enabled`, `buy`, `try`, `learnMore`.

pub mod analytics;
pub mod config;
pub mod features;
pub mod instance;
pub mod license;
