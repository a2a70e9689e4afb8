//! # Domain Vocabulary
//!
//! This crate contains pure domain types with minimal dependencies (`serde`, `bitflags`, `strum`).
//! Keep it lean: no I/O or heavy logic, just data and simple helpers.

pub mod config;
pub mod constants;
pub mod domains;
