//! # Yatube Core
//!
//! The domain layer of the Yatube blog backend.
//! This crate contains pure business logic with zero infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod ports;
pub mod services;

pub use error::DomainError;
