//! # Yatube Shared
//!
//! Request/response types shared between the server and any frontend.

pub mod dto;
pub mod response;

pub use response::ErrorResponse;
