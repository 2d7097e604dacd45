//! # Scribe Core
//!
//! The domain layer of the Scribe blog API.
//! This crate contains the post model, payload validation and the
//! repository ports. It performs no I/O.

pub mod domain;
pub mod error;
pub mod ports;
pub mod validation;

pub use error::DomainError;
