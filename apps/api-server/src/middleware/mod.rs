//! Middleware modules.

pub mod error;
pub mod object_id;
