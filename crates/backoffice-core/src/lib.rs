//! # Back Office Core
//!
//! Domain entities, services, and ports for the authentication and
//! access-control subsystem.

pub mod domain;
pub mod error;
pub mod repositories;
pub mod security;
pub mod services;

pub use domain::*;
pub use error::DomainError;
