//! Core domain types and utilities for the pressgate publishing platform.
//!
//! This crate provides the foundational types, error handling, and shared
//! utilities used throughout pressgate.

pub mod environment;
pub mod error;

pub use environment::{Environment, UnknownEnvironment};
pub use error::Result;
