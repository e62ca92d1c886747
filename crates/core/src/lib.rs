//! Core library for the task management system
//!
//! This crate contains the core business logic, including:
//! - Task model and validation rules
//! - Repository abstraction with an in-memory store
//! - Task service orchestrating validation and storage

pub mod error;
pub mod task;

pub use error::Error;
pub type Result<T> = std::result::Result<T, Error>;
