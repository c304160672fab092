//! # Core Runtime Module
//!
//! Provides foundational runtime infrastructure for the push platform core:
//! - The event relay between native broadcasts and application handlers
//! - Configuration management with fail-fast capability injection
//! - Logging and tracing infrastructure
//!
//! ## Overview
//!
//! This crate contains the core runtime utilities that other modules depend on.
//! It establishes the async runtime patterns, logging conventions, and the
//! broadcast relay mechanism used throughout the system.

pub mod config;
pub mod error;
pub mod events;
pub mod logging;

pub use error::{Error, Result};
