//! Utility modules for Token Sync
//!
//! This module contains various utility functions organized by functionality:
//! - `files`: Output path derivation
//! - `http`: HTTP client utilities

pub mod files;
pub mod http;
