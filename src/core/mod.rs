//! Core library components.
//!
//! This module contains the reusable logic for key management, hybrid
//! encryption, envelope framing, key storage and configuration handling.

pub mod cipher;
pub mod codec;
pub mod config;
pub mod constants;
pub mod envelope;
pub mod keys;
pub mod recipient;
pub mod store;
pub mod types;
pub mod validation;
