//! Shared building blocks for the dead man's switch contracts.
//!
//! This crate provides:
//! - [`fhe`]: ciphertext handle types and the [`FheExecutorClient`] used to
//!   reach an encrypted-arithmetic executor contract.
//! - [`ttl`]: storage time-to-live constants and bump helpers.

#![no_std]
#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]

pub mod fhe;
pub mod ttl;

pub use fhe::*;
