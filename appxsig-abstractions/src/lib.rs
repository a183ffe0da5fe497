// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Shared interfaces and datatypes for the appxsig crates.
//!
//! This crate exists to prevent circular dependencies across:
//! - the validation core (`appxsig`)
//! - PKI capability providers (`appxsig-pki`, and platform-backed providers)
//!
//! It is intentionally kept small and stable: the single error kind, the
//! tri-state lookup result, and the `PkiCapability` trait the validation
//! core is written against.

pub mod capability;
pub mod error;
pub mod lookup;

pub use capability::{DecodedContent, PkiCapability, SignerId, TrustPolicy};
pub use error::{Result, SignatureError};
pub use lookup::Lookup;
