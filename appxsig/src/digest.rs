// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Digest records declared by the package signature.
//!
//! The signed message's indirect data content carries one digest per package
//! region, keyed by a FourCC name. Validation threads a [`DigestMap`] through
//! the entry point for callers that verify package contents afterwards, but
//! does not populate it yet (see `validate`).

use std::collections::HashMap;

/// FourCC names of the digest records in a package signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum DigestName {
    /// "AXPC": package file records.
    Package = 0x4158_5043,
    /// "AXCD": zip central directory.
    CentralDirectory = 0x4158_4344,
    /// "AXCT": content types part.
    ContentTypes = 0x4158_4354,
    /// "AXBM": block map part.
    BlockMap = 0x4158_424d,
    /// "AXCI": code integrity catalog.
    CodeIntegrity = 0x4158_4349,
}

/// Digest-name to digest-bytes mapping passed in/out of validation.
pub type DigestMap = HashMap<DigestName, Vec<u8>>;
