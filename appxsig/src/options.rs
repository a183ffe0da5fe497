// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::ops::BitOr;

/// Validation option bitmask.
///
/// Only the two flags below are recognized; all other bits are reserved and
/// ignored by the validation core.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidationOptions(u32);

impl ValidationOptions {
    /// Full validation; no overrides.
    pub const FULL: Self = Self(0);

    /// Bypass signature validation entirely. The stream is never read and
    /// the digest map is left untouched.
    pub const SKIP_SIGNATURE: Self = Self(0x0000_0001);

    /// Accept the package even when neither trust class matches.
    pub const ALLOW_UNKNOWN_ORIGIN: Self = Self(0x0000_0002);

    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    pub const fn bits(self) -> u32 {
        self.0
    }

    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for ValidationOptions {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn option_flags_combine_and_test_independently() {
        let options = ValidationOptions::SKIP_SIGNATURE | ValidationOptions::ALLOW_UNKNOWN_ORIGIN;
        assert!(options.contains(ValidationOptions::SKIP_SIGNATURE));
        assert!(options.contains(ValidationOptions::ALLOW_UNKNOWN_ORIGIN));
        assert!(!ValidationOptions::FULL.contains(ValidationOptions::SKIP_SIGNATURE));
        assert_eq!(ValidationOptions::from_bits(0x3), options);
    }

    #[test]
    fn reserved_bits_do_not_imply_recognized_flags() {
        let reserved = ValidationOptions::from_bits(0xffff_fff0);
        assert!(!reserved.contains(ValidationOptions::SKIP_SIGNATURE));
        assert!(!reserved.contains(ValidationOptions::ALLOW_UNKNOWN_ORIGIN));
    }
}
